use punchclock_bot::database::models::{Direction, Workload};
use punchclock_bot::interactions::ids::{
    self, MediaPick, parse_lib_add_id, parse_load_id, parse_pick_id,
};

#[test]
fn pick_id_round_trips_index() {
    let id = ids::pick_id(Direction::CheckIn, MediaPick::Index(3));
    assert_eq!(parse_pick_id(&id), Some((Direction::CheckIn, MediaPick::Index(3))));
}

#[test]
fn pick_id_round_trips_random() {
    let id = ids::pick_id(Direction::CheckOut, MediaPick::Random);
    assert_eq!(parse_pick_id(&id), Some((Direction::CheckOut, MediaPick::Random)));
}

#[test]
fn pick_id_bad() {
    assert!(parse_pick_id("att_pick_").is_none());
    assert!(parse_pick_id("att_pick_checkin_").is_none());
    assert!(parse_pick_id("att_pick_sideways_0").is_none());
    assert!(parse_pick_id("att_pick_checkin_x").is_none());
    assert!(parse_pick_id("lib_add_checkin").is_none());
}

#[test]
fn load_id_round_trips_every_workload() {
    for workload in [Workload::Low, Workload::Medium, Workload::High] {
        let id = ids::load_id(workload);
        assert_eq!(parse_load_id(&id), Some(Some(workload)));
    }
}

#[test]
fn load_id_skip_is_the_inner_none() {
    assert_eq!(parse_load_id(ids::ATT_LOAD_SKIP), Some(None));
}

#[test]
fn load_id_bad() {
    assert!(parse_load_id("att_load_extreme").is_none());
    assert!(parse_load_id("att_pick_checkin_0").is_none());
}

#[test]
fn lib_add_id_round_trips() {
    for direction in [Direction::CheckIn, Direction::CheckOut] {
        let id = ids::lib_add_id(direction);
        assert_eq!(parse_lib_add_id(&id), Some(direction));
    }
    assert!(parse_lib_add_id("lib_add_elsewhere").is_none());
}
