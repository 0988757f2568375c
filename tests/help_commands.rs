//! Ensures the help catalog stays in sync with the commands the bot serves.
use punchclock_bot::commands::help::all_command_names;

#[test]
fn help_command_names_unique_and_present() {
    let names = all_command_names();
    let mut sorted = names.clone();
    sorted.sort();
    for w in sorted.windows(2) {
        assert_ne!(w[0], w[1], "Duplicate help command name: {}", w[0]);
    }
    // Every command the handler dispatches must have a help entry.
    let expected = [
        "start",
        "help",
        "ping",
        "checkin",
        "checkout",
        "status",
        "team",
        "library",
        "addmedia",
        "removemedia",
        "done",
        "skip",
        "cancel",
        "prefix",
    ];
    for name in expected {
        assert!(names.contains(&name), "Missing help entry for: {name}");
    }
    assert_eq!(names.len(), expected.len());
}
