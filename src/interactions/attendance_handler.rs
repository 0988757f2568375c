//! Handles all component interactions for the attendance flows.
//!
//! Every button acts on the clicking user's own session and record, never on
//! the message owner's, so a shared menu is safe: the worst a second user
//! can do is restyle the message while running their own flow.

use super::util::{defer_component, edit_component, followup_component};
use crate::commands::attendance::{logic, ui};
use crate::commands::status;
use crate::database::models::Direction;
use crate::interactions::ids;
use crate::model::AppState;
use chrono::Utc;
use serenity::builder::{CreateInteractionResponseFollowup, EditInteractionResponse};
use serenity::model::application::ComponentInteraction;
use serenity::prelude::Context;
use std::sync::Arc;

fn display_name(component: &ComponentInteraction) -> String {
    component
        .user
        .global_name
        .clone()
        .unwrap_or_else(|| component.user.name.clone())
}

pub async fn handle(ctx: &Context, component: &mut ComponentInteraction, app_state: Arc<AppState>) {
    defer_component(ctx, component).await;
    let user_id = component.user.id.get();
    let custom_id = component.data.custom_id.clone();

    match custom_id.as_str() {
        // Home-menu buttons answer with a fresh message so the shared menu
        // stays usable for everyone else.
        ids::ATT_MENU_CHECKIN => open_flow(ctx, component, &app_state, Direction::CheckIn).await,
        ids::ATT_MENU_CHECKOUT => open_flow(ctx, component, &app_state, Direction::CheckOut).await,
        ids::ATT_MENU_STATUS => {
            let record = app_state.attendance.get(user_id).await;
            let embed =
                status::ui::create_status_embed(&display_name(component), record.as_ref(), Utc::now());
            followup_component(
                ctx,
                component,
                "att.status",
                CreateInteractionResponseFollowup::new().embed(embed),
            )
            .await;
        }
        ids::ATT_CANCEL => {
            app_state.sessions.reset(user_id).await;
            edit_component(
                ctx,
                component,
                "att.cancel",
                EditInteractionResponse::new()
                    .content("🚫 Cancelled. Nothing was changed.")
                    .embeds(Vec::new())
                    .components(Vec::new()),
            )
            .await;
        }
        other => {
            if let Some((direction, pick)) = ids::parse_pick_id(other) {
                handle_pick(ctx, component, &app_state, direction, pick).await;
            } else if let Some(choice) = ids::parse_load_id(other) {
                handle_confirm(ctx, component, &app_state, choice).await;
            }
        }
    }
}

async fn open_flow(
    ctx: &Context,
    component: &ComponentInteraction,
    app_state: &AppState,
    direction: Direction,
) {
    let user_id = component.user.id.get();
    let builder = match logic::begin_flow(app_state, user_id, direction).await {
        Ok(menu) => {
            let (embed, components) = ui::create_media_menu(menu.direction, &menu.items);
            CreateInteractionResponseFollowup::new()
                .embed(embed)
                .components(components)
        }
        Err(e) => CreateInteractionResponseFollowup::new().content(ui::engine_error_text(&e)),
    };
    followup_component(ctx, component, "att.open", builder).await;
}

async fn handle_pick(
    ctx: &Context,
    component: &ComponentInteraction,
    app_state: &AppState,
    direction: Direction,
    pick: ids::MediaPick,
) {
    let user_id = component.user.id.get();
    let builder = match logic::pin_media(app_state, user_id, direction, pick).await {
        Ok((index, item)) => {
            let (embed, components) = ui::create_workload_menu(direction, &item, index);
            EditInteractionResponse::new().embed(embed).components(components)
        }
        Err(e) => EditInteractionResponse::new()
            .content(ui::engine_error_text(&e))
            .embeds(Vec::new())
            .components(Vec::new()),
    };
    edit_component(ctx, component, "att.pick", builder).await;
}

async fn handle_confirm(
    ctx: &Context,
    component: &ComponentInteraction,
    app_state: &AppState,
    choice: Option<crate::database::models::Workload>,
) {
    let user_id = component.user.id.get();
    let username = display_name(component);

    match logic::confirm(app_state, user_id, &username, choice).await {
        Ok(report) => {
            edit_component(
                ctx,
                component,
                "att.confirm",
                EditInteractionResponse::new()
                    .embed(ui::transition_embed(&report))
                    .components(Vec::new()),
            )
            .await;
            // Reaction dispatch, with a plain-text stand-in when the media
            // message bounces or the pinned index went stale.
            match &report.media {
                Some(item) => {
                    let sent =
                        followup_component(ctx, component, "att.media", ui::media_followup(item))
                            .await;
                    if !sent {
                        followup_component(
                            ctx,
                            component,
                            "att.media.fallback",
                            CreateInteractionResponseFollowup::new()
                                .content(ui::media_fallback_text(Some(item))),
                        )
                        .await;
                    }
                }
                None => {
                    followup_component(
                        ctx,
                        component,
                        "att.media.stale",
                        CreateInteractionResponseFollowup::new()
                            .content(ui::media_fallback_text(None)),
                    )
                    .await;
                }
            }
        }
        Err(e) => {
            edit_component(
                ctx,
                component,
                "att.confirm.err",
                EditInteractionResponse::new()
                    .content(ui::engine_error_text(&e))
                    .embeds(Vec::new())
                    .components(Vec::new()),
            )
            .await;
        }
    }
}
