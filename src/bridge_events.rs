//! Subscriptions for the fire-and-forget events surfaces send to the shell.

use tauri::{AppHandle, Listener, Manager};

use crate::{
    append_desktop_log, append_shutdown_log,
    bridge_catalog::{parse_event_payload, ActivationRequest, Channel, MoveRequest, ResizeRequest},
    companion_window, exit_state, ui_dispatch, window_actions, ShellState,
};

pub(crate) fn register_bridge_listeners(app_handle: &AppHandle) {
    for channel in Channel::inbound_events() {
        let listener_app = app_handle.clone();
        app_handle.listen_any(channel.wire_name(), move |event| {
            let payload = event.payload().to_string();
            let dispatched = ui_dispatch::run_on_main_thread_dispatch(
                &listener_app,
                channel.wire_name(),
                move |main_app| {
                    if let Err(error) = handle_inbound_event(main_app, channel, &payload) {
                        append_desktop_log(&format!(
                            "failed to handle {} event: {error}",
                            channel.wire_name()
                        ));
                    }
                },
            );
            if let Err(error) = dispatched {
                append_desktop_log(&error);
            }
        });
    }
}

fn handle_inbound_event(
    app_handle: &AppHandle,
    channel: Channel,
    payload: &str,
) -> Result<(), String> {
    match channel {
        Channel::RestartApplication => {
            app_handle.state::<ShellState>().mark_quitting();
            exit_state::set_force_quit_marker();
            append_shutdown_log("surface requested application restart");
            app_handle.request_restart();
            Ok(())
        }
        Channel::CompanionActivated => {
            let request = parse_event_payload::<Option<ActivationRequest>>(payload)
                .unwrap_or_default()
                .unwrap_or_default();
            window_actions::activate_shell_at(
                app_handle,
                request.route_or_default(),
                append_desktop_log,
            )
        }
        Channel::CompanionMove => {
            let request: MoveRequest = parse_event_payload(payload)?;
            companion_window::move_companion(app_handle, request)
        }
        Channel::CompanionResize => {
            let request: ResizeRequest = parse_event_payload(payload)?;
            companion_window::resize_companion(app_handle, request)
        }
        Channel::CompanionDock => companion_window::dock_companion(app_handle),
        Channel::CompanionUndock => companion_window::undock_companion(app_handle),
        other => Err(format!(
            "Channel {} is not an inbound event",
            other.wire_name()
        )),
    }
}
