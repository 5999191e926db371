use tauri::{AppHandle, Manager};

use crate::{
    append_shutdown_log, bridge_bus::ShellBus, companion_window, exit_state, main_window,
    splash_window, tray_labels,
    window_lifecycle::{self, ActivationStep, LifecycleStep, WindowKind},
    ShellState, COMPANION_WINDOW_LABEL, MAIN_WINDOW_LABEL,
};

pub fn show_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    main_window::show_main_window(app_handle, &log);
    tray_labels::update_tray_menu_labels(app_handle, log);
}

pub fn hide_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    main_window::hide_main_window(app_handle, &log);
    tray_labels::update_tray_menu_labels(app_handle, log);
}

pub fn toggle_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str) + Copy,
{
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        activate_shell(app_handle, log);
        return;
    };

    match window.is_visible() {
        Ok(true) => hide_main_window(app_handle, log),
        Ok(false) => show_main_window(app_handle, log),
        Err(error) => log(&format!(
            "failed to read main window visibility in toggle_main_window: {error}"
        )),
    }
}

pub fn toggle_companion_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str) + Copy,
{
    let Some(window) = app_handle.get_webview_window(COMPANION_WINDOW_LABEL) else {
        if let Err(error) = companion_window::create_companion_window(app_handle, log) {
            log(&error);
        }
        tray_labels::update_tray_menu_labels(app_handle, log);
        return;
    };

    let state = app_handle.state::<ShellState>();
    let result = match window.is_visible() {
        Ok(true) => window.hide().map(|()| {
            state.windows().record_hidden(WindowKind::Companion);
        }),
        Ok(false) => window.show().map(|()| {
            state.windows().record_shown(WindowKind::Companion);
        }),
        Err(error) => Err(error),
    };
    if let Err(error) = result {
        log(&format!("failed to toggle companion window: {error}"));
    }
    tray_labels::update_tray_menu_labels(app_handle, log);
}

/// Brings the shell forward after an OS activation, a second launch or a
/// companion request. Missing windows are rebuilt.
pub fn activate_shell<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str) + Copy,
{
    let state = app_handle.state::<ShellState>();
    let steps = window_lifecycle::activation_steps(
        app_handle.get_webview_window(MAIN_WINDOW_LABEL).is_some(),
        app_handle.get_webview_window(COMPANION_WINDOW_LABEL).is_some(),
        state.config.companion_enabled,
    );

    for step in steps {
        match step {
            ActivationStep::RecreateMain => {
                log("main window missing on activation, recreating");
                let content = &state.profile.main_content;
                if let Err(error) = main_window::create_main_window(app_handle, content, log) {
                    log(&error);
                }
            }
            ActivationStep::ShowMain => show_main_window(app_handle, log),
            ActivationStep::RecreateCompanion => {
                log("companion window missing on activation, recreating");
                if let Err(error) = companion_window::create_companion_window(app_handle, log) {
                    log(&error);
                }
            }
        }
    }
}

/// Activates the shell and routes the main surface, waiting for a recreated
/// main window to finish loading first.
pub fn activate_shell_at<F>(app_handle: &AppHandle, route: &str, log: F) -> Result<(), String>
where
    F: Fn(&str) + Copy,
{
    activate_shell(app_handle, log);
    let deliverable = app_handle
        .state::<ShellState>()
        .windows()
        .route_after_activation(route.to_string());
    match deliverable {
        Some(route) => ShellBus::new(app_handle).navigate(&route),
        None => {
            log(&format!("holding navigation to {route} until main window loads"));
            Ok(())
        }
    }
}

pub fn handle_main_page_finished<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str) + Copy,
{
    let steps = app_handle
        .state::<ShellState>()
        .windows()
        .on_main_page_finished();
    for step in steps {
        match step {
            LifecycleStep::DestroySplash => {
                splash_window::destroy_splash_window(app_handle, log);
                log("main window painted, splash destroyed");
            }
            LifecycleStep::ShowMain => show_main_window(app_handle, log),
            LifecycleStep::Navigate(route) => {
                if let Err(error) = ShellBus::new(app_handle).navigate(&route) {
                    log(&error);
                }
            }
            LifecycleStep::HideMain | LifecycleStep::TerminateShell => {}
        }
    }
}

/// Returns whether the close should proceed.
pub fn handle_main_close_requested<F>(app_handle: &AppHandle, log: F) -> bool
where
    F: Fn(&str) + Copy,
{
    let state = app_handle.state::<ShellState>();
    let intent = exit_state::ShutdownIntent {
        quitting: state.is_quitting(),
        force_quit: exit_state::force_quit_marker_present(),
    };
    let step = state.windows().on_main_close_requested(intent);

    match step {
        LifecycleStep::TerminateShell => {
            state.mark_quitting();
            append_shutdown_log("main window closed with shutdown intent, exiting");
            app_handle.exit(0);
            true
        }
        _ => {
            hide_main_window(app_handle, log);
            false
        }
    }
}

pub fn handle_main_destroyed(app_handle: &AppHandle) {
    app_handle
        .state::<ShellState>()
        .windows()
        .record_destroyed(WindowKind::Main);
}
