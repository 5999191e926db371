use tauri::{AppHandle, Manager};

use crate::{
    append_desktop_log, append_shutdown_log, append_update_log, tray_actions, updater_flow,
    window_actions, ShellState,
};

pub fn handle_tray_menu_event(app_handle: &AppHandle, menu_id: &str) {
    match tray_actions::action_from_menu_id(menu_id) {
        Some(tray_actions::TrayMenuAction::ToggleWindow) => {
            window_actions::toggle_main_window(app_handle, append_desktop_log)
        }
        Some(tray_actions::TrayMenuAction::ToggleCompanion) => {
            window_actions::toggle_companion_window(app_handle, append_desktop_log)
        }
        Some(tray_actions::TrayMenuAction::CheckUpdate) => {
            window_actions::show_main_window(app_handle, append_desktop_log);
            let update_app = app_handle.clone();
            tauri::async_runtime::spawn(async move {
                let result = updater_flow::run_update_check(update_app).await;
                if let Some(reason) = result.reason {
                    append_update_log(&format!("tray update check finished: {reason}"));
                }
            });
        }
        Some(tray_actions::TrayMenuAction::Quit) => {
            app_handle.state::<ShellState>().mark_quitting();
            append_shutdown_log("tray quit requested, exiting desktop process");
            app_handle.exit(0);
        }
        None => {}
    }
}
