use tauri::{AppHandle, Manager, WebviewWindow};
use tauri_plugin_dialog::DialogExt;

use crate::{
    append_desktop_log, append_shutdown_log, append_update_log,
    bridge_catalog::ManualInstallResult, exit_state, main_window, manual_update, shell_locale,
    updater_flow, BridgeResult, ShellState, MAIN_WINDOW_LABEL,
};

#[tauri::command]
pub(crate) fn toggle_debug_surface(webview_window: WebviewWindow) {
    main_window::toggle_devtools(&webview_window, append_desktop_log);
}

fn directory_dialog_title(prompt: Option<String>, default_title: &str) -> String {
    prompt
        .map(|prompt| prompt.trim().to_string())
        .filter(|prompt| !prompt.is_empty())
        .unwrap_or_else(|| default_title.to_string())
}

/// Resolves to `None` when the user cancels.
#[tauri::command]
pub(crate) async fn choose_directory(
    app_handle: AppHandle,
    prompt: Option<String>,
) -> Option<String> {
    let title = directory_dialog_title(
        prompt,
        shell_locale::current_shell_texts().choose_directory_title,
    );

    let mut dialog = app_handle
        .dialog()
        .file()
        .set_title(title)
        .set_can_create_directories(true);
    if let Some(main_window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) {
        dialog = dialog.set_parent(&main_window);
    }

    let picked = dialog.blocking_pick_folder()?;
    match picked.into_path() {
        Ok(path) => Some(path.to_string_lossy().to_string()),
        Err(error) => {
            append_desktop_log(&format!("failed to resolve chosen directory: {error}"));
            None
        }
    }
}

#[tauri::command]
pub(crate) async fn check_for_update(app_handle: AppHandle) -> BridgeResult {
    updater_flow::run_update_check(app_handle).await
}

#[tauri::command]
pub(crate) async fn download_update(app_handle: AppHandle) -> BridgeResult {
    updater_flow::run_update_download(app_handle).await
}

#[tauri::command]
pub(crate) fn install_update(app_handle: AppHandle) -> BridgeResult {
    updater_flow::run_update_install(&app_handle)
}

#[tauri::command]
pub(crate) async fn manual_update_install(app_handle: AppHandle) -> ManualInstallResult {
    let texts = shell_locale::current_shell_texts();
    manual_update::run_manual_install(
        || {
            app_handle
                .dialog()
                .file()
                .set_title(texts.choose_installer_title)
                .add_filter(texts.installer_filter, &manual_update::INSTALLER_EXTENSIONS)
                .blocking_pick_file()
                .and_then(|picked| picked.into_path().ok())
        },
        manual_update::open_with_default_handler,
        append_update_log,
    )
}

#[tauri::command]
pub(crate) fn quit_application(app_handle: AppHandle) {
    app_handle.state::<ShellState>().mark_quitting();
    exit_state::set_force_quit_marker();
    append_shutdown_log("surface requested application quit");
    app_handle.exit(0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_dialog_title_prefers_a_non_blank_prompt() {
        assert_eq!(
            directory_dialog_title(Some("  Pick a workspace ".to_string()), "Default"),
            "Pick a workspace"
        );
        assert_eq!(directory_dialog_title(Some("   ".to_string()), "Default"), "Default");
        assert_eq!(directory_dialog_title(None, "Default"), "Default");
    }
}
