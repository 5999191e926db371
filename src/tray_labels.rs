use tauri::{menu::MenuItem, AppHandle, Manager};

use crate::{
    shell_locale::{self, ShellTexts},
    tray_actions, TrayMenuState, COMPANION_WINDOW_LABEL, MAIN_WINDOW_LABEL,
};

fn set_menu_text_safe<F>(item: &MenuItem<tauri::Wry>, text: &str, item_name: &str, log: F)
where
    F: Fn(&str),
{
    if let Err(error) = item.set_text(text) {
        log(&format!(
            "failed to update tray menu text for {}: {}",
            item_name, error
        ));
    }
}

pub(crate) fn toggle_labels(
    texts: &ShellTexts,
    main_visible: bool,
    companion_visible: bool,
) -> (&'static str, &'static str) {
    let main_label = if main_visible {
        texts.tray_hide
    } else {
        texts.tray_show
    };
    let companion_label = if companion_visible {
        texts.tray_hide_companion
    } else {
        texts.tray_show_companion
    };
    (main_label, companion_label)
}

fn window_visible(app_handle: &AppHandle, label: &str) -> bool {
    app_handle
        .get_webview_window(label)
        .and_then(|window| window.is_visible().ok())
        .unwrap_or(false)
}

pub fn update_tray_menu_labels<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(tray_state) = app_handle.try_state::<TrayMenuState>() else {
        return;
    };

    let shell_texts = shell_locale::current_shell_texts();
    let (main_label, companion_label) = toggle_labels(
        &shell_texts,
        window_visible(app_handle, MAIN_WINDOW_LABEL),
        window_visible(app_handle, COMPANION_WINDOW_LABEL),
    );

    set_menu_text_safe(
        &tray_state.toggle_item,
        main_label,
        tray_actions::TRAY_MENU_TOGGLE_WINDOW,
        &log,
    );
    set_menu_text_safe(
        &tray_state.companion_item,
        companion_label,
        tray_actions::TRAY_MENU_TOGGLE_COMPANION,
        &log,
    );
    set_menu_text_safe(
        &tray_state.check_update_item,
        shell_texts.tray_check_update,
        tray_actions::TRAY_MENU_CHECK_UPDATE,
        &log,
    );
    set_menu_text_safe(
        &tray_state.quit_item,
        shell_texts.tray_quit,
        tray_actions::TRAY_MENU_QUIT,
        &log,
    );
}
