use tauri::{
    menu::{Menu, MenuItem, PredefinedMenuItem},
    tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent},
    AppHandle, Manager,
};

use crate::{
    append_desktop_log, shell_locale, tray_actions, tray_labels, tray_menu_handler,
    window_actions, TrayMenuState, TRAY_ID,
};

fn menu_item(
    app_handle: &AppHandle,
    id: &str,
    text: &str,
    item_name: &str,
) -> Result<MenuItem<tauri::Wry>, String> {
    MenuItem::with_id(app_handle, id, text, true, None::<&str>)
        .map_err(|error| format!("Failed to create tray {item_name} menu item: {error}"))
}

pub fn setup_tray(app_handle: &AppHandle) -> Result<(), String> {
    let shell_texts = shell_locale::current_shell_texts();

    let toggle_item = menu_item(
        app_handle,
        tray_actions::TRAY_MENU_TOGGLE_WINDOW,
        shell_texts.tray_hide,
        "toggle",
    )?;
    let companion_item = menu_item(
        app_handle,
        tray_actions::TRAY_MENU_TOGGLE_COMPANION,
        shell_texts.tray_hide_companion,
        "companion",
    )?;
    let check_update_item = menu_item(
        app_handle,
        tray_actions::TRAY_MENU_CHECK_UPDATE,
        shell_texts.tray_check_update,
        "check update",
    )?;
    let quit_item = menu_item(
        app_handle,
        tray_actions::TRAY_MENU_QUIT,
        shell_texts.tray_quit,
        "quit",
    )?;
    let separator = PredefinedMenuItem::separator(app_handle)
        .map_err(|error| format!("Failed to create tray separator menu item: {error}"))?;

    let menu = Menu::with_items(
        app_handle,
        &[
            &toggle_item,
            &companion_item,
            &check_update_item,
            &separator,
            &quit_item,
        ],
    )
    .map_err(|error| format!("Failed to build tray menu: {error}"))?;

    if !app_handle.manage(TrayMenuState {
        toggle_item: toggle_item.clone(),
        companion_item: companion_item.clone(),
        check_update_item: check_update_item.clone(),
        quit_item: quit_item.clone(),
    }) {
        append_desktop_log("tray menu state already exists, skipping manage");
    }

    let mut tray_builder = TrayIconBuilder::with_id(TRAY_ID)
        .menu(&menu)
        .tooltip("IcePlatform")
        .show_menu_on_left_click(false)
        .on_menu_event(|app, event| {
            tray_menu_handler::handle_tray_menu_event(app, event.id().as_ref())
        })
        .on_tray_icon_event(|tray, event| {
            if let TrayIconEvent::Click {
                button,
                button_state: MouseButtonState::Up,
                ..
            } = event
            {
                tray_labels::update_tray_menu_labels(tray.app_handle(), append_desktop_log);
                if button == MouseButton::Left {
                    window_actions::toggle_main_window(tray.app_handle(), append_desktop_log);
                }
            }
        });
    if let Some(icon) = app_handle.default_window_icon() {
        tray_builder = tray_builder.icon(icon.clone());
    }

    tray_builder
        .build(app_handle)
        .map_err(|error| format!("Failed to create tray icon: {error}"))?;

    tray_labels::update_tray_menu_labels(app_handle, append_desktop_log);
    Ok(())
}
