use tauri::AppHandle;
use tauri_plugin_global_shortcut::{GlobalShortcutExt, ShortcutState};

use crate::{append_desktop_log, bridge_bus::ShellBus};

/// Registers the accelerator that toggles the companion's inline input.
pub fn register_toggle_input_shortcut<F>(
    app_handle: &AppHandle,
    accelerator: &str,
    log: F,
) -> Result<(), String>
where
    F: Fn(&str),
{
    app_handle
        .global_shortcut()
        .on_shortcut(accelerator, |app, _shortcut, event| {
            if event.state != ShortcutState::Pressed {
                return;
            }
            if let Err(error) = ShellBus::new(app).toggle_companion_input() {
                append_desktop_log(&error);
            }
        })
        .map_err(|error| format!("Failed to register global shortcut {accelerator}: {error}"))?;
    log(&format!("registered global shortcut {accelerator}"));
    Ok(())
}

pub fn unregister_all_shortcuts<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    if let Err(error) = app_handle.global_shortcut().unregister_all() {
        log(&format!("failed to release global shortcuts: {error}"));
    }
}
