use std::path::PathBuf;

use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindowBuilder};

use crate::{
    window_lifecycle::WindowKind, ShellState, SPLASH_PAGE, SPLASH_WINDOW_HEIGHT,
    SPLASH_WINDOW_LABEL, SPLASH_WINDOW_WIDTH,
};

pub fn create_splash_window<F>(app_handle: &AppHandle, log: F) -> Result<(), String>
where
    F: Fn(&str),
{
    let state = app_handle.state::<ShellState>();
    if !state.windows().record_created(WindowKind::Splash) {
        log("splash window already used once, not recreating");
        return Ok(());
    }

    WebviewWindowBuilder::new(
        app_handle,
        SPLASH_WINDOW_LABEL,
        WebviewUrl::App(PathBuf::from(SPLASH_PAGE)),
    )
    .inner_size(SPLASH_WINDOW_WIDTH, SPLASH_WINDOW_HEIGHT)
    .center()
    .decorations(false)
    .transparent(true)
    .always_on_top(true)
    .resizable(false)
    .skip_taskbar(true)
    .build()
    .map_err(|error| format!("Failed to create splash window: {error}"))?;

    state.windows().record_shown(WindowKind::Splash);
    log("splash window shown");
    Ok(())
}

pub fn destroy_splash_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    if let Some(window) = app_handle.get_webview_window(SPLASH_WINDOW_LABEL) {
        if let Err(error) = window.destroy() {
            log(&format!("failed to destroy splash window: {error}"));
        }
    }
    app_handle
        .state::<ShellState>()
        .windows()
        .record_destroyed(WindowKind::Splash);
}
