use std::path::PathBuf;

use tauri::{window::Color, AppHandle, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder};
use url::Url;

use crate::{
    runtime_mode::MainContent, window_lifecycle::WindowKind, ShellState, MAIN_WINDOW_HEIGHT,
    MAIN_WINDOW_LABEL, MAIN_WINDOW_WIDTH,
};

const MAIN_WINDOW_TITLE: &str = "IcePlatform";
const MAIN_WINDOW_BACKGROUND: Color = Color(0x0a, 0x19, 0x2f, 0xff);

fn main_content_url(content: &MainContent) -> Result<WebviewUrl, String> {
    match content {
        MainContent::Bundled(page) => Ok(WebviewUrl::App(PathBuf::from(page))),
        MainContent::DevServer(raw) => Url::parse(raw)
            .map(WebviewUrl::External)
            .map_err(|error| format!("Failed to parse dev server url {raw}: {error}")),
    }
}

/// Builds the main window hidden; it is revealed by its first finished page load.
pub(crate) fn create_main_window<F>(
    app_handle: &AppHandle,
    content: &MainContent,
    log: F,
) -> Result<(), String>
where
    F: Fn(&str),
{
    if app_handle.get_webview_window(MAIN_WINDOW_LABEL).is_some() {
        log("main window already exists, skipping creation");
        return Ok(());
    }

    let url = main_content_url(content)?;
    log(&format!("creating main window with content {content:?}"));

    let builder = WebviewWindowBuilder::new(app_handle, MAIN_WINDOW_LABEL, url)
        .title(MAIN_WINDOW_TITLE)
        .inner_size(MAIN_WINDOW_WIDTH, MAIN_WINDOW_HEIGHT)
        .center()
        .visible(false)
        .background_color(MAIN_WINDOW_BACKGROUND);

    #[cfg(target_os = "macos")]
    let builder = builder
        .title_bar_style(tauri::TitleBarStyle::Overlay)
        .hidden_title(true);

    builder
        .build()
        .map_err(|error| format!("Failed to create main window: {error}"))?;
    app_handle
        .state::<ShellState>()
        .windows()
        .record_created(WindowKind::Main);
    Ok(())
}

pub fn show_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        log("main window not found when showing");
        return;
    };

    if let Err(error) = window.unminimize() {
        log(&format!("failed to unminimize main window: {error}"));
    }
    if let Err(error) = window.show() {
        log(&format!("failed to show main window: {error}"));
        return;
    }
    if let Err(error) = window.set_focus() {
        log(&format!("failed to focus main window: {error}"));
    }
    app_handle
        .state::<ShellState>()
        .windows()
        .record_shown(WindowKind::Main);
}

pub fn hide_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        log("main window not found when hiding");
        return;
    };

    if let Err(error) = window.hide() {
        log(&format!("failed to hide main window: {error}"));
        return;
    }
    app_handle
        .state::<ShellState>()
        .windows()
        .record_hidden(WindowKind::Main);
}

pub fn toggle_devtools<F>(window: &WebviewWindow, log: F)
where
    F: Fn(&str),
{
    if window.is_devtools_open() {
        window.close_devtools();
        log(&format!("closed devtools for window {}", window.label()));
    } else {
        window.open_devtools();
        log(&format!("opened devtools for window {}", window.label()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_content_loads_from_app_assets() {
        match main_content_url(&MainContent::Bundled("index.html")).expect("bundled url") {
            WebviewUrl::App(path) => assert_eq!(path, PathBuf::from("index.html")),
            other => panic!("unexpected url: {other:?}"),
        }
    }

    #[test]
    fn dev_server_content_loads_externally() {
        let content = MainContent::DevServer("http://localhost:5173/".to_string());
        match main_content_url(&content).expect("dev server url") {
            WebviewUrl::External(url) => assert_eq!(url.as_str(), "http://localhost:5173/"),
            other => panic!("unexpected url: {other:?}"),
        }
        assert!(main_content_url(&MainContent::DevServer("not a url".to_string())).is_err());
    }
}
