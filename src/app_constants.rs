use std::time::Duration;

pub(crate) const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000/";
pub(crate) const DEFAULT_DEV_SERVER_URL: &str = "http://localhost:5173/";
pub(crate) const BACKEND_RESOURCE_DIR: &str = "icePlatform";
pub(crate) const BACKEND_EXECUTABLE_STEM: &str = "icePlatform";

pub(crate) const MAIN_WINDOW_LABEL: &str = "main";
pub(crate) const SPLASH_WINDOW_LABEL: &str = "splash";
pub(crate) const COMPANION_WINDOW_LABEL: &str = "companion";
pub(crate) const BUNDLED_MAIN_PAGE: &str = "index.html";
pub(crate) const SPLASH_PAGE: &str = "splash.html";
pub(crate) const COMPANION_PAGE: &str = "companion.html";

pub(crate) const DEFAULT_READY_POLL_INTERVAL_MS: u64 = 100;
pub(crate) const READY_POLL_INTERVAL_MIN_MS: u64 = 50;
pub(crate) const READY_POLL_INTERVAL_MAX_MS: u64 = 10_000;
pub(crate) const READY_PROBE_TIMEOUT: Duration = Duration::from_millis(800);
pub(crate) const BACKEND_EXIT_POLL_INTERVAL: Duration = Duration::from_millis(250);

pub(crate) const DEFAULT_TOGGLE_INPUT_SHORTCUT: &str = "CommandOrControl+Shift+Space";
pub(crate) const DEFAULT_SHELL_LOCALE: &str = "zh-CN";
pub(crate) const TRAY_ID: &str = "iceplatform-tray";
pub(crate) const DESKTOP_LOG_FILE: &str = "desktop";
pub(crate) const DESKTOP_LOG_MAX_BYTES: u128 = 5 * 1024 * 1024;

pub(crate) const RUNTIME_MODE_ENV: &str = "ICE_RUNTIME_MODE";
pub(crate) const BACKEND_URL_ENV: &str = "ICE_BACKEND_URL";
pub(crate) const BACKEND_PATH_ENV: &str = "ICE_BACKEND_PATH";
pub(crate) const DEV_SERVER_URL_ENV: &str = "ICE_DEV_SERVER_URL";
pub(crate) const READY_POLL_INTERVAL_ENV: &str = "ICE_READY_POLL_INTERVAL_MS";
pub(crate) const READY_MAX_ATTEMPTS_ENV: &str = "ICE_READY_MAX_ATTEMPTS";
pub(crate) const COMPANION_ENV: &str = "ICE_COMPANION";
pub(crate) const TOGGLE_INPUT_SHORTCUT_ENV: &str = "ICE_TOGGLE_INPUT_SHORTCUT";
pub(crate) const FORCE_QUIT_ENV: &str = "ICE_FORCE_QUIT";
pub(crate) const SHELL_LOCALE_ENV: &str = "ICE_DESKTOP_LOCALE";

pub(crate) const MAIN_WINDOW_WIDTH: f64 = 1400.0;
pub(crate) const MAIN_WINDOW_HEIGHT: f64 = 900.0;
pub(crate) const SPLASH_WINDOW_WIDTH: f64 = 400.0;
pub(crate) const SPLASH_WINDOW_HEIGHT: f64 = 300.0;
pub(crate) const COMPANION_WINDOW_WIDTH: f64 = 300.0;
pub(crate) const COMPANION_WINDOW_HEIGHT: f64 = 120.0;
