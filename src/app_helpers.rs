use log::Level;

use crate::logging::{append_desktop_log_with_level, DesktopLogCategory};

pub(crate) fn append_desktop_log(message: &str) {
    append_desktop_log_with_level(DesktopLogCategory::Runtime, Level::Info, message);
}

pub(crate) fn append_startup_log(message: &str) {
    append_desktop_log_with_level(DesktopLogCategory::Startup, Level::Info, message);
}

pub(crate) fn append_backend_log(message: &str) {
    append_desktop_log_with_level(DesktopLogCategory::Backend, Level::Info, message);
}

pub(crate) fn append_backend_error_log(message: &str) {
    append_desktop_log_with_level(DesktopLogCategory::Backend, Level::Warn, message);
}

pub(crate) fn append_update_log(message: &str) {
    append_desktop_log_with_level(DesktopLogCategory::Update, Level::Info, message);
}

pub(crate) fn append_shutdown_log(message: &str) {
    append_desktop_log_with_level(DesktopLogCategory::Shutdown, Level::Info, message);
}

pub(crate) fn build_debug_command(plan: &crate::LaunchPlan) -> Vec<String> {
    let mut parts = vec![plan.cmd.to_string_lossy().to_string()];
    parts.extend(plan.args.clone());
    parts
}
