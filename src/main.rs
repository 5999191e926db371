#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_constants;
mod app_helpers;
mod app_runtime;
mod app_types;
mod backend_config;
mod backend_http;
mod backend_path;
mod backend_process_lifecycle;
mod backend_readiness;
mod bridge_bus;
mod bridge_catalog;
mod bridge_events;
mod companion_dock;
mod companion_window;
mod desktop_bridge_commands;
mod exit_events;
mod exit_state;
mod global_shortcut;
mod http_response;
mod logging;
mod main_window;
mod manual_update;
mod process_control;
mod runtime_mode;
mod shell_config;
mod shell_locale;
mod splash_window;
mod startup_task;
mod tray_actions;
mod tray_labels;
mod tray_menu_handler;
mod tray_setup;
mod ui_dispatch;
mod update_orchestrator;
mod updater_flow;
mod window_actions;
mod window_lifecycle;

pub(crate) use app_constants::*;
pub(crate) use app_helpers::{
    append_backend_error_log, append_backend_log, append_desktop_log, append_shutdown_log,
    append_startup_log, append_update_log, build_debug_command,
};
pub(crate) use app_types::{
    AtomicFlagGuard, BackendExit, BackendState, BridgeResult, LaunchPlan, ShellState,
    TrayMenuState, UpdateState,
};

fn main() {
    app_runtime::run();
}
