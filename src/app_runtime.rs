use tauri::{webview::PageLoadEvent, Manager, RunEvent, WindowEvent};

use crate::{
    append_desktop_log, append_startup_log, bridge_events, exit_events, exit_state,
    global_shortcut, logging, shell_config::ShellConfig, startup_task, tray_setup,
    window_actions,
    window_lifecycle::WindowKind,
    BackendState, ShellState, UpdateState, MAIN_WINDOW_LABEL,
};

pub(crate) fn run() {
    let config = ShellConfig::from_env();
    let backend_url = config.backend_url.clone();
    let toggle_input_shortcut = config.toggle_input_shortcut.clone();

    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
            append_desktop_log("second instance launched, activating existing shell");
            window_actions::activate_shell(app, append_desktop_log);
        }))
        .plugin(logging::build_log_plugin())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_process::init())
        .plugin(tauri_plugin_updater::Builder::new().build())
        .manage(BackendState::new(backend_url))
        .manage(ShellState::new(config))
        .manage(UpdateState::default())
        .invoke_handler(tauri::generate_handler![
            crate::desktop_bridge_commands::toggle_debug_surface,
            crate::desktop_bridge_commands::choose_directory,
            crate::desktop_bridge_commands::check_for_update,
            crate::desktop_bridge_commands::download_update,
            crate::desktop_bridge_commands::install_update,
            crate::desktop_bridge_commands::manual_update_install,
            crate::desktop_bridge_commands::quit_application,
        ])
        .on_window_event(|window, event| {
            let app_handle = window.app_handle();
            let Some(kind) = WindowKind::from_label(window.label()) else {
                return;
            };

            match (kind, event) {
                (WindowKind::Main, WindowEvent::CloseRequested { api, .. }) => {
                    if !window_actions::handle_main_close_requested(app_handle, append_desktop_log)
                    {
                        api.prevent_close();
                    }
                }
                (WindowKind::Main, WindowEvent::Focused(false)) => {
                    if let Ok(true) = window.is_minimized() {
                        if !app_handle.state::<ShellState>().is_quitting() {
                            window_actions::hide_main_window(app_handle, append_desktop_log);
                        }
                    }
                }
                (WindowKind::Main, WindowEvent::Destroyed) => {
                    window_actions::handle_main_destroyed(app_handle);
                }
                (kind, WindowEvent::Destroyed) => {
                    app_handle
                        .state::<ShellState>()
                        .windows()
                        .record_destroyed(kind);
                }
                _ => {}
            }
        })
        .on_page_load(|webview, payload| {
            if webview.label() != MAIN_WINDOW_LABEL {
                return;
            }
            match payload.event() {
                PageLoadEvent::Started => {
                    append_desktop_log(&format!("page-load started: {}", payload.url()));
                }
                PageLoadEvent::Finished => {
                    append_desktop_log(&format!("page-load finished: {}", payload.url()));
                    window_actions::handle_main_page_finished(
                        webview.app_handle(),
                        append_desktop_log,
                    );
                }
            }
        })
        .setup(move |app| {
            append_startup_log("desktop process starting");
            exit_state::clear_inherited_force_quit_marker(append_startup_log);
            let app_handle = app.handle().clone();

            #[cfg(desktop)]
            {
                app_handle.plugin(tauri_plugin_global_shortcut::Builder::new().build())?;
                if let Err(error) = global_shortcut::register_toggle_input_shortcut(
                    &app_handle,
                    &toggle_input_shortcut,
                    append_startup_log,
                ) {
                    append_startup_log(&error);
                }
            }

            if let Err(error) = tray_setup::setup_tray(&app_handle) {
                append_startup_log(&format!("failed to initialize tray: {error}"));
            }
            bridge_events::register_bridge_listeners(&app_handle);
            startup_task::run_startup(&app_handle, append_startup_log);
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| match event {
            RunEvent::ExitRequested { code, api, .. } => {
                exit_events::handle_exit_requested(app_handle, code, &api);
            }
            RunEvent::Exit => {
                exit_events::handle_exit_event(app_handle);
            }
            #[cfg(target_os = "macos")]
            RunEvent::Reopen {
                has_visible_windows: false,
                ..
            } => {
                window_actions::activate_shell(app_handle, append_desktop_log);
            }
            _ => {}
        });
}
