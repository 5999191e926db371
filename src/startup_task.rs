use std::path::Path;

use tauri::{AppHandle, Manager};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};

use crate::{
    append_backend_error_log, append_backend_log, append_startup_log, backend_path,
    backend_readiness, companion_window, main_window,
    runtime_mode::{self, StartupStep},
    shell_locale::{self, ShellTexts},
    splash_window, BackendState, LaunchPlan, ShellState,
};

/// The path line is left out when the executable could not be located at all.
pub(crate) fn spawn_failure_message(
    texts: &ShellTexts,
    error: &str,
    path: Option<&Path>,
) -> String {
    match path {
        Some(path) => format!(
            "{}\n{}\n{} {}",
            texts.spawn_failed_body,
            error,
            texts.spawn_failed_path,
            path.display()
        ),
        None => format!("{}\n{}", texts.spawn_failed_body, error),
    }
}

fn show_spawn_failure(app_handle: &AppHandle, error: &str, path: Option<&Path>) {
    let texts = shell_locale::current_shell_texts();
    app_handle
        .dialog()
        .message(spawn_failure_message(&texts, error, path))
        .title(texts.spawn_failed_title)
        .kind(MessageDialogKind::Error)
        .blocking_show();
}

fn launch_backend(app_handle: &AppHandle) {
    let shell_state = app_handle.state::<ShellState>();
    let resource_dir = app_handle.path().resource_dir().ok();
    let path = match backend_path::resolve_backend_path(
        shell_state.config.backend_path_override.as_deref(),
        resource_dir.as_deref(),
    ) {
        Ok(path) => path,
        Err(error) => {
            append_backend_error_log(&error);
            show_spawn_failure(app_handle, &error, None);
            return;
        }
    };

    match backend_path::ensure_executable(&path) {
        Ok(true) => append_backend_log(&format!("marked {} as executable", path.display())),
        Ok(false) => {}
        Err(error) => append_backend_error_log(&error),
    }

    let plan = LaunchPlan::for_executable(path.clone());
    if let Err(error) = app_handle.state::<BackendState>().start_backend_process(&plan) {
        append_backend_error_log(&error);
        show_spawn_failure(app_handle, &error, Some(&path));
    }
}

fn start_readiness_probe(app_handle: &AppHandle, silent: bool) {
    let shell_state = app_handle.state::<ShellState>();
    let backend_state = app_handle.state::<BackendState>();
    let cancellation = backend_state.install_probe_cancellation();

    let result = backend_readiness::spawn_readiness_probe(
        &backend_state.backend_url,
        silent,
        || append_startup_log("backend ready"),
        shell_state.config.probe_policy,
        cancellation,
        append_startup_log,
    );
    if let Err(error) = result {
        append_startup_log(&error);
    }
}

/// Runs the startup plan. Nothing here waits on backend readiness: the
/// backend launch and the probe run off the event loop.
pub(crate) fn run_startup<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str) + Copy,
{
    let state = app_handle.state::<ShellState>();
    log(&format!(
        "starting shell in {} mode",
        state.profile.mode.as_str()
    ));

    for step in runtime_mode::startup_plan(&state.profile, state.config.companion_enabled) {
        match step {
            StartupStep::ShowSplash => {
                if let Err(error) = splash_window::create_splash_window(app_handle, log) {
                    log(&error);
                }
            }
            StartupStep::SpawnBackend => {
                let launch_app = app_handle.clone();
                tauri::async_runtime::spawn_blocking(move || launch_backend(&launch_app));
            }
            StartupStep::CreateMain(content) => {
                if let Err(error) = main_window::create_main_window(app_handle, &content, log) {
                    log(&error);
                }
            }
            StartupStep::CreateCompanion => {
                if let Err(error) = companion_window::create_companion_window(app_handle, log) {
                    log(&error);
                }
            }
            StartupStep::ProbeBackend { silent } => start_readiness_probe(app_handle, silent),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    const PACKAGED_BACKEND: &str =
        "/Applications/IcePlatform.app/Contents/Resources/icePlatform/icePlatform";

    #[test]
    fn spawn_failure_message_names_error_and_path() {
        let texts = shell_locale::shell_texts_for_locale("zh-CN");
        let path = PathBuf::from(PACKAGED_BACKEND);
        let message = spawn_failure_message(
            &texts,
            "No such file or directory (os error 2)",
            Some(&path),
        );
        let path_line = format!("路径: {PACKAGED_BACKEND}");
        assert_eq!(
            message.lines().collect::<Vec<_>>(),
            vec![
                "无法运行后端服务:",
                "No such file or directory (os error 2)",
                path_line.as_str(),
            ]
        );
    }

    #[test]
    fn spawn_failure_message_without_resolved_path_still_names_error() {
        let texts = shell_locale::shell_texts_for_locale("en-US");
        let message = spawn_failure_message(
            &texts,
            "Failed to locate the application resource directory.",
            None,
        );
        assert_eq!(
            message,
            format!(
                "{}\nFailed to locate the application resource directory.",
                texts.spawn_failed_body
            )
        );
    }
}
