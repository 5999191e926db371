use tauri::{AppHandle, ExitRequestApi, Manager};

use crate::{
    append_shutdown_log,
    exit_state::{self, CleanupStep},
    global_shortcut, BackendState, ShellState,
};

/// Closing the last window is not an exit: the tray keeps the shell alive.
/// Explicit exits (`exit`, `restart`) carry a code and go through.
pub fn handle_exit_requested(app_handle: &AppHandle, code: Option<i32>, api: &ExitRequestApi) {
    let state = app_handle.state::<ShellState>();
    if !exit_state::should_allow_exit(code, state.is_quitting()) {
        append_shutdown_log("last window closed without shutdown intent, keeping shell alive");
        api.prevent_exit();
        return;
    }

    state.mark_quitting();
    append_shutdown_log(&format!(
        "exit requested with code {}",
        code.map(|code| code.to_string())
            .unwrap_or_else(|| "none".to_string())
    ));
}

pub fn handle_exit_event(app_handle: &AppHandle) {
    let steps = app_handle
        .state::<ShellState>()
        .exit_state()
        .begin_exit_cleanup();
    if steps.is_empty() {
        return;
    }

    append_shutdown_log("running exit cleanup");
    run_cleanup_steps(&steps, &app_handle.state::<BackendState>(), || {
        global_shortcut::unregister_all_shortcuts(app_handle, append_shutdown_log)
    });
}

fn run_cleanup_steps<R>(
    steps: &[CleanupStep],
    backend_state: &BackendState,
    release_shortcuts: R,
) where
    R: FnOnce(),
{
    let mut release_shortcuts = Some(release_shortcuts);
    for step in steps {
        match step {
            CleanupStep::CancelReadinessProbe => backend_state.cancel_readiness_probe(),
            CleanupStep::ReleaseShortcuts => {
                if let Some(release) = release_shortcuts.take() {
                    release();
                }
            }
            CleanupStep::StopBackend => {
                append_shutdown_log(&format!(
                    "backend status at exit: {:?}",
                    backend_state.backend_status()
                ));
                if !backend_state.stop_backend() {
                    append_shutdown_log("no live backend process to stop");
                }
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::{cell::Cell, path::PathBuf};

    use super::*;
    use crate::{
        backend_process_lifecycle::BackendStatus, exit_state::ExitStateMachine, LaunchPlan,
    };

    #[test]
    fn cleanup_cancels_probe_and_stops_live_backend_once() {
        let backend_state = BackendState::default();
        let cancellation = backend_state.install_probe_cancellation();
        let pid = backend_state
            .start_backend_process(&LaunchPlan {
                cmd: PathBuf::from("/bin/sh"),
                args: vec!["-c".to_string(), "sleep 30".to_string()],
                cwd: None,
            })
            .expect("spawn backend");
        assert_eq!(
            backend_state.backend_status(),
            BackendStatus::Running { pid }
        );

        let mut exit_state = ExitStateMachine::default();
        let releases = Cell::new(0);
        for _ in 0..2 {
            let steps = exit_state.begin_exit_cleanup();
            run_cleanup_steps(&steps, &backend_state, || releases.set(releases.get() + 1));
        }

        assert!(cancellation.is_cancelled());
        assert_eq!(releases.get(), 1);
        assert!(matches!(
            backend_state.backend_status(),
            BackendStatus::Exited { .. }
        ));
        assert!(backend_state.child.lock().expect("child lock").is_none());
    }
}
