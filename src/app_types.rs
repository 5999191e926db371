use std::{
    path::PathBuf,
    process::Child,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, MutexGuard,
    },
};
use tauri::menu::MenuItem;

use crate::{
    backend_readiness::ProbeCancellation, companion_dock::CompanionDock, exit_state,
    runtime_mode::RuntimeProfile, shell_config::ShellConfig, update_orchestrator,
    window_lifecycle::WindowRegistry, DEFAULT_BACKEND_URL,
};

#[derive(Clone)]
pub(crate) struct TrayMenuState {
    pub(crate) toggle_item: MenuItem<tauri::Wry>,
    pub(crate) companion_item: MenuItem<tauri::Wry>,
    pub(crate) check_update_item: MenuItem<tauri::Wry>,
    pub(crate) quit_item: MenuItem<tauri::Wry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LaunchPlan {
    pub(crate) cmd: PathBuf,
    pub(crate) args: Vec<String>,
    pub(crate) cwd: Option<PathBuf>,
}

impl LaunchPlan {
    /// The backend runs from its own bundle directory.
    pub(crate) fn for_executable(executable: PathBuf) -> Self {
        let cwd = executable.parent().map(PathBuf::from);
        Self {
            cmd: executable,
            args: Vec::new(),
            cwd,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BackendExit {
    pub(crate) pid: u32,
    pub(crate) code: Option<i32>,
}

#[derive(Debug)]
pub(crate) struct BackendState {
    pub(crate) child: Arc<Mutex<Option<Child>>>,
    pub(crate) last_exit: Arc<Mutex<Option<BackendExit>>>,
    pub(crate) backend_url: String,
    pub(crate) probe_cancellation: Mutex<Option<ProbeCancellation>>,
    pub(crate) is_spawning: AtomicBool,
}

impl BackendState {
    pub(crate) fn new(backend_url: String) -> Self {
        Self {
            child: Arc::new(Mutex::new(None)),
            last_exit: Arc::new(Mutex::new(None)),
            backend_url,
            probe_cancellation: Mutex::new(None),
            is_spawning: AtomicBool::new(false),
        }
    }

    pub(crate) fn install_probe_cancellation(&self) -> ProbeCancellation {
        let cancellation = ProbeCancellation::default();
        let mut slot = lock_or_recover(&self.probe_cancellation, "probe cancellation");
        if let Some(previous) = slot.replace(cancellation.clone()) {
            previous.cancel();
        }
        cancellation
    }

    pub(crate) fn cancel_readiness_probe(&self) {
        if let Some(cancellation) =
            lock_or_recover(&self.probe_cancellation, "probe cancellation").take()
        {
            cancellation.cancel();
        }
    }
}

impl Default for BackendState {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL.to_string())
    }
}

/// Shell-wide state owned by the window, dock and shutdown logic.
pub(crate) struct ShellState {
    pub(crate) config: ShellConfig,
    pub(crate) profile: RuntimeProfile,
    pub(crate) exit_state: Mutex<exit_state::ExitStateMachine>,
    pub(crate) windows: Mutex<WindowRegistry>,
    pub(crate) dock: Mutex<CompanionDock>,
}

impl ShellState {
    pub(crate) fn new(config: ShellConfig) -> Self {
        let profile = RuntimeProfile::for_mode(config.runtime_mode, &config.dev_server_url);
        Self {
            config,
            profile,
            exit_state: Mutex::new(exit_state::ExitStateMachine::default()),
            windows: Mutex::new(WindowRegistry::default()),
            dock: Mutex::new(CompanionDock::default()),
        }
    }

    pub(crate) fn exit_state(&self) -> MutexGuard<'_, exit_state::ExitStateMachine> {
        lock_or_recover(&self.exit_state, "exit state")
    }

    pub(crate) fn windows(&self) -> MutexGuard<'_, WindowRegistry> {
        lock_or_recover(&self.windows, "window registry")
    }

    pub(crate) fn dock(&self) -> MutexGuard<'_, CompanionDock> {
        lock_or_recover(&self.dock, "companion dock")
    }

    pub(crate) fn mark_quitting(&self) {
        self.exit_state().mark_quitting();
    }

    pub(crate) fn is_quitting(&self) -> bool {
        self.exit_state().is_quitting()
    }
}

/// Update lifecycle plus the artifacts the updater hands back between steps.
#[derive(Default)]
pub(crate) struct UpdateState {
    pub(crate) orchestrator: Mutex<update_orchestrator::UpdateOrchestrator>,
    pub(crate) pending_update: Mutex<Option<tauri_plugin_updater::Update>>,
    pub(crate) downloaded_bytes: Mutex<Option<Vec<u8>>>,
}

impl UpdateState {
    pub(crate) fn orchestrator(&self) -> MutexGuard<'_, update_orchestrator::UpdateOrchestrator> {
        lock_or_recover(&self.orchestrator, "update orchestrator")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub(crate) struct BridgeResult {
    pub(crate) ok: bool,
    pub(crate) reason: Option<String>,
}

impl BridgeResult {
    pub(crate) fn ok() -> Self {
        Self {
            ok: true,
            reason: None,
        }
    }

    pub(crate) fn failed(reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            reason: Some(reason.into()),
        }
    }
}

impl From<Result<(), String>> for BridgeResult {
    fn from(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self::ok(),
            Err(reason) => Self::failed(reason),
        }
    }
}

pub(crate) fn lock_or_recover<'a, T>(mutex: &'a Mutex<T>, name: &str) -> MutexGuard<'a, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(error) => {
            crate::append_desktop_log(&format!("{name} lock poisoned, recovering: {error}"));
            error.into_inner()
        }
    }
}

pub(crate) struct AtomicFlagGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> AtomicFlagGuard<'a> {
    pub(crate) fn try_set(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(Self { flag })
    }
}

impl Drop for AtomicFlagGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use std::{
        path::Path,
        sync::atomic::{AtomicBool, Ordering},
    };

    use super::*;

    #[test]
    fn atomic_flag_guard_try_set_rejects_double_set_until_drop() {
        let flag = AtomicBool::new(false);

        let guard = AtomicFlagGuard::try_set(&flag).expect("first set should succeed");
        assert!(flag.load(Ordering::Relaxed));
        assert!(AtomicFlagGuard::try_set(&flag).is_none());

        drop(guard);
        assert!(!flag.load(Ordering::Relaxed));
        assert!(AtomicFlagGuard::try_set(&flag).is_some());
    }

    #[test]
    fn launch_plan_runs_from_executable_directory() {
        let plan = LaunchPlan::for_executable(PathBuf::from("/res/icePlatform/icePlatform"));
        assert_eq!(plan.cwd.as_deref(), Some(Path::new("/res/icePlatform")));
        assert!(plan.args.is_empty());
    }

    #[test]
    fn installing_a_new_probe_cancellation_cancels_the_previous_one() {
        let state = BackendState::default();
        let first = state.install_probe_cancellation();
        let second = state.install_probe_cancellation();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());

        state.cancel_readiness_probe();
        assert!(second.is_cancelled());
    }

    #[test]
    fn bridge_result_from_result() {
        assert_eq!(BridgeResult::from(Ok(())), BridgeResult::ok());
        assert_eq!(
            BridgeResult::from(Err("busy".to_string())),
            BridgeResult::failed("busy")
        );
    }
}
