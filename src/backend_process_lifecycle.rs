//! Single-shot launcher for the backend child process.
//!
//! The shell does not restart a backend that exits on its own; the exit is
//! logged with its code and the handle is cleared.

use std::{
    io::{BufRead, BufReader, Read},
    process::{Child, Command, Stdio},
    sync::{Arc, Mutex},
    thread,
};

use crate::{
    append_backend_error_log, append_backend_log, app_types::lock_or_recover, build_debug_command,
    process_control, AtomicFlagGuard, BackendExit, BackendState, LaunchPlan,
    BACKEND_EXIT_POLL_INTERVAL,
};

#[cfg(target_os = "windows")]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BackendStatus {
    NotStarted,
    Running { pid: u32 },
    Exited { code: Option<i32> },
}

fn forward_output<R>(
    reader: R,
    stream_name: &'static str,
    prefix: &'static str,
    log: fn(&str),
) -> Result<(), String>
where
    R: Read + Send + 'static,
{
    thread::Builder::new()
        .name(format!("backend-{stream_name}"))
        .spawn(move || {
            for line in BufReader::new(reader).lines().map_while(Result::ok) {
                log(&format!("{prefix}{line}"));
            }
        })
        .map(|_| ())
        .map_err(|error| format!("Failed to spawn backend output forwarder: {error}"))
}

fn record_exit(last_exit: &Mutex<Option<BackendExit>>, exit: BackendExit) {
    *lock_or_recover(last_exit, "backend exit record") = Some(exit);
    append_backend_log(&format!(
        "backend process {} exited with code {}",
        exit.pid,
        exit.code
            .map(|code| code.to_string())
            .unwrap_or_else(|| "none".to_string())
    ));
}

fn spawn_exit_watcher(
    child: Arc<Mutex<Option<Child>>>,
    last_exit: Arc<Mutex<Option<BackendExit>>>,
    pid: u32,
) -> Result<(), String> {
    thread::Builder::new()
        .name("backend-exit-watcher".to_string())
        .spawn(move || loop {
            thread::sleep(BACKEND_EXIT_POLL_INTERVAL);

            let mut guard = lock_or_recover(&child, "backend process");
            let Some(process) = guard.as_mut() else {
                return;
            };
            if process.id() != pid {
                return;
            }

            match process.try_wait() {
                Ok(Some(status)) => {
                    *guard = None;
                    drop(guard);
                    record_exit(&last_exit, BackendExit { pid, code: status.code() });
                    return;
                }
                Ok(None) => {}
                Err(error) => {
                    append_backend_error_log(&format!(
                        "failed to poll backend process {pid}: {error}"
                    ));
                    return;
                }
            }
        })
        .map(|_| ())
        .map_err(|error| format!("Failed to spawn backend exit watcher: {error}"))
}

impl BackendState {
    /// Spawns the backend unless one is already live, returning its pid.
    pub(crate) fn start_backend_process(&self, plan: &LaunchPlan) -> Result<u32, String> {
        let Some(_spawning) = AtomicFlagGuard::try_set(&self.is_spawning) else {
            return Err("Backend spawn already in progress.".to_string());
        };

        let mut slot = lock_or_recover(&self.child, "backend process");
        if let Some(existing) = slot.as_ref() {
            append_backend_log(&format!(
                "backend process {} already running, skipping spawn",
                existing.id()
            ));
            return Ok(existing.id());
        }

        append_backend_log(&format!(
            "starting backend service: {:?}",
            build_debug_command(plan)
        ));

        let mut command = Command::new(&plan.cmd);
        command
            .args(&plan.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(cwd) = plan.cwd.as_ref().filter(|cwd| cwd.is_dir()) {
            command.current_dir(cwd);
        }
        #[cfg(target_os = "windows")]
        {
            use std::os::windows::process::CommandExt;
            command.creation_flags(CREATE_NO_WINDOW);
        }

        let mut child = command.spawn().map_err(|error| {
            format!(
                "Failed to spawn backend process {}: {}",
                plan.cmd.display(),
                error
            )
        })?;
        let pid = child.id();

        if let Some(stdout) = child.stdout.take() {
            if let Err(error) = forward_output(stdout, "stdout", "Backend: ", append_backend_log) {
                append_backend_error_log(&error);
            }
        }
        if let Some(stderr) = child.stderr.take() {
            if let Err(error) =
                forward_output(stderr, "stderr", "Backend Error: ", append_backend_error_log)
            {
                append_backend_error_log(&error);
            }
        }

        *slot = Some(child);
        drop(slot);
        *lock_or_recover(&self.last_exit, "backend exit record") = None;

        if let Err(error) = spawn_exit_watcher(self.child.clone(), self.last_exit.clone(), pid) {
            append_backend_error_log(&error);
        }
        append_backend_log(&format!("backend process started pid={pid}"));
        Ok(pid)
    }

    /// Terminates the live backend, if any. Returns whether a process was stopped.
    pub(crate) fn stop_backend(&self) -> bool {
        let Some(mut process) = lock_or_recover(&self.child, "backend process").take() else {
            return false;
        };

        let pid = process.id();
        crate::append_shutdown_log(&format!("stopping backend process {pid}"));
        let code = process_control::stop_child_process(&mut process);
        record_exit(&self.last_exit, BackendExit { pid, code });
        true
    }

    pub(crate) fn backend_status(&self) -> BackendStatus {
        if let Some(child) = lock_or_recover(&self.child, "backend process").as_ref() {
            return BackendStatus::Running { pid: child.id() };
        }
        match *lock_or_recover(&self.last_exit, "backend exit record") {
            Some(exit) => BackendStatus::Exited { code: exit.code },
            None => BackendStatus::NotStarted,
        }
    }
}
