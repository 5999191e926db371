use std::process::Child;
#[cfg(target_os = "windows")]
use std::process::{Command, Stdio};

/// Terminates the child and reaps it, returning its exit code if it had one.
pub(crate) fn stop_child_process(child: &mut Child) -> Option<i32> {
    stop_child_process_with(child, terminate_process_tree)
}

/// A failed tree termination falls back to killing the direct child, so the
/// final `wait` never blocks on a process that is still running.
fn stop_child_process_with<K>(child: &mut Child, terminate: K) -> Option<i32>
where
    K: FnOnce(&mut Child) -> Result<(), String>,
{
    if let Err(error) = terminate(child) {
        crate::append_shutdown_log(&format!(
            "{error}; falling back to killing backend process {}",
            child.id()
        ));
        if let Err(error) = child.kill() {
            crate::append_shutdown_log(&format!(
                "failed to kill backend process {}: {}",
                child.id(),
                error
            ));
        }
    }

    child.wait().ok().and_then(|status| status.code())
}

#[cfg(target_os = "windows")]
fn terminate_process_tree(child: &mut Child) -> Result<(), String> {
    let pid = child.id();
    let status = Command::new("taskkill")
        .args(["/pid", &pid.to_string(), "/t", "/f"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .stdin(Stdio::null())
        .status()
        .map_err(|error| format!("Failed to run taskkill for backend process {pid}: {error}"))?;
    if status.success() {
        Ok(())
    } else {
        Err(format!(
            "taskkill for backend process {pid} exited with {status}"
        ))
    }
}

#[cfg(not(target_os = "windows"))]
fn terminate_process_tree(child: &mut Child) -> Result<(), String> {
    child
        .kill()
        .map_err(|error| format!("Failed to signal backend process {}: {error}", child.id()))
}

#[cfg(all(test, unix))]
mod tests {
    use std::process::{Command, Stdio};

    use super::*;

    fn sleeping_child() -> Child {
        Command::new("/bin/sh")
            .args(["-c", "sleep 30"])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .expect("spawn sleeping child")
    }

    #[test]
    fn failed_tree_termination_still_kills_and_reaps_the_child() {
        let mut child = sleeping_child();
        let code = stop_child_process_with(&mut child, |_| {
            Err("taskkill is not available".to_string())
        });

        assert_eq!(code, None);
        assert!(child.try_wait().expect("poll child").is_some());
    }

    #[test]
    fn successful_termination_reaps_the_child() {
        let mut child = sleeping_child();
        assert_eq!(stop_child_process(&mut child), None);
        assert!(child.try_wait().expect("poll child").is_some());
    }
}
