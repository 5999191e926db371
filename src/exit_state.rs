use std::env;

use crate::FORCE_QUIT_ENV;

/// Process-wide shutdown intent. Set right before any intentional
/// terminate/relaunch and never cleared within a process.
#[derive(Debug, Default)]
pub(crate) struct ExitStateMachine {
    quitting: bool,
    cleanup_started: bool,
}

impl ExitStateMachine {
    pub(crate) fn mark_quitting(&mut self) {
        self.quitting = true;
    }

    pub(crate) fn is_quitting(&self) -> bool {
        self.quitting
    }

    fn try_begin_cleanup(&mut self) -> bool {
        if self.cleanup_started {
            return false;
        }
        self.cleanup_started = true;
        true
    }

    /// Steps to run on process exit. Empty once cleanup has started.
    pub(crate) fn begin_exit_cleanup(&mut self) -> Vec<CleanupStep> {
        self.mark_quitting();
        if !self.try_begin_cleanup() {
            return Vec::new();
        }
        EXIT_CLEANUP_STEPS.to_vec()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CleanupStep {
    CancelReadinessProbe,
    ReleaseShortcuts,
    StopBackend,
}

const EXIT_CLEANUP_STEPS: [CleanupStep; 3] = [
    CleanupStep::CancelReadinessProbe,
    CleanupStep::ReleaseShortcuts,
    CleanupStep::StopBackend,
];

/// An exit request without a code comes from the last window closing; it only
/// goes through when the shell is already quitting.
pub(crate) fn should_allow_exit(code: Option<i32>, quitting: bool) -> bool {
    code.is_some() || quitting
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ShutdownIntent {
    pub(crate) quitting: bool,
    pub(crate) force_quit: bool,
}

impl ShutdownIntent {
    pub(crate) fn allows_close(self) -> bool {
        self.quitting || self.force_quit
    }
}

pub(crate) fn is_force_quit_marker_value(raw: Option<&str>) -> bool {
    raw.map(str::trim)
        .is_some_and(|value| !value.is_empty() && value != "0")
}

pub(crate) fn force_quit_marker_present() -> bool {
    is_force_quit_marker_value(env::var(FORCE_QUIT_ENV).ok().as_deref())
}

pub(crate) fn set_force_quit_marker() {
    env::set_var(FORCE_QUIT_ENV, "1");
}

/// A relaunched shell inherits the marker from its parent; drop it so the new
/// process starts with close-to-hide in effect.
pub(crate) fn clear_inherited_force_quit_marker<F>(log: F)
where
    F: Fn(&str),
{
    if force_quit_marker_present() {
        log("clearing force-quit marker inherited from previous shell process");
    }
    env::remove_var(FORCE_QUIT_ENV);
}
