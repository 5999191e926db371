//! Readiness probing of the backend's root health route.
//!
//! The probe is a diagnostic signal only. Window creation never waits on it.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

use url::Url;

use crate::{backend_http, http_response, DEFAULT_READY_POLL_INTERVAL_MS, READY_PROBE_TIMEOUT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ProbePolicy {
    pub(crate) interval: Duration,
    /// `None` retries until the backend answers or the probe is cancelled.
    pub(crate) max_attempts: Option<u32>,
}

impl Default for ProbePolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_READY_POLL_INTERVAL_MS),
            max_attempts: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ProbeCancellation {
    cancelled: Arc<AtomicBool>,
}

impl ProbeCancellation {
    pub(crate) fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProbeOutcome {
    Ready { attempts: u32 },
    Cancelled { attempts: u32 },
    Exhausted { attempts: u32 },
}

pub(crate) fn check_backend_ready(url: &Url) -> bool {
    backend_http::request_backend_status(url, READY_PROBE_TIMEOUT)
        .map(http_response::is_ready_status)
        .unwrap_or(false)
}

/// Polls `check` until it succeeds. In silent mode `on_ready` is never called;
/// readiness is only logged.
pub(crate) fn run_probe_loop<C, A, F>(
    mut check: C,
    silent: bool,
    on_ready: A,
    policy: &ProbePolicy,
    cancellation: &ProbeCancellation,
    log: F,
) -> ProbeOutcome
where
    C: FnMut() -> bool,
    A: FnOnce(),
    F: Fn(&str),
{
    let mut attempts = 0_u32;
    loop {
        if cancellation.is_cancelled() {
            log(&format!("backend readiness probe cancelled after {attempts} attempts"));
            return ProbeOutcome::Cancelled { attempts };
        }

        attempts = attempts.saturating_add(1);
        if check() {
            log(&format!("backend is ready after {attempts} attempts"));
            if !silent {
                on_ready();
            }
            return ProbeOutcome::Ready { attempts };
        }

        if policy
            .max_attempts
            .is_some_and(|max_attempts| attempts >= max_attempts)
        {
            log(&format!(
                "backend readiness probe gave up after {attempts} attempts"
            ));
            return ProbeOutcome::Exhausted { attempts };
        }

        thread::sleep(policy.interval);
    }
}

pub(crate) fn spawn_readiness_probe<A, F>(
    backend_url: &str,
    silent: bool,
    on_ready: A,
    policy: ProbePolicy,
    cancellation: ProbeCancellation,
    log: F,
) -> Result<thread::JoinHandle<ProbeOutcome>, String>
where
    A: FnOnce() + Send + 'static,
    F: Fn(&str) + Send + 'static,
{
    let url = Url::parse(backend_url)
        .map_err(|error| format!("Failed to parse backend URL {backend_url}: {error}"))?;

    thread::Builder::new()
        .name("backend-readiness-probe".to_string())
        .spawn(move || {
            run_probe_loop(
                || check_backend_ready(&url),
                silent,
                on_ready,
                &policy,
                &cancellation,
                log,
            )
        })
        .map_err(|error| format!("Failed to spawn backend readiness probe: {error}"))
}
