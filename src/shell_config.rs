use std::{env, path::PathBuf, time::Duration};

use crate::{
    backend_config, backend_readiness::ProbePolicy, runtime_mode::RuntimeMode,
    BACKEND_PATH_ENV, BACKEND_URL_ENV, COMPANION_ENV, DEFAULT_BACKEND_URL,
    DEFAULT_DEV_SERVER_URL, DEFAULT_READY_POLL_INTERVAL_MS, DEFAULT_TOGGLE_INPUT_SHORTCUT,
    DEV_SERVER_URL_ENV, READY_MAX_ATTEMPTS_ENV, READY_POLL_INTERVAL_ENV,
    READY_POLL_INTERVAL_MAX_MS, READY_POLL_INTERVAL_MIN_MS, RUNTIME_MODE_ENV,
    TOGGLE_INPUT_SHORTCUT_ENV,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ShellConfig {
    pub(crate) runtime_mode: RuntimeMode,
    pub(crate) backend_url: String,
    pub(crate) backend_path_override: Option<PathBuf>,
    pub(crate) dev_server_url: String,
    pub(crate) probe_policy: ProbePolicy,
    pub(crate) companion_enabled: bool,
    pub(crate) toggle_input_shortcut: String,
}

impl ShellConfig {
    pub(crate) fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok(), tauri::is_dev())
    }

    pub(crate) fn from_lookup<F>(lookup: F, is_dev_build: bool) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let runtime_mode = RuntimeMode::resolve(lookup(RUNTIME_MODE_ENV).as_deref(), is_dev_build);
        let backend_url = backend_config::normalize_backend_url(
            &lookup(BACKEND_URL_ENV).unwrap_or_default(),
            DEFAULT_BACKEND_URL,
        );
        let dev_server_url = backend_config::normalize_backend_url(
            &lookup(DEV_SERVER_URL_ENV).unwrap_or_default(),
            DEFAULT_DEV_SERVER_URL,
        );
        let interval_ms = backend_config::parse_clamped_millis(
            lookup(READY_POLL_INTERVAL_ENV).as_deref(),
            DEFAULT_READY_POLL_INTERVAL_MS,
            READY_POLL_INTERVAL_MIN_MS,
            READY_POLL_INTERVAL_MAX_MS,
        );

        Self {
            runtime_mode,
            backend_url,
            backend_path_override: non_empty(BACKEND_PATH_ENV).map(PathBuf::from),
            dev_server_url,
            probe_policy: ProbePolicy {
                interval: Duration::from_millis(interval_ms),
                max_attempts: backend_config::parse_attempt_limit(
                    lookup(READY_MAX_ATTEMPTS_ENV).as_deref(),
                ),
            },
            companion_enabled: backend_config::parse_enabled_flag(
                lookup(COMPANION_ENV).as_deref(),
                true,
            ),
            toggle_input_shortcut: non_empty(TOGGLE_INPUT_SHORTCUT_ENV)
                .unwrap_or_else(|| DEFAULT_TOGGLE_INPUT_SHORTCUT.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)], is_dev_build: bool) -> ShellConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ShellConfig::from_lookup(|key| map.get(key).cloned(), is_dev_build)
    }

    #[test]
    fn defaults_match_packaged_shell() {
        let config = config_from(&[], false);
        assert_eq!(config.runtime_mode, RuntimeMode::Packaged);
        assert_eq!(config.backend_url, "http://127.0.0.1:8000/");
        assert_eq!(config.dev_server_url, "http://localhost:5173/");
        assert_eq!(config.probe_policy, ProbePolicy::default());
        assert!(config.companion_enabled);
        assert!(config.backend_path_override.is_none());
        assert_eq!(config.toggle_input_shortcut, "CommandOrControl+Shift+Space");
    }

    #[test]
    fn environment_overrides_are_applied() {
        let config = config_from(
            &[
                ("ICE_RUNTIME_MODE", "development"),
                ("ICE_BACKEND_URL", "http://127.0.0.1:9100"),
                ("ICE_BACKEND_PATH", " /opt/ice/backend "),
                ("ICE_READY_POLL_INTERVAL_MS", "500"),
                ("ICE_READY_MAX_ATTEMPTS", "30"),
                ("ICE_COMPANION", "0"),
                ("ICE_TOGGLE_INPUT_SHORTCUT", "Alt+Space"),
            ],
            false,
        );
        assert_eq!(config.runtime_mode, RuntimeMode::Development);
        assert_eq!(config.backend_url, "http://127.0.0.1:9100/");
        assert_eq!(
            config.backend_path_override,
            Some(PathBuf::from("/opt/ice/backend"))
        );
        assert_eq!(config.probe_policy.interval, Duration::from_millis(500));
        assert_eq!(config.probe_policy.max_attempts, Some(30));
        assert!(!config.companion_enabled);
        assert_eq!(config.toggle_input_shortcut, "Alt+Space");
    }

    #[test]
    fn dev_build_without_override_runs_in_development_mode() {
        assert_eq!(config_from(&[], true).runtime_mode, RuntimeMode::Development);
    }
}
