//! Packaged vs. development behavior, resolved once at startup.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RuntimeMode {
    Packaged,
    Development,
}

impl RuntimeMode {
    pub(crate) fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "packaged" | "production" | "prod" => Some(Self::Packaged),
            "development" | "dev" => Some(Self::Development),
            _ => None,
        }
    }

    pub(crate) fn resolve(override_value: Option<&str>, is_dev_build: bool) -> Self {
        if let Some(mode) = override_value.and_then(Self::parse) {
            return mode;
        }
        if is_dev_build {
            Self::Development
        } else {
            Self::Packaged
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Packaged => "packaged",
            Self::Development => "development",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MainContent {
    Bundled(&'static str),
    DevServer(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RuntimeProfile {
    pub(crate) mode: RuntimeMode,
    pub(crate) spawn_backend: bool,
    pub(crate) probe_backend: bool,
    pub(crate) main_content: MainContent,
}

impl RuntimeProfile {
    /// Development expects the backend to be run out-of-band and the renderer
    /// to be served by the dev server.
    pub(crate) fn for_mode(mode: RuntimeMode, dev_server_url: &str) -> Self {
        match mode {
            RuntimeMode::Packaged => Self {
                mode,
                spawn_backend: true,
                probe_backend: true,
                main_content: MainContent::Bundled(crate::BUNDLED_MAIN_PAGE),
            },
            RuntimeMode::Development => Self {
                mode,
                spawn_backend: false,
                probe_backend: false,
                main_content: MainContent::DevServer(dev_server_url.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StartupStep {
    ShowSplash,
    SpawnBackend,
    CreateMain(MainContent),
    CreateCompanion,
    ProbeBackend { silent: bool },
}

pub(crate) fn startup_plan(profile: &RuntimeProfile, companion_enabled: bool) -> Vec<StartupStep> {
    let mut steps = vec![StartupStep::ShowSplash];
    if profile.spawn_backend {
        steps.push(StartupStep::SpawnBackend);
    }
    steps.push(StartupStep::CreateMain(profile.main_content.clone()));
    if companion_enabled {
        steps.push(StartupStep::CreateCompanion);
    }
    if profile.probe_backend {
        steps.push(StartupStep::ProbeBackend { silent: true });
    }
    steps
}
