//! Phase tracking for the splash, main and companion windows and the decisions
//! derived from it. The Tauri glue in `window_actions` executes the steps.

use crate::exit_state::ShutdownIntent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WindowKind {
    Splash,
    Main,
    Companion,
}

impl WindowKind {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Splash => crate::SPLASH_WINDOW_LABEL,
            Self::Main => crate::MAIN_WINDOW_LABEL,
            Self::Companion => crate::COMPANION_WINDOW_LABEL,
        }
    }

    pub(crate) fn from_label(label: &str) -> Option<Self> {
        [Self::Splash, Self::Main, Self::Companion]
            .into_iter()
            .find(|kind| kind.label() == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WindowPhase {
    Created,
    Shown,
    Hidden,
    Destroyed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LifecycleStep {
    DestroySplash,
    ShowMain,
    Navigate(String),
    HideMain,
    TerminateShell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ActivationStep {
    RecreateMain,
    ShowMain,
    RecreateCompanion,
}

#[derive(Debug, Default)]
pub(crate) struct WindowRegistry {
    splash: Option<WindowPhase>,
    main: Option<WindowPhase>,
    companion: Option<WindowPhase>,
    main_first_paint_seen: bool,
    pending_route: Option<String>,
}

impl WindowRegistry {
    fn slot_mut(&mut self, kind: WindowKind) -> &mut Option<WindowPhase> {
        match kind {
            WindowKind::Splash => &mut self.splash,
            WindowKind::Main => &mut self.main,
            WindowKind::Companion => &mut self.companion,
        }
    }

    pub(crate) fn phase(&self, kind: WindowKind) -> Option<WindowPhase> {
        match kind {
            WindowKind::Splash => self.splash,
            WindowKind::Main => self.main,
            WindowKind::Companion => self.companion,
        }
    }

    pub(crate) fn is_alive(&self, kind: WindowKind) -> bool {
        matches!(
            self.phase(kind),
            Some(WindowPhase::Created | WindowPhase::Shown | WindowPhase::Hidden)
        )
    }

    /// Records a newly built window. The splash window is one-shot: once
    /// destroyed it is never recreated.
    pub(crate) fn record_created(&mut self, kind: WindowKind) -> bool {
        if kind == WindowKind::Splash && self.splash.is_some() {
            return false;
        }
        if kind == WindowKind::Main {
            self.main_first_paint_seen = false;
        }
        *self.slot_mut(kind) = Some(WindowPhase::Created);
        true
    }

    pub(crate) fn record_shown(&mut self, kind: WindowKind) {
        if self.is_alive(kind) {
            *self.slot_mut(kind) = Some(WindowPhase::Shown);
        }
    }

    pub(crate) fn record_hidden(&mut self, kind: WindowKind) {
        if self.is_alive(kind) {
            *self.slot_mut(kind) = Some(WindowPhase::Hidden);
        }
    }

    pub(crate) fn record_destroyed(&mut self, kind: WindowKind) {
        if self.phase(kind).is_some() {
            *self.slot_mut(kind) = Some(WindowPhase::Destroyed);
        }
    }

    /// Only the first finished page load of a main window destroys the splash
    /// and reveals main. Reloads must not re-show a window the user hid.
    pub(crate) fn on_main_page_finished(&mut self) -> Vec<LifecycleStep> {
        if self.main_first_paint_seen || !self.is_alive(WindowKind::Main) {
            return Vec::new();
        }
        self.main_first_paint_seen = true;

        let mut steps = Vec::with_capacity(3);
        if self.is_alive(WindowKind::Splash) {
            steps.push(LifecycleStep::DestroySplash);
        }
        steps.push(LifecycleStep::ShowMain);
        if let Some(route) = self.pending_route.take() {
            steps.push(LifecycleStep::Navigate(route));
        }
        steps
    }

    /// A main window that has not painted yet would drop a navigate event, so
    /// the route is held until its first finished page load. Returns the route
    /// when it can be delivered right away.
    pub(crate) fn route_after_activation(&mut self, route: String) -> Option<String> {
        if self.main_first_paint_seen && self.is_alive(WindowKind::Main) {
            self.pending_route = None;
            return Some(route);
        }
        self.pending_route = Some(route);
        None
    }

    pub(crate) fn on_main_close_requested(&self, intent: ShutdownIntent) -> LifecycleStep {
        if intent.allows_close() {
            LifecycleStep::TerminateShell
        } else {
            LifecycleStep::HideMain
        }
    }
}

pub(crate) fn activation_steps(
    main_exists: bool,
    companion_exists: bool,
    companion_enabled: bool,
) -> Vec<ActivationStep> {
    let mut steps = vec![if main_exists {
        ActivationStep::ShowMain
    } else {
        ActivationStep::RecreateMain
    }];
    if companion_enabled && !companion_exists {
        steps.push(ActivationStep::RecreateCompanion);
    }
    steps
}
