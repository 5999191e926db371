//! The fixed channel catalog between the shell and the window surfaces, with
//! the payload shapes each channel carries.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    SurfaceToShell,
    ShellToSurface,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChannelKind {
    Command,
    AwaitedCommand,
    Event,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Channel {
    ToggleDebugSurface,
    ChooseDirectory,
    RestartApplication,
    CheckForUpdate,
    DownloadUpdate,
    InstallUpdate,
    UpdateStatus,
    CompanionActivated,
    CompanionResize,
    CompanionMove,
    CompanionDock,
    CompanionUndock,
    DockSideChanged,
    ToggleCompanionInput,
    ManualUpdateInstall,
    Navigate,
    QuitApplication,
}

impl Channel {
    pub(crate) const ALL: [Channel; 17] = [
        Self::ToggleDebugSurface,
        Self::ChooseDirectory,
        Self::RestartApplication,
        Self::CheckForUpdate,
        Self::DownloadUpdate,
        Self::InstallUpdate,
        Self::UpdateStatus,
        Self::CompanionActivated,
        Self::CompanionResize,
        Self::CompanionMove,
        Self::CompanionDock,
        Self::CompanionUndock,
        Self::DockSideChanged,
        Self::ToggleCompanionInput,
        Self::ManualUpdateInstall,
        Self::Navigate,
        Self::QuitApplication,
    ];

    pub(crate) fn wire_name(self) -> &'static str {
        match self {
            Self::ToggleDebugSurface => "toggle_debug_surface",
            Self::ChooseDirectory => "choose_directory",
            Self::RestartApplication => "restart-application",
            Self::CheckForUpdate => "check_for_update",
            Self::DownloadUpdate => "download_update",
            Self::InstallUpdate => "install_update",
            Self::UpdateStatus => "update-status",
            Self::CompanionActivated => "companion-activated",
            Self::CompanionResize => "companion-resize",
            Self::CompanionMove => "companion-move",
            Self::CompanionDock => "companion-dock",
            Self::CompanionUndock => "companion-undock",
            Self::DockSideChanged => "dock-side-changed",
            Self::ToggleCompanionInput => "toggle-companion-input",
            Self::ManualUpdateInstall => "manual_update_install",
            Self::Navigate => "navigate",
            Self::QuitApplication => "quit_application",
        }
    }

    #[cfg(test)]
    pub(crate) fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|channel| channel.wire_name() == name)
    }

    pub(crate) fn direction(self) -> Direction {
        match self {
            Self::UpdateStatus
            | Self::DockSideChanged
            | Self::ToggleCompanionInput
            | Self::Navigate => Direction::ShellToSurface,
            _ => Direction::SurfaceToShell,
        }
    }

    pub(crate) fn kind(self) -> ChannelKind {
        match self {
            Self::ChooseDirectory | Self::ManualUpdateInstall => ChannelKind::AwaitedCommand,
            Self::ToggleDebugSurface
            | Self::CheckForUpdate
            | Self::DownloadUpdate
            | Self::InstallUpdate
            | Self::QuitApplication => ChannelKind::Command,
            _ => ChannelKind::Event,
        }
    }

    /// Surface events the shell subscribes to.
    pub(crate) fn inbound_events() -> impl Iterator<Item = Channel> {
        Self::ALL.into_iter().filter(|channel| {
            channel.kind() == ChannelKind::Event && channel.direction() == Direction::SurfaceToShell
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum MoveRequest {
    Absolute { x: f64, y: f64 },
    Delta { dx: f64, dy: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub(crate) struct ResizeRequest {
    pub(crate) width: f64,
    pub(crate) height: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub(crate) struct ActivationRequest {
    #[serde(default)]
    pub(crate) route: Option<String>,
}

impl ActivationRequest {
    pub(crate) fn route_or_default(&self) -> &str {
        self.route
            .as_deref()
            .map(str::trim)
            .filter(|route| !route.is_empty())
            .unwrap_or("/")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct NavigatePayload {
    pub(crate) route: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct ManualInstallResult {
    pub(crate) success: bool,
}

/// Parses an event payload; a missing body counts as JSON `null`.
pub(crate) fn parse_event_payload<T>(raw: &str) -> Result<T, String>
where
    T: for<'de> Deserialize<'de>,
{
    let raw = raw.trim();
    let raw = if raw.is_empty() { "null" } else { raw };
    serde_json::from_str(raw).map_err(|error| format!("Failed to parse event payload: {error}"))
}

pub(crate) fn logical_to_physical(value: f64, scale_factor: f64) -> i32 {
    let scale = if scale_factor.is_finite() && scale_factor > 0.0 {
        scale_factor
    } else {
        1.0
    };
    (value * scale).round() as i32
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::companion_dock::DockSide;

    #[test]
    fn wire_names_are_unique_and_resolvable() {
        for channel in Channel::ALL {
            assert_eq!(Channel::from_wire_name(channel.wire_name()), Some(channel));
        }
        assert_eq!(Channel::from_wire_name("open-settings"), None);
    }

    #[test]
    fn commands_use_invoke_names_and_events_use_kebab_case() {
        for channel in Channel::ALL {
            let name = channel.wire_name();
            match channel.kind() {
                ChannelKind::Command | ChannelKind::AwaitedCommand => {
                    assert!(!name.contains('-'), "{name}");
                    assert_eq!(channel.direction(), Direction::SurfaceToShell);
                }
                ChannelKind::Event => assert!(!name.contains('_'), "{name}"),
            }
        }
    }

    #[test]
    fn inbound_events_cover_companion_geometry_and_restart() {
        let inbound: Vec<_> = Channel::inbound_events().collect();
        assert_eq!(
            inbound,
            vec![
                Channel::RestartApplication,
                Channel::CompanionActivated,
                Channel::CompanionResize,
                Channel::CompanionMove,
                Channel::CompanionDock,
                Channel::CompanionUndock,
            ]
        );
    }

    #[test]
    fn move_request_accepts_absolute_or_delta() {
        assert_eq!(
            parse_event_payload::<MoveRequest>(r#"{"x": 10, "y": 20.5}"#).expect("absolute"),
            MoveRequest::Absolute { x: 10.0, y: 20.5 }
        );
        assert_eq!(
            parse_event_payload::<MoveRequest>(r#"{"dx": -4, "dy": 3}"#).expect("delta"),
            MoveRequest::Delta { dx: -4.0, dy: 3.0 }
        );
        assert!(parse_event_payload::<MoveRequest>(r#"{"x": 1}"#).is_err());
    }

    #[test]
    fn activation_route_defaults_to_root() {
        let empty: Option<ActivationRequest> = parse_event_payload("").expect("empty body");
        assert_eq!(empty.unwrap_or_default().route_or_default(), "/");

        let request: ActivationRequest =
            parse_event_payload(r#"{"route": "/todo"}"#).expect("route");
        assert_eq!(request.route_or_default(), "/todo");

        let blank: ActivationRequest = parse_event_payload(r#"{"route": " "}"#).expect("blank");
        assert_eq!(blank.route_or_default(), "/");
    }

    #[test]
    fn outbound_payload_shapes() {
        assert_eq!(
            serde_json::to_value(DockSide::Right).expect("json"),
            json!("right")
        );
        assert_eq!(
            serde_json::to_value(ManualInstallResult { success: false }).expect("json"),
            json!({ "success": false })
        );
    }

    #[test]
    fn logical_pixels_scale_to_physical() {
        assert_eq!(logical_to_physical(150.0, 2.0), 300);
        assert_eq!(logical_to_physical(-10.4, 1.0), -10);
        assert_eq!(logical_to_physical(100.0, 0.0), 100);
        assert_eq!(logical_to_physical(100.0, f64::NAN), 100);
    }
}
