use serde::Serialize;
use serde_json::Value;
use tauri::{AppHandle, Emitter};

use crate::{
    bridge_catalog::{Channel, ChannelKind, Direction, NavigatePayload},
    companion_dock::DockSide,
    update_orchestrator::UpdateStatusPayload,
    window_lifecycle::WindowKind,
};

/// Delivers a shell event to one window's surface.
pub(crate) trait SurfaceSink {
    fn deliver(&self, target: &str, event: &str, payload: Value) -> Result<(), String>;
}

impl SurfaceSink for AppHandle {
    fn deliver(&self, target: &str, event: &str, payload: Value) -> Result<(), String> {
        self.emit_to(target, event, payload)
            .map_err(|error| format!("Failed to emit {event} to window {target}: {error}"))
    }
}

pub(crate) struct ShellBus<'a, S: SurfaceSink> {
    sink: &'a S,
}

impl<'a, S: SurfaceSink> ShellBus<'a, S> {
    pub(crate) fn new(sink: &'a S) -> Self {
        Self { sink }
    }

    pub(crate) fn publish<P>(
        &self,
        channel: Channel,
        target: WindowKind,
        payload: &P,
    ) -> Result<(), String>
    where
        P: Serialize + ?Sized,
    {
        if channel.kind() != ChannelKind::Event || channel.direction() != Direction::ShellToSurface
        {
            return Err(format!(
                "Channel {} is not a shell-to-surface event",
                channel.wire_name()
            ));
        }
        let payload = serde_json::to_value(payload).map_err(|error| {
            format!("Failed to serialize {} payload: {error}", channel.wire_name())
        })?;
        self.sink.deliver(target.label(), channel.wire_name(), payload)
    }

    pub(crate) fn update_status(&self, status: &UpdateStatusPayload) -> Result<(), String> {
        self.publish(Channel::UpdateStatus, WindowKind::Main, status)
    }

    pub(crate) fn dock_side_changed(&self, side: DockSide) -> Result<(), String> {
        self.publish(Channel::DockSideChanged, WindowKind::Companion, &side)
    }

    pub(crate) fn toggle_companion_input(&self) -> Result<(), String> {
        self.publish(Channel::ToggleCompanionInput, WindowKind::Companion, &())
    }

    pub(crate) fn navigate(&self, route: &str) -> Result<(), String> {
        self.publish(
            Channel::Navigate,
            WindowKind::Main,
            &NavigatePayload {
                route: route.to_string(),
            },
        )
    }
}
