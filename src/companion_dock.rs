//! Edge docking for the floating companion window.
//!
//! All coordinates are physical pixels. A docked companion sits mostly past
//! the left or right edge of the work area with a reveal strip still visible.
//! The strip and the undock margin are logical sizes scaled by the monitor.

use serde::{Deserialize, Serialize};

use crate::bridge_catalog::logical_to_physical;

const DOCK_REVEAL_WIDTH: f64 = 20.0;
const UNDOCK_EDGE_MARGIN: f64 = 20.0;
pub(crate) const DOCKED_OPACITY: f64 = 0.6;
pub(crate) const EXPANDED_OPACITY: f64 = 1.0;
pub(crate) const MIN_COMPANION_EDGE: u32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum DockState {
    #[default]
    Expanded,
    DockedLeft,
    DockedRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum DockSide {
    Left,
    Right,
    None,
}

impl DockState {
    pub(crate) fn side(self) -> DockSide {
        match self {
            Self::Expanded => DockSide::None,
            Self::DockedLeft => DockSide::Left,
            Self::DockedRight => DockSide::Right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Bounds {
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct WorkArea {
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) scale_factor: f64,
}

impl WorkArea {
    pub(crate) fn reveal_width(self) -> i32 {
        logical_to_physical(DOCK_REVEAL_WIDTH, self.scale_factor)
    }

    pub(crate) fn edge_margin(self) -> i32 {
        logical_to_physical(UNDOCK_EDGE_MARGIN, self.scale_factor)
    }

    fn right(self) -> i32 {
        self.x.saturating_add(to_i32(self.width))
    }

    fn bottom(self) -> i32 {
        self.y.saturating_add(to_i32(self.height))
    }

    fn midpoint_x(self) -> i32 {
        self.x.saturating_add(to_i32(self.width / 2))
    }

    /// Range of X values that keep a window of `width` fully on screen.
    fn visible_x_range(self, width: u32) -> (i32, i32) {
        let max = self.right().saturating_sub(to_i32(width));
        (self.x, max.max(self.x))
    }

    fn clamp_y(self, y: i32, height: u32) -> i32 {
        let max = self.bottom().saturating_sub(to_i32(height)).max(self.y);
        y.clamp(self.y, max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DockPlacement {
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) opacity: f64,
    pub(crate) side: DockSide,
}

#[derive(Debug, Default)]
pub(crate) struct CompanionDock {
    state: DockState,
    last_undocked_x: Option<i32>,
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

impl CompanionDock {
    #[cfg(test)]
    pub(crate) fn state(&self) -> DockState {
        self.state
    }

    #[cfg(test)]
    pub(crate) fn last_undocked_x(&self) -> Option<i32> {
        self.last_undocked_x
    }

    pub(crate) fn dock(&mut self, bounds: Bounds, work_area: WorkArea) -> DockPlacement {
        let (min_x, max_x) = work_area.visible_x_range(bounds.width);
        if self.state == DockState::Expanded && (min_x..=max_x).contains(&bounds.x) {
            self.last_undocked_x = Some(bounds.x);
        }

        let center_x = bounds.x.saturating_add(to_i32(bounds.width / 2));
        let (state, x) = if center_x < work_area.midpoint_x() {
            (
                DockState::DockedLeft,
                work_area.x - to_i32(bounds.width) + work_area.reveal_width(),
            )
        } else {
            (
                DockState::DockedRight,
                work_area.right() - work_area.reveal_width(),
            )
        };
        self.state = state;

        DockPlacement {
            x,
            y: work_area.clamp_y(bounds.y, bounds.height),
            opacity: DOCKED_OPACITY,
            side: state.side(),
        }
    }

    pub(crate) fn undock(&mut self, bounds: Bounds, work_area: WorkArea) -> DockPlacement {
        let (min_x, max_x) = work_area.visible_x_range(bounds.width);
        let x = self
            .last_undocked_x
            .filter(|x| (min_x..=max_x).contains(x))
            .unwrap_or_else(|| self.fallback_undock_x(bounds.width, work_area));
        self.state = DockState::Expanded;

        DockPlacement {
            x,
            y: work_area.clamp_y(bounds.y, bounds.height),
            opacity: EXPANDED_OPACITY,
            side: DockSide::None,
        }
    }

    /// Undocking without a usable remembered X puts the companion a margin
    /// away from the edge it was docked against (the right edge by default).
    fn fallback_undock_x(&self, width: u32, work_area: WorkArea) -> i32 {
        let (min_x, max_x) = work_area.visible_x_range(width);
        let x = match self.state {
            DockState::DockedLeft => work_area.x + work_area.edge_margin(),
            DockState::DockedRight | DockState::Expanded => max_x - work_area.edge_margin(),
        };
        x.clamp(min_x, max_x)
    }

    /// Surface-driven drag. Keeps at least the reveal strip on screen.
    pub(crate) fn move_to(
        &mut self,
        bounds: Bounds,
        x: i32,
        y: i32,
        work_area: WorkArea,
    ) -> (i32, i32) {
        let min_x = work_area.x - to_i32(bounds.width) + work_area.reveal_width();
        let max_x = work_area.right() - work_area.reveal_width();
        let x = x.clamp(min_x, max_x.max(min_x));
        self.last_undocked_x = Some(x);
        (x, work_area.clamp_y(y, bounds.height))
    }

    pub(crate) fn move_by(
        &mut self,
        bounds: Bounds,
        dx: i32,
        dy: i32,
        work_area: WorkArea,
    ) -> (i32, i32) {
        self.move_to(
            bounds,
            bounds.x.saturating_add(dx),
            bounds.y.saturating_add(dy),
            work_area,
        )
    }

    /// Left/top stay anchored while the size changes.
    pub(crate) fn resize(&self, bounds: Bounds, width: u32, height: u32) -> Bounds {
        Bounds {
            x: bounds.x,
            y: bounds.y,
            width: width.max(MIN_COMPANION_EDGE),
            height: height.max(MIN_COMPANION_EDGE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: WorkArea = WorkArea {
        x: 0,
        y: 0,
        width: 1920,
        height: 1080,
        scale_factor: 1.0,
    };
    const REVEAL: i32 = 20;
    const MARGIN: i32 = 20;

    fn companion_at(x: i32) -> Bounds {
        Bounds {
            x,
            y: 400,
            width: 300,
            height: 120,
        }
    }

    #[test]
    fn dock_left_of_midpoint_docks_left() {
        let mut dock = CompanionDock::default();
        for x in [0, 200, 800] {
            let placement = dock.dock(companion_at(x), SCREEN);
            assert_eq!(placement.side, DockSide::Left, "x={x}");
            assert_eq!(placement.x, -300 + REVEAL);
            dock.undock(companion_at(placement.x), SCREEN);
        }
    }

    #[test]
    fn dock_right_of_midpoint_docks_right() {
        let mut dock = CompanionDock::default();
        for x in [811, 1200, 1620] {
            let placement = dock.dock(companion_at(x), SCREEN);
            assert_eq!(placement.side, DockSide::Right, "x={x}");
            assert_eq!(placement.x, 1920 - REVEAL);
            dock.undock(companion_at(placement.x), SCREEN);
        }
    }

    #[test]
    fn docking_reduces_opacity_and_undocking_restores_it() {
        let mut dock = CompanionDock::default();
        let docked = dock.dock(companion_at(1500), SCREEN);
        assert_eq!(docked.opacity, DOCKED_OPACITY);
        assert_eq!(dock.state(), DockState::DockedRight);

        let undocked = dock.undock(companion_at(docked.x), SCREEN);
        assert_eq!(undocked.opacity, EXPANDED_OPACITY);
        assert_eq!(undocked.side, DockSide::None);
        assert_eq!(dock.state(), DockState::Expanded);
    }

    #[test]
    fn undock_restores_the_x_from_before_dock() {
        for x in [0, 37, 960, 1620] {
            let mut dock = CompanionDock::default();
            let docked = dock.dock(companion_at(x), SCREEN);
            let undocked = dock.undock(companion_at(docked.x), SCREEN);
            assert_eq!(undocked.x, x, "x={x}");
        }
    }

    #[test]
    fn undock_falls_back_when_pre_dock_x_was_off_screen() {
        let mut dock = CompanionDock::default();
        let docked = dock.dock(companion_at(1700), SCREEN);
        assert_eq!(docked.side, DockSide::Right);
        assert_eq!(dock.last_undocked_x(), None);

        let undocked = dock.undock(companion_at(docked.x), SCREEN);
        assert_eq!(undocked.x, 1920 - 300 - MARGIN);

        let mut dock = CompanionDock::default();
        let docked = dock.dock(companion_at(-50), SCREEN);
        assert_eq!(docked.side, DockSide::Left);
        let undocked = dock.undock(companion_at(docked.x), SCREEN);
        assert_eq!(undocked.x, MARGIN);
    }

    #[test]
    fn repeated_dock_is_idempotent() {
        let mut dock = CompanionDock::default();
        let first = dock.dock(companion_at(300), SCREEN);
        let second = dock.dock(companion_at(first.x), SCREEN);
        assert_eq!(first, second);
        assert_eq!(dock.last_undocked_x(), Some(300));

        let mut dock = CompanionDock::default();
        let first = dock.dock(companion_at(1400), SCREEN);
        let second = dock.dock(companion_at(first.x), SCREEN);
        assert_eq!(first, second);
        assert_eq!(dock.last_undocked_x(), Some(1400));
    }

    #[test]
    fn dock_math_respects_work_area_offset() {
        let secondary = WorkArea {
            x: 1920,
            y: 25,
            width: 1440,
            height: 875,
            scale_factor: 1.0,
        };
        let mut dock = CompanionDock::default();
        let placement = dock.dock(
            Bounds {
                x: 1950,
                y: 0,
                width: 300,
                height: 120,
            },
            secondary,
        );
        assert_eq!(placement.side, DockSide::Left);
        assert_eq!(placement.x, 1920 - 300 + REVEAL);
        assert_eq!(placement.y, 25);
    }

    #[test]
    fn reveal_strip_and_margin_scale_with_the_monitor() {
        let retina = WorkArea {
            scale_factor: 2.0,
            ..SCREEN
        };
        let mut dock = CompanionDock::default();
        let docked = dock.dock(companion_at(1700), retina);
        assert_eq!(docked.x, 1920 - 2 * REVEAL);

        let undocked = dock.undock(companion_at(docked.x), retina);
        assert_eq!(undocked.x, 1920 - 300 - 2 * MARGIN);

        let (x, _) = dock.move_to(companion_at(0), -5000, 0, retina);
        assert_eq!(x, -300 + 2 * REVEAL);
    }

    #[test]
    fn dock_clamps_vertical_position_into_work_area() {
        let mut dock = CompanionDock::default();
        let placement = dock.dock(
            Bounds {
                x: 100,
                y: 5000,
                width: 300,
                height: 120,
            },
            SCREEN,
        );
        assert_eq!(placement.y, 1080 - 120);
    }

    #[test]
    fn move_updates_remembered_x_used_by_undock() {
        let mut dock = CompanionDock::default();
        dock.dock(companion_at(100), SCREEN);
        let (x, y) = dock.move_to(companion_at(-280), 640, 300, SCREEN);
        assert_eq!((x, y), (640, 300));
        assert_eq!(dock.last_undocked_x(), Some(640));

        let undocked = dock.undock(companion_at(x), SCREEN);
        assert_eq!(undocked.x, 640);
    }

    #[test]
    fn move_keeps_reveal_strip_on_screen() {
        let mut dock = CompanionDock::default();
        let (x, _) = dock.move_to(companion_at(0), -5000, 0, SCREEN);
        assert_eq!(x, -300 + REVEAL);
        let (x, _) = dock.move_to(companion_at(0), 5000, 0, SCREEN);
        assert_eq!(x, 1920 - REVEAL);
    }

    #[test]
    fn move_by_applies_deltas() {
        let mut dock = CompanionDock::default();
        let (x, y) = dock.move_by(companion_at(500), 25, -40, SCREEN);
        assert_eq!((x, y), (525, 360));
    }

    #[test]
    fn resize_anchors_left_top() {
        let dock = CompanionDock::default();
        let resized = dock.resize(companion_at(500), 360, 420);
        assert_eq!(
            resized,
            Bounds {
                x: 500,
                y: 400,
                width: 360,
                height: 420
            }
        );
        assert_eq!(dock.resize(companion_at(500), 0, 0).width, MIN_COMPANION_EDGE);
    }

    #[test]
    fn dock_side_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&DockSide::Left).expect("json"), "\"left\"");
        assert_eq!(serde_json::to_string(&DockSide::None).expect("json"), "\"none\"");
    }
}
