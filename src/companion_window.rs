use std::path::PathBuf;

use tauri::{
    AppHandle, Manager, PhysicalPosition, PhysicalSize, WebviewUrl, WebviewWindow,
    WebviewWindowBuilder,
};

use crate::{
    bridge_bus::ShellBus,
    bridge_catalog::{logical_to_physical, MoveRequest, ResizeRequest},
    companion_dock::{Bounds, DockPlacement, WorkArea},
    window_lifecycle::WindowKind,
    ShellState, COMPANION_PAGE, COMPANION_WINDOW_HEIGHT, COMPANION_WINDOW_LABEL,
    COMPANION_WINDOW_WIDTH,
};

fn companion_window(app_handle: &AppHandle) -> Result<WebviewWindow, String> {
    app_handle
        .get_webview_window(COMPANION_WINDOW_LABEL)
        .ok_or_else(|| "Companion window not found.".to_string())
}

fn read_bounds(window: &WebviewWindow) -> Result<Bounds, String> {
    let position = window
        .outer_position()
        .map_err(|error| format!("Failed to read companion position: {error}"))?;
    let size = window
        .outer_size()
        .map_err(|error| format!("Failed to read companion size: {error}"))?;
    Ok(Bounds {
        x: position.x,
        y: position.y,
        width: size.width,
        height: size.height,
    })
}

fn read_work_area(window: &WebviewWindow) -> Result<WorkArea, String> {
    let current = window
        .current_monitor()
        .map_err(|error| format!("Failed to read companion monitor: {error}"))?;
    let monitor = match current {
        Some(monitor) => monitor,
        None => window
            .primary_monitor()
            .map_err(|error| format!("Failed to read primary monitor: {error}"))?
            .ok_or_else(|| "No monitor available for companion window.".to_string())?,
    };
    let area = monitor.work_area();
    Ok(WorkArea {
        x: area.position.x,
        y: area.position.y,
        width: area.size.width,
        height: area.size.height,
        scale_factor: monitor.scale_factor(),
    })
}

fn scale_factor(window: &WebviewWindow) -> f64 {
    window.scale_factor().unwrap_or(1.0)
}

fn apply_opacity(window: &WebviewWindow, opacity: f64) -> Result<(), String> {
    window
        .eval(&format!(
            "document.documentElement.style.opacity = '{opacity}';"
        ))
        .map_err(|error| format!("Failed to apply companion opacity: {error}"))
}

fn apply_placement(
    app_handle: &AppHandle,
    window: &WebviewWindow,
    placement: DockPlacement,
) -> Result<(), String> {
    window
        .set_position(PhysicalPosition::new(placement.x, placement.y))
        .map_err(|error| format!("Failed to move companion window: {error}"))?;
    apply_opacity(window, placement.opacity)?;
    ShellBus::new(app_handle).dock_side_changed(placement.side)
}

pub fn create_companion_window<F>(app_handle: &AppHandle, log: F) -> Result<(), String>
where
    F: Fn(&str),
{
    if app_handle.get_webview_window(COMPANION_WINDOW_LABEL).is_some() {
        log("companion window already exists, skipping creation");
        return Ok(());
    }

    let window = WebviewWindowBuilder::new(
        app_handle,
        COMPANION_WINDOW_LABEL,
        WebviewUrl::App(PathBuf::from(COMPANION_PAGE)),
    )
    .inner_size(COMPANION_WINDOW_WIDTH, COMPANION_WINDOW_HEIGHT)
    .decorations(false)
    .transparent(true)
    .always_on_top(true)
    .skip_taskbar(true)
    .resizable(false)
    .shadow(false)
    .visible(false)
    .build()
    .map_err(|error| format!("Failed to create companion window: {error}"))?;

    match (read_work_area(&window), read_bounds(&window)) {
        (Ok(work_area), Ok(bounds)) => {
            let free_x = i64::from(work_area.width) - i64::from(bounds.width);
            let free_y = i64::from(work_area.height) - i64::from(bounds.height);
            let offset_x = i32::try_from(free_x).unwrap_or(0) - work_area.edge_margin();
            let offset_y = i32::try_from(free_y / 2).unwrap_or(0);
            let position = PhysicalPosition::new(
                work_area.x + offset_x.max(0),
                work_area.y + offset_y.max(0),
            );
            if let Err(error) = window.set_position(position) {
                log(&format!("failed to place companion window: {error}"));
            }
        }
        (Err(error), _) | (_, Err(error)) => {
            log(&format!("companion window keeps default placement: {error}"));
        }
    }

    window
        .show()
        .map_err(|error| format!("Failed to show companion window: {error}"))?;
    let state = app_handle.state::<ShellState>();
    let mut windows = state.windows();
    windows.record_created(WindowKind::Companion);
    windows.record_shown(WindowKind::Companion);
    Ok(())
}

pub fn dock_companion(app_handle: &AppHandle) -> Result<(), String> {
    let window = companion_window(app_handle)?;
    let bounds = read_bounds(&window)?;
    let work_area = read_work_area(&window)?;
    let placement = app_handle
        .state::<ShellState>()
        .dock()
        .dock(bounds, work_area);
    apply_placement(app_handle, &window, placement)
}

pub fn undock_companion(app_handle: &AppHandle) -> Result<(), String> {
    let window = companion_window(app_handle)?;
    let bounds = read_bounds(&window)?;
    let work_area = read_work_area(&window)?;
    let placement = app_handle
        .state::<ShellState>()
        .dock()
        .undock(bounds, work_area);
    apply_placement(app_handle, &window, placement)
}

pub(crate) fn move_companion(app_handle: &AppHandle, request: MoveRequest) -> Result<(), String> {
    let window = companion_window(app_handle)?;
    let bounds = read_bounds(&window)?;
    let work_area = read_work_area(&window)?;
    let scale = scale_factor(&window);

    let state = app_handle.state::<ShellState>();
    let mut dock = state.dock();
    let (x, y) = match request {
        MoveRequest::Absolute { x, y } => dock.move_to(
            bounds,
            logical_to_physical(x, scale),
            logical_to_physical(y, scale),
            work_area,
        ),
        MoveRequest::Delta { dx, dy } => dock.move_by(
            bounds,
            logical_to_physical(dx, scale),
            logical_to_physical(dy, scale),
            work_area,
        ),
    };
    drop(dock);

    window
        .set_position(PhysicalPosition::new(x, y))
        .map_err(|error| format!("Failed to move companion window: {error}"))
}

pub(crate) fn resize_companion(
    app_handle: &AppHandle,
    request: ResizeRequest,
) -> Result<(), String> {
    let window = companion_window(app_handle)?;
    let bounds = read_bounds(&window)?;
    let scale = scale_factor(&window);
    let width = u32::try_from(logical_to_physical(request.width, scale).max(0)).unwrap_or(0);
    let height = u32::try_from(logical_to_physical(request.height, scale).max(0)).unwrap_or(0);

    let resized = app_handle
        .state::<ShellState>()
        .dock()
        .resize(bounds, width, height);
    window
        .set_size(PhysicalSize::new(resized.width, resized.height))
        .map_err(|error| format!("Failed to resize companion window: {error}"))?;
    window
        .set_position(PhysicalPosition::new(resized.x, resized.y))
        .map_err(|error| format!("Failed to anchor companion window: {error}"))
}
