use tauri::AppHandle;

/// Runs `task` on the event loop thread. Window and dock mutations from
/// background tasks and event listeners go through here so they apply in
/// arrival order.
pub(crate) fn run_on_main_thread_dispatch<F>(
    app_handle: &AppHandle,
    task_name: &str,
    task: F,
) -> Result<(), String>
where
    F: FnOnce(&AppHandle) + Send + 'static,
{
    let main_app = app_handle.clone();
    app_handle
        .run_on_main_thread(move || task(&main_app))
        .map_err(|error| format!("Failed to dispatch {task_name} to main thread: {error}"))
}
