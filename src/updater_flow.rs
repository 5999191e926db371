use tauri::{AppHandle, Manager};
use tauri_plugin_updater::UpdaterExt;

use crate::{
    app_types::lock_or_recover, append_update_log, bridge_bus::ShellBus, exit_state,
    update_orchestrator::UpdateStatusPayload, BridgeResult, ShellState, UpdateState,
};

fn publish_status(app_handle: &AppHandle, status: &UpdateStatusPayload) {
    append_update_log(&format!("update status {:?}: {}", status.phase, status.message));
    if let Err(error) = ShellBus::new(app_handle).update_status(status) {
        append_update_log(&error);
    }
}

fn publish_transition(
    app_handle: &AppHandle,
    transition: Result<UpdateStatusPayload, String>,
) -> BridgeResult {
    match transition {
        Ok(status) => {
            publish_status(app_handle, &status);
            BridgeResult::ok()
        }
        Err(reason) => {
            append_update_log(&format!("update request rejected: {reason}"));
            BridgeResult::failed(reason)
        }
    }
}

fn publish_failure(app_handle: &AppHandle, reason: &str) -> BridgeResult {
    append_update_log(reason);
    let status = app_handle.state::<UpdateState>().orchestrator().fail(reason);
    publish_status(app_handle, &status);
    BridgeResult::failed(reason)
}

pub(crate) async fn run_update_check(app_handle: AppHandle) -> BridgeResult {
    let started = app_handle.state::<UpdateState>().orchestrator().begin_check();
    let started = publish_transition(&app_handle, started);
    if !started.ok {
        return started;
    }

    let updater = match app_handle.updater() {
        Ok(updater) => updater,
        Err(error) => {
            return publish_failure(&app_handle, &format!("Failed to initialize updater: {error}"))
        }
    };

    let checked = match updater.check().await {
        Ok(update) => update,
        Err(error) => {
            return publish_failure(&app_handle, &format!("Failed to check for updates: {error}"))
        }
    };

    let update_state = app_handle.state::<UpdateState>();
    let version = checked.as_ref().map(|update| update.version.to_string());
    *lock_or_recover(&update_state.pending_update, "pending update") = checked;
    *lock_or_recover(&update_state.downloaded_bytes, "downloaded update") = None;
    let finished = update_state.orchestrator().finish_check(version);
    publish_transition(&app_handle, finished)
}

pub(crate) async fn run_update_download(app_handle: AppHandle) -> BridgeResult {
    let started = app_handle
        .state::<UpdateState>()
        .orchestrator()
        .begin_download();
    let started = publish_transition(&app_handle, started);
    if !started.ok {
        return started;
    }

    let pending = lock_or_recover(
        &app_handle.state::<UpdateState>().pending_update,
        "pending update",
    )
    .clone();
    let Some(update) = pending else {
        return publish_failure(&app_handle, "No pending update to download.");
    };

    let progress_app = app_handle.clone();
    let downloaded = update
        .download(
            move |chunk_length, content_length| {
                let progress = progress_app
                    .state::<UpdateState>()
                    .orchestrator()
                    .record_progress(chunk_length, content_length);
                if let Ok(status) = progress {
                    if let Err(error) = ShellBus::new(&progress_app).update_status(&status) {
                        append_update_log(&error);
                    }
                }
            },
            || append_update_log("update download finished"),
        )
        .await;

    let bytes = match downloaded {
        Ok(bytes) => bytes,
        Err(error) => {
            return publish_failure(&app_handle, &format!("Failed to download update: {error}"))
        }
    };

    let update_state = app_handle.state::<UpdateState>();
    *lock_or_recover(&update_state.downloaded_bytes, "downloaded update") = Some(bytes);
    let finished = update_state.orchestrator().finish_download();
    publish_transition(&app_handle, finished)
}

/// Installs the downloaded update and restarts into it.
pub(crate) fn run_update_install(app_handle: &AppHandle) -> BridgeResult {
    let update_state = app_handle.state::<UpdateState>();
    if let Err(reason) = update_state.orchestrator().begin_install() {
        append_update_log(&format!("update request rejected: {reason}"));
        return BridgeResult::failed(reason);
    }

    let update = lock_or_recover(&update_state.pending_update, "pending update").take();
    let bytes = lock_or_recover(&update_state.downloaded_bytes, "downloaded update").take();
    let (Some(update), Some(bytes)) = (update, bytes) else {
        return publish_failure(app_handle, "Downloaded update is no longer available.");
    };

    if let Err(error) = update.install(&bytes) {
        return publish_failure(app_handle, &format!("Failed to install update: {error}"));
    }

    append_update_log(&format!(
        "update {} installed, restarting application",
        update.version
    ));
    app_handle.state::<ShellState>().mark_quitting();
    exit_state::set_force_quit_marker();
    app_handle.request_restart();
    BridgeResult::ok()
}
