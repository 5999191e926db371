//! Update lifecycle: check, download, install. Every accepted transition yields
//! the `update-status` payload mirrored to the main window.

use serde::Serialize;

use crate::shell_locale::{self, ShellTexts};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum UpdatePhase {
    #[default]
    Idle,
    Checking,
    Available,
    Downloading,
    Downloaded,
    NotAvailable,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub(crate) enum UpdateDetail {
    Version { version: String },
    Progress { downloaded: u64, total: Option<u64> },
    Failure { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct UpdateStatusPayload {
    pub(crate) phase: UpdatePhase,
    pub(crate) message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) detail: Option<UpdateDetail>,
}

pub(crate) struct UpdateOrchestrator {
    phase: UpdatePhase,
    downloaded: u64,
    total: Option<u64>,
    installing: bool,
    texts: ShellTexts,
}

impl Default for UpdateOrchestrator {
    fn default() -> Self {
        Self::with_texts(shell_locale::current_shell_texts())
    }
}

impl UpdateOrchestrator {
    pub(crate) fn with_texts(texts: ShellTexts) -> Self {
        Self {
            phase: UpdatePhase::Idle,
            downloaded: 0,
            total: None,
            installing: false,
            texts,
        }
    }

    #[cfg(test)]
    pub(crate) fn phase(&self) -> UpdatePhase {
        self.phase
    }

    fn transition(
        &mut self,
        phase: UpdatePhase,
        message: &str,
        detail: Option<UpdateDetail>,
    ) -> UpdateStatusPayload {
        self.phase = phase;
        UpdateStatusPayload {
            phase,
            message: message.to_string(),
            detail,
        }
    }

    fn reject(&self, request: &str) -> Result<UpdateStatusPayload, String> {
        Err(format!(
            "Cannot {request} while update phase is {:?}",
            self.phase
        ))
    }

    pub(crate) fn begin_check(&mut self) -> Result<UpdateStatusPayload, String> {
        if self.installing
            || matches!(self.phase, UpdatePhase::Checking | UpdatePhase::Downloading)
        {
            return self.reject("check for updates");
        }
        let message = self.texts.update_checking;
        Ok(self.transition(UpdatePhase::Checking, message, None))
    }

    pub(crate) fn finish_check(
        &mut self,
        available_version: Option<String>,
    ) -> Result<UpdateStatusPayload, String> {
        if self.phase != UpdatePhase::Checking {
            return self.reject("finish an update check");
        }
        Ok(match available_version {
            Some(version) => {
                let message = self.texts.update_available;
                self.transition(
                    UpdatePhase::Available,
                    message,
                    Some(UpdateDetail::Version { version }),
                )
            }
            None => {
                let message = self.texts.update_not_available;
                self.transition(UpdatePhase::NotAvailable, message, None)
            }
        })
    }

    pub(crate) fn begin_download(&mut self) -> Result<UpdateStatusPayload, String> {
        if self.phase != UpdatePhase::Available {
            return self.reject("download an update");
        }
        self.downloaded = 0;
        self.total = None;
        let message = self.texts.update_downloading;
        Ok(self.transition(
            UpdatePhase::Downloading,
            message,
            Some(UpdateDetail::Progress {
                downloaded: 0,
                total: None,
            }),
        ))
    }

    pub(crate) fn record_progress(
        &mut self,
        chunk_length: usize,
        total: Option<u64>,
    ) -> Result<UpdateStatusPayload, String> {
        if self.phase != UpdatePhase::Downloading {
            return self.reject("record download progress");
        }
        self.downloaded = self
            .downloaded
            .saturating_add(u64::try_from(chunk_length).unwrap_or(u64::MAX));
        if total.is_some() {
            self.total = total;
        }
        let message = self.texts.update_downloading;
        let detail = UpdateDetail::Progress {
            downloaded: self.downloaded,
            total: self.total,
        };
        Ok(self.transition(UpdatePhase::Downloading, message, Some(detail)))
    }

    pub(crate) fn finish_download(&mut self) -> Result<UpdateStatusPayload, String> {
        if self.phase != UpdatePhase::Downloading {
            return self.reject("finish a download");
        }
        let message = self.texts.update_downloaded;
        Ok(self.transition(UpdatePhase::Downloaded, message, None))
    }

    /// Installing is terminal: the shell restarts right after.
    pub(crate) fn begin_install(&mut self) -> Result<(), String> {
        if self.phase != UpdatePhase::Downloaded || self.installing {
            return self.reject("install an update").map(|_| ());
        }
        self.installing = true;
        Ok(())
    }

    /// Failures are non-fatal; a new check may follow. The message names the
    /// stage that failed.
    pub(crate) fn fail(&mut self, error: &str) -> UpdateStatusPayload {
        let message = if self.installing {
            self.texts.update_install_error
        } else {
            match self.phase {
                UpdatePhase::Available | UpdatePhase::Downloading | UpdatePhase::Downloaded => {
                    self.texts.update_download_error
                }
                _ => self.texts.update_check_error,
            }
        };
        self.installing = false;
        self.transition(
            UpdatePhase::Error,
            message,
            Some(UpdateDetail::Failure {
                error: error.to_string(),
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn orchestrator() -> UpdateOrchestrator {
        UpdateOrchestrator::with_texts(shell_locale::shell_texts_for_locale("zh-CN"))
    }

    #[test]
    fn check_then_download_then_install() {
        let mut updates = orchestrator();
        assert_eq!(updates.begin_check().expect("check").message, "正在检查更新...");
        let available = updates
            .finish_check(Some("1.2.0".to_string()))
            .expect("available");
        assert_eq!(available.phase, UpdatePhase::Available);
        assert_eq!(available.message, "发现新版本");

        updates.begin_download().expect("download");
        updates.record_progress(512, Some(2048)).expect("progress");
        let progress = updates.record_progress(512, None).expect("progress");
        assert_eq!(
            progress.detail,
            Some(UpdateDetail::Progress {
                downloaded: 1024,
                total: Some(2048)
            })
        );

        let downloaded = updates.finish_download().expect("downloaded");
        assert_eq!(downloaded.message, "下载完成，请重启安装");
        updates.begin_install().expect("install");
        assert!(updates.begin_install().is_err());
        assert!(updates.begin_check().is_err());
    }

    #[test]
    fn no_update_reports_not_available() {
        let mut updates = orchestrator();
        updates.begin_check().expect("check");
        let status = updates.finish_check(None).expect("not available");
        assert_eq!(status.phase, UpdatePhase::NotAvailable);
        assert_eq!(status.message, "当前已是最新版本");
        assert!(updates.begin_check().is_ok());
    }

    #[test]
    fn illegal_requests_do_not_change_phase() {
        let mut updates = orchestrator();
        assert!(updates.begin_download().is_err());
        assert!(updates.finish_download().is_err());
        assert!(updates.begin_install().is_err());
        assert!(updates.record_progress(10, None).is_err());
        assert_eq!(updates.phase(), UpdatePhase::Idle);

        updates.begin_check().expect("check");
        assert!(updates.begin_check().is_err());
        assert_eq!(updates.phase(), UpdatePhase::Checking);
    }

    #[test]
    fn errors_allow_a_retry() {
        let mut updates = orchestrator();
        updates.begin_check().expect("check");
        let status = updates.fail("network unreachable");
        assert_eq!(status.phase, UpdatePhase::Error);
        assert_eq!(status.message, "检查更新失败");
        assert!(updates.begin_check().is_ok());
    }

    #[test]
    fn failure_message_names_the_failed_stage() {
        let mut updates = orchestrator();
        updates.begin_check().expect("check");
        updates.finish_check(Some("1.2.0".to_string())).expect("available");
        updates.begin_download().expect("download");
        assert_eq!(updates.fail("connection reset").message, "下载更新失败");

        let mut updates = orchestrator();
        updates.begin_check().expect("check");
        updates.finish_check(Some("1.2.0".to_string())).expect("available");
        updates.begin_download().expect("download");
        updates.finish_download().expect("downloaded");
        updates.begin_install().expect("install");
        let status = updates.fail("signature mismatch");
        assert_eq!(status.message, "安装更新失败");
        assert_eq!(
            status.detail,
            Some(UpdateDetail::Failure {
                error: "signature mismatch".to_string()
            })
        );
        assert!(updates.begin_check().is_ok());
    }

    #[test]
    fn status_payload_wire_shape() {
        let mut updates = orchestrator();
        updates.begin_check().expect("check");
        updates.finish_check(Some("1.2.0".to_string())).expect("available");
        let status = updates.begin_download().expect("download");
        assert_eq!(
            serde_json::to_value(&status).expect("json"),
            json!({
                "phase": "downloading",
                "message": "下载中...",
                "detail": { "downloaded": 0, "total": null }
            })
        );

        let mut updates = orchestrator();
        let checking = updates.begin_check().expect("check");
        assert_eq!(
            serde_json::to_value(&checking).expect("json"),
            json!({ "phase": "checking", "message": "正在检查更新..." })
        );
        let missing = updates.finish_check(None).expect("not available");
        assert_eq!(
            serde_json::to_value(&missing).expect("json")["phase"],
            json!("not-available")
        );
    }
}
