use log::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DesktopLogCategory {
    Startup,
    Runtime,
    Backend,
    Update,
    Shutdown,
}

impl DesktopLogCategory {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Runtime => "runtime",
            Self::Backend => "backend",
            Self::Update => "update",
            Self::Shutdown => "shutdown",
        }
    }
}

pub(crate) fn format_log_line(category: DesktopLogCategory, message: &str) -> String {
    format!("[{}] {}", category.as_str(), message.trim_end())
}

pub(crate) fn append_desktop_log_with_level(
    category: DesktopLogCategory,
    level: Level,
    message: &str,
) {
    log::log!(target: "desktop", level, "{}", format_log_line(category, message));
}

pub(crate) fn build_log_plugin() -> tauri::plugin::TauriPlugin<tauri::Wry> {
    use tauri_plugin_log::{RotationStrategy, Target, TargetKind};

    tauri_plugin_log::Builder::new()
        .level(if cfg!(debug_assertions) {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .targets([
            Target::new(TargetKind::Stdout),
            Target::new(TargetKind::LogDir {
                file_name: Some(crate::DESKTOP_LOG_FILE.to_string()),
            }),
        ])
        .max_file_size(crate::DESKTOP_LOG_MAX_BYTES)
        .rotation_strategy(RotationStrategy::KeepAll)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_log_line_prefixes_category_and_trims_trailing_newlines() {
        assert_eq!(
            format_log_line(DesktopLogCategory::Backend, "Backend: ready\n"),
            "[backend] Backend: ready"
        );
        assert_eq!(
            format_log_line(DesktopLogCategory::Shutdown, "stopping"),
            "[shutdown] stopping"
        );
    }
}
