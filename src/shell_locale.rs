use std::env;

use crate::SHELL_LOCALE_ENV;

#[derive(Debug, Clone, Copy)]
pub struct ShellTexts {
    pub tray_hide: &'static str,
    pub tray_show: &'static str,
    pub tray_hide_companion: &'static str,
    pub tray_show_companion: &'static str,
    pub tray_check_update: &'static str,
    pub tray_quit: &'static str,
    pub spawn_failed_title: &'static str,
    pub spawn_failed_body: &'static str,
    pub spawn_failed_path: &'static str,
    pub choose_directory_title: &'static str,
    pub choose_installer_title: &'static str,
    pub installer_filter: &'static str,
    pub update_checking: &'static str,
    pub update_available: &'static str,
    pub update_not_available: &'static str,
    pub update_check_error: &'static str,
    pub update_download_error: &'static str,
    pub update_install_error: &'static str,
    pub update_downloading: &'static str,
    pub update_downloaded: &'static str,
}

pub fn shell_texts_for_locale(locale: &str) -> ShellTexts {
    if locale == "en-US" {
        return ShellTexts {
            tray_hide: "Hide IcePlatform",
            tray_show: "Show IcePlatform",
            tray_hide_companion: "Hide Companion",
            tray_show_companion: "Show Companion",
            tray_check_update: "Check for Updates",
            tray_quit: "Quit",
            spawn_failed_title: "Backend failed to start",
            spawn_failed_body: "Unable to run the backend service:",
            spawn_failed_path: "Path:",
            choose_directory_title: "Choose where to store the database",
            choose_installer_title: "Choose an installer",
            installer_filter: "Installer",
            update_checking: "Checking for updates...",
            update_available: "A new version is available",
            update_not_available: "You are on the latest version",
            update_check_error: "Failed to check for updates",
            update_download_error: "Failed to download the update",
            update_install_error: "Failed to install the update",
            update_downloading: "Downloading...",
            update_downloaded: "Download complete, restart to install",
        };
    }

    ShellTexts {
        tray_hide: "隐藏 IcePlatform",
        tray_show: "显示 IcePlatform",
        tray_hide_companion: "隐藏悬浮窗",
        tray_show_companion: "显示悬浮窗",
        tray_check_update: "检查更新",
        tray_quit: "退出",
        spawn_failed_title: "后端启动失败",
        spawn_failed_body: "无法运行后端服务:",
        spawn_failed_path: "路径:",
        choose_directory_title: "选择数据库保存位置",
        choose_installer_title: "选择安装包",
        installer_filter: "安装包",
        update_checking: "正在检查更新...",
        update_available: "发现新版本",
        update_not_available: "当前已是最新版本",
        update_check_error: "检查更新失败",
        update_download_error: "下载更新失败",
        update_install_error: "安装更新失败",
        update_downloading: "下载中...",
        update_downloaded: "下载完成，请重启安装",
    }
}

pub fn resolve_shell_locale(default_shell_locale: &'static str) -> &'static str {
    resolve_shell_locale_from(|key| env::var(key).ok(), default_shell_locale)
}

pub(crate) fn resolve_shell_locale_from<F>(
    lookup: F,
    default_shell_locale: &'static str,
) -> &'static str
where
    F: Fn(&str) -> Option<String>,
{
    for env_key in [SHELL_LOCALE_ENV, "LC_ALL", "LANG"] {
        if let Some(locale) = lookup(env_key).as_deref().and_then(normalize_shell_locale) {
            return locale;
        }
    }

    default_shell_locale
}

pub fn current_shell_texts() -> ShellTexts {
    shell_texts_for_locale(resolve_shell_locale(crate::DEFAULT_SHELL_LOCALE))
}

pub(crate) fn normalize_shell_locale(raw: &str) -> Option<&'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw == "zh-CN" {
        return Some("zh-CN");
    }
    if raw == "en-US" {
        return Some("en-US");
    }

    let lowered = raw.to_ascii_lowercase();
    if lowered.starts_with("zh") {
        return Some("zh-CN");
    }
    if lowered.starts_with("en") {
        return Some("en-US");
    }
    None
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn shell_texts_for_locale_returns_english_copy() {
        let texts = shell_texts_for_locale("en-US");
        assert_eq!(texts.tray_hide, "Hide IcePlatform");
        assert_eq!(texts.tray_quit, "Quit");
    }

    #[test]
    fn shell_texts_for_locale_falls_back_to_zh_cn_copy() {
        let texts = shell_texts_for_locale("fr-FR");
        assert_eq!(texts.spawn_failed_title, "后端启动失败");
        assert_eq!(texts.update_downloaded, "下载完成，请重启安装");
    }

    #[test]
    fn normalize_shell_locale_accepts_language_prefixes() {
        assert_eq!(normalize_shell_locale("EN_us"), Some("en-US"));
        assert_eq!(normalize_shell_locale("zh_TW"), Some("zh-CN"));
        assert_eq!(normalize_shell_locale("fr-FR"), None);
    }

    #[test]
    fn resolve_shell_locale_prefers_desktop_override_then_posix_vars() {
        let vars = HashMap::from([
            ("LC_ALL", "fr_FR.UTF-8"),
            ("LANG", "en_US.UTF-8"),
        ]);
        let lookup = |key: &str| vars.get(key).map(|value| value.to_string());
        assert_eq!(resolve_shell_locale_from(lookup, "zh-CN"), "en-US");

        let vars = HashMap::from([(SHELL_LOCALE_ENV, "zh-CN"), ("LANG", "en_US.UTF-8")]);
        let lookup = |key: &str| vars.get(key).map(|value| value.to_string());
        assert_eq!(resolve_shell_locale_from(lookup, "en-US"), "zh-CN");

        assert_eq!(resolve_shell_locale_from(|_| None, "zh-CN"), "zh-CN");
    }
}
