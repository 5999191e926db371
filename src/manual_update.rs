//! Manual update fallback: the user picks an installer and the OS opens it.
//! The surface asks the shell to quit afterwards.

use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::bridge_catalog::ManualInstallResult;

pub(crate) const INSTALLER_EXTENSIONS: [&str; 7] =
    ["dmg", "pkg", "exe", "msi", "AppImage", "deb", "rpm"];

pub(crate) fn is_installer_path(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            INSTALLER_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(extension))
        })
}

pub(crate) fn run_manual_install<P, O, F>(pick: P, open: O, log: F) -> ManualInstallResult
where
    P: FnOnce() -> Option<PathBuf>,
    O: FnOnce(&Path) -> Result<(), String>,
    F: Fn(&str),
{
    let Some(installer) = pick() else {
        log("manual update cancelled: no installer selected");
        return ManualInstallResult { success: false };
    };

    if !is_installer_path(&installer) {
        log(&format!(
            "manual update selected a file without an installer extension: {}",
            installer.display()
        ));
    }

    match open(&installer) {
        Ok(()) => {
            log(&format!("opened installer {}", installer.display()));
            ManualInstallResult { success: true }
        }
        Err(error) => {
            log(&format!(
                "failed to open installer {}: {error}",
                installer.display()
            ));
            ManualInstallResult { success: false }
        }
    }
}

#[cfg(target_os = "macos")]
pub(crate) fn open_with_default_handler(path: &Path) -> Result<(), String> {
    Command::new("open")
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|error| format!("Failed to run 'open': {error}"))
}

#[cfg(target_os = "windows")]
pub(crate) fn open_with_default_handler(path: &Path) -> Result<(), String> {
    Command::new("rundll32")
        .arg("url.dll,FileProtocolHandler")
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|error| format!("Failed to run 'rundll32': {error}"))
}

#[cfg(all(unix, not(target_os = "macos")))]
pub(crate) fn open_with_default_handler(path: &Path) -> Result<(), String> {
    Command::new("xdg-open")
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|error| format!("Failed to run 'xdg-open': {error}"))
}

#[cfg(not(any(target_os = "macos", target_os = "windows", unix)))]
pub(crate) fn open_with_default_handler(_path: &Path) -> Result<(), String> {
    Err("Opening files is not supported on this platform.".to_string())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn choosing_an_installer_opens_it() {
        let opened = Cell::new(false);
        let result = run_manual_install(
            || Some(PathBuf::from("/tmp/IcePlatform-1.2.0.dmg")),
            |path| {
                assert_eq!(path, Path::new("/tmp/IcePlatform-1.2.0.dmg"));
                opened.set(true);
                Ok(())
            },
            |_| {},
        );
        assert_eq!(result, ManualInstallResult { success: true });
        assert!(opened.get());
    }

    #[test]
    fn cancelling_the_chooser_opens_nothing() {
        let opened = Cell::new(false);
        let result = run_manual_install(
            || None,
            |_| {
                opened.set(true);
                Ok(())
            },
            |_| {},
        );
        assert_eq!(result, ManualInstallResult { success: false });
        assert!(!opened.get());
    }

    #[test]
    fn open_failure_reports_no_success() {
        let result = run_manual_install(
            || Some(PathBuf::from("C:\\Downloads\\IcePlatform.msi")),
            |_| Err("no handler".to_string()),
            |_| {},
        );
        assert_eq!(result, ManualInstallResult { success: false });
    }

    #[test]
    fn installer_extensions_match_case_insensitively() {
        assert!(is_installer_path(Path::new("IcePlatform.AppImage")));
        assert!(is_installer_path(Path::new("IcePlatform.appimage")));
        assert!(is_installer_path(Path::new("setup.EXE")));
        assert!(!is_installer_path(Path::new("notes.txt")));
        assert!(!is_installer_path(Path::new("installer")));
    }
}
