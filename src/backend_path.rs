use std::path::{Path, PathBuf};

use crate::{BACKEND_EXECUTABLE_STEM, BACKEND_RESOURCE_DIR};

pub(crate) fn backend_executable_name(windows_target: bool) -> String {
    if windows_target {
        format!("{BACKEND_EXECUTABLE_STEM}.exe")
    } else {
        BACKEND_EXECUTABLE_STEM.to_string()
    }
}

/// Packaged builds ship the backend as a one-dir bundle inside the resource
/// directory: `<resources>/icePlatform/icePlatform[.exe]`.
pub(crate) fn resolve_packaged_backend_path(resource_dir: &Path, windows_target: bool) -> PathBuf {
    resource_dir
        .join(BACKEND_RESOURCE_DIR)
        .join(backend_executable_name(windows_target))
}

pub(crate) fn resolve_backend_path(
    path_override: Option<&Path>,
    resource_dir: Option<&Path>,
) -> Result<PathBuf, String> {
    if let Some(path) = path_override {
        return Ok(path.to_path_buf());
    }

    let resource_dir = resource_dir
        .ok_or_else(|| "Failed to locate the application resource directory.".to_string())?;
    Ok(resolve_packaged_backend_path(
        resource_dir,
        cfg!(target_os = "windows"),
    ))
}

/// Marks the backend executable as runnable. Returns whether permissions were
/// changed.
#[cfg(unix)]
pub(crate) fn ensure_executable(path: &Path) -> Result<bool, String> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = std::fs::metadata(path)
        .map_err(|error| format!("Failed to read backend metadata {}: {}", path.display(), error))?;
    let mut permissions = metadata.permissions();
    if permissions.mode() & 0o777 == 0o755 {
        return Ok(false);
    }

    permissions.set_mode(0o755);
    std::fs::set_permissions(path, permissions).map_err(|error| {
        format!(
            "Failed to mark backend executable {}: {}",
            path.display(),
            error
        )
    })?;
    Ok(true)
}

#[cfg(not(unix))]
pub(crate) fn ensure_executable(_path: &Path) -> Result<bool, String> {
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packaged_path_uses_dedicated_resource_subdirectory() {
        let resources = Path::new("/Applications/IcePlatform.app/Contents/Resources");
        assert_eq!(
            resolve_packaged_backend_path(resources, false),
            resources.join("icePlatform").join("icePlatform")
        );
    }

    #[test]
    fn windows_target_gets_exe_suffix() {
        let resources = Path::new("C:/Program Files/IcePlatform/resources");
        assert_eq!(
            resolve_packaged_backend_path(resources, true),
            resources.join("icePlatform").join("icePlatform.exe")
        );
        assert_eq!(backend_executable_name(false), "icePlatform");
    }

    #[test]
    fn resolve_backend_path_prefers_override() {
        let resolved = resolve_backend_path(
            Some(Path::new("/opt/ice/backend")),
            Some(Path::new("/ignored")),
        )
        .expect("override path");
        assert_eq!(resolved, PathBuf::from("/opt/ice/backend"));
    }

    #[test]
    fn resolve_backend_path_requires_resource_dir_without_override() {
        assert!(resolve_backend_path(None, None).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn ensure_executable_sets_mode_once() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::tempdir().expect("temp dir");
        let path = temp_dir.path().join("icePlatform");
        std::fs::write(&path, "#!/bin/sh\n").expect("write backend stub");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644))
            .expect("reset permissions");

        assert_eq!(ensure_executable(&path), Ok(true));
        let mode = std::fs::metadata(&path).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
        assert_eq!(ensure_executable(&path), Ok(false));
    }

    #[cfg(unix)]
    #[test]
    fn ensure_executable_reports_missing_file() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let error = ensure_executable(&temp_dir.path().join("missing")).expect_err("missing");
        assert!(error.contains("missing"));
    }
}
