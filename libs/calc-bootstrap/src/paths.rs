use std::{
    env, fs,
    path::{Path, PathBuf},
};

/// Directory under the user's home used when `server.home_dir` is unset.
pub const DEFAULT_HOME_SUBDIR: &str = ".matrix-calc";

/// Errors for resolving the home directory
#[derive(Debug, thiserror::Error)]
pub enum HomeDirError {
    #[error("HOME environment variable is not set")]
    HomeMissing,
    #[error("home_dir must be an absolute path (after ~ expansion): {0}")]
    AbsoluteRequired(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn user_home() -> Result<PathBuf, HomeDirError> {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .map_err(|_| HomeDirError::HomeMissing)
}

/// Expand a leading `~` to the user home directory.
///
/// Returns the path unchanged if no tilde prefix is present.
///
/// # Errors
/// Returns [`HomeDirError::HomeMissing`] if expansion is needed but no home
/// directory variable is set.
pub fn expand_tilde(raw: &str) -> Result<PathBuf, HomeDirError> {
    if raw == "~" {
        return user_home();
    }
    match raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        Some(rest) => Ok(user_home()?.join(rest)),
        None => Ok(PathBuf::from(raw)),
    }
}

/// Resolve the home directory used for log files and other local state.
///
/// - `Some(raw)`: `~` is expanded and the result must be absolute.
/// - `None`: `$HOME/.matrix-calc`.
///
/// If `create` is true, the directory is created if missing.
///
/// # Errors
/// Returns [`HomeDirError`] if the path is relative, the home variable is
/// missing, or the directory cannot be created.
pub fn resolve_home_dir(config_home: Option<&str>, create: bool) -> Result<PathBuf, HomeDirError> {
    let path = match config_home {
        Some(raw) => {
            let expanded = expand_tilde(raw)?;
            if !expanded.is_absolute() {
                return Err(HomeDirError::AbsoluteRequired(
                    expanded.to_string_lossy().into(),
                ));
            }
            expanded
        }
        None => user_home()?.join(DEFAULT_HOME_SUBDIR),
    };

    if create {
        fs::create_dir_all(&path)?;
    }
    Ok(path)
}

/// Resolve `file` against `home_dir` unless it is already absolute.
#[must_use]
pub fn resolve_in_home(home_dir: &Path, file: &str) -> PathBuf {
    home_dir.join(file)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(not(target_os = "windows"))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn resolve_with_tilde() {
        let tmp = tempdir().unwrap();
        let tmp_path = tmp.path().to_str().unwrap();

        temp_env::with_var("HOME", Some(tmp_path), || {
            let result = resolve_home_dir(Some("~/myapp"), false).unwrap();
            assert!(result.is_absolute());
            assert_eq!(result, tmp.path().join("myapp"));
        });
    }

    #[test]
    fn resolve_with_only_tilde() {
        let tmp = tempdir().unwrap();
        let tmp_path = tmp.path().to_str().unwrap();

        temp_env::with_var("HOME", Some(tmp_path), || {
            let result = resolve_home_dir(Some("~"), false).unwrap();
            assert_eq!(result, tmp.path());
        });
    }

    #[test]
    fn resolve_default_home_dir() {
        let tmp = tempdir().unwrap();
        let tmp_path = tmp.path().to_str().unwrap();

        temp_env::with_var("HOME", Some(tmp_path), || {
            let result = resolve_home_dir(None, false).unwrap();
            assert!(result.ends_with(DEFAULT_HOME_SUBDIR));
        });
    }

    #[test]
    fn relative_home_is_rejected() {
        let err = resolve_home_dir(Some("relative/dir"), false).unwrap_err();
        assert!(matches!(err, HomeDirError::AbsoluteRequired(_)));
    }

    #[test]
    fn create_makes_directory() {
        let tmp = tempdir().unwrap();
        let target = tmp.path().join("nested").join("home");
        let result = resolve_home_dir(target.to_str(), true).unwrap();
        assert!(result.is_dir());
    }

    #[test]
    fn absolute_file_overrides_home() {
        let home = Path::new("/srv/calc");
        assert_eq!(resolve_in_home(home, "logs/app.log"), home.join("logs/app.log"));
        assert_eq!(
            resolve_in_home(home, "/var/log/app.log"),
            PathBuf::from("/var/log/app.log")
        );
    }
}
