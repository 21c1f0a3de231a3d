//! Filesystem locations used by cinelist.
//!
//! Only the trace export writes to disk. Its default location follows the XDG
//! base directory convention.

use std::path::PathBuf;

const APP_DIR: &str = "cinelist";

/// Returns the data directory for cinelist files.
///
/// Resolves to `$XDG_DATA_HOME/cinelist`, then `$HOME/.local/share/cinelist`,
/// and finally a `cinelist` directory under the system temp dir.
#[must_use]
pub fn data_dir() -> PathBuf {
    resolve_data_dir(
        std::env::var_os("XDG_DATA_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

fn resolve_data_dir(xdg_data_home: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    xdg_data_home
        .filter(|dir| dir.is_absolute())
        .or_else(|| home.map(|home| home.join(".local").join("share")))
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a tilde, or any path when `$HOME` is unset, are returned
/// unchanged.
///
/// # Examples
///
/// ```
/// use cinelist::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/var/log/cinelist.json").to_str(), Some("/var/log/cinelist.json"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    expand_with_home(path, std::env::var_os("HOME").map(PathBuf::from))
}

fn expand_with_home(path: &str, home: Option<PathBuf>) -> PathBuf {
    match (path, home) {
        ("~", Some(home)) => home,
        (path, Some(home)) if path.starts_with("~/") => home.join(&path[2..]),
        (path, _) => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_xdg_data_home() {
        let dir = resolve_data_dir(Some("/xdg".into()), Some("/home/u".into()));
        assert_eq!(dir, PathBuf::from("/xdg/cinelist"));
    }

    #[test]
    fn falls_back_to_home() {
        let dir = resolve_data_dir(Some("relative".into()), Some("/home/u".into()));
        assert_eq!(dir, PathBuf::from("/home/u/.local/share/cinelist"));
        assert_eq!(
            resolve_data_dir(None, None),
            std::env::temp_dir().join("cinelist")
        );
    }

    #[test]
    fn expands_tilde_prefix() {
        let home = Some(PathBuf::from("/home/u"));
        assert_eq!(expand_with_home("~", home.clone()), PathBuf::from("/home/u"));
        assert_eq!(
            expand_with_home("~/traces/out.json", home.clone()),
            PathBuf::from("/home/u/traces/out.json")
        );
        assert_eq!(expand_with_home("~other", home), PathBuf::from("~other"));
        assert_eq!(expand_with_home("~/x", None), PathBuf::from("~/x"));
    }
}
