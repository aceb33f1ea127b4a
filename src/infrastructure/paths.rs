//! Path helpers for the client's data files.
//!
//! Logs, the gallery index, and the default feed document live under a single
//! data directory. User-supplied paths in the configuration may use `~` for the
//! home directory.

use std::path::PathBuf;

/// Returns the home directory from `$HOME`, falling back to the current directory.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME").map_or_else(|| PathBuf::from("."), PathBuf::from)
}

/// Returns the data directory for photofeed files.
///
/// The directory is `~/.local/share/photofeed`. It is not created here; callers
/// that write into it create it on demand.
///
/// # Examples
///
/// ```
/// use photofeed::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert!(data_dir.ends_with(".local/share/photofeed"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    home_dir().join(".local").join("share").join("photofeed")
}

/// Expands a leading `~` to the home directory.
///
/// # Examples
///
/// ```
/// use photofeed::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
/// assert!(expand_tilde("~/photos").ends_with("photos"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home_dir().join(rest)
    } else if path == "~" {
        home_dir()
    } else {
        PathBuf::from(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_expands_only_at_start() {
        assert_eq!(expand_tilde("~"), home_dir());
        assert_eq!(expand_tilde("~/feed.json"), home_dir().join("feed.json"));
        assert_eq!(expand_tilde("photos/~/x"), PathBuf::from("photos/~/x"));
        assert_eq!(expand_tilde("~user/x"), PathBuf::from("~user/x"));
    }
}
