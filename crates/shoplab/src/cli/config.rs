//! Paths derived from the store location.

use std::path::{Path, PathBuf};

/// Store used when neither `--db` nor `SHOPLAB_DB` is given.
pub const DEFAULT_DB_PATH: &str = "data/shop.db";

/// Environment override for the store path.
pub const DB_PATH_ENV: &str = "SHOPLAB_DB";

/// Directory the demo writes its artifacts to: the store's parent.
pub fn output_dir(db_path: &Path) -> PathBuf {
    match db_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Get the logs directory: `<store dir>/logs`
pub fn logs_dir(db_path: &Path) -> PathBuf {
    output_dir(db_path).join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_dir_is_store_parent() {
        assert_eq!(output_dir(Path::new("data/shop.db")), PathBuf::from("data"));
        assert_eq!(output_dir(Path::new("/tmp/x/shop.db")), PathBuf::from("/tmp/x"));
    }

    #[test]
    fn test_bare_file_name_uses_current_dir() {
        assert_eq!(output_dir(Path::new("shop.db")), PathBuf::from("."));
        assert_eq!(logs_dir(Path::new("shop.db")), PathBuf::from("./logs"));
    }
}
