use std::path::Path;

mod ctx;
pub mod loader;
pub(crate) mod processor;
pub mod properties;

/// Checks whether the supplied path exists and is not a directory
pub fn file_exists(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    path.exists() && !path.is_dir()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_file_exists() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("krb5.conf");
        fs::write(&file, "[libdefaults]").unwrap();

        assert!(file_exists(&file));
    }

    #[test]
    fn test_file_exists_missing() {
        let dir = tempfile::tempdir().unwrap();

        assert!(!file_exists(dir.path().join("jaas-impala.conf")));
    }

    #[test]
    fn test_file_exists_directory() {
        let dir = tempfile::tempdir().unwrap();

        assert!(!file_exists(dir.path()));
    }
}
