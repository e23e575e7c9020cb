use std::{
    env, fs,
    path::{Path, PathBuf},
};

use access_core::err::{Context, Result};
use access_logging::{debug, warn};
use itertools::Itertools;

/// Environment variable holding the default class path
pub const CLASSPATH_ENV: &str = "IMPALA_ACCESS_CLASSPATH";

/// Finds jars to add to the JVM class path
///
/// Directories are searched (non-recursively) for *.jar files, any other
/// path is added as is.
pub fn find_jars(class_paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut jars = vec![];

    for path in class_paths {
        if !path.is_dir() {
            if !path.exists() {
                warn!("Class path entry {} does not exist", path.display());
            }
            jars.push(path.clone());
            continue;
        }

        let files = fs::read_dir(path)
            .with_context(|| format!("Failed to read files in {}", path.display()))?
            .filter_map(|i| i.ok())
            .map(|i| i.path())
            .filter(|i| i.is_file() && is_jar(i))
            .sorted();

        jars.extend(files);
    }

    debug!("Found following jars: {:?}", jars);
    Ok(jars.into_iter().unique().collect())
}

fn is_jar(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("jar"))
        .unwrap_or(false)
}

/// Parses a platform specific path list, eg /opt/jdbc:/opt/lib/driver.jar
pub fn parse_class_path(class_path: &str) -> Vec<PathBuf> {
    env::split_paths(class_path)
        .filter(|p| !p.as_os_str().is_empty())
        .collect()
}

/// Gets the default class path to search for jars
///
/// This is read from the environment, falling back to the directory of the
/// running binary.
pub fn default_class_paths() -> Vec<PathBuf> {
    env::var(CLASSPATH_ENV)
        .with_context(|| format!("{} not set", CLASSPATH_ENV))
        .map(|paths| parse_class_path(&paths))
        .or_else(|_| get_current_exe_path().map(|p| vec![p]))
        .map_err(|e| warn!("Failed to get default class path {:?}", e))
        .unwrap_or_default()
}

/// Gets the parent dir of the currently running binary
fn get_current_exe_path() -> Result<PathBuf> {
    env::current_exe()
        .context("Failed to get current bin path")
        .and_then(|p| {
            p.parent()
                .map(|p| p.to_path_buf())
                .context("Failed to get parent path")
        })
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    fn find_jars_invalid_path_is_kept() {
        let res = find_jars(&["/invalid-path/driver.jar".into()]).unwrap();

        assert_eq!(res, vec![PathBuf::from("/invalid-path/driver.jar")]);
    }

    #[test]
    fn find_jars_no_jars() {
        let dir = tempfile::tempdir().unwrap();
        let res = find_jars(&[dir.path().to_path_buf()]).unwrap();

        assert_eq!(res, Vec::<PathBuf>::new());
    }

    #[test]
    fn find_jars_with_jars() {
        let dir = tempfile::tempdir().unwrap();
        fs::File::create(dir.path().join("ImpalaJDBC41.jar")).unwrap();
        fs::File::create(dir.path().join("hive_service.jar")).unwrap();
        fs::File::create(dir.path().join("file.txt")).unwrap();
        fs::create_dir(dir.path().join("nested.jar")).unwrap();

        let res = find_jars(&[dir.path().to_path_buf()]).unwrap();

        assert_eq!(
            res,
            vec![
                dir.path().join("ImpalaJDBC41.jar"),
                dir.path().join("hive_service.jar"),
            ]
        );
    }

    #[test]
    fn find_jars_deduplicates() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("driver.jar");
        fs::File::create(&jar).unwrap();

        let res = find_jars(&[dir.path().to_path_buf(), jar.clone()]).unwrap();

        assert_eq!(res, vec![jar]);
    }

    #[test]
    fn test_parse_class_path() {
        assert_eq!(
            parse_class_path("/a::/b/driver.jar"),
            vec![PathBuf::from("/a"), PathBuf::from("/b/driver.jar")]
        );
    }

    #[test]
    #[serial]
    fn default_class_path_env() {
        env::set_var(CLASSPATH_ENV, "/a:/b:/c");
        let paths = default_class_paths();
        env::remove_var(CLASSPATH_ENV);

        assert_eq!(
            paths,
            vec![PathBuf::from("/a"), PathBuf::from("/b"), PathBuf::from("/c")]
        );
    }

    #[test]
    #[serial]
    fn default_class_path_falls_back_to_exe_dir() {
        env::remove_var(CLASSPATH_ENV);
        let paths = default_class_paths();

        assert_eq!(paths, vec![get_current_exe_path().unwrap()]);
    }

    #[test]
    fn test_get_current_exe_path() {
        let res = get_current_exe_path().unwrap();

        assert_ne!(res.to_string_lossy(), "");
    }
}
