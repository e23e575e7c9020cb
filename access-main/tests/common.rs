use std::{fs, path::Path};

#[macro_export]
macro_rules! current_dir {
    () => {
        std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .to_string_lossy()
            .to_string()
    };
}

/// Writes a properties file for the supplied query
pub fn write_config(dir: &Path, body: &str) {
    fs::write(dir.join("config.props"), body).unwrap();
}
