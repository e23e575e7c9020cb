use std::path::PathBuf;

/// Context data when processing a configuration file
pub(crate) struct Ctx {
    /// Path of the current config file
    pub path: Option<PathBuf>,
}

impl Ctx {
    pub(crate) fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    #[cfg(test)]
    pub fn mock() -> Self {
        Self { path: None }
    }
}
