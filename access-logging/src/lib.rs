use access_core::err::Result;
pub use log::*;

mod limiting;
pub use limiting::*;

/// Configures the logger for the process
///
/// Logs are written to stderr so stdout only carries the program's output.
pub fn init_logging() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    )
    .target(env_logger::Target::Stderr)
    .try_init()?;
    Ok(())
}

/// Logging init function for tests
pub fn init_for_tests() {
    let res = env_logger::builder()
        .filter_module("access", LevelFilter::Trace)
        .is_test(true)
        .try_init();
    if let Err(err) = res {
        eprintln!("Failed to init logging: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use crate::init_logging;

    #[test]
    fn test_init_logging_twice() {
        let first = init_logging();
        let second = init_logging();

        assert!(first.is_ok());
        assert!(second.is_err());
    }
}
