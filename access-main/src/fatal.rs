use std::io;

use access_core::err::Error;
use access_util_jvm::JavaException;
use thiserror::Error;

/// Failures which end the run
#[derive(Debug, Error)]
pub enum Fatal {
    #[error("Failed to load configuration: {0:#}")]
    Config(Error),
    #[error("Failed to start the JVM: {0:#}")]
    Platform(Error),
    #[error("Cannot create LoginContext. {}", JavaException::message_of(.0))]
    LoginContext(Error),
    #[error("Authentication failed: \n  {}", JavaException::message_of(.0))]
    Authentication(Error),
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl Fatal {
    /// The exit code of the process
    pub fn exit_code(&self) -> i32 {
        match self {
            Fatal::Config(_) | Fatal::Platform(_) | Fatal::Output(_) => 1,
            // reported as 255
            Fatal::LoginContext(_) | Fatal::Authentication(_) => -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use access_core::err::anyhow;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_fatal_login_context_message() {
        let err = Error::new(JavaException::new(
            "javax.security.auth.login.LoginException",
            Some("No LoginModules configured for Impala-client".into()),
        ))
        .context("Failed to create login context 'Impala-client'");

        let fatal = Fatal::LoginContext(err);

        assert_eq!(
            fatal.to_string(),
            "Cannot create LoginContext. No LoginModules configured for Impala-client"
        );
        assert_eq!(fatal.exit_code(), -1);
    }

    #[test]
    fn test_fatal_authentication_message() {
        let err = Error::new(JavaException::new(
            "javax.security.auth.login.LoginException",
            Some("Unable to obtain password from user".into()),
        ));

        let fatal = Fatal::Authentication(err);

        assert_eq!(
            fatal.to_string(),
            "Authentication failed: \n  Unable to obtain password from user"
        );
        assert_eq!(fatal.exit_code(), -1);
    }

    #[test]
    fn test_fatal_authentication_null_message() {
        let err = Error::new(JavaException::new(
            "javax.security.auth.login.LoginException",
            None,
        ));

        assert_eq!(
            Fatal::Authentication(err).to_string(),
            "Authentication failed: \n  null"
        );
    }

    #[test]
    fn test_fatal_config_message() {
        let fatal = Fatal::Config(anyhow!("inner").context("Failed to read config"));

        assert_eq!(
            fatal.to_string(),
            "Failed to load configuration: Failed to read config: inner"
        );
        assert_eq!(fatal.exit_code(), 1);
    }
}
