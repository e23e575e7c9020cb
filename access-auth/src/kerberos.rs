use std::{
    env,
    path::{Path, PathBuf},
};

use access_core::err::{Context, Result};
use access_logging::info;
use access_util_jvm::Jvm;

/// Path of the JAAS login configuration
pub const LOGIN_CONFIG_PROPERTY: &str = "java.security.auth.login.config";
/// Path of the kerberos client configuration
pub const KRB5_CONFIG_PROPERTY: &str = "java.security.krb5.conf";
/// Allows the JDBC driver to acquire credentials outside of a Subject.doAs
pub const USE_SUBJECT_CREDS_ONLY_PROPERTY: &str = "javax.security.auth.useSubjectCredsOnly";
/// Enables tracing in the kerberos login module
pub const KRB5_DEBUG_PROPERTY: &str = "sun.security.krb5.debug";

/// The kerberos authentication material handed to the platform security module
#[derive(Debug, Clone, PartialEq)]
pub struct KerberosEnv {
    jaas_config: PathBuf,
    krb5_config: PathBuf,
    debug: bool,
}

impl KerberosEnv {
    pub fn new(jaas_config: impl Into<PathBuf>, krb5_config: impl Into<PathBuf>) -> Self {
        Self {
            jaas_config: jaas_config.into(),
            krb5_config: krb5_config.into(),
            debug: false,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn jaas_config(&self) -> &Path {
        &self.jaas_config
    }

    pub fn krb5_config(&self) -> &Path {
        &self.krb5_config
    }

    /// Gets the system properties to set
    ///
    /// The JAAS config is resolved to an absolute path, the krb5 config is passed as is.
    pub fn system_properties(&self) -> Result<Vec<(&'static str, String)>> {
        let jaas_config = if self.jaas_config.is_absolute() {
            self.jaas_config.clone()
        } else {
            env::current_dir()
                .context("Failed to get current directory")?
                .join(&self.jaas_config)
        };

        let mut props = vec![
            (LOGIN_CONFIG_PROPERTY, jaas_config.to_string_lossy().to_string()),
            (KRB5_CONFIG_PROPERTY, self.krb5_config.to_string_lossy().to_string()),
            (USE_SUBJECT_CREDS_ONLY_PROPERTY, "false".to_string()),
        ];

        if self.debug {
            props.push((KRB5_DEBUG_PROPERTY, "true".to_string()));
        }

        Ok(props)
    }

    /// Publishes the authentication material to the JVM
    pub fn apply(&self, jvm: &Jvm) -> Result<()> {
        info!(
            "Using JAAS config {} and krb5 config {}",
            self.jaas_config.display(),
            self.krb5_config.display()
        );

        for (key, value) in self.system_properties()? {
            jvm.set_system_property(key, &value)?;
        }

        Ok(())
    }
}
