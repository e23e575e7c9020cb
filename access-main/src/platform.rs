use access_auth::{JaasAuthenticator, KerberosEnv};
use access_core::{
    err::{Context, Result},
    interface::{Authenticator, Connector},
};
use access_jdbc::JdbcConnector;
use access_logging::info;
use access_util_jvm::{Jvm, JvmOptions};

/// Boots the backends used to authenticate and query
pub trait Platform {
    type TAuthenticator: Authenticator;
    type TConnector: Connector;

    /// Publishes the kerberos material and starts the backends
    fn init(self, kerberos: &KerberosEnv) -> Result<(Self::TAuthenticator, Self::TConnector)>;
}

/// Authenticates using JAAS and queries using JDBC, both within an embedded JVM
#[derive(Debug, Clone)]
pub struct JvmPlatform {
    options: JvmOptions,
}

impl JvmPlatform {
    pub fn new(options: JvmOptions) -> Self {
        Self { options }
    }
}

impl Platform for JvmPlatform {
    type TAuthenticator = JaasAuthenticator;
    type TConnector = JdbcConnector;

    fn init(self, kerberos: &KerberosEnv) -> Result<(JaasAuthenticator, JdbcConnector)> {
        let jvm = Jvm::boot(&self.options)?;
        kerberos
            .apply(&jvm)
            .context("Failed to apply the kerberos configuration")?;
        info!("JVM started");

        Ok((JaasAuthenticator::new(jvm), JdbcConnector::new(jvm)))
    }
}
