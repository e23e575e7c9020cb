use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Prefix of properties which are passed through as extra connection parameters
pub const JDBC_PARAM_PREFIX: &str = "jdbc.param.";

/// Options appended to the connection url of the Impala JDBC driver
/// @see https://docs.cloudera.com/documentation/other/connectors/impala-jdbc/latest.html
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpalaOptions {
    /// The database (schema) to connect to
    #[serde(rename = "impala.database", default = "default_database")]
    pub database: String,
    /// Whether the connection is SSL encrypted (1) or not (0)
    #[serde(rename = "impala.ssl", default = "enabled")]
    pub ssl: String,
    /// The authentication mechanism, 1 is kerberos
    #[serde(rename = "impala.auth.mech", default = "enabled")]
    pub auth_mech: String,
    #[serde(rename = "impala.allow.self.signed.certs", default = "enabled")]
    pub allow_self_signed_certs: String,
    #[serde(rename = "impala.krb.realm", default)]
    pub krb_realm: Option<String>,
    #[serde(rename = "impala.krb.host.fqdn", default)]
    pub krb_host_fqdn: Option<String>,
    #[serde(rename = "impala.krb.service.name", default = "default_service_name")]
    pub krb_service_name: String,
    /// Path of the java key store holding the server certificate
    #[serde(rename = "impala.ssl.keystore", default)]
    pub ssl_keystore: Option<String>,
    #[serde(rename = "impala.ssl.keystore.pwd", default)]
    pub ssl_keystore_pwd: Option<String>,
    /// Additional connection parameters, from the jdbc.param.* properties
    #[serde(skip)]
    pub params: BTreeMap<String, String>,
}

fn default_database() -> String {
    "default".into()
}

fn enabled() -> String {
    "1".into()
}

fn default_service_name() -> String {
    "impala".into()
}

impl Default for ImpalaOptions {
    fn default() -> Self {
        Self {
            database: default_database(),
            ssl: enabled(),
            auth_mech: enabled(),
            allow_self_signed_certs: enabled(),
            krb_realm: None,
            krb_host_fqdn: None,
            krb_service_name: default_service_name(),
            ssl_keystore: None,
            ssl_keystore_pwd: None,
            params: BTreeMap::new(),
        }
    }
}
