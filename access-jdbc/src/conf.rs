use access_core::config::{AccessConfig, ImpalaOptions};

/// Value displayed in place of secrets
const MASK: &str = "****";

/// JDBC connection config
pub trait JdbcConnectionConfig {
    /// Gets the JDBC connection URL
    fn get_jdbc_url(&self) -> String;

    /// Gets the JDBC connection URL with any secrets masked, safe for display
    fn get_display_url(&self) -> String {
        self.get_jdbc_url()
    }
}

/// The connection config for the Impala JDBC driver
///
/// The base url is extended with the database and the SSL and kerberos
/// connection parameters, eg
/// jdbc:impala://host:21050/default;ssl=1;AuthMech=1;KrbServiceName=impala;
#[derive(Debug, Clone, PartialEq)]
pub struct ImpalaJdbcConnectionConfig {
    pub base_url: String,
    pub options: ImpalaOptions,
}

impl ImpalaJdbcConnectionConfig {
    pub fn new(base_url: impl Into<String>, options: ImpalaOptions) -> Self {
        Self {
            base_url: base_url.into(),
            options,
        }
    }

    pub fn from_config(conf: &AccessConfig) -> Self {
        Self::new(conf.connection_url.clone(), conf.impala.clone())
    }

    /// Gets the connection parameters in the order they are appended to the url
    pub fn params(&self) -> Vec<(String, String)> {
        let opts = &self.options;
        let params = [
            ("ssl", Some(&opts.ssl)),
            ("AuthMech", Some(&opts.auth_mech)),
            ("AllowSelfSignedCerts", Some(&opts.allow_self_signed_certs)),
            ("KrbRealm", opts.krb_realm.as_ref()),
            ("KrbHostFQDN", opts.krb_host_fqdn.as_ref()),
            ("KrbServiceName", Some(&opts.krb_service_name)),
            ("SSLKeyStore", opts.ssl_keystore.as_ref()),
            ("SSLKeyStorePwd", opts.ssl_keystore_pwd.as_ref()),
        ];

        params
            .into_iter()
            .filter_map(|(name, val)| val.map(|v| (name.to_string(), v.clone())))
            .chain(opts.params.iter().map(|(k, v)| (k.clone(), v.clone())))
            .collect()
    }

    fn render(&self, mask_secrets: bool) -> String {
        let mut url = format!(
            "{}/{};",
            self.base_url.trim_end_matches('/'),
            self.options.database
        );

        for (name, val) in self.params() {
            let val = if mask_secrets && is_secret(&name) {
                MASK
            } else {
                val.as_str()
            };

            url.push_str(&format!("{}={};", name, val));
        }

        url
    }
}

fn is_secret(param: &str) -> bool {
    let param = param.to_ascii_lowercase();
    param.ends_with("pwd") || param.contains("password")
}

impl JdbcConnectionConfig for ImpalaJdbcConnectionConfig {
    fn get_jdbc_url(&self) -> String {
        self.render(false)
    }

    fn get_display_url(&self) -> String {
        self.render(true)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn cluster_options() -> ImpalaOptions {
        ImpalaOptions {
            krb_realm: Some("CLOUDERA.COM".into()),
            krb_host_fqdn: Some("impala-1.example.com".into()),
            ssl_keystore: Some("./sec/impala-1.keystore".into()),
            ssl_keystore_pwd: Some("cloudera".into()),
            ..ImpalaOptions::default()
        }
    }

    #[test]
    fn test_impala_url_defaults() {
        let conf = ImpalaJdbcConnectionConfig::new(
            "jdbc:impala://impala-1.example.com:21050",
            ImpalaOptions::default(),
        );

        assert_eq!(
            conf.get_jdbc_url(),
            "jdbc:impala://impala-1.example.com:21050/default;ssl=1;AuthMech=1;AllowSelfSignedCerts=1;KrbServiceName=impala;"
        );
    }

    #[test]
    fn test_impala_url_all_options() {
        let conf = ImpalaJdbcConnectionConfig::new(
            "jdbc:impala://impala-1.example.com:21050",
            cluster_options(),
        );

        assert_eq!(
            conf.get_jdbc_url(),
            "jdbc:impala://impala-1.example.com:21050/default;ssl=1;AuthMech=1;AllowSelfSignedCerts=1;KrbRealm=CLOUDERA.COM;KrbHostFQDN=impala-1.example.com;KrbServiceName=impala;SSLKeyStore=./sec/impala-1.keystore;SSLKeyStorePwd=cloudera;"
        );
    }

    #[test]
    fn test_impala_display_url_masks_secrets() {
        let mut options = cluster_options();
        options
            .params
            .insert("ProxyPassword".into(), "secret".into());
        let conf = ImpalaJdbcConnectionConfig::new("jdbc:impala://h:21050", options);

        let url = conf.get_display_url();

        assert!(url.contains("SSLKeyStorePwd=****;"));
        assert!(url.contains("ProxyPassword=****;"));
        assert!(!url.contains("cloudera"));
        assert!(!url.contains("secret"));
    }

    #[test]
    fn test_impala_url_extra_params_and_database() {
        let mut options = ImpalaOptions {
            database: "sales".into(),
            ssl: "0".into(),
            ..ImpalaOptions::default()
        };
        options.params.insert("SocketTimeout".into(), "30".into());
        options.params.insert("LogLevel".into(), "6".into());
        let conf = ImpalaJdbcConnectionConfig::new("jdbc:impala://h:21050/", options);

        assert_eq!(
            conf.get_jdbc_url(),
            "jdbc:impala://h:21050/sales;ssl=0;AuthMech=1;AllowSelfSignedCerts=1;KrbServiceName=impala;LogLevel=6;SocketTimeout=30;"
        );
    }

    #[test]
    fn test_impala_config_from_access_config() {
        let conf = AccessConfig::new("jdbc:impala://h:21050", "Driver", "SELECT 1", None);

        assert_eq!(
            ImpalaJdbcConnectionConfig::from_config(&conf),
            ImpalaJdbcConnectionConfig::new("jdbc:impala://h:21050", ImpalaOptions::default())
        );
    }
}
