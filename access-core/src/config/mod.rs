use std::path::PathBuf;

use serde::{Deserialize, Serialize};

mod impala;
pub use impala::*;

/// The configuration of an access run, as loaded from the properties file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessConfig {
    /// The base JDBC connection url, eg jdbc:impala://host.domain:21050
    #[serde(rename = "connection.url")]
    pub connection_url: String,
    /// The fully qualified java class name of the JDBC driver
    #[serde(rename = "jdbc.driver.class.name")]
    pub driver_class: String,
    /// The query to execute
    #[serde(rename = "jdbc.query")]
    pub query: String,
    /// The keytab holding the principal's key
    /// This is consumed by the JAAS login module, not by us
    #[serde(rename = "keytab.file", default)]
    pub keytab_file: Option<PathBuf>,
    /// Impala specific connection options
    #[serde(flatten)]
    pub impala: ImpalaOptions,
}

impl AccessConfig {
    pub fn new(
        connection_url: impl Into<String>,
        driver_class: impl Into<String>,
        query: impl Into<String>,
        keytab_file: Option<PathBuf>,
    ) -> Self {
        Self {
            connection_url: connection_url.into(),
            driver_class: driver_class.into(),
            query: query.into(),
            keytab_file,
            impala: ImpalaOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_access_config_minimal() {
        let yaml = r#"
connection.url: jdbc:impala://host:21050
jdbc.driver.class.name: com.cloudera.impala.jdbc41.Driver
jdbc.query: SELECT 1
"#;
        let conf: AccessConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(
            conf,
            AccessConfig::new(
                "jdbc:impala://host:21050",
                "com.cloudera.impala.jdbc41.Driver",
                "SELECT 1",
                None
            )
        );
    }

    #[test]
    fn test_parse_access_config_with_keytab_and_impala_options() {
        let yaml = r#"
connection.url: jdbc:impala://host:21050
jdbc.driver.class.name: com.cloudera.impala.jdbc41.Driver
jdbc.query: SELECT 1
keytab.file: ./sec/impala.keytab
impala.database: sales
impala.krb.realm: EXAMPLE.COM
"#;
        let conf: AccessConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(conf.keytab_file, Some(PathBuf::from("./sec/impala.keytab")));
        assert_eq!(conf.impala.database, "sales");
        assert_eq!(conf.impala.krb_realm, Some("EXAMPLE.COM".into()));
        assert_eq!(conf.impala.ssl, "1");
    }

    #[test]
    fn test_parse_access_config_missing_query() {
        let yaml = r#"
connection.url: jdbc:impala://host:21050
jdbc.driver.class.name: com.cloudera.impala.jdbc41.Driver
"#;
        let res = serde_yaml::from_str::<AccessConfig>(yaml);

        assert!(res.unwrap_err().to_string().contains("jdbc.query"));
    }
}
