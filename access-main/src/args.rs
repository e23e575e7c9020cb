use std::path::PathBuf;

use clap::Parser;

/// Authenticates against kerberos and runs a query against Impala over JDBC
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// The path of the properties file
    #[clap(short, long, value_parser, default_value = "config.props")]
    pub config: PathBuf,

    /// The path of the JAAS login configuration
    #[clap(long, value_parser, default_value = "./jaas-impala.conf")]
    pub jaas_config: PathBuf,

    /// The path of the kerberos client configuration
    #[clap(long, value_parser, default_value = "./krb5.conf")]
    pub krb5_config: PathBuf,

    /// The entry of the JAAS configuration used to login
    #[clap(long, default_value = "Impala-client")]
    pub login_context: String,

    /// Jars or directories of jars, separated by ':'
    /// Defaults to $IMPALA_ACCESS_CLASSPATH, then to the directory of this binary
    #[clap(long)]
    pub classpath: Option<String>,

    /// Additional options passed to the JVM, eg -Xmx512m
    #[clap(long = "jvm-opt", allow_hyphen_values = true)]
    pub jvm_opts: Vec<String>,

    /// Traces the kerberos login
    #[clap(long)]
    pub krb5_debug: bool,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["impala-access"]).unwrap();

        assert_eq!(args.config, PathBuf::from("config.props"));
        assert_eq!(args.jaas_config, PathBuf::from("./jaas-impala.conf"));
        assert_eq!(args.krb5_config, PathBuf::from("./krb5.conf"));
        assert_eq!(args.login_context, "Impala-client");
        assert_eq!(args.classpath, None);
        assert_eq!(args.jvm_opts, Vec::<String>::new());
        assert!(!args.krb5_debug);
    }

    #[test]
    fn test_args_overrides() {
        let args = Args::try_parse_from([
            "impala-access",
            "-c",
            "/etc/access/config.props",
            "--login-context",
            "Other-client",
            "--classpath",
            "/opt/impala/lib",
            "--jvm-opt",
            "-Xmx512m",
            "--jvm-opt",
            "-Dsun.security.jgss.debug=true",
            "--krb5-debug",
        ])
        .unwrap();

        assert_eq!(args.config, PathBuf::from("/etc/access/config.props"));
        assert_eq!(args.login_context, "Other-client");
        assert_eq!(args.classpath, Some("/opt/impala/lib".into()));
        assert_eq!(
            args.jvm_opts,
            vec![
                "-Xmx512m".to_string(),
                "-Dsun.security.jgss.debug=true".to_string()
            ]
        );
        assert!(args.krb5_debug);
    }
}
