use std::path::PathBuf;

use access_auth::KerberosEnv;
use access_util_jvm::{default_class_paths, parse_class_path, JvmOptions};

use crate::args::Args;

/// The settings of a run, resolved from the command line
#[derive(Debug, Clone, PartialEq)]
pub struct AppConf {
    /// Path of the properties file
    pub config_path: PathBuf,
    /// The kerberos material published to the JVM
    pub kerberos: KerberosEnv,
    /// The JAAS entry used to login
    pub login_context: String,
    /// Options for booting the JVM
    pub jvm: JvmOptions,
}

impl AppConf {
    pub fn from_args(args: &Args) -> Self {
        let class_path = match &args.classpath {
            Some(paths) => parse_class_path(paths),
            None => default_class_paths(),
        };

        Self {
            config_path: args.config.clone(),
            kerberos: KerberosEnv::new(&args.jaas_config, &args.krb5_config)
                .with_debug(args.krb5_debug),
            login_context: args.login_context.clone(),
            jvm: JvmOptions::new(class_path, args.jvm_opts.clone()),
        }
    }
}
