use std::{
    io::{self, Write},
    process,
};

use access_logging::{debug, warn};
use access_main::{args::Args, conf::AppConf, JvmPlatform, Runner};
use clap::Parser;

/// Entrypoint of the impala-access binary
fn main() {
    // eg JAVA_HOME or IMPALA_ACCESS_CLASSPATH
    dotenvy::dotenv().ok();

    if let Err(err) = access_logging::init_logging() {
        eprintln!("Failed to initialise logging: {:?}", err);
    }

    let args = Args::parse();
    debug!("Running with {:?}", args);
    let conf = AppConf::from_args(&args);
    let platform = JvmPlatform::new(conf.jvm.clone());

    let res = Runner::new(&conf, io::stdout(), io::stderr()).run(platform);
    let _ = io::stdout().flush();

    match res {
        Ok(summary) => {
            if summary.rows.is_none() {
                warn!("Query did not complete");
            }
        }
        Err(fatal) => {
            eprintln!("{}", fatal);
            process::exit(fatal.exit_code());
        }
    }
}
