use std::io::{self, Write};

use access_config::{file_exists, loader::ConfigLoader};
use access_core::{
    config::AccessConfig,
    err::{Error, Result},
    interface::{Authenticator, Connection, Connector, LoginContext, ResultSet},
};
use access_jdbc::{ImpalaJdbcConnectionConfig, JdbcConnectionConfig};
use access_logging::{debug, info, warn};
use access_util_jvm::JavaException;
use itertools::Itertools;

use crate::{conf::AppConf, Fatal, Platform};

/// Outcome of a run which was not cut short
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub jaas_config_exists: bool,
    pub krb5_config_exists: bool,
    /// Number of rows printed, None when the query failed
    pub rows: Option<usize>,
}

/// Runs the login and the query, writing the results to `out`
/// and any query failures to `err`
pub struct Runner<'a, O, E> {
    conf: &'a AppConf,
    out: O,
    err: E,
}

impl<'a, O: Write, E: Write> Runner<'a, O, E> {
    pub fn new(conf: &'a AppConf, out: O, err: E) -> Self {
        Self { conf, out, err }
    }

    /// Loads the properties file and runs
    pub fn run<P: Platform>(&mut self, platform: P) -> Result<RunSummary, Fatal> {
        let config = ConfigLoader::new()
            .load(&self.conf.config_path)
            .map_err(Fatal::Config)?;

        self.run_with_config(platform, &config)
    }

    pub fn run_with_config<P: Platform>(
        &mut self,
        platform: P,
        config: &AccessConfig,
    ) -> Result<RunSummary, Fatal> {
        if let Some(keytab) = &config.keytab_file {
            if !file_exists(keytab) {
                warn!("Keytab {} does not exist", keytab.display());
            }
        }

        let jaas_config_exists = file_exists(self.conf.kerberos.jaas_config());
        let krb5_config_exists = file_exists(self.conf.kerberos.krb5_config());
        writeln!(self.out, "JAAS-Config: {}", jaas_config_exists)?;
        writeln!(self.out, "KRB5-Config: {}", krb5_config_exists)?;

        let (authenticator, mut connector) = platform
            .init(&self.conf.kerberos)
            .map_err(Fatal::Platform)?;

        let mut login = authenticator
            .login_context(&self.conf.login_context)
            .map_err(Fatal::LoginContext)?;
        login.login().map_err(Fatal::Authentication)?;
        writeln!(self.out, "Authentication succeeded!")?;

        match login.principals() {
            Ok(principals) => info!("Authenticated as {}", principals.iter().join(", ")),
            Err(err) => warn!("Failed to list authenticated principals: {:?}", err),
        }

        writeln!(self.out, "\n=============================================")?;
        writeln!(self.out, "Cloudera Impala JDBC Example")?;
        writeln!(self.out, "Using Connection URL: {}", config.connection_url)?;
        writeln!(self.out, "Running Query: {}", config.query)?;

        let rows = match self.query(&mut connector, config) {
            Ok(rows) => Some(rows),
            // failing to write the results ends the run, unlike failures of the query
            Err(err) => match err.downcast::<io::Error>() {
                Ok(err) => return Err(Fatal::Output(err)),
                Err(err) => {
                    self.report(&err)?;
                    None
                }
            },
        };
        self.out.flush()?;

        if let Err(err) = login.logout() {
            warn!("Failed to logout: {:?}", err);
        }

        Ok(RunSummary {
            jaas_config_exists,
            krb5_config_exists,
            rows,
        })
    }

    fn query<C: Connector>(&mut self, connector: &mut C, config: &AccessConfig) -> Result<usize> {
        connector.load_driver(&config.driver_class)?;

        let jdbc = ImpalaJdbcConnectionConfig::from_config(config);
        writeln!(self.out, "{}", jdbc.get_display_url())?;

        let mut con = connector.connect(&jdbc.get_jdbc_url())?;
        let res = self.print_results(&mut con, &config.query);

        if let Err(err) = con.close() {
            debug!("Ignoring failure to close connection: {:?}", err);
        }

        res
    }

    fn print_results<C: Connection>(&mut self, con: &mut C, query: &str) -> Result<usize> {
        let mut rs = con.execute_query(query)?;

        writeln!(self.out, "\n== Begin Query Results ======================")?;

        let mut rows = 0;
        while rs.next()? {
            let row = rs
                .row()?
                .into_iter()
                .map(|col| col.unwrap_or_else(|| "null".into()))
                .join("\t");
            writeln!(self.out, "{}", row)?;
            rows += 1;
        }

        writeln!(self.out, "== End Query Results =======================\n\n")?;
        debug!("Printed {} rows", rows);

        Ok(rows)
    }

    /// Prints the query failure in the format of Throwable::printStackTrace
    fn report(&mut self, err: &Error) -> io::Result<()> {
        debug!("Query failed: {:?}", err);

        match err.downcast_ref::<JavaException>() {
            Some(ex) => writeln!(self.err, "{}", ex.stack_trace_string()),
            None => writeln!(self.err, "{:#}", err),
        }
    }
}
