//! Logs in to kerberos through JAAS and runs a single query against Impala
//! using its JDBC driver, both hosted by an embedded JVM.

pub mod args;
pub mod conf;
mod fatal;
pub use fatal::*;
mod platform;
pub use platform::*;
mod runner;
pub use runner::*;
