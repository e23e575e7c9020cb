// Queries the target data source through a JDBC driver
// We bridge into a JVM running within the process to run the driver

mod conf;
pub use conf::*;
mod connector;
pub use connector::*;
mod connection;
pub use connection::*;
mod result_set;
pub use result_set::*;
