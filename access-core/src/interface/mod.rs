mod auth;
pub use auth::*;
mod connection;
pub use connection::*;
