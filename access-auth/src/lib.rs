//! Kerberos authentication using the platform's JAAS login modules

mod kerberos;
pub use kerberos::*;
mod jaas;
pub use jaas::*;
