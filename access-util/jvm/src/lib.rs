// Utilities for running an embedded JVM within the process
// The JVM hosts the platform security module and the JDBC driver

mod classpath;
pub use classpath::*;
mod exception;
pub use exception::*;
mod jvm;
pub use jvm::*;
mod string;
pub use string::*;

pub use jni;
