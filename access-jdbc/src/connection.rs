use access_core::{
    err::{Context, Result},
    interface::Connection,
};
use access_logging::{debug, warn, MaxLogLength};
use access_util_jvm::{
    jni::{
        objects::{GlobalRef, JValue},
        JNIEnv,
    },
    JavaResultExt, Jvm,
};

use crate::JdbcResultSet;

/// Wrapper of a java.sql.Connection
pub struct JdbcConnection {
    jvm: Jvm,
    jdbc_con: GlobalRef,
    closed: bool,
}

impl JdbcConnection {
    pub(crate) fn new(jvm: Jvm, jdbc_con: GlobalRef) -> Self {
        Self {
            jvm,
            jdbc_con,
            closed: false,
        }
    }

    /// Checks whether the connection is closed
    pub fn is_closed(&self) -> Result<bool> {
        self.jvm.with_local_frame(8, |env| {
            let res = env
                .call_method(self.jdbc_con.as_obj(), "isClosed", "()Z", &[])
                .catch_java(env)
                .context("Failed to invoke Connection::isClosed")?
                .z()?;

            Ok(res)
        })
    }
}

impl Connection for JdbcConnection {
    type TResultSet = JdbcResultSet;

    fn execute_query(&mut self, query: &str) -> Result<JdbcResultSet> {
        debug!("Executing query: {}", MaxLogLength::new(Some(256), query));

        let (statement, result_set) = self.jvm.with_local_frame(16, |env| {
            let statement = env
                .call_method(
                    self.jdbc_con.as_obj(),
                    "createStatement",
                    "()Ljava/sql/Statement;",
                    &[],
                )
                .catch_java(env)
                .context("Failed to invoke Connection::createStatement")?
                .l()?;
            let statement = env.new_global_ref(statement)?;

            let query_j = env.new_string(query)?;
            let result_set = match env
                .call_method(
                    statement.as_obj(),
                    "executeQuery",
                    "(Ljava/lang/String;)Ljava/sql/ResultSet;",
                    &[JValue::Object(&query_j)],
                )
                .catch_java(env)
            {
                Ok(res) => res.l()?,
                Err(err) => {
                    close_statement(env, &statement);
                    return Err(err.context("Failed to invoke Statement::executeQuery"));
                }
            };

            Ok((statement, env.new_global_ref(result_set)?))
        })?;

        JdbcResultSet::new(self.jvm, statement, result_set)
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        // the connection is unusable after a failed close, so it is never retried
        self.closed = true;

        self.jvm.with_local_frame(8, |env| {
            env.call_method(self.jdbc_con.as_obj(), "close", "()V", &[])
                .catch_java(env)
                .context("Failed to invoke Connection::close")?;

            Ok(())
        })?;

        debug!("Closed JDBC connection");
        Ok(())
    }
}

/// Closes a statement which will not be handed out, only logging failures
fn close_statement(env: &mut JNIEnv, statement: &GlobalRef) {
    let res = env
        .call_method(statement.as_obj(), "close", "()V", &[])
        .catch_java(env);

    if let Err(err) = res {
        warn!("Failed to close JDBC statement: {:?}", err);
    }
}

impl Drop for JdbcConnection {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            warn!("Failed to close JDBC connection: {:?}", err);
        }
    }
}
