use access_core::{
    err::{Context, Result},
    interface::ResultSet,
};
use access_logging::warn;
use access_util_jvm::{
    java_string,
    jni::objects::{GlobalRef, JValue},
    JavaResultExt, Jvm,
};

/// Implementation of the JDBC result set
pub struct JdbcResultSet {
    jvm: Jvm,
    statement: GlobalRef,
    jdbc_result_set: GlobalRef,
    column_count: usize,
}

impl JdbcResultSet {
    pub(crate) fn new(jvm: Jvm, statement: GlobalRef, jdbc_result_set: GlobalRef) -> Result<Self> {
        let mut rs = Self {
            jvm,
            statement,
            jdbc_result_set,
            column_count: 0,
        };

        // on failure the result set and statement are closed as rs is dropped
        rs.column_count = rs.read_column_count()?;
        Ok(rs)
    }

    fn read_column_count(&self) -> Result<usize> {
        let count = self.jvm.with_local_frame(8, |env| {
            let meta = env
                .call_method(
                    self.jdbc_result_set.as_obj(),
                    "getMetaData",
                    "()Ljava/sql/ResultSetMetaData;",
                    &[],
                )
                .catch_java(env)
                .context("Failed to invoke ResultSet::getMetaData")?
                .l()?;

            let count = env
                .call_method(&meta, "getColumnCount", "()I", &[])
                .catch_java(env)
                .context("Failed to invoke ResultSetMetaData::getColumnCount")?
                .i()?;

            Ok(count)
        })?;

        count.try_into().context("Column count cannot be < 0")
    }

    fn close(&mut self) -> Result<()> {
        self.jvm.with_local_frame(8, |env| {
            env.call_method(self.jdbc_result_set.as_obj(), "close", "()V", &[])
                .catch_java(env)
                .context("Failed to invoke ResultSet::close")?;
            env.call_method(self.statement.as_obj(), "close", "()V", &[])
                .catch_java(env)
                .context("Failed to invoke Statement::close")?;

            Ok(())
        })
    }
}

impl ResultSet for JdbcResultSet {
    fn next(&mut self) -> Result<bool> {
        self.jvm.with_local_frame(8, |env| {
            let res = env
                .call_method(self.jdbc_result_set.as_obj(), "next", "()Z", &[])
                .catch_java(env)
                .context("Failed to invoke ResultSet::next")?
                .z()?;

            Ok(res)
        })
    }

    fn column_count(&self) -> Result<usize> {
        Ok(self.column_count)
    }

    fn get_string(&self, col: usize) -> Result<Option<String>> {
        let idx: i32 = col.try_into().context("Column index out of range")?;

        self.jvm.with_local_frame(8, |env| {
            let val = env
                .call_method(
                    self.jdbc_result_set.as_obj(),
                    "getString",
                    "(I)Ljava/lang/String;",
                    &[JValue::Int(idx)],
                )
                .catch_java(env)
                .with_context(|| format!("Failed to invoke ResultSet::getString({})", col))?
                .l()?;

            java_string(env, val)
        })
    }
}

impl Drop for JdbcResultSet {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            warn!("Failed to close JDBC result set: {:?}", err);
        }
    }
}
