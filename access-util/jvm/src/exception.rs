use std::fmt::{self, Display};

use access_core::err::{Error, Result};
use jni::{
    objects::{JObject, JObjectArray},
    JNIEnv,
};
use crate::java_string;

/// Causes are not followed beyond this depth
const MAX_CAUSE_DEPTH: usize = 8;

/// A java exception which was thrown across the JNI boundary
#[derive(Debug, Clone, PartialEq)]
pub struct JavaException {
    /// Fully qualified class name of the throwable
    pub class: String,
    /// The result of Throwable::getMessage
    pub message: Option<String>,
    /// The rendered stack frames
    pub stack_trace: Vec<String>,
    pub cause: Option<Box<JavaException>>,
}

impl Display for JavaException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{}: {}", self.class, msg),
            None => write!(f, "{}", self.class),
        }
    }
}

impl std::error::Error for JavaException {}

impl JavaException {
    pub fn new(class: impl Into<String>, message: Option<String>) -> Self {
        Self {
            class: class.into(),
            message,
            stack_trace: vec![],
            cause: None,
        }
    }

    /// Reads the details of the supplied throwable
    pub(crate) fn from_throwable(env: &mut JNIEnv, throwable: &JObject) -> Result<Self> {
        env.with_local_frame(64, |env| Self::describe(env, throwable, 0))
    }

    fn describe(env: &mut JNIEnv, throwable: &JObject, depth: usize) -> Result<Self> {
        let class = env.get_object_class(throwable)?;
        let name = env
            .call_method(&class, "getName", "()Ljava/lang/String;", &[])?
            .l()?;
        let class = java_string(env, name)?.unwrap_or_default();

        let message = env
            .call_method(throwable, "getMessage", "()Ljava/lang/String;", &[])?
            .l()?;
        let message = java_string(env, message)?;

        let frames = JObjectArray::from(
            env.call_method(
                throwable,
                "getStackTrace",
                "()[Ljava/lang/StackTraceElement;",
                &[],
            )?
            .l()?,
        );
        let len = env.get_array_length(&frames)?;
        let mut stack_trace = Vec::with_capacity(len as usize);

        for idx in 0..len {
            let frame = env.get_object_array_element(&frames, idx)?;
            let rendered = env
                .call_method(&frame, "toString", "()Ljava/lang/String;", &[])?
                .l()?;
            stack_trace.extend(java_string(env, rendered)?);
            env.delete_local_ref(frame)?;
        }

        let cause = env
            .call_method(throwable, "getCause", "()Ljava/lang/Throwable;", &[])?
            .l()?;
        let cause = if cause.is_null()
            || depth + 1 >= MAX_CAUSE_DEPTH
            || env.is_same_object(&cause, throwable)?
        {
            None
        } else {
            Some(Box::new(Self::describe(env, &cause, depth + 1)?))
        };

        Ok(Self {
            class,
            message,
            stack_trace,
            cause,
        })
    }

    /// Gets the message of the exception in the supplied error
    ///
    /// Falls back to the error chain when the error did not originate from java.
    pub fn message_of(err: &Error) -> String {
        match err.downcast_ref::<JavaException>() {
            Some(ex) => ex.message.clone().unwrap_or_else(|| "null".into()),
            None => format!("{:#}", err),
        }
    }

    /// Renders the exception in the format of Throwable::printStackTrace
    pub fn stack_trace_string(&self) -> String {
        let mut out = self.to_string();
        for frame in self.stack_trace.iter() {
            out.push_str("\n\tat ");
            out.push_str(frame);
        }

        if let Some(cause) = &self.cause {
            out.push_str("\nCaused by: ");
            out.push_str(&cause.stack_trace_string());
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use access_core::err::Context;

    use super::*;

    fn login_exception() -> JavaException {
        JavaException {
            class: "javax.security.auth.login.LoginException".into(),
            message: Some("No LoginModules configured for Impala-client".into()),
            stack_trace: vec![
                "javax.security.auth.login.LoginContext.init(LoginContext.java:264)".into(),
                "javax.security.auth.login.LoginContext.<init>(LoginContext.java:417)".into(),
            ],
            cause: None,
        }
    }

    #[test]
    fn test_display_java_exception() {
        assert_eq!(
            login_exception().to_string(),
            "javax.security.auth.login.LoginException: No LoginModules configured for Impala-client"
        );
        assert_eq!(
            JavaException::new("java.lang.NullPointerException", None).to_string(),
            "java.lang.NullPointerException"
        );
    }

    #[test]
    fn test_message_of_java_exception_through_context() {
        let err = Err::<(), _>(login_exception())
            .context("Failed to create login context")
            .unwrap_err();

        assert_eq!(
            JavaException::message_of(&err),
            "No LoginModules configured for Impala-client"
        );
    }

    #[test]
    fn test_message_of_java_exception_without_message() {
        let err = Error::from(JavaException::new("java.lang.NullPointerException", None));

        assert_eq!(JavaException::message_of(&err), "null");
    }

    #[test]
    fn test_message_of_other_error() {
        let err = Err::<(), _>(access_core::err::anyhow!("inner"))
            .context("outer")
            .unwrap_err();

        assert_eq!(JavaException::message_of(&err), "outer: inner");
    }

    #[test]
    fn test_stack_trace_string() {
        let mut ex = JavaException::new("java.sql.SQLException", Some("Query failed".into()));
        ex.stack_trace =
            vec!["com.cloudera.impala.jdbc.Statement.executeQuery(Unknown Source)".into()];
        ex.cause = Some(Box::new(login_exception()));

        assert_eq!(
            ex.stack_trace_string(),
            "java.sql.SQLException: Query failed
\tat com.cloudera.impala.jdbc.Statement.executeQuery(Unknown Source)
Caused by: javax.security.auth.login.LoginException: No LoginModules configured for Impala-client
\tat javax.security.auth.login.LoginContext.init(LoginContext.java:264)
\tat javax.security.auth.login.LoginContext.<init>(LoginContext.java:417)"
        );
    }
}
