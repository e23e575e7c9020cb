use std::path::PathBuf;

use access_core::err::{Context, Error, Result};
use access_logging::{debug, info};
use itertools::Itertools;
use jni::{
    objects::{JObject, JValue},
    InitArgsBuilder, JNIEnv, JNIVersion, JavaVM,
};
use once_cell::sync::OnceCell;

use crate::{find_jars, java_string, JavaException};

// Global JVM instance, a process can only ever host a single JVM
static JVM: OnceCell<JavaVM> = OnceCell::new();

/// Options used when booting the JVM
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JvmOptions {
    /// Jars or directories of jars to add to the class path
    pub class_path: Vec<PathBuf>,
    /// Additional raw JVM options, eg -Xmx512m
    pub options: Vec<String>,
}

impl JvmOptions {
    pub fn new(class_path: Vec<PathBuf>, options: Vec<String>) -> Self {
        Self {
            class_path,
            options,
        }
    }

    /// Renders the full list of JVM options
    pub fn jvm_args(&self) -> Result<Vec<String>> {
        let jars = find_jars(&self.class_path)?;
        let mut args = vec![];

        if !jars.is_empty() {
            args.push(format!(
                "-Djava.class.path={}",
                jars.iter().map(|i| i.to_string_lossy()).join(":")
            ));
        }

        args.extend(self.options.iter().cloned());
        Ok(args)
    }
}

/// Wrapper for booting and interaction with the JVM
#[derive(Clone, Copy)]
pub struct Jvm {
    jvm: &'static JavaVM,
}

impl Jvm {
    /// Boots the process-wide JVM, or returns it if it is already running
    /// The options only take effect on the first boot
    pub fn boot(options: &JvmOptions) -> Result<Self> {
        let jvm = JVM.get_or_try_init(|| -> Result<JavaVM> {
            let args = options.jvm_args()?;
            info!("Booting JVM...");
            debug!("JVM options: {:?}", args);

            let mut builder = InitArgsBuilder::new().version(JNIVersion::V8);
            for arg in args.iter() {
                builder = builder.option(arg.as_str());
            }

            let jvm_args = builder.build().context("Failed to init JVM args")?;
            let jvm = JavaVM::new(jvm_args).context("Failed to boot JVM")?;

            Ok(jvm)
        })?;

        Ok(Self { jvm })
    }

    /// Attaches the current thread to the jvm
    pub fn env(&self) -> Result<JNIEnv<'static>> {
        self.jvm
            .attach_current_thread_permanently()
            .context("Failed to attach current thread to JVM")
    }

    /// Executes the supplied function in a local frame
    pub fn with_local_frame<F, R>(&self, local_ref_capacity: i32, cb: F) -> Result<R>
    where
        F: FnOnce(&mut JNIEnv) -> Result<R>,
    {
        let mut env = self.env()?;

        env.with_local_frame(local_ref_capacity, |env| cb(env))
    }

    /// Sets a java system property, equivalent to System.setProperty
    pub fn set_system_property(&self, key: &str, value: &str) -> Result<()> {
        debug!("Setting system property {}={}", key, value);

        self.with_local_frame(8, |env| {
            let key_j = env.new_string(key)?;
            let value_j = env.new_string(value)?;

            env.call_static_method(
                "java/lang/System",
                "setProperty",
                "(Ljava/lang/String;Ljava/lang/String;)Ljava/lang/String;",
                &[JValue::Object(&key_j), JValue::Object(&value_j)],
            )
            .catch_java(env)
            .with_context(|| format!("Failed to set system property {}", key))?;

            Ok(())
        })
    }

    /// Gets a java system property, equivalent to System.getProperty
    pub fn get_system_property(&self, key: &str) -> Result<Option<String>> {
        self.with_local_frame(8, |env| {
            let key_j = env.new_string(key)?;

            let value = env
                .call_static_method(
                    "java/lang/System",
                    "getProperty",
                    "(Ljava/lang/String;)Ljava/lang/String;",
                    &[JValue::Object(&key_j)],
                )
                .catch_java(env)
                .with_context(|| format!("Failed to get system property {}", key))?
                .l()?;

            java_string(env, value)
        })
    }

    /// Gets the system class loader, used for loading classes from the class path
    pub fn system_class_loader<'local>(&self, env: &mut JNIEnv<'local>) -> Result<JObject<'local>> {
        let loader = env
            .call_static_method(
                "java/lang/ClassLoader",
                "getSystemClassLoader",
                "()Ljava/lang/ClassLoader;",
                &[],
            )
            .catch_java(env)
            .context("Failed to get system class loader")?
            .l()?;

        Ok(loader)
    }
}

/// Checks for any pending Java exceptions, clearing and returning them if present
fn check_exceptions(env: &mut JNIEnv) -> Result<()> {
    if !env
        .exception_check()
        .context("Failed to check for exception")?
    {
        return Ok(());
    }

    let throwable = env
        .exception_occurred()
        .context("Failed to get pending exception")?;
    env.exception_clear()
        .context("Failed to clear exception")?;

    let exception = JavaException::from_throwable(env, &throwable)?;
    env.delete_local_ref(throwable)?;

    Err(exception.into())
}

/// Converts the results of JNI calls, capturing the thrown java exceptions
pub trait JavaResultExt<T> {
    /// Converts the result, any pending java exception becomes a [`JavaException`] error
    fn catch_java(self, env: &mut JNIEnv) -> Result<T>;
}

impl<T> JavaResultExt<T> for jni::errors::Result<T> {
    fn catch_java(self, env: &mut JNIEnv) -> Result<T> {
        match self {
            Ok(val) => Ok(val),
            Err(jni::errors::Error::JavaException) => {
                check_exceptions(env)?;
                Err(Error::msg("Java exception occured"))
            }
            Err(err) => Err(err.into()),
        }
    }
}
