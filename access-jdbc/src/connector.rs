use access_core::{
    err::{bail, Context, Result},
    interface::Connector,
};
use access_logging::info;
use access_util_jvm::{
    jni::objects::{GlobalRef, JObject, JValue},
    JavaResultExt, Jvm,
};

use crate::JdbcConnection;

/// Opens JDBC connections using a driver loaded into the embedded JVM
pub struct JdbcConnector {
    jvm: Jvm,
    driver: Option<(String, GlobalRef)>,
}

impl JdbcConnector {
    pub fn new(jvm: Jvm) -> Self {
        Self { jvm, driver: None }
    }

    /// Gets the class name of the loaded driver
    pub fn driver_class(&self) -> Option<&str> {
        self.driver.as_ref().map(|(class, _)| class.as_str())
    }
}

impl Connector for JdbcConnector {
    type TConnection = JdbcConnection;

    fn load_driver(&mut self, driver_class: &str) -> Result<()> {
        info!("Loading JDBC driver {}", driver_class);

        let driver = self.jvm.with_local_frame(16, |env| {
            let loader = self.jvm.system_class_loader(env)?;
            let name = env.new_string(driver_class)?;

            // initialising the class registers the driver with the DriverManager
            let class = env
                .call_static_method(
                    "java/lang/Class",
                    "forName",
                    "(Ljava/lang/String;ZLjava/lang/ClassLoader;)Ljava/lang/Class;",
                    &[JValue::Object(&name), JValue::Bool(1), JValue::Object(&loader)],
                )
                .catch_java(env)
                .with_context(|| format!("Failed to load JDBC driver class {}", driver_class))?
                .l()?;

            let ctor = env
                .call_method(
                    &class,
                    "getDeclaredConstructor",
                    "([Ljava/lang/Class;)Ljava/lang/reflect/Constructor;",
                    &[JValue::Object(&JObject::null())],
                )
                .catch_java(env)
                .with_context(|| format!("Failed to find constructor of {}", driver_class))?
                .l()?;

            let driver = env
                .call_method(
                    &ctor,
                    "newInstance",
                    "([Ljava/lang/Object;)Ljava/lang/Object;",
                    &[JValue::Object(&JObject::null())],
                )
                .catch_java(env)
                .with_context(|| format!("Failed to instantiate {}", driver_class))?
                .l()?;

            if !env.is_instance_of(&driver, "java/sql/Driver")? {
                bail!("{} is not a java.sql.Driver", driver_class);
            }

            Ok(env.new_global_ref(driver)?)
        })?;

        self.driver = Some((driver_class.to_string(), driver));
        Ok(())
    }

    fn connect(&self, url: &str) -> Result<JdbcConnection> {
        let (driver_class, driver) = self
            .driver
            .as_ref()
            .context("A JDBC driver must be loaded before connecting")?;

        let con = self.jvm.with_local_frame(16, |env| {
            let url_j = env.new_string(url)?;
            let props = env
                .new_object("java/util/Properties", "()V", &[])
                .catch_java(env)
                .context("Failed to create java properties")?;

            let con = env
                .call_method(
                    driver.as_obj(),
                    "connect",
                    "(Ljava/lang/String;Ljava/util/Properties;)Ljava/sql/Connection;",
                    &[JValue::Object(&url_j), JValue::Object(&props)],
                )
                .catch_java(env)
                .context("Failed to open JDBC connection")?
                .l()?;

            // drivers return null for urls they do not handle
            if con.is_null() {
                bail!("JDBC driver {} does not accept the connection url", driver_class);
            }

            Ok(env.new_global_ref(con)?)
        })?;

        info!("Opened JDBC connection");
        Ok(JdbcConnection::new(self.jvm, con))
    }
}
