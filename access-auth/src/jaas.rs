use access_core::{
    err::{Context, Result},
    interface::{Authenticator, LoginContext},
};
use access_logging::{info, warn};
use access_util_jvm::{
    java_string,
    jni::objects::{GlobalRef, JObjectArray, JValue},
    JavaResultExt, Jvm,
};

const LOGIN_CONTEXT_CLASS: &str = "javax/security/auth/login/LoginContext";
const CALLBACK_HANDLER_CLASS: &str = "com/sun/security/auth/callback/TextCallbackHandler";

/// Creates JAAS login contexts inside the embedded JVM
///
/// The login contexts are resolved from the file referenced by the
/// java.security.auth.login.config system property.
#[derive(Clone)]
pub struct JaasAuthenticator {
    jvm: Jvm,
}

impl JaasAuthenticator {
    pub fn new(jvm: Jvm) -> Self {
        Self { jvm }
    }
}

impl Authenticator for JaasAuthenticator {
    type TLoginContext = JaasLoginContext;

    fn login_context(&self, name: &str) -> Result<JaasLoginContext> {
        info!("Creating login context '{}'", name);

        let ctx = self.jvm.with_local_frame(16, |env| {
            // prompts on the terminal, should the login module require input
            let handler = env
                .new_object(CALLBACK_HANDLER_CLASS, "()V", &[])
                .catch_java(env)
                .context("Failed to create callback handler")?;

            let name_j = env.new_string(name)?;
            let ctx = env
                .new_object(
                    LOGIN_CONTEXT_CLASS,
                    "(Ljava/lang/String;Ljavax/security/auth/callback/CallbackHandler;)V",
                    &[JValue::Object(&name_j), JValue::Object(&handler)],
                )
                .catch_java(env)
                .with_context(|| format!("Failed to create login context '{}'", name))?;

            Ok(env.new_global_ref(ctx)?)
        })?;

        Ok(JaasLoginContext {
            jvm: self.jvm,
            name: name.to_string(),
            ctx,
            logged_in: false,
        })
    }
}

/// A javax.security.auth.login.LoginContext
pub struct JaasLoginContext {
    jvm: Jvm,
    name: String,
    ctx: GlobalRef,
    logged_in: bool,
}

impl JaasLoginContext {
    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }
}

impl LoginContext for JaasLoginContext {
    fn login(&mut self) -> Result<()> {
        self.jvm.with_local_frame(8, |env| {
            env.call_method(self.ctx.as_obj(), "login", "()V", &[])
                .catch_java(env)
                .with_context(|| format!("Failed to login using context '{}'", self.name))?;

            Ok(())
        })?;

        self.logged_in = true;
        info!("Logged in using context '{}'", self.name);
        Ok(())
    }

    fn principals(&self) -> Result<Vec<String>> {
        self.jvm.with_local_frame(32, |env| {
            let subject = env
                .call_method(
                    self.ctx.as_obj(),
                    "getSubject",
                    "()Ljavax/security/auth/Subject;",
                    &[],
                )
                .catch_java(env)
                .context("Failed to invoke LoginContext::getSubject")?
                .l()?;

            // there is no subject until a login succeeded
            if subject.is_null() {
                return Ok(vec![]);
            }

            let principals = env
                .call_method(&subject, "getPrincipals", "()Ljava/util/Set;", &[])
                .catch_java(env)
                .context("Failed to invoke Subject::getPrincipals")?
                .l()?;

            let principals = JObjectArray::from(
                env.call_method(&principals, "toArray", "()[Ljava/lang/Object;", &[])
                    .catch_java(env)
                    .context("Failed to invoke Set::toArray")?
                    .l()?,
            );

            let len = env.get_array_length(&principals)?;
            let mut names = Vec::with_capacity(len as usize);

            for idx in 0..len {
                let principal = env.get_object_array_element(&principals, idx)?;
                let name = env
                    .call_method(&principal, "getName", "()Ljava/lang/String;", &[])
                    .catch_java(env)
                    .context("Failed to invoke Principal::getName")?
                    .l()?;

                names.extend(java_string(env, name)?);
                env.delete_local_ref(principal)?;
            }

            Ok(names)
        })
    }

    fn logout(&mut self) -> Result<()> {
        if !self.logged_in {
            return Ok(());
        }

        self.jvm.with_local_frame(8, |env| {
            env.call_method(self.ctx.as_obj(), "logout", "()V", &[])
                .catch_java(env)
                .with_context(|| format!("Failed to logout of context '{}'", self.name))?;

            Ok(())
        })?;

        self.logged_in = false;
        info!("Logged out of context '{}'", self.name);
        Ok(())
    }
}

impl Drop for JaasLoginContext {
    fn drop(&mut self) {
        if let Err(err) = self.logout() {
            warn!("Failed to logout of login context: {:?}", err);
        }
    }
}
