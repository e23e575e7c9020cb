use crate::err::Result;

/// Creates login contexts from the platform's login configuration
pub trait Authenticator {
    type TLoginContext: LoginContext;

    /// Creates the login context for the named login configuration entry
    fn login_context(&self, name: &str) -> Result<Self::TLoginContext>;
}

/// A named login context which can authenticate the current process
pub trait LoginContext {
    /// Performs the authentication
    fn login(&mut self) -> Result<()>;

    /// Gets the names of the principals which were authenticated
    fn principals(&self) -> Result<Vec<String>>;

    /// Logs out the authenticated subject
    fn logout(&mut self) -> Result<()>;
}
