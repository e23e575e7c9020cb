use access_core::err::Result;

use crate::ctx::Ctx;

pub(crate) mod dir;
pub(crate) mod env;
pub(crate) mod util;

/// A config processor resolves interpolated expressions in configuration values
pub(crate) trait ConfigExprProcessor {
    /// Gets the human readable display name for the processor
    fn display_name(&self) -> &str;

    /// Resolves the supplied expression
    /// Expressions which the processor does not understand are returned unchanged
    fn process(&self, ctx: &Ctx, expr: ConfigStringExpr) -> Result<ConfigStringExpr>;
}

/// AST used to represent configuration expressions
#[derive(Debug, PartialEq, Clone)]
pub(crate) enum ConfigStringExpr {
    Constant(String),
    Concat(Vec<ConfigStringExpr>),
    /// Represents an interpolated value used in the configuration
    /// Format ${[part 1]:[part 2]..:[part n]}
    /// For instance, ${env:KRB5_REALM}
    Interpolation(Vec<ConfigStringExpr>),
}
