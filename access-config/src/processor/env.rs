use std::env;

use access_core::err::{bail, Result};
use access_logging::trace;

use crate::ctx::Ctx;

use super::{util::match_interpolation, ConfigExprProcessor, ConfigStringExpr as X};

/// Interpolates configuration using environment variables
/// Format ${env:NAME} or ${env:NAME:default}
#[derive(Default)]
pub struct EnvConfigProcessor {}

impl ConfigExprProcessor for EnvConfigProcessor {
    fn display_name(&self) -> &str {
        "environment"
    }

    fn process(&self, _ctx: &Ctx, expr: X) -> Result<X> {
        let parts = match match_interpolation(&expr, &["env"]) {
            Some(parts) if !parts.is_empty() => parts,
            _ => return Ok(expr),
        };

        let name = &parts[0];
        // defaults may contain ':' themselves, eg urls
        let default = if parts.len() > 1 {
            Some(parts[1..].join(":"))
        } else {
            None
        };

        match (env::var(name), default) {
            (Ok(val), _) => {
                trace!("Replaced env expression with value of ${}", name);
                Ok(X::Constant(val))
            }
            (Err(_), Some(default)) => {
                trace!("Env var ${} not set, using default", name);
                Ok(X::Constant(default))
            }
            (Err(err), None) => bail!("Failed to read environment variable {}: {}", name, err),
        }
    }
}
