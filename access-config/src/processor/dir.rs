use access_core::err::Result;
use access_logging::trace;

use crate::ctx::Ctx;

use super::{util::match_interpolation, ConfigExprProcessor, ConfigStringExpr as X};

/// Interpolates configuration referencing the directory of the config file
#[derive(Default)]
pub struct DirConfigProcessor {}

impl ConfigExprProcessor for DirConfigProcessor {
    fn display_name(&self) -> &str {
        "current_dir"
    }

    fn process(&self, ctx: &Ctx, expr: X) -> Result<X> {
        let dir = ctx.path.as_ref().and_then(|p| p.parent());

        Ok(match (match_interpolation(&expr, &["dir"]), dir) {
            (Some(parts), Some(dir)) if parts.is_empty() => {
                let replacement = dir.to_string_lossy().to_string();
                trace!("Replaced dir expression with '{}'", replacement);
                X::Constant(replacement)
            }
            _ => expr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_processor_ignores_constants() {
        let ctx = Ctx::mock();
        let processor = DirConfigProcessor::default();

        let input = X::Constant("test".to_owned());
        let result = processor.process(&ctx, input.clone());

        assert_eq!(result.unwrap(), input);
    }

    #[test]
    fn test_dir_processor_replaces_dir_expr() {
        let ctx = Ctx::new(Some("/opt/access/config.props".into()));
        let processor = DirConfigProcessor::default();

        let input = X::Interpolation(vec![X::Constant("dir".to_owned())]);
        let result = processor.process(&ctx, input);

        assert_eq!(result.unwrap(), X::Constant("/opt/access".to_string()));
    }

    #[test]
    fn test_dir_processor_ignores_when_no_path() {
        let ctx = Ctx::mock();
        let processor = DirConfigProcessor::default();

        let input = X::Interpolation(vec![X::Constant("dir".to_owned())]);
        let result = processor.process(&ctx, input.clone());

        assert_eq!(result.unwrap(), input);
    }
}
