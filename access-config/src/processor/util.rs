use std::{iter::Peekable, mem, str::Chars};

use access_core::err::{bail, Context, Result};

use super::ConfigStringExpr as X;

/// Parse strings into an expression AST
pub(crate) fn parse_expression(str: &str) -> Result<X> {
    let mut chars = str.chars().peekable();

    let (exp, _) = parse_concat(&mut chars, false)
        .with_context(|| format!("Failed to parse expression \"{}\"", str))?;

    Ok(exp)
}

/// Parses a run of text and ${...} expressions
/// When nested inside an interpolation the run ends at the next ':' or '}'
fn parse_concat(chars: &mut Peekable<Chars>, nested: bool) -> Result<(X, Option<char>)> {
    let mut parts = vec![];
    let mut text = String::new();

    while let Some(c) = chars.next() {
        match c {
            // escape using \
            '\\' => {
                if let Some(escaped) = chars.next() {
                    text.push(escaped);
                }
            }
            '$' if chars.peek() == Some(&'{') => {
                chars.next();
                if !text.is_empty() {
                    parts.push(X::Constant(mem::take(&mut text)));
                }
                parts.push(parse_interpolation(chars)?);
            }
            ':' | '}' if nested => {
                if !text.is_empty() {
                    parts.push(X::Constant(text));
                }
                return Ok((simplify(parts), Some(c)));
            }
            c => text.push(c),
        }
    }

    if !text.is_empty() {
        parts.push(X::Constant(text));
    }

    Ok((simplify(parts), None))
}

/// Parses the parts of a ${...} expression, the opening "${" is already consumed
fn parse_interpolation(chars: &mut Peekable<Chars>) -> Result<X> {
    let mut parts = vec![];

    loop {
        let (part, terminator) = parse_concat(chars, true)?;

        match terminator {
            Some(':') => parts.push(part),
            Some('}') => {
                // "${}" has no parts at all
                if !parts.is_empty() || part != X::Constant(String::new()) {
                    parts.push(part);
                }
                return Ok(X::Interpolation(parts));
            }
            _ => bail!("Found unclosed ${{...}}"),
        }
    }
}

/// Removes redundant concat nodes
fn simplify(mut parts: Vec<X>) -> X {
    match parts.len() {
        0 => X::Constant(String::new()),
        1 => parts.remove(0),
        _ => X::Concat(parts),
    }
}

/// Resolves the expression bottom-up, inner interpolations before outer ones
pub(crate) fn process_expression(exp: X, cb: &impl Fn(X) -> Result<X>) -> Result<X> {
    Ok(match exp {
        X::Constant(_) => exp,
        X::Concat(parts) => X::Concat(
            parts
                .into_iter()
                .map(|p| process_expression(p, cb))
                .collect::<Result<Vec<_>>>()?,
        ),
        X::Interpolation(parts) => cb(X::Interpolation(
            parts
                .into_iter()
                .map(|p| process_expression(p, cb))
                .map(|p| p.map(flatten))
                .collect::<Result<Vec<_>>>()?,
        ))?,
    })
}

/// Collapses a concat of constants into a single constant
fn flatten(exp: X) -> X {
    match exp {
        X::Concat(parts) if parts.iter().all(|p| matches!(p, X::Constant(_))) => {
            X::Constant(expression_to_string(X::Concat(parts)))
        }
        _ => exp,
    }
}

/// Renders the expression back to a string
/// Unresolved interpolations are rendered in their ${...} form
pub(crate) fn expression_to_string(exp: X) -> String {
    match exp {
        X::Constant(s) => s,
        X::Concat(parts) => parts.into_iter().map(expression_to_string).collect(),
        X::Interpolation(parts) => format!(
            "${{{}}}",
            parts
                .into_iter()
                .map(expression_to_string)
                .collect::<Vec<_>>()
                .join(":")
        ),
    }
}

/// Matches an interpolation expression of constants starting with the supplied prefix
/// Returns the remaining parts after the prefix
pub(crate) fn match_interpolation(exp: &X, prefix: &[&str]) -> Option<Vec<String>> {
    let parts = match exp {
        X::Interpolation(parts) if parts.len() >= prefix.len() => parts,
        _ => return None,
    };

    let parts = parts
        .iter()
        .map(|p| match p {
            X::Constant(s) => Some(s.clone()),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;

    if parts.iter().zip(prefix.iter()).any(|(p, pre)| p != pre) {
        return None;
    }

    Some(parts[prefix.len()..].to_vec())
}
