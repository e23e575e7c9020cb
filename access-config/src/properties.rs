//! Parsing of java style .properties files
//!
//! @see https://docs.oracle.com/javase/8/docs/api/java/util/Properties.html#load-java.io.Reader-

use access_core::err::{bail, ensure, Context, Result};

/// Parses the supplied properties text into its key/value pairs, in file order.
/// When a key appears multiple times every occurance is returned, the last wins.
pub fn parse_properties(input: &str) -> Result<Vec<(String, String)>> {
    logical_lines(input)
        .into_iter()
        .map(|line| {
            let (key, value) = split_key_value(&line);
            let key =
                unescape(key).with_context(|| format!("Failed to parse key in \"{}\"", line))?;
            let value =
                unescape(value).with_context(|| format!("Failed to parse value in \"{}\"", line))?;

            Ok((key, value))
        })
        .collect()
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Joins continued lines and drops blank and comment lines
fn logical_lines(input: &str) -> Vec<String> {
    let mut lines = vec![];
    let mut current: Option<String> = None;

    // lines end at \n, \r\n or a lone \r
    let input = input.replace("\r\n", "\n");
    for line in input.split(['\n', '\r']) {
        let trimmed = line.trim_start_matches(is_whitespace);

        let mut buff = match current.take() {
            Some(buff) => buff,
            None if trimmed.is_empty() || trimmed.starts_with(['#', '!']) => continue,
            None => String::new(),
        };

        // an odd number of trailing backslashes continues the line
        let trailing = trimmed.chars().rev().take_while(|c| *c == '\\').count();
        if trailing % 2 == 1 {
            buff.push_str(&trimmed[..trimmed.len() - 1]);
            current = Some(buff);
        } else {
            buff.push_str(trimmed);
            lines.push(buff);
        }
    }

    if let Some(buff) = current {
        lines.push(buff);
    }

    lines
}

/// Splits the raw (still escaped) line into its key and value
fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();

    for (idx, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }

        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = idx;
                break;
            }
            c if is_whitespace(c) => {
                key_end = idx;
                break;
            }
            _ => {}
        }
    }

    let rest = line[key_end..].trim_start_matches(is_whitespace);
    let rest = rest
        .strip_prefix(['=', ':'])
        .unwrap_or(rest)
        .trim_start_matches(is_whitespace);

    (&line[..key_end], rest)
}

/// Resolves the escape sequences in a key or value
fn unescape(raw: &str) -> Result<String> {
    // \uXXXX escapes are utf-16 code units, so we decode through utf-16
    let mut units: Vec<u16> = Vec::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            let mut buff = [0u16; 2];
            units.extend_from_slice(c.encode_utf16(&mut buff));
            continue;
        }

        let escaped = match chars.next() {
            Some(c) => c,
            None => break,
        };

        let unit = match escaped {
            't' => '\t' as u16,
            'n' => '\n' as u16,
            'r' => '\r' as u16,
            'f' => 0x0c,
            'u' => {
                let hex = chars.by_ref().take(4).collect::<String>();
                ensure!(
                    hex.len() == 4 && hex.chars().all(|c| c.is_ascii_hexdigit()),
                    "Malformed \\uxxxx encoding \"\\u{}\"",
                    hex
                );
                u16::from_str_radix(&hex, 16)?
            }
            c => {
                let mut buff = [0u16; 2];
                units.extend_from_slice(c.encode_utf16(&mut buff));
                continue;
            }
        };

        units.push(unit);
    }

    match String::from_utf16(&units) {
        Ok(s) => Ok(s),
        Err(_) => bail!("Invalid utf-16 surrogate sequence in \"{}\"", raw),
    }
}
