use std::fmt::{self, Debug, Display};

/// Caps the formatted length of a logged value, eg a long query text
#[derive(Clone)]
pub struct MaxLogLength<'a, T: ?Sized> {
    limit: Option<usize>,
    val: &'a T,
}

impl<'a, T: ?Sized> MaxLogLength<'a, T> {
    pub fn new(limit: Option<usize>, val: &'a T) -> Self {
        Self { limit, val }
    }
}

impl<'a, T: Debug + ?Sized> Debug for MaxLogLength<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_limited(f, self.limit, format!("{:?}", self.val))
    }
}

impl<'a, T: Display + ?Sized> Display for MaxLogLength<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_limited(f, self.limit, self.val.to_string())
    }
}

fn write_limited(f: &mut fmt::Formatter<'_>, limit: Option<usize>, fmt: String) -> fmt::Result {
    match limit {
        Some(limit) if fmt.chars().count() > limit => {
            let truncated = fmt.chars().take(limit).collect::<String>();
            write!(f, "{}...", truncated)
        }
        _ => write!(f, "{}", fmt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_log_length_within_bounds() {
        let val = vec![1, 2, 3, 4, 5];
        let fmt = format!("{:?}", MaxLogLength::new(Some(50), &val));

        assert_eq!(fmt, "[1, 2, 3, 4, 5]");
    }

    #[test]
    fn test_max_log_length_no_limit() {
        let fmt = format!("{}", MaxLogLength::new(None, "SELECT count(*) FROM sample_07"));

        assert_eq!(fmt, "SELECT count(*) FROM sample_07");
    }

    #[test]
    fn test_max_log_length_truncated() {
        let fmt = format!("{}", MaxLogLength::new(Some(6), "SELECT count(*) FROM sample_07"));

        assert_eq!(fmt, "SELECT...");
    }

    #[test]
    fn test_max_log_length_truncates_on_char_boundary() {
        let fmt = format!("{}", MaxLogLength::new(Some(2), "äöü"));

        assert_eq!(fmt, "äö...");
    }
}
