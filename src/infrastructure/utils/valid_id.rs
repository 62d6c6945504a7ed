use crate::errors::AppError;

/// Parses a record id from a path segment. Anything that is not a positive
/// integer cannot name a record, so it is reported with the caller's
/// not-found message rather than as bad input.
pub fn valid_id(id: &str, not_found: &str) -> Result<i64, AppError> {
    id.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::NotFound(not_found.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_ids() {
        assert_eq!(valid_id("42", "x").unwrap(), 42);
    }

    #[test]
    fn rejects_junk_as_not_found() {
        for raw in ["", "abc", "-1", "0", "1.5", "99999999999999999999"] {
            assert!(matches!(valid_id(raw, "Scholarship not found"), Err(AppError::NotFound(_))), "{raw}");
        }
    }
}
