use subtle::ConstantTimeEq;

/// Constant-time comparison for credentials.
///
/// Strings of different length compare unequal; the length itself is not
/// treated as secret.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("s3cret", "s3cret"));
        assert!(!constant_time_compare("s3cret", "s3creT"));
        assert!(!constant_time_compare("s3cret", "s3cre"));
        assert!(!constant_time_compare("", "s3cret"));
        assert!(constant_time_compare("", ""));
    }
}
