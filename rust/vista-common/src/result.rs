pub type Result<T> = std::result::Result<T, crate::error::Error>;

#[macro_export]
macro_rules! verify_arg {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_arg(result, stringify!($name), stringify!($expr))?;
    }};
}

#[inline]
pub fn verify_arg(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        invalid_arg(name, condition)
    }
}

#[cold]
pub fn invalid_arg(name: &str, condition: &str) -> Result<()> {
    Err(crate::error::Error::invalid_arg(name, condition))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn check_even(n: usize) -> Result<usize> {
        crate::verify_arg!(n, n % 2 == 0);
        Ok(n / 2)
    }

    #[test]
    fn test_verify_arg_macro() {
        assert_eq!(check_even(8).unwrap(), 4);
        let err = check_even(7).unwrap_err();
        match err.kind() {
            ErrorKind::InvalidArgument { name, message } => {
                assert_eq!(name, "n");
                assert_eq!(message, "n % 2 == 0");
            }
            other => panic!("unexpected error kind: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_arg_matches_error_constructor() {
        let err = invalid_arg("length", "end <= buffer.len()").unwrap_err();
        assert_eq!(
            err.to_string(),
            crate::error::Error::invalid_arg("length", "end <= buffer.len()").to_string()
        );
        assert!(!err.is_index_out_of_bounds());
        assert!(verify_arg(true, "length", "unused").is_ok());
    }
}
