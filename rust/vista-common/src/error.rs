use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn index_out_of_bounds(index: isize, length: usize) -> Error {
        Error(ErrorKind::IndexOutOfBounds { index, length }.into())
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    /// Returns `true` if this is an out-of-bounds indexed access.
    pub fn is_index_out_of_bounds(&self) -> bool {
        matches!(self.kind(), ErrorKind::IndexOutOfBounds { .. })
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("index {index} out of bounds for length {length}")]
    IndexOutOfBounds { index: isize, length: usize },

    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_out_of_bounds_message() {
        let e = Error::index_out_of_bounds(-1, 4);
        assert!(e.is_index_out_of_bounds());
        assert_eq!(e.to_string(), "index -1 out of bounds for length 4");
        match e.into_kind() {
            ErrorKind::IndexOutOfBounds { index, length } => {
                assert_eq!(index, -1);
                assert_eq!(length, 4);
            }
            other => panic!("unexpected error kind: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_arg_message() {
        let e = Error::invalid_arg("byte_offset", "byte_offset % 4 == 0");
        assert!(!e.is_index_out_of_bounds());
        assert_eq!(
            e.to_string(),
            "invalid argument byte_offset: byte_offset % 4 == 0"
        );
    }
}
