use std::fmt::{Display, Formatter};
use std::io;

#[derive(Debug)]
/// Errors that can occur when creating or closing a `ScopedTempDir`.
///
/// Both variants display exactly the message of the underlying I/O error.
pub enum TempError {
    /// The unique directory could not be created.
    Create(io::Error),
    /// The held directory could not be removed. The handle is inert afterwards regardless.
    Remove(io::Error),
}

impl TempError {
    /// Returns the underlying I/O error.
    #[must_use]
    pub fn io_error(&self) -> &io::Error {
        match self {
            Self::Create(e) | Self::Remove(e) => e,
        }
    }

    /// Returns the kind of the underlying I/O error.
    #[must_use]
    pub fn kind(&self) -> io::ErrorKind {
        self.io_error().kind()
    }
}

impl Display for TempError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.io_error())
    }
}

impl std::error::Error for TempError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.io_error().source()
    }
}

pub type TempResult<T> = Result<T, TempError>;

impl From<TempError> for io::Error {
    fn from(e: TempError) -> Self {
        match e {
            TempError::Create(e) | TempError::Remove(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_io_message() {
        let err = TempError::Remove(io::Error::new(io::ErrorKind::PermissionDenied, "nope"));
        assert_eq!(err.to_string(), "nope");
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn converts_back_into_io_error() {
        let err = TempError::Create(io::Error::new(io::ErrorKind::NotFound, "missing parent"));
        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
        assert_eq!(io_err.to_string(), "missing parent");
    }
}
