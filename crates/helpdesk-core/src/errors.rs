use std::fmt;

use anyhow::Error;

/// Coarse classification of an [`AppError`].
///
/// Callers match on the kind to decide how to react; the wrapped
/// [`anyhow::Error`] carries the human readable detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "bad_request",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub error: Error,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Internal, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::NotFound, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::BadRequest, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Conflict, err)
    }

    pub fn forbidden<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Forbidden, err)
    }

    pub fn unauthorized<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Unauthorized, err)
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_constructors_set_kind() {
        assert_eq!(AppError::not_found(anyhow!("x")).kind, ErrorKind::NotFound);
        assert_eq!(
            AppError::bad_request(anyhow!("x")).kind,
            ErrorKind::BadRequest
        );
        assert_eq!(AppError::conflict(anyhow!("x")).kind, ErrorKind::Conflict);
        assert_eq!(AppError::forbidden(anyhow!("x")).kind, ErrorKind::Forbidden);
        assert_eq!(
            AppError::unauthorized(anyhow!("x")).kind,
            ErrorKind::Unauthorized
        );
        assert_eq!(AppError::internal(anyhow!("x")).kind, ErrorKind::Internal);
    }

    #[test]
    fn test_display_shows_inner_error() {
        let err = AppError::not_found(anyhow!("User alice not found"));
        assert_eq!(err.to_string(), "User alice not found");
    }

    #[test]
    fn test_from_std_error_is_internal() {
        let io = std::io::Error::other("disk on fire");
        let err: AppError = io.into();
        assert_eq!(err.kind, ErrorKind::Internal);
        assert!(err.to_string().contains("disk on fire"));
    }

    #[test]
    fn test_is_not_found() {
        assert!(AppError::not_found(anyhow!("gone")).is_not_found());
        assert!(!AppError::conflict(anyhow!("dup")).is_not_found());
    }

    #[test]
    fn test_error_kind_as_str() {
        assert_eq!(ErrorKind::BadRequest.to_string(), "bad_request");
        assert_eq!(ErrorKind::NotFound.as_str(), "not_found");
    }
}
