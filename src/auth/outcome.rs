use thiserror::Error;

use crate::error::AuthFailure;

/// Result of one authorization attempt.
///
/// Exactly one variant is populated. Asking for the wrong one is a programming
/// error: the checked accessors return [`WrongVariant`], the plain ones panic.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    Failure(AuthFailure),
}

/// Returned when an accessor is used on the other variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WrongVariant {
    #[error("success value requested from a failed authorization ({0:?})")]
    NotSuccess(AuthFailure),
    #[error("failure reason requested from a successful authorization")]
    NotFailure,
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn try_value(&self) -> Result<&T, WrongVariant> {
        match self {
            Self::Success(v) => Ok(v),
            Self::Failure(f) => Err(WrongVariant::NotSuccess(*f)),
        }
    }

    pub fn try_failure(&self) -> Result<AuthFailure, WrongVariant> {
        match self {
            Self::Success(_) => Err(WrongVariant::NotFailure),
            Self::Failure(f) => Ok(*f),
        }
    }

    /// # Panics
    /// When called on `Failure`.
    #[track_caller]
    pub fn value(&self) -> &T {
        match self.try_value() {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }

    /// # Panics
    /// When called on `Success`.
    #[track_caller]
    pub fn failure(&self) -> AuthFailure {
        match self.try_failure() {
            Ok(f) => f,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn as_ref(&self) -> Outcome<&T> {
        match self {
            Self::Success(v) => Outcome::Success(v),
            Self::Failure(f) => Outcome::Failure(*f),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success(v) => Outcome::Success(f(v)),
            Self::Failure(e) => Outcome::Failure(e),
        }
    }

    pub fn into_result(self) -> Result<T, AuthFailure> {
        match self {
            Self::Success(v) => Ok(v),
            Self::Failure(f) => Err(f),
        }
    }
}

impl<T> From<Result<T, AuthFailure>> for Outcome<T> {
    fn from(r: Result<T, AuthFailure>) -> Self {
        match r {
            Ok(v) => Self::Success(v),
            Err(f) => Self::Failure(f),
        }
    }
}

impl<T> From<Outcome<T>> for Result<T, AuthFailure> {
    fn from(o: Outcome<T>) -> Self {
        o.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_accessors() {
        let o = Outcome::Success(7);

        assert!(o.is_success());
        assert_eq!(*o.value(), 7);
        assert_eq!(o.try_failure(), Err(WrongVariant::NotFailure));
        assert_eq!(o.into_result(), Ok(7));
    }

    #[test]
    fn failure_accessors() {
        let o: Outcome<i32> = Outcome::Failure(AuthFailure::TokenExpired);

        assert!(o.is_failure());
        assert_eq!(o.failure(), AuthFailure::TokenExpired);
        assert_eq!(
            o.try_value(),
            Err(WrongVariant::NotSuccess(AuthFailure::TokenExpired))
        );
    }

    #[test]
    #[should_panic(expected = "success value requested from a failed authorization")]
    fn value_on_failure_panics() {
        let o: Outcome<i32> = Outcome::Failure(AuthFailure::TokenMissing);
        o.value();
    }

    #[test]
    #[should_panic(expected = "failure reason requested from a successful authorization")]
    fn failure_on_success_panics() {
        Outcome::Success("claims").failure();
    }

    #[test]
    fn map_keeps_failure() {
        let o: Outcome<i32> = Outcome::Failure(AuthFailure::TokenInvalid);
        assert_eq!(o.map(|v| v + 1), Outcome::Failure(AuthFailure::TokenInvalid));
        assert_eq!(Outcome::Success(1).map(|v| v + 1), Outcome::Success(2));
    }

    #[test]
    fn converts_from_std_result() {
        let o: Outcome<()> = Err(AuthFailure::AlgorithmMismatch).into();
        assert_eq!(o.failure(), AuthFailure::AlgorithmMismatch);
    }
}
