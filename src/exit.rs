// src/exit.rs
//! Process exit codes for `codematch`.
//!
//! A stable contract for graders and CI scripts.

use crate::error::CodematchError;
use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum CodematchExit {
    /// Command completed.
    Success = 0,
    /// Generic error (IO, config, grammar).
    Error = 1,
    /// Bad input: empty cohort or a submission that is not UTF-8.
    InvalidInput = 2,
    /// A pair scored above the `--fail-above` threshold.
    CheckFailed = 6,
}

impl CodematchExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn exit(self) -> ! {
        std::process::exit(self.code())
    }

    /// Exit code for a failed command.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<CodematchError>() {
            Some(CodematchError::EmptyCohort(_) | CodematchError::NonUtf8(_)) => Self::InvalidInput,
            _ => Self::Error,
        }
    }
}

impl Termination for CodematchExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(CodematchExit::Success.code(), 0);
        assert_eq!(CodematchExit::Error.code(), 1);
        assert_eq!(CodematchExit::InvalidInput.code(), 2);
        assert_eq!(CodematchExit::CheckFailed.code(), 6);
    }

    #[test]
    fn test_empty_cohort_is_invalid_input() {
        let err = anyhow::Error::new(CodematchError::EmptyCohort("subs".into()));
        assert_eq!(CodematchExit::for_error(&err), CodematchExit::InvalidInput);
        let err = anyhow::Error::new(CodematchError::NonUtf8("blob.py".into()));
        assert_eq!(CodematchExit::for_error(&err), CodematchExit::InvalidInput);
        let err = anyhow::anyhow!("boom");
        assert_eq!(CodematchExit::for_error(&err), CodematchExit::Error);
    }

    #[test]
    fn test_filesystem_loop_is_generic_error() {
        let err = anyhow::Error::new(CodematchError::Other("filesystem loop detected at x".into()));
        assert_eq!(CodematchExit::for_error(&err), CodematchExit::Error);
    }
}
