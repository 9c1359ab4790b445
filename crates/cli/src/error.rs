//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map command errors to exit codes.
//!
//! Invariants:
//! - A failed decryption always exits with `DecryptionFailed`, never success.

use feedwatch_settings::DecryptError;

/// Structured exit codes for feedwatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    #[allow(dead_code)]
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// A sensitive value could not be decrypted.
    ///
    /// Scripts must not fall back to the stored value.
    DecryptionFailed = 2,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&anyhow::Error> for ExitCode {
    fn from(err: &anyhow::Error) -> Self {
        if err.chain().any(|cause| cause.downcast_ref::<DecryptError>().is_some()) {
            ExitCode::DecryptionFailed
        } else {
            ExitCode::GeneralError
        }
    }
}
