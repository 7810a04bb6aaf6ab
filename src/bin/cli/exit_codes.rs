//! Exit codes for the CLI tool.

use binarc::{Error, ErrorKind};

/// Exit code constants
pub const SUCCESS: i32 = 0;
/// Archive is damaged or uses an unknown codec
pub const BAD_ARCHIVE: i32 = 3;
/// Wrong password
pub const WRONG_PASSWORD: i32 = 4;
/// I/O error
pub const IO_ERROR: i32 = 5;
/// Input file or archive entry not found
pub const NOT_FOUND: i32 = 6;
/// Archive or entry already exists
pub const ALREADY_EXISTS: i32 = 7;
/// Ctrl+C (128 + SIGINT)
pub const USER_INTERRUPT: i32 = 130;
/// Invalid command line arguments or configuration
pub const BAD_ARGS: i32 = 255;

/// Exit code enum for structured handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    BadArchive,
    WrongPassword,
    IoError,
    NotFound,
    AlreadyExists,
    BadArgs,
}

impl ExitCode {
    /// Returns the numeric exit code
    pub fn code(self) -> i32 {
        match self {
            Self::Success => SUCCESS,
            Self::BadArchive => BAD_ARCHIVE,
            Self::WrongPassword => WRONG_PASSWORD,
            Self::IoError => IO_ERROR,
            Self::NotFound => NOT_FOUND,
            Self::AlreadyExists => ALREADY_EXISTS,
            Self::BadArgs => BAD_ARGS,
        }
    }
}

/// Converts a binarc error to an exit code
pub fn error_to_exit_code(error: &Error) -> ExitCode {
    match error.kind() {
        ErrorKind::AlreadyExists => ExitCode::AlreadyExists,
        ErrorKind::InvalidConfig => ExitCode::BadArgs,
        ErrorKind::NotFound => ExitCode::NotFound,
        ErrorKind::WrongPassword => ExitCode::WrongPassword,
        ErrorKind::Corruption | ErrorKind::InvalidArchive => ExitCode::BadArchive,
        ErrorKind::Io => ExitCode::IoError,
    }
}
