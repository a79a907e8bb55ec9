//! Application-level error type.
//!
//! A message plus the process exit code it maps to. Exit code conventions:
//!
//! - 2: bad input (missing file, malformed CSV, invalid flags)
//! - 3: bad data (empty trace, mismatched columns)
//! - 4: numeric/internal failure

#[derive(Clone, Debug)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}
