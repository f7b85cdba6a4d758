use serde::{Serialize, Deserialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCode {
    #[error("Error while fetching voters")]
    FetchFailure,
    #[error("Error updating voter data")]
    WriteFailure,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn fetch(source: impl fmt::Display) -> Self {
        Self::new(ErrorCode::FetchFailure, source.to_string())
    }

    pub fn write(source: impl fmt::Display) -> Self {
        Self::new(ErrorCode::WriteFailure, source.to_string())
    }
}
