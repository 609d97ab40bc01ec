use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{DayId, Part};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    EmptyInput,
    UnknownDay,
    SolverFault,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("no input detected")]
    EmptyInput,
    #[error("no solver registered for day {0}")]
    UnknownDay(DayId),
    #[error("day {day} part {part} failed: {message}")]
    SolverFault {
        day: DayId,
        part: Part,
        message: String,
    },
}

impl SolveError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SolveError::EmptyInput => ErrorCode::EmptyInput,
            SolveError::UnknownDay(_) => ErrorCode::UnknownDay,
            SolveError::SolverFault { .. } => ErrorCode::SolverFault,
        }
    }
}

/// Wire form of a [`SolveError`], used for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&SolveError> for ErrorReport {
    fn from(value: &SolveError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
        }
    }
}
