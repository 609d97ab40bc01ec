//! UI events, the status log and error modeling for the workbench
//! controller.

use std::{collections::VecDeque, path::PathBuf};

use chrono::{DateTime, Local};
use shared::{
    domain::{DayId, Part},
    error::SolveError,
};

const STATUS_LOG_CAPACITY: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSeverity {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusLine {
    pub at: DateTime<Local>,
    pub severity: StatusSeverity,
    pub message: String,
}

/// Bounded, append-only log shown at the bottom of the window.
#[derive(Debug, Default)]
pub struct StatusLog {
    lines: VecDeque<StatusLine>,
}

impl StatusLog {
    pub fn push(&mut self, severity: StatusSeverity, message: impl Into<String>) {
        if self.lines.len() == STATUS_LOG_CAPACITY {
            self.lines.pop_front();
        }
        self.lines.push_back(StatusLine {
            at: Local::now(),
            severity,
            message: message.into(),
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(StatusSeverity::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(StatusSeverity::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(StatusSeverity::Error, message);
    }

    pub fn lines(&self) -> impl Iterator<Item = &StatusLine> {
        self.lines.iter()
    }

    pub fn last(&self) -> Option<&StatusLine> {
        self.lines.back()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

/// User intents raised while drawing a frame and applied once it is done.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    DaySelected(DayId),
    PartSelected(Part),
    RunRequested,
    LoadFileRequested,
    InputFileChosen(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Solver,
    Io,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    message: String,
}

impl UiError {
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Io,
            message: message.into(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Validation failures happen before any state changes.
    pub fn leaves_state_untouched(&self) -> bool {
        self.category == UiErrorCategory::Validation
    }

    pub fn status_text(&self) -> String {
        format!("Error: {}", self.message)
    }
}

impl From<&SolveError> for UiError {
    fn from(err: &SolveError) -> Self {
        match err {
            SolveError::EmptyInput => Self {
                category: UiErrorCategory::Validation,
                message: "No input detected.".to_string(),
            },
            SolveError::UnknownDay(_) => Self {
                category: UiErrorCategory::Validation,
                message: err.to_string(),
            },
            SolveError::SolverFault { .. } => Self {
                category: UiErrorCategory::Solver,
                message: err.to_string(),
            },
        }
    }
}
