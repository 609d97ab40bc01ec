//! Run action: from the Run button to an answer, a status line and a
//! visualization.

use puzzles::{Registry, Solution};
use shared::domain::{DayId, Part};

use crate::controller::events::{StatusLog, UiError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunRequest {
    pub day: DayId,
    pub part: Part,
}

pub fn execute_run(
    registry: &Registry,
    request: RunRequest,
    input: &str,
    status: &mut StatusLog,
) -> Result<Solution, UiError> {
    if !input.trim().is_empty() {
        status.info("System: Processing input...");
    }
    tracing::debug!(day = %request.day, part = %request.part, "run requested");

    match registry.run_part(request.day, request.part, input) {
        Ok(solution) => {
            status.success(format!(
                "Day {} part {}: Solution found: {}",
                request.day, request.part, solution.answer
            ));
            Ok(solution)
        }
        Err(err) => {
            let ui_err = UiError::from(&err);
            status.error(ui_err.status_text());
            Err(ui_err)
        }
    }
}

#[cfg(test)]
mod tests {
    use shared::domain::Answer;

    use super::*;
    use crate::controller::events::{StatusSeverity, UiErrorCategory};

    fn request(day: u8, part: Part) -> RunRequest {
        RunRequest {
            day: DayId(day),
            part,
        }
    }

    #[test]
    fn empty_input_logs_single_error() {
        let mut status = StatusLog::default();
        let err = execute_run(&Registry::default(), request(1, Part::One), " \n", &mut status)
            .expect_err("empty input");
        assert_eq!(err.category(), UiErrorCategory::Validation);
        assert_eq!(status.len(), 1);
        let line = status.last().expect("status line");
        assert_eq!(line.severity, StatusSeverity::Error);
        assert_eq!(line.message, "Error: No input detected.");
    }

    #[test]
    fn successful_run_logs_processing_then_answer() {
        let mut status = StatusLog::default();
        let solution = execute_run(&Registry::default(), request(1, Part::One), "R50", &mut status)
            .expect("solve");
        assert_eq!(solution.answer, Answer::Number(1));

        let messages: Vec<&str> = status.lines().map(|l| l.message.as_str()).collect();
        assert_eq!(
            messages,
            ["System: Processing input...", "Day 01 part 1: Solution found: 1"]
        );
    }

    #[test]
    fn unfinished_day_reports_not_implemented() {
        let mut status = StatusLog::default();
        let solution = execute_run(&Registry::default(), request(15, Part::One), "1 2", &mut status)
            .expect("stub");
        assert_eq!(solution.answer.to_string(), "Not Implemented");
    }
}
