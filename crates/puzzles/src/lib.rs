//! Puzzle registry and the run action shared by the CLI and the workbench.

use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

use dial::Simulation;
use shared::{
    domain::{Answer, DayId, Part},
    error::SolveError,
    protocol::PuzzleSummary,
};

pub mod days;

/// What a puzzle wants drawn next to its answer.
#[derive(Debug, Clone)]
pub enum Visualization {
    Dial(Arc<Simulation>),
    Placeholder(String),
}

#[derive(Debug, Clone)]
pub struct Solution {
    pub answer: Answer,
    pub visualization: Visualization,
}

pub trait Puzzle: Send + Sync {
    fn day(&self) -> DayId;
    fn title(&self) -> &'static str;
    fn solve(&self, part: Part, input: &str) -> anyhow::Result<Solution>;
}

pub struct Registry {
    puzzles: Vec<Box<dyn Puzzle>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(vec![Box::new(days::Day01), Box::new(days::Day15)])
    }
}

impl Registry {
    pub fn new(mut puzzles: Vec<Box<dyn Puzzle>>) -> Self {
        puzzles.sort_by_key(|puzzle| puzzle.day());
        Self { puzzles }
    }

    pub fn get(&self, day: DayId) -> Option<&dyn Puzzle> {
        self.puzzles
            .iter()
            .find(|puzzle| puzzle.day() == day)
            .map(|puzzle| puzzle.as_ref())
    }

    pub fn days(&self) -> Vec<PuzzleSummary> {
        self.puzzles
            .iter()
            .map(|puzzle| PuzzleSummary {
                day: puzzle.day(),
                title: puzzle.title().to_string(),
            })
            .collect()
    }

    /// Validates `input` and runs one part. Solver errors and panics are
    /// contained and reported as [`SolveError::SolverFault`].
    pub fn run_part(&self, day: DayId, part: Part, input: &str) -> Result<Solution, SolveError> {
        if input.trim().is_empty() {
            tracing::warn!(%day, %part, "rejected empty puzzle input");
            return Err(SolveError::EmptyInput);
        }
        let puzzle = self.get(day).ok_or(SolveError::UnknownDay(day))?;

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| puzzle.solve(part, input)));
        let solution = match outcome {
            Ok(Ok(solution)) => solution,
            Ok(Err(err)) => return Err(fault(day, part, format!("{err:#}"))),
            Err(payload) => return Err(fault(day, part, panic_message(payload.as_ref()))),
        };

        tracing::info!(%day, %part, answer = %solution.answer, "puzzle solved");
        Ok(solution)
    }
}

fn fault(day: DayId, part: Part, message: String) -> SolveError {
    tracing::error!(%day, %part, %message, "solver fault");
    SolveError::SolverFault { day, part, message }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "solver panicked".to_string()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
