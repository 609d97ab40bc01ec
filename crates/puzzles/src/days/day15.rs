//! Day 15: Historian Hysteria. Not solved yet.

use shared::domain::{Answer, DayId, Part};

use crate::{Puzzle, Solution, Visualization};

pub struct Day15;

impl Puzzle for Day15 {
    fn day(&self) -> DayId {
        DayId(15)
    }

    fn title(&self) -> &'static str {
        "Historian Hysteria"
    }

    fn solve(&self, part: Part, input: &str) -> anyhow::Result<Solution> {
        let lines = input.trim().lines().count();
        tracing::debug!(lines, "day 15 input received");
        Ok(Solution {
            answer: Answer::NotImplemented,
            visualization: Visualization::Placeholder(format!("Visualization for Part {part}")),
        })
    }
}
