//! Day 01: Secret Entrance.

use std::sync::Arc;

use shared::domain::{Answer, DayId, Part};

use crate::{Puzzle, Solution, Visualization};

pub struct Day01;

impl Puzzle for Day01 {
    fn day(&self) -> DayId {
        DayId(1)
    }

    fn title(&self) -> &'static str {
        "Secret Entrance"
    }

    fn solve(&self, part: Part, input: &str) -> anyhow::Result<Solution> {
        let simulation = dial::solve(input);
        let answer = match part {
            Part::One => simulation.part1_answer,
            Part::Two => simulation.part2_answer,
        };
        tracing::debug!(
            rotations = simulation.rotation_count(),
            final_position = simulation.final_position(),
            "dial simulated"
        );
        Ok(Solution {
            answer: Answer::Number(answer),
            visualization: Visualization::Dial(Arc::new(simulation)),
        })
    }
}
