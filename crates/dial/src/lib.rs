//! Circular dial simulation: rotation parsing, zero-crossing counting and
//! the per-step history replayed by the visualizer.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod playback;

/// Number of clicks on the dial; positions live in `0..DIAL_SIZE`.
pub const DIAL_SIZE: u64 = 100;
pub const START_POSITION: u64 = 50;

const DIAL_CLICKS: u128 = DIAL_SIZE as u128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    fn from_letter(letter: u8) -> Option<Self> {
        match letter {
            b'L' => Some(Direction::Left),
            b'R' => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rotation {
    pub direction: Direction,
    pub distance: u128,
}

impl Rotation {
    pub fn new(direction: Direction, distance: u128) -> Self {
        Self {
            direction,
            distance,
        }
    }

    /// Position reached after turning from `position`.
    pub fn apply(&self, position: u64) -> u64 {
        let position = position % DIAL_SIZE;
        let turn = (self.distance % DIAL_CLICKS) as u64;
        match self.direction {
            Direction::Left => (position + DIAL_SIZE - turn) % DIAL_SIZE,
            Direction::Right => (position + turn) % DIAL_SIZE,
        }
    }

    /// Scans one whitespace-free token for the first `L`/`R` directly
    /// followed by digits.
    fn from_token(token: &str) -> Option<Self> {
        let bytes = token.as_bytes();
        for (idx, &byte) in bytes.iter().enumerate() {
            let Some(direction) = Direction::from_letter(byte) else {
                continue;
            };
            let digits = bytes[idx + 1..]
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .count();
            if digits == 0 {
                continue;
            }
            let text = &token[idx + 1..idx + 1 + digits];
            let distance = text
                .parse::<u128>()
                .unwrap_or_else(|_| clamp_distance(text));
            return Some(Self::new(direction, distance));
        }
        None
    }
}

/// Largest `u128` that leaves the dial where `digits` would. Only the final
/// position is exact; the crossing count saturates anyway.
fn clamp_distance(digits: &str) -> u128 {
    let tail = digits
        .get(digits.len().saturating_sub(2)..)
        .and_then(|tail| tail.parse::<u128>().ok())
        .unwrap_or(0);
    tracing::debug!(digits = digits.len(), "rotation distance clamped to u128");
    u128::MAX - (u128::MAX % DIAL_CLICKS + DIAL_CLICKS - tail) % DIAL_CLICKS
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.direction.letter(), self.distance)
    }
}

/// Parses whitespace-separated rotation tokens. Tokens that carry no
/// `[LR]<digits>` match are skipped without error. Distances past `u128`
/// are clamped, never dropped.
pub fn parse_rotations(input: &str) -> Vec<Rotation> {
    let mut rotations = Vec::new();
    let mut skipped = 0usize;
    for token in input.split_whitespace() {
        match Rotation::from_token(token) {
            Some(rotation) => rotations.push(rotation),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::debug!(skipped, parsed = rotations.len(), "dropped malformed rotation tokens");
    }
    rotations
}

/// Number of times the dial points at 0 while turning `distance` clicks from
/// `position`, excluding the starting position and including the landing.
/// Saturates at `u64::MAX`.
pub fn count_zero_crossings(position: u64, direction: Direction, distance: u128) -> u64 {
    let turns = |clicks: u128| u64::try_from(clicks / DIAL_CLICKS).unwrap_or(u64::MAX);
    let position = position % DIAL_SIZE;
    if position == 0 {
        return turns(distance);
    }
    let first_zero_at = u128::from(match direction {
        Direction::Left => position,
        Direction::Right => DIAL_SIZE - position,
    });
    if first_zero_at <= distance {
        turns(distance - first_zero_at).saturating_add(1)
    } else {
        0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub position: u64,
    /// `None` for the initial state.
    pub instruction: Option<Rotation>,
    pub part1_zeros: u64,
    pub part2_zeros: u64,
    pub zeros_this_step: u64,
}

impl HistoryEntry {
    fn start(position: u64) -> Self {
        Self {
            position,
            instruction: None,
            part1_zeros: 0,
            part2_zeros: 0,
            zeros_this_step: 0,
        }
    }

    pub fn label(&self) -> String {
        self.instruction
            .map(|rotation| rotation.to_string())
            .unwrap_or_else(|| "START".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Simulation {
    /// Initial state followed by one entry per rotation; never empty.
    pub history: Vec<HistoryEntry>,
    /// Rotations that ended exactly on 0.
    pub part1_answer: u64,
    /// Every click that landed on 0, mid-sweep or final. Saturates at
    /// `u64::MAX`.
    pub part2_answer: u64,
}

impl Simulation {
    pub fn rotation_count(&self) -> usize {
        self.history.len() - 1
    }

    pub fn last_step(&self) -> usize {
        self.history.len() - 1
    }

    pub fn final_position(&self) -> u64 {
        self.history
            .last()
            .map(|entry| entry.position)
            .unwrap_or(START_POSITION)
    }
}

pub fn simulate(rotations: &[Rotation]) -> Simulation {
    simulate_from(START_POSITION, rotations)
}

pub fn simulate_from(start: u64, rotations: &[Rotation]) -> Simulation {
    let mut position = start % DIAL_SIZE;
    let mut part1_zeros = 0;
    let mut part2_zeros: u64 = 0;
    let mut history = Vec::with_capacity(rotations.len() + 1);
    history.push(HistoryEntry::start(position));

    for rotation in rotations {
        let zeros_this_step = count_zero_crossings(position, rotation.direction, rotation.distance);
        match part2_zeros.checked_add(zeros_this_step) {
            Some(total) => part2_zeros = total,
            None => {
                if part2_zeros != u64::MAX {
                    tracing::warn!(step = history.len(), "part 2 count saturated at u64::MAX");
                }
                part2_zeros = u64::MAX;
            }
        }

        position = rotation.apply(position);
        if position == 0 {
            part1_zeros += 1;
        }

        history.push(HistoryEntry {
            position,
            instruction: Some(*rotation),
            part1_zeros,
            part2_zeros,
            zeros_this_step,
        });
    }

    Simulation {
        history,
        part1_answer: part1_zeros,
        part2_answer: part2_zeros,
    }
}

/// Parses `input` and simulates it from [`START_POSITION`].
pub fn solve(input: &str) -> Simulation {
    simulate(&parse_rotations(input))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
