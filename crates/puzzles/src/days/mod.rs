mod day01;
mod day15;

pub use day01::Day01;
pub use day15::Day15;
