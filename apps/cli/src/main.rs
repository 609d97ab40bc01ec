use std::{
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use puzzles::Registry;
use shared::{
    domain::{DayId, Part},
    error::ErrorReport,
    protocol::{RunOutcome, RunReport},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run Advent of Code solvers from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve one or both parts of a day. Reads stdin when no file is given.
    Solve {
        #[arg(long, default_value_t = 1)]
        day: u8,
        #[arg(long, value_enum, default_value_t = PartArg::Both)]
        part: PartArg,
        #[arg(long)]
        json: bool,
        input: Option<PathBuf>,
    },
    /// Print the day 1 dial history step by step.
    History {
        #[arg(long)]
        json: bool,
        input: Option<PathBuf>,
    },
    /// List registered puzzles.
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PartArg {
    One,
    Two,
    Both,
}

impl PartArg {
    fn parts(self) -> &'static [Part] {
        match self {
            PartArg::One => &[Part::One],
            PartArg::Two => &[Part::Two],
            PartArg::Both => &Part::ALL,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();
    let registry = Registry::default();

    match cli.command {
        Command::Solve {
            day,
            part,
            json,
            input,
        } => {
            let input = read_input(input.as_deref())?;
            let reports = solve_parts(&registry, DayId(day), part, &input);
            for report in &reports {
                if json {
                    println!("{}", serde_json::to_string(report)?);
                } else {
                    println!("{}", render_report(report));
                }
            }
            if let Some(RunOutcome::Failed { error }) = reports
                .iter()
                .map(|report| &report.outcome)
                .find(|outcome| matches!(outcome, RunOutcome::Failed { .. }))
            {
                anyhow::bail!("{}", error.message);
            }
        }
        Command::History { json, input } => {
            let input = read_input(input.as_deref())?;
            if input.trim().is_empty() {
                anyhow::bail!("no input detected");
            }
            let simulation = dial::solve(&input);
            if json {
                println!("{}", serde_json::to_string_pretty(&simulation)?);
            } else {
                print!("{}", render_history(&simulation));
            }
        }
        Command::List => {
            for summary in registry.days() {
                println!("day {}: {}", summary.day, summary.title);
            }
        }
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read puzzle input '{}'", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read puzzle input from stdin")?;
            Ok(buf)
        }
    }
}

fn solve_parts(registry: &Registry, day: DayId, part: PartArg, input: &str) -> Vec<RunReport> {
    part.parts()
        .iter()
        .map(|&part| {
            let outcome = match registry.run_part(day, part, input) {
                Ok(solution) => RunOutcome::Solved {
                    answer: solution.answer,
                },
                Err(err) => RunOutcome::Failed {
                    error: ErrorReport::from(&err),
                },
            };
            RunReport { day, part, outcome }
        })
        .collect()
}

fn render_report(report: &RunReport) -> String {
    match &report.outcome {
        RunOutcome::Solved { answer } => {
            format!("day {} part {}: {answer}", report.day, report.part)
        }
        RunOutcome::Failed { error } => {
            format!("day {} part {}: error: {}", report.day, report.part, error.message)
        }
    }
}

fn render_history(simulation: &dial::Simulation) -> String {
    let mut out = format!(
        "{:>6}  {:<12} {:>8} {:>8} {:>8} {:>8}\n",
        "step", "instruction", "position", "part1", "part2", "crossed"
    );
    for (step, entry) in simulation.history.iter().enumerate() {
        out.push_str(&format!(
            "{:>6}  {:<12} {:>8} {:>8} {:>8} {:>8}\n",
            step,
            entry.label(),
            entry.position,
            entry.part1_zeros,
            entry.part2_zeros,
            entry.zeros_this_step
        ));
    }
    out.push_str(&format!(
        "part 1: {}\npart 2: {}\n",
        simulation.part1_answer, simulation.part2_answer
    ));
    out
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use shared::domain::Answer;

    #[test]
    fn solves_both_parts_in_order() {
        let reports = solve_parts(&Registry::default(), DayId(1), PartArg::Both, "R50 L150");
        let rendered: Vec<String> = reports.iter().map(render_report).collect();
        assert_eq!(rendered, ["day 01 part 1: 1", "day 01 part 2: 2"]);
    }

    #[test]
    fn empty_input_reports_failure_per_part() {
        let reports = solve_parts(&Registry::default(), DayId(1), PartArg::One, "  \n");
        assert_eq!(reports.len(), 1);
        assert_eq!(render_report(&reports[0]), "day 01 part 1: error: no input detected");
    }

    #[test]
    fn unfinished_day_prints_not_implemented() {
        let reports = solve_parts(&Registry::default(), DayId(15), PartArg::Two, "1 2 3");
        assert!(matches!(
            &reports[0].outcome,
            RunOutcome::Solved { answer: Answer::NotImplemented }
        ));
        assert_eq!(render_report(&reports[0]), "day 15 part 2: Not Implemented");
    }

    #[test]
    fn reads_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "L68\nL30").expect("write input");
        let input = read_input(Some(file.path())).expect("read input");
        assert_eq!(dial::parse_rotations(&input).len(), 2);
    }

    #[test]
    fn missing_file_error_names_the_path() {
        let err = read_input(Some(Path::new("/definitely/not/here.txt"))).expect_err("missing");
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }

    #[test]
    fn huge_rotations_saturate_part_two() {
        let input = "R18446744073709551615 ".repeat(101);
        let reports = solve_parts(&Registry::default(), DayId(1), PartArg::Two, &input);
        assert_eq!(
            render_report(&reports[0]),
            format!("day 01 part 2: {}", u64::MAX)
        );

        let json = serde_json::to_string(&dial::solve("L340282366920938463463374607431768211455"))
            .expect("serialize history");
        assert!(json.contains("340282366920938463463374607431768211455"));
    }

    #[test]
    fn history_table_has_one_row_per_entry() {
        let simulation = dial::solve("R50 L5");
        let table = render_history(&simulation);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 1 + 3 + 2);
        assert!(lines[1].contains("START"));
        assert!(lines[2].contains("R50"));
        assert_eq!(lines[4], "part 1: 1");
        assert_eq!(lines[5], "part 2: 1");
    }
}
