use serde::{Deserialize, Serialize};

use crate::{
    domain::{Answer, DayId, Part},
    error::ErrorReport,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub day: DayId,
    pub part: Part,
    #[serde(flatten)]
    pub outcome: RunOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    Solved { answer: Answer },
    Failed { error: ErrorReport },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleSummary {
    pub day: DayId,
    pub title: String,
}
