use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::ModelError;

/// One model-produced verdict about one contract clause. All six fields must
/// have survived validation before a value of this type exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseJudgment {
    pub clause: String,
    pub risk_type: String,
    pub risk_score: f64,
    pub reasoning: String,
    pub suggested_revision: String,
    pub confidence: f64,
}

/// Final output of one analysis run. Built exactly once, immutable afterwards,
/// owned by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Mean of all clause risk scores, rounded to 2 decimals. 0.0 when no
    /// clauses were found.
    pub overall_risk_score: f64,
    /// `None` when the report is empty. Ties break toward the first
    /// occurrence in clause order.
    pub highest_risk_clause: Option<ClauseJudgment>,
    /// Clause count per literal risk-type label.
    pub risk_distribution: HashMap<String, usize>,
    /// The validated judgments in model output order.
    pub clauses: Vec<ClauseJudgment>,
}

/// Sequential gates of an analysis run, carried on upstream errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ExtractClauses,
    AnalyzeRisk,
    Validate,
    Aggregate,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::ExtractClauses => "extract_clauses",
            Stage::AnalyzeRisk => "analyze_risk",
            Stage::Validate => "validate",
            Stage::Aggregate => "aggregate",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generative model abstraction (allows mocking).
pub trait ModelClient {
    fn invoke(&self, prompt: &str, system: &str) -> Result<String, ModelError>;
}
