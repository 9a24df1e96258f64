use std::collections::HashMap;

use super::types::{AnalysisReport, ClauseJudgment};

/// Risk-score bands used by the presentation layer.
pub mod risk_thresholds {
    /// At or above this: medium risk
    pub const MEDIUM: f64 = 4.0;

    /// At or above this: high risk
    pub const HIGH: f64 = 7.0;
}

/// Three-way banding of a 0-10 risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= risk_thresholds::HIGH {
            RiskLevel::High
        } else if score >= risk_thresholds::MEDIUM {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Distribution label for judgments whose risk type is empty.
const UNKNOWN_RISK_TYPE: &str = "Unknown";

/// Arithmetic mean of all risk scores, rounded to 2 decimal places.
/// Exactly 0.0 for an empty batch: "no risky clauses found" is a legitimate
/// outcome, not an error.
pub fn overall_risk_score(clauses: &[ClauseJudgment]) -> f64 {
    if clauses.is_empty() {
        return 0.0;
    }
    let total: f64 = clauses.iter().map(|c| c.risk_score).sum();
    (total / clauses.len() as f64 * 100.0).round() / 100.0
}

/// The judgment with the maximum risk score; `None` for an empty batch.
///
/// Ties break toward the first occurrence so the result is deterministic for
/// a fixed input order. (`Iterator::max_by` keeps the LAST maximum and must
/// not be used here.)
pub fn highest_risk_clause(clauses: &[ClauseJudgment]) -> Option<&ClauseJudgment> {
    let mut best: Option<&ClauseJudgment> = None;
    for clause in clauses {
        let better = match best {
            None => true,
            Some(current) => clause.risk_score > current.risk_score,
        };
        if better {
            best = Some(clause);
        }
    }
    best
}

/// Clause count per risk-type label, built in one pass.
///
/// Keys are the literal labels from the judgments, with no normalization or
/// case-folding, so "Liability" and "liability" are distinct categories.
/// A label that is empty after trimming counts under "Unknown".
pub fn risk_distribution(clauses: &[ClauseJudgment]) -> HashMap<String, usize> {
    let mut distribution = HashMap::new();
    for clause in clauses {
        let label = if clause.risk_type.trim().is_empty() {
            UNKNOWN_RISK_TYPE
        } else {
            clause.risk_type.as_str()
        };
        *distribution.entry(label.to_string()).or_insert(0) += 1;
    }
    distribution
}

/// Clause count per risk level band (presentation helper).
pub fn risk_level_distribution(clauses: &[ClauseJudgment]) -> HashMap<RiskLevel, usize> {
    let mut distribution = HashMap::new();
    for clause in clauses {
        *distribution
            .entry(RiskLevel::from_score(clause.risk_score))
            .or_insert(0) += 1;
    }
    distribution
}

/// Assemble the final report from a validated batch.
pub fn build_report(clauses: Vec<ClauseJudgment>) -> AnalysisReport {
    AnalysisReport {
        overall_risk_score: overall_risk_score(&clauses),
        highest_risk_clause: highest_risk_clause(&clauses).cloned(),
        risk_distribution: risk_distribution(&clauses),
        clauses,
    }
}

/// Defensive cross-checks between report fields. A violation indicates a bug
/// in this crate, not bad model output; the orchestrator surfaces it as a
/// computation fault, distinct from validation failures.
pub fn verify_report_invariants(report: &AnalysisReport) -> Result<(), String> {
    let counted: usize = report.risk_distribution.values().sum();
    if counted != report.clauses.len() {
        return Err(format!(
            "risk distribution counts {counted} clauses, report carries {}",
            report.clauses.len()
        ));
    }

    match (&report.highest_risk_clause, report.clauses.is_empty()) {
        (None, true) => Ok(()),
        (None, false) => Err("highest-risk clause missing from a non-empty report".into()),
        (Some(_), true) => Err("highest-risk clause present in an empty report".into()),
        (Some(highest), false) => {
            if report
                .clauses
                .iter()
                .any(|c| c.risk_score > highest.risk_score)
            {
                Err("highest-risk clause does not carry the maximum risk score".into())
            } else {
                Ok(())
            }
        }
    }
}
