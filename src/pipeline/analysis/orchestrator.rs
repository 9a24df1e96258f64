use uuid::Uuid;

use super::analytics::{build_report, verify_report_invariants};
use super::client::GeminiClient;
use super::parser::{parse_clause_list, parse_risk_records};
use super::prompt::{
    build_clause_extraction_prompt, build_risk_analysis_prompt, CLAUSE_EXTRACTION_SYSTEM_PROMPT,
    RISK_ANALYSIS_SYSTEM_PROMPT,
};
use super::sanitize::sanitize_contract_text;
use super::types::{AnalysisReport, ModelClient, Stage};
use super::validation::validate_risk_records;
use super::AnalysisError;
use crate::config::ModelConfig;

/// Runs the full contract analysis pipeline:
/// sanitize → extract clauses → analyze risk → validate → aggregate.
///
/// Every stage is a hard gate: no stage is retried here (retry policy belongs
/// to the model client) and no partial report is ever returned.
pub struct ContractAnalyzer {
    client: Box<dyn ModelClient + Send + Sync>,
}

impl ContractAnalyzer {
    pub fn new(client: Box<dyn ModelClient + Send + Sync>) -> Self {
        Self { client }
    }

    pub fn analyze(&self, contract_text: &str) -> Result<AnalysisReport, AnalysisError> {
        let run_id = Uuid::new_v4();
        let _span = tracing::info_span!(
            "analyze_contract",
            run_id = %run_id,
            text_length = contract_text.len()
        )
        .entered();

        if contract_text.trim().is_empty() {
            return Err(AnalysisError::EmptyContract);
        }
        let contract = sanitize_contract_text(contract_text);
        if contract.trim().is_empty() {
            return Err(AnalysisError::EmptyContract);
        }

        let clauses = self.extract_clauses(&contract)?;

        let validated = if clauses.is_empty() {
            // A contract with no extractable clauses is the legitimate
            // "nothing found" outcome; judging an empty list would only
            // invite fabrication.
            tracing::info!("no clauses extracted, skipping risk analysis");
            Vec::new()
        } else {
            let raw_records = self.analyze_risk(&contract, &clauses)?;
            validate_risk_records(&raw_records)?
        };

        let report = build_report(validated);
        verify_report_invariants(&report).map_err(AnalysisError::Computation)?;

        tracing::info!(
            overall_risk_score = report.overall_risk_score,
            clause_count = report.clauses.len(),
            "analysis complete"
        );
        Ok(report)
    }

    fn extract_clauses(&self, contract: &str) -> Result<Vec<String>, AnalysisError> {
        let prompt = build_clause_extraction_prompt(contract);
        let response = self.invoke(Stage::ExtractClauses, &prompt, CLAUSE_EXTRACTION_SYSTEM_PROMPT)?;
        let clauses = parse_clause_list(&response)?;
        tracing::info!(clause_count = clauses.len(), "clause extraction complete");
        Ok(clauses)
    }

    fn analyze_risk(
        &self,
        contract: &str,
        clauses: &[String],
    ) -> Result<Vec<serde_json::Value>, AnalysisError> {
        let prompt = build_risk_analysis_prompt(contract, clauses);
        let response = self.invoke(Stage::AnalyzeRisk, &prompt, RISK_ANALYSIS_SYSTEM_PROMPT)?;
        let records = parse_risk_records(&response)?;
        tracing::info!(record_count = records.len(), "risk analysis response received");
        Ok(records)
    }

    fn invoke(&self, stage: Stage, prompt: &str, system: &str) -> Result<String, AnalysisError> {
        let _span = tracing::info_span!("model_invocation", stage = stage.as_str()).entered();
        self.client
            .invoke(prompt, system)
            .map_err(|source| AnalysisError::Upstream { stage, source })
    }
}

/// Analyze a contract with the production Gemini client. This is the entry
/// point intended for the presentation layer. The contract text must already be plain text
/// (see `pipeline::extraction` for the document boundary).
pub fn analyze_contract(
    contract_text: &str,
    config: &ModelConfig,
) -> Result<AnalysisReport, AnalysisError> {
    let client = GeminiClient::new(config);
    ContractAnalyzer::new(Box::new(client)).analyze(contract_text)
}
