use serde_json::Value;

use super::ValidationError;

/// Locate the JSON payload inside a model response. The prompts ask for bare
/// JSON, but models routinely wrap it in ```json fences or surrounding prose.
fn extract_json_payload(response: &str) -> Result<&str, ValidationError> {
    if let Some(start) = response.find("```json") {
        let rest = &response[start + 7..];
        let end = rest
            .find("```")
            .ok_or_else(|| ValidationError::MissingPayload("unclosed JSON fence".into()))?;
        return Ok(rest[..end].trim());
    }

    let trimmed = response.trim();
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        return Ok(trimmed);
    }

    // Last resort: the widest bracketed slice in the prose
    match (response.find('['), response.rfind(']')) {
        (Some(open), Some(close)) if close > open => Ok(response[open..=close].trim()),
        _ => Err(ValidationError::MissingPayload(
            "no JSON array found in model response".into(),
        )),
    }
}

/// Parse the clause-extraction response into an ordered clause list.
/// Empty strings are dropped (with a logged count); anything that is not a
/// string fails the run.
pub fn parse_clause_list(response: &str) -> Result<Vec<String>, ValidationError> {
    let payload = extract_json_payload(response)?;
    let value: Value =
        serde_json::from_str(payload).map_err(|e| ValidationError::Json(e.to_string()))?;
    let items = value.as_array().ok_or(ValidationError::NotAnArray)?;

    let mut clauses = Vec::with_capacity(items.len());
    let mut dropped = 0usize;
    for (index, item) in items.iter().enumerate() {
        let text = item
            .as_str()
            .ok_or(ValidationError::NonStringClause(index))?;
        if text.trim().is_empty() {
            dropped += 1;
            continue;
        }
        clauses.push(text.trim().to_string());
    }

    if dropped > 0 {
        tracing::warn!(dropped, "empty clause strings dropped from extraction response");
    }
    Ok(clauses)
}

/// Parse the risk-analysis response into raw records. No field checks happen
/// here; the validator owns the schema. This step only establishes "it is a
/// JSON array" so validation can work record by record.
pub fn parse_risk_records(response: &str) -> Result<Vec<Value>, ValidationError> {
    let payload = extract_json_payload(response)?;
    let value: Value =
        serde_json::from_str(payload).map_err(|e| ValidationError::Json(e.to_string()))?;

    match value {
        Value::Array(items) => Ok(items),
        _ => Err(ValidationError::NotAnArray),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fenced_clause_list() {
        let response = "Here are the clauses:\n\n```json\n[\"Clause A\", \"Clause B\"]\n```\nDone.";
        let clauses = parse_clause_list(response).unwrap();
        assert_eq!(clauses, vec!["Clause A", "Clause B"]);
    }

    #[test]
    fn parses_bare_json_array() {
        let clauses = parse_clause_list("[\"Only clause\"]").unwrap();
        assert_eq!(clauses, vec!["Only clause"]);
    }

    #[test]
    fn parses_array_embedded_in_prose() {
        let response = "Sure! The clauses are [\"A\", \"B\"] as requested.";
        let clauses = parse_clause_list(response).unwrap();
        assert_eq!(clauses, vec!["A", "B"]);
    }

    #[test]
    fn empty_clause_strings_dropped() {
        let clauses = parse_clause_list("[\"A\", \"\", \"  \", \"B\"]").unwrap();
        assert_eq!(clauses, vec!["A", "B"]);
    }

    #[test]
    fn non_string_clause_entry_rejected() {
        let result = parse_clause_list("[\"A\", 7]");
        assert!(matches!(result, Err(ValidationError::NonStringClause(1))));
    }

    #[test]
    fn missing_payload_rejected() {
        let result = parse_clause_list("No JSON here, just refusal text.");
        assert!(matches!(result, Err(ValidationError::MissingPayload(_))));
    }

    #[test]
    fn unclosed_fence_rejected() {
        let result = parse_clause_list("```json\n[\"A\"]");
        assert!(matches!(result, Err(ValidationError::MissingPayload(_))));
    }

    #[test]
    fn invalid_json_rejected() {
        let result = parse_risk_records("```json\n{not valid}\n```");
        assert!(matches!(result, Err(ValidationError::Json(_))));
    }

    #[test]
    fn non_array_payload_rejected() {
        let result = parse_risk_records("{\"clause\": \"object, not array\"}");
        assert!(matches!(result, Err(ValidationError::NotAnArray)));
    }

    #[test]
    fn risk_records_returned_raw() {
        let response = r#"```json
[{"clause": "C1", "risk_score": 8}, {"anything": true}]
```"#;
        let records = parse_risk_records(response).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["risk_score"], 8);
        assert_eq!(records[1]["anything"], true);
    }
}
