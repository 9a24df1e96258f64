use serde_json::{Map, Value};

use super::types::ClauseJudgment;
use super::ValidationError;

/// Field names every risk record must carry.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "clause",
    "risk_type",
    "risk_score",
    "reasoning",
    "suggested_revision",
    "confidence",
];

const STRING_FIELDS: [&str; 4] = ["clause", "risk_type", "reasoning", "suggested_revision"];
const NUMERIC_FIELDS: [&str; 2] = ["risk_score", "confidence"];

/// Validate the raw risk records and convert them into `ClauseJudgment`s,
/// preserving order.
///
/// Fail-fast: the first defective record invalidates the whole batch, because
/// aggregation assumes every record is trustworthy. Values pass through
/// unchanged, with no coercion, clamping, or repair. Out-of-range numerics are
/// legal here (a risk_score of 15 is well-typed); they are logged, not fixed.
pub fn validate_risk_records(records: &[Value]) -> Result<Vec<ClauseJudgment>, ValidationError> {
    let mut judgments = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        judgments.push(validate_record(index, record)?);
    }
    Ok(judgments)
}

fn validate_record(index: usize, record: &Value) -> Result<ClauseJudgment, ValidationError> {
    let object = record.as_object().ok_or(ValidationError::NotAnObject(index))?;

    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !object.contains_key(**field))
        .map(|field| field.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields { index, missing });
    }

    for field in NUMERIC_FIELDS {
        if !object[field].is_number() {
            return Err(ValidationError::NonNumericField { index, field });
        }
    }
    for field in STRING_FIELDS {
        if !object[field].is_string() {
            return Err(ValidationError::NonStringField { index, field });
        }
    }

    let judgment = ClauseJudgment {
        clause: string_field(object, "clause"),
        risk_type: string_field(object, "risk_type"),
        risk_score: number_field(object, "risk_score"),
        reasoning: string_field(object, "reasoning"),
        suggested_revision: string_field(object, "suggested_revision"),
        confidence: number_field(object, "confidence"),
    };

    warn_on_leniency(index, &judgment);
    Ok(judgment)
}

fn string_field(object: &Map<String, Value>, field: &str) -> String {
    object[field].as_str().unwrap_or_default().to_string()
}

fn number_field(object: &Map<String, Value>, field: &str) -> f64 {
    object[field].as_f64().unwrap_or_default()
}

/// Type validation is deliberately lenient about ranges and empty text;
/// make that leniency visible in logs.
fn warn_on_leniency(index: usize, judgment: &ClauseJudgment) {
    if !(0.0..=10.0).contains(&judgment.risk_score) {
        tracing::warn!(
            index,
            risk_score = judgment.risk_score,
            "risk score outside the documented 0-10 range"
        );
    }
    if !(0.0..=1.0).contains(&judgment.confidence) {
        tracing::warn!(
            index,
            confidence = judgment.confidence,
            "confidence outside the documented 0.0-1.0 range"
        );
    }
    if judgment.clause.trim().is_empty() {
        tracing::warn!(index, "record has empty clause text");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_records() -> Vec<Value> {
        vec![
            json!({
                "clause": "C1",
                "risk_type": "Liability",
                "risk_score": 8,
                "reasoning": "r1",
                "suggested_revision": "s1",
                "confidence": 0.95
            }),
            json!({
                "clause": "C2",
                "risk_type": "Financial",
                "risk_score": 4,
                "reasoning": "r2",
                "suggested_revision": "s2",
                "confidence": 0.85
            }),
        ]
    }

    #[test]
    fn valid_batch_passes_in_order() {
        let judgments = validate_risk_records(&sample_records()).unwrap();
        assert_eq!(judgments.len(), 2);
        assert_eq!(judgments[0].clause, "C1");
        assert_eq!(judgments[0].risk_type, "Liability");
        assert!((judgments[0].risk_score - 8.0).abs() < f64::EPSILON);
        assert!((judgments[0].confidence - 0.95).abs() < f64::EPSILON);
        assert_eq!(judgments[1].clause, "C2");
    }

    #[test]
    fn empty_batch_is_valid() {
        let judgments = validate_risk_records(&[]).unwrap();
        assert!(judgments.is_empty());
    }

    #[test]
    fn missing_fields_named_with_index() {
        let records = vec![json!({"clause": "bad"})];
        let err = validate_risk_records(&records).unwrap_err();

        match &err {
            ValidationError::MissingFields { index, missing } => {
                assert_eq!(*index, 0);
                assert_eq!(
                    missing,
                    &vec![
                        "risk_type".to_string(),
                        "risk_score".to_string(),
                        "reasoning".to_string(),
                        "suggested_revision".to_string(),
                        "confidence".to_string()
                    ]
                );
            }
            other => panic!("expected MissingFields, got {other:?}"),
        }

        let message = err.to_string();
        assert!(message.contains("index 0"));
        assert!(message.contains("risk_type"));
        assert!(message.contains("confidence"));
    }

    #[test]
    fn defective_record_fails_whole_batch() {
        let mut records = sample_records();
        records.push(json!({"clause": "bad"}));
        let err = validate_risk_records(&records).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::MissingFields { index: 2, .. }
        ));
    }

    #[test]
    fn non_numeric_risk_score_rejected() {
        let records = vec![json!({
            "clause": "C1",
            "risk_type": "Liability",
            "risk_score": "8",
            "reasoning": "r",
            "suggested_revision": "s",
            "confidence": 0.9
        })];
        let err = validate_risk_records(&records).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NonNumericField {
                index: 0,
                field: "risk_score"
            }
        ));
    }

    #[test]
    fn non_numeric_confidence_rejected() {
        let records = vec![json!({
            "clause": "C1",
            "risk_type": "Liability",
            "risk_score": 8,
            "reasoning": "r",
            "suggested_revision": "s",
            "confidence": "high"
        })];
        let err = validate_risk_records(&records).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NonNumericField {
                index: 0,
                field: "confidence"
            }
        ));
    }

    #[test]
    fn boolean_is_not_a_number() {
        let records = vec![json!({
            "clause": "C1",
            "risk_type": "Liability",
            "risk_score": true,
            "reasoning": "r",
            "suggested_revision": "s",
            "confidence": 0.9
        })];
        assert!(matches!(
            validate_risk_records(&records).unwrap_err(),
            ValidationError::NonNumericField { index: 0, .. }
        ));
    }

    #[test]
    fn non_string_text_field_rejected() {
        let records = vec![json!({
            "clause": "C1",
            "risk_type": 3,
            "risk_score": 8,
            "reasoning": "r",
            "suggested_revision": "s",
            "confidence": 0.9
        })];
        let err = validate_risk_records(&records).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NonStringField {
                index: 0,
                field: "risk_type"
            }
        ));
    }

    #[test]
    fn non_object_record_rejected() {
        let records = vec![json!("just a string")];
        let err = validate_risk_records(&records).unwrap_err();
        assert!(matches!(err, ValidationError::NotAnObject(0)));
        assert!(err.to_string().contains("index 0"));
    }

    #[test]
    fn out_of_range_values_pass_type_validation() {
        let records = vec![json!({
            "clause": "C1",
            "risk_type": "Liability",
            "risk_score": 15,
            "reasoning": "r",
            "suggested_revision": "s",
            "confidence": 2.0
        })];
        let judgments = validate_risk_records(&records).unwrap();
        assert!((judgments[0].risk_score - 15.0).abs() < f64::EPSILON);
        assert!((judgments[0].confidence - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn extra_fields_tolerated() {
        let records = vec![json!({
            "clause": "C1",
            "risk_type": "Liability",
            "risk_score": 8,
            "reasoning": "r",
            "suggested_revision": "s",
            "confidence": 0.9,
            "severity": "critical"
        })];
        assert_eq!(validate_risk_records(&records).unwrap().len(), 1);
    }
}
