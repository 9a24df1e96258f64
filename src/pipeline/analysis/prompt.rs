pub const CLAUSE_EXTRACTION_SYSTEM_PROMPT: &str = r#"
You are a contract clause segmentation assistant. Your ONLY role is to split
contract text into its discrete contractual provisions.

RULES — ABSOLUTE, NO EXCEPTIONS:
1. Use ONLY text that appears in the contract.
2. NEVER paraphrase, summarize, or merge distinct obligations.
3. One array entry per self-contained provision, in document order.
4. Skip headings, signature blocks, and boilerplate page furniture.
5. Output MUST be a single JSON array of strings and nothing else.
"#;

/// Build the clause-segmentation prompt for a contract.
pub fn build_clause_extraction_prompt(contract_text: &str) -> String {
    format!(
        r#"<contract>
{contract_text}
</contract>

Split the above contract into discrete clauses. Return ONLY a JSON array of
strings, one string per clause, in document order:

```json
["first clause text", "second clause text"]
```
"#
    )
}

pub const RISK_ANALYSIS_SYSTEM_PROMPT: &str = r#"
You are a contract risk analysis assistant for legal review. You judge the
risk each clause poses to the party receiving this contract.

RULES — ABSOLUTE, NO EXCEPTIONS:
1. Return exactly one record per clause you are given, in the same order.
2. "risk_score" is a number from 0 (no risk) to 10 (severe risk).
3. "confidence" is a number from 0.0 to 1.0.
4. "risk_type" is a short category label, e.g. "Liability", "Financial",
   "Termination", "Confidentiality", "Compliance".
5. Base "reasoning" only on the clause and contract text provided.
6. Output MUST be a single JSON array of records and nothing else.
"#;

/// Build the risk-analysis prompt from the contract and its extracted clauses.
/// One call judges all clauses at once.
pub fn build_risk_analysis_prompt(contract_text: &str, clauses: &[String]) -> String {
    let clause_list = clauses
        .iter()
        .enumerate()
        .map(|(i, clause)| format!("{}. {clause}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<contract>
{contract_text}
</contract>

Clauses to judge:
{clause_list}

For EVERY clause above, return one record with exactly these fields:

```json
[
  {{
    "clause": "the clause text",
    "risk_type": "category label",
    "risk_score": 0,
    "reasoning": "why this clause is or is not risky",
    "suggested_revision": "how to reduce the risk",
    "confidence": 0.0
  }}
]
```
"#
    )
}
