use mathgen_core::model::MathProblem;
use serde::Deserialize;
use serde_json::Value;

use crate::error::DecodeError;

/// Remove Markdown code fences (```` ```json ```` and ```` ``` ````) and surrounding whitespace.
#[must_use]
pub fn strip_code_fences(reply: &str) -> String {
    let mut text = reply.to_string();
    for fence in ["```json\n", "```json", "```\n", "```"] {
        text = text.replace(fence, "");
    }
    text.trim().to_string()
}

#[derive(Debug, Deserialize)]
struct RawProblem {
    problem_text: Option<String>,
    final_answer: Option<Value>,
    #[serde(default)]
    hint: Option<String>,
    #[serde(default)]
    steps: Option<Vec<Value>>,
}

/// Decode a model reply into a `MathProblem`.
///
/// `final_answer` may arrive as a JSON number or as a numeric string.
///
/// # Errors
///
/// Returns `DecodeError` if the reply is empty, is not a JSON object of the
/// expected shape, or lacks a usable problem text or numeric answer.
pub fn decode_problem(reply: &str) -> Result<MathProblem, DecodeError> {
    let cleaned = strip_code_fences(reply);
    if cleaned.is_empty() {
        return Err(DecodeError::Empty);
    }

    let raw: RawProblem = serde_json::from_str(&cleaned)?;
    let problem_text = raw
        .problem_text
        .filter(|text| !text.trim().is_empty())
        .ok_or(DecodeError::MissingField("problem_text"))?;
    let answer = raw
        .final_answer
        .ok_or(DecodeError::MissingField("final_answer"))?;
    let final_answer = numeric_answer(&answer)?;

    Ok(MathProblem::new(
        problem_text,
        final_answer,
        raw.hint,
        text_steps(raw.steps.unwrap_or_default()),
    )?)
}

/// Keep the string items of `steps`; anything else the model put there is dropped.
fn text_steps(steps: Vec<Value>) -> Vec<String> {
    steps
        .into_iter()
        .filter_map(|step| match step {
            Value::String(text) => Some(text),
            _ => None,
        })
        .collect()
}

fn numeric_answer(value: &Value) -> Result<f64, DecodeError> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|answer| answer.is_finite())
        .ok_or_else(|| DecodeError::NonNumericAnswer(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_fences() {
        let reply = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(reply), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```\nKeep going!\n```\n"), "Keep going!");
        assert_eq!(strip_code_fences("  plain  "), "plain");
    }

    #[test]
    fn decodes_fenced_reply() {
        let reply = r#"```json
{
  "problem_text": "Mei bought 3 books at $4.50 each. How much did she pay?",
  "final_answer": 13.5,
  "hint": "Multiply the price by the number of books.",
  "steps": ["3 x 4.50", "= 13.50"]
}
```"#;
        let problem = decode_problem(reply).unwrap();
        assert_eq!(problem.final_answer(), 13.5);
        assert_eq!(
            problem.hint(),
            Some("Multiply the price by the number of books.")
        );
        assert_eq!(problem.steps().len(), 2);
    }

    #[test]
    fn accepts_numeric_string_and_missing_optionals() {
        let problem =
            decode_problem(r#"{"problem_text": "How many?", "final_answer": " 45 "}"#).unwrap();
        assert_eq!(problem.final_answer(), 45.0);
        assert_eq!(problem.hint(), None);
        assert!(problem.steps().is_empty());
    }

    #[test]
    fn non_string_steps_are_skipped() {
        let problem = decode_problem(
            r#"{"problem_text": "How many?", "final_answer": 6, "steps": ["2 x 3", 6, null, {"s": 1}, "= 6"]}"#,
        )
        .unwrap();
        assert_eq!(problem.steps(), ["2 x 3", "= 6"]);
    }

    #[test]
    fn rejects_malformed_replies() {
        assert!(matches!(decode_problem("```json\n```"), Err(DecodeError::Empty)));
        assert!(matches!(
            decode_problem("Here is a problem: ..."),
            Err(DecodeError::Json(_))
        ));
        assert!(matches!(
            decode_problem(r#"{"final_answer": 3}"#),
            Err(DecodeError::MissingField("problem_text"))
        ));
        assert!(matches!(
            decode_problem(r#"{"problem_text": "x"}"#),
            Err(DecodeError::MissingField("final_answer"))
        ));
        assert!(matches!(
            decode_problem(r#"{"problem_text": "x", "final_answer": "12 apples"}"#),
            Err(DecodeError::NonNumericAnswer(_))
        ));
    }
}
