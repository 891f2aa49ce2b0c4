use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::error::{CodesmithError, Result};
use crate::models::{
    CodeMode, CommentResponse, ExplainResponse, GenerateResponse, ModeParams, RenderModel,
    ReviewResponse, ScoreBand,
};

/// Marker separating generated code from an appended explanation block.
/// Everything before it is the "pure code" substring offered for copying.
pub const EXPLANATION_MARKER: &str = "\n\n/*\nExplanation:\n";

/// Score badge emitted by the review prompt. Well-formed responses carry
/// exactly one; if the model emits more, only the first is rewritten.
static SCORE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<div class='score.*?'>").expect("score marker pattern is valid"));

/// Validates the raw completion body against the mode's expected schema and
/// derives the renderable content. Pure: the same body and mode always yield
/// the same model.
pub fn project(params: &ModeParams, raw: &str) -> Result<RenderModel> {
    let body: Value = serde_json::from_str(raw)?;

    match params {
        ModeParams::Generate(p) => {
            let response = extract_generate(&body)?;
            Ok(project_generate(p.code_mode, p.include_explanation, response))
        }
        ModeParams::Explain(_) => {
            let response = extract_explain(&body)?;
            Ok(RenderModel::Html {
                html: response.explanation,
            })
        }
        ModeParams::Review(_) => {
            let response = extract_review(&body)?;
            Ok(project_review(response))
        }
        ModeParams::Comment(p) => {
            let response = extract_comment(&body)?;
            Ok(project_comment(&p.language, response))
        }
    }
}

// Field extraction. Absent, empty or wrongly-typed required fields fail with
// the field name; the caller never sees a silently-defaulted value.

fn non_empty_str(body: &Value, field: &'static str) -> Option<String> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn require_str(body: &Value, field: &'static str) -> Result<String> {
    non_empty_str(body, field).ok_or(CodesmithError::InvalidResponseShape { field })
}

fn extract_generate(body: &Value) -> Result<GenerateResponse> {
    let code = non_empty_str(body, "code");
    let codes = body.get("codes").and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect::<Vec<_>>()
    });
    let codes = codes.filter(|c| !c.is_empty());

    if code.is_none() && codes.is_none() {
        return Err(CodesmithError::InvalidResponseShape { field: "code" });
    }

    Ok(GenerateResponse {
        code,
        explanation: non_empty_str(body, "explanation"),
        codes,
    })
}

fn extract_explain(body: &Value) -> Result<ExplainResponse> {
    Ok(ExplainResponse {
        explanation: require_str(body, "explanation")?,
    })
}

fn extract_review(body: &Value) -> Result<ReviewResponse> {
    let review = require_str(body, "review")?;
    let score = body
        .get("score")
        .and_then(Value::as_f64)
        .ok_or(CodesmithError::InvalidResponseShape { field: "score" })?;
    Ok(ReviewResponse { review, score })
}

fn extract_comment(body: &Value) -> Result<CommentResponse> {
    Ok(CommentResponse {
        commented_code: require_str(body, "commentedCode")?,
        summary: require_str(body, "summary")?,
    })
}

fn project_generate(
    code_mode: CodeMode,
    include_explanation: bool,
    response: GenerateResponse,
) -> RenderModel {
    // Multi-solution rendering applies only when the caller asked for
    // alternatives and the model actually returned them.
    if code_mode == CodeMode::Multiple {
        if let Some(codes) = &response.codes {
            let content = codes
                .iter()
                .enumerate()
                .map(|(i, code)| format!("Solution {}:\n{}", i + 1, code))
                .collect::<Vec<_>>()
                .join("\n\n");
            return RenderModel::Code {
                pure_code: content.clone(),
                content,
            };
        }
    }

    let code = response.code.unwrap_or_default();
    let content = match (include_explanation, &response.explanation) {
        (true, Some(explanation)) => {
            format!("{code}{EXPLANATION_MARKER}{explanation}\n*/")
        }
        _ => code.clone(),
    };

    RenderModel::Code {
        content,
        pure_code: code,
    }
}

fn project_review(response: ReviewResponse) -> RenderModel {
    let band = ScoreBand::from_score(response.score);
    let replacement = format!("<div class='score {}'>", band.css_class());
    // Regex::replace rewrites the first occurrence only, leaving any extra
    // markers untouched.
    let html = SCORE_MARKER
        .replace(&response.review, replacement.as_str())
        .into_owned();
    RenderModel::Html { html }
}

fn project_comment(language: &str, response: CommentResponse) -> RenderModel {
    let html = format!(
        "{}\n<h3>Commented Code</h3>\n<pre><code class=\"language-{}\">{}</code></pre>",
        response.summary, language, response.commented_code
    );
    RenderModel::Html { html }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CodeMode, CommentMode, CommentParams, ExplainParams, GenerateParams, ReviewParams,
        Specificity,
    };

    fn generate_params(code_mode: CodeMode, include_explanation: bool) -> ModeParams {
        ModeParams::Generate(GenerateParams {
            language: "javascript".to_string(),
            description: "greet".to_string(),
            tone: "casual".to_string(),
            code_mode,
            include_explanation,
        })
    }

    fn review_params() -> ModeParams {
        ModeParams::Review(ReviewParams {
            language: "javascript".to_string(),
            code: "let x = 1;".to_string(),
        })
    }

    #[test]
    fn test_generate_multiple_solutions_join() {
        let raw = r#"{"codes": ["A", "B", "C"]}"#;
        let model = project(&generate_params(CodeMode::Multiple, false), raw)
            .expect("projection succeeds");
        assert_eq!(
            model.as_text(),
            "Solution 1:\nA\n\nSolution 2:\nB\n\nSolution 3:\nC"
        );
    }

    #[test]
    fn test_generate_multiple_falls_back_to_code() {
        let raw = r#"{"code": "X"}"#;
        let model = project(&generate_params(CodeMode::Multiple, false), raw)
            .expect("projection succeeds");
        assert_eq!(model.as_text(), "X");
    }

    #[test]
    fn test_generate_appends_explanation_block() {
        let raw = r#"{"code": "X", "explanation": "Y"}"#;
        let model = project(&generate_params(CodeMode::Shortest, true), raw)
            .expect("projection succeeds");
        let RenderModel::Code { content, pure_code } = model else {
            panic!("generate must project to code");
        };
        assert!(content.starts_with("X"));
        assert_eq!(content, "X\n\n/*\nExplanation:\nY\n*/");
        assert_eq!(pure_code, "X");
    }

    #[test]
    fn test_generate_skips_explanation_when_not_requested() {
        let raw = r#"{"code": "X", "explanation": "Y"}"#;
        let model = project(&generate_params(CodeMode::Shortest, false), raw)
            .expect("projection succeeds");
        assert_eq!(model.as_text(), "X");
    }

    #[test]
    fn test_generate_missing_code_and_codes_is_shape_error() {
        let raw = r#"{"explanation": "only prose"}"#;
        let err = project(&generate_params(CodeMode::Complete, false), raw)
            .expect_err("projection must fail");
        assert!(matches!(
            err,
            CodesmithError::InvalidResponseShape { field: "code" }
        ));
    }

    #[test]
    fn test_explain_passes_html_through() {
        let params = ModeParams::Explain(ExplainParams {
            language: "python".to_string(),
            code: "pass".to_string(),
        });
        let raw = r#"{"explanation": "<h2>Purpose</h2><p>Does nothing.</p>"}"#;
        let model = project(&params, raw).expect("projection succeeds");
        assert_eq!(model.as_text(), "<h2>Purpose</h2><p>Does nothing.</p>");
    }

    #[test]
    fn test_explain_empty_explanation_is_shape_error() {
        let params = ModeParams::Explain(ExplainParams {
            language: "python".to_string(),
            code: "pass".to_string(),
        });
        let err = project(&params, r#"{"explanation": ""}"#).expect_err("projection must fail");
        assert!(matches!(
            err,
            CodesmithError::InvalidResponseShape {
                field: "explanation"
            }
        ));
    }

    #[test]
    fn test_review_score_band_rewrite() {
        for (score, class) in [(8, "high"), (7, "high"), (5, "medium"), (4, "medium"), (2, "low")]
        {
            let raw = format!(
                r#"{{"review": "<h2>Review</h2><div class='score high'>Score: {score}/10</div>", "score": {score}}}"#
            );
            let model = project(&review_params(), &raw).expect("projection succeeds");
            assert!(
                model
                    .as_text()
                    .contains(&format!("<div class='score {class}'>")),
                "score {score} should map to class {class}"
            );
        }
    }

    #[test]
    fn test_review_fractional_boundary() {
        let raw = r#"{"review": "<div class='score high'>Score: 3.9/10</div>", "score": 3.9}"#;
        let model = project(&review_params(), raw).expect("projection succeeds");
        assert!(model.as_text().contains("<div class='score low'>"));
    }

    #[test]
    fn test_review_rewrites_first_marker_only() {
        let raw = r#"{"review": "<div class='score x'>a</div><div class='score y'>b</div>", "score": 9}"#;
        let model = project(&review_params(), raw).expect("projection succeeds");
        assert_eq!(
            model.as_text(),
            "<div class='score high'>a</div><div class='score y'>b</div>"
        );
    }

    #[test]
    fn test_review_missing_score_is_shape_error() {
        let raw = r#"{"review": "<p>ok</p>"}"#;
        let err = project(&review_params(), raw).expect_err("projection must fail");
        assert!(matches!(
            err,
            CodesmithError::InvalidResponseShape { field: "score" }
        ));
    }

    #[test]
    fn test_review_string_score_is_shape_error() {
        let raw = r#"{"review": "<p>ok</p>", "score": "8"}"#;
        let err = project(&review_params(), raw).expect_err("projection must fail");
        assert!(matches!(
            err,
            CodesmithError::InvalidResponseShape { field: "score" }
        ));
    }

    #[test]
    fn test_comment_concatenation() {
        let params = ModeParams::Comment(CommentParams {
            language: "python".to_string(),
            code: "pass".to_string(),
            comment_mode: CommentMode::Necessary,
            specificity: Specificity::Brief,
        });
        let raw = r##"{"commentedCode": "# noop\npass", "summary": "<h2>Comments Added</h2>"}"##;
        let model = project(&params, raw).expect("projection succeeds");
        assert_eq!(
            model.as_text(),
            "<h2>Comments Added</h2>\n<h3>Commented Code</h3>\n<pre><code class=\"language-python\"># noop\npass</code></pre>"
        );
    }

    #[test]
    fn test_comment_missing_summary_is_shape_error() {
        let params = ModeParams::Comment(CommentParams {
            language: "python".to_string(),
            code: "pass".to_string(),
            comment_mode: CommentMode::Everywhere,
            specificity: Specificity::Concise,
        });
        let raw = r##"{"commentedCode": "# noop"}"##;
        let err = project(&params, raw).expect_err("projection must fail");
        assert!(matches!(
            err,
            CodesmithError::InvalidResponseShape { field: "summary" }
        ));
    }

    #[test]
    fn test_malformed_body_is_decode_error() {
        let err = project(&review_params(), "not json").expect_err("projection must fail");
        assert!(matches!(err, CodesmithError::MalformedResponse(_)));
    }

    #[test]
    fn test_projection_is_idempotent() {
        let raw = r#"{"codes": ["A", "B", "C"]}"#;
        let params = generate_params(CodeMode::Multiple, false);
        let first = project(&params, raw).expect("first projection succeeds");
        let second = project(&params, raw).expect("second projection succeeds");
        assert_eq!(first, second);
    }
}
