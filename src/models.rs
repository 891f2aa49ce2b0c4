use serde::{Deserialize, Serialize};
use std::fmt;

/// The selected operation type. Determines prompt template, response schema
/// and projection rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Generate,
    Explain,
    Review,
    Comment,
}

impl Mode {
    /// Label used in user-facing "Failed to <operation>" messages
    pub fn operation_label(&self) -> &'static str {
        match self {
            Mode::Generate => "generate code",
            Mode::Explain => "explain code",
            Mode::Review => "review code",
            Mode::Comment => "add comments to code",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Generate => "generate",
            Mode::Explain => "explain",
            Mode::Review => "review",
            Mode::Comment => "comment",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "generate" | "generator" => Ok(Mode::Generate),
            "explain" | "explainer" => Ok(Mode::Explain),
            "review" | "reviewer" => Ok(Mode::Review),
            "comment" | "commenter" => Ok(Mode::Comment),
            other => Err(format!("unknown mode: {other}")),
        }
    }
}

/// Code-generation flavor requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeMode {
    Multiple,
    Shortest,
    Complete,
    #[serde(rename = "fullyimplemented")]
    FullyImplemented,
}

impl CodeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeMode::Multiple => "multiple",
            CodeMode::Shortest => "shortest",
            CodeMode::Complete => "complete",
            CodeMode::FullyImplemented => "fullyimplemented",
        }
    }
}

/// Where comments should be placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentMode {
    Everywhere,
    Necessary,
    Definitions,
}

impl CommentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentMode::Everywhere => "everywhere",
            CommentMode::Necessary => "necessary",
            CommentMode::Definitions => "definitions",
        }
    }
}

/// How detailed each comment should be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Specificity {
    Concise,
    Brief,
    Somewhat,
    Very,
}

impl Specificity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Specificity::Concise => "concise",
            Specificity::Brief => "brief",
            Specificity::Somewhat => "somewhat",
            Specificity::Very => "very",
        }
    }
}

/// Parameters for the generate operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateParams {
    pub language: String,
    pub description: String,
    pub tone: String,
    #[serde(rename = "mode")]
    pub code_mode: CodeMode,
    pub include_explanation: bool,
}

/// Parameters for the explain operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainParams {
    pub language: String,
    pub code: String,
}

/// Parameters for the review operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewParams {
    pub language: String,
    pub code: String,
}

/// Parameters for the comment operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentParams {
    pub language: String,
    pub code: String,
    #[serde(rename = "mode")]
    pub comment_mode: CommentMode,
    pub specificity: Specificity,
}

/// Closed set of per-mode parameter bundles, dispatched through one match
#[derive(Debug, Clone)]
pub enum ModeParams {
    Generate(GenerateParams),
    Explain(ExplainParams),
    Review(ReviewParams),
    Comment(CommentParams),
}

impl ModeParams {
    pub fn mode(&self) -> Mode {
        match self {
            ModeParams::Generate(_) => Mode::Generate,
            ModeParams::Explain(_) => Mode::Explain,
            ModeParams::Review(_) => Mode::Review,
            ModeParams::Comment(_) => Mode::Comment,
        }
    }
}

/// The sole unit of network input sent to the completion endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub prompt: String,
    pub data: serde_json::Value,
}

// Decoded response shapes, produced by shape validation in `project`.
// Fields hold already-checked values; construction goes through the
// extraction helpers rather than serde derives so a shape error can name
// the offending field.

#[derive(Debug, Clone)]
pub struct GenerateResponse {
    pub code: Option<String>,
    pub explanation: Option<String>,
    pub codes: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct ExplainResponse {
    pub explanation: String,
}

#[derive(Debug, Clone)]
pub struct ReviewResponse {
    pub review: String,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct CommentResponse {
    pub commented_code: String,
    pub summary: String,
}

/// Validated, mode-specific structure ready for presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RenderModel {
    /// Plain code output (generate mode). `pure_code` is the content with any
    /// appended explanation block stripped, for copy-to-clipboard use.
    #[serde(rename_all = "camelCase")]
    Code { content: String, pure_code: String },
    /// Ready-to-insert HTML fragment (explain, review and comment modes)
    Html { html: String },
}

impl RenderModel {
    pub fn as_text(&self) -> &str {
        match self {
            RenderModel::Code { content, .. } => content,
            RenderModel::Html { html } => html,
        }
    }
}

/// Three-tier classification derived from a numeric review score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 7.0 {
            ScoreBand::High
        } else if score >= 4.0 {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ScoreBand::High => "high",
            ScoreBand::Medium => "medium",
            ScoreBand::Low => "low",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_serde_names() {
        assert_eq!(
            serde_json::to_string(&Mode::Generate).expect("mode serializes"),
            "\"generate\""
        );
        let mode: Mode = serde_json::from_str("\"comment\"").expect("mode deserializes");
        assert_eq!(mode, Mode::Comment);
    }

    #[test]
    fn test_code_mode_wire_names() {
        assert_eq!(CodeMode::FullyImplemented.as_str(), "fullyimplemented");
        let mode: CodeMode =
            serde_json::from_str("\"fullyimplemented\"").expect("code mode deserializes");
        assert_eq!(mode, CodeMode::FullyImplemented);
    }

    #[test]
    fn test_generate_params_wire_shape() {
        let params = GenerateParams {
            language: "python".to_string(),
            description: "a fib function".to_string(),
            tone: "professional".to_string(),
            code_mode: CodeMode::Shortest,
            include_explanation: true,
        };
        let value = serde_json::to_value(&params).expect("params serialize");
        assert_eq!(value["mode"], "shortest");
        assert_eq!(value["includeExplanation"], true);
        assert_eq!(value["language"], "python");
    }

    #[test]
    fn test_score_band_boundaries() {
        assert_eq!(ScoreBand::from_score(8.0), ScoreBand::High);
        assert_eq!(ScoreBand::from_score(7.0), ScoreBand::High);
        assert_eq!(ScoreBand::from_score(5.0), ScoreBand::Medium);
        assert_eq!(ScoreBand::from_score(4.0), ScoreBand::Medium);
        assert_eq!(ScoreBand::from_score(3.9), ScoreBand::Low);
        assert_eq!(ScoreBand::from_score(0.0), ScoreBand::Low);
    }
}
