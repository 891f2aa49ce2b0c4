use serde::Serialize;

use crate::models::Mode;

/// Declarative presentation state for one mode. Consumed by whatever front
/// end renders the pipeline; the core never touches the DOM itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeView {
    pub title: &'static str,
    pub description_label: &'static str,
    pub placeholder: &'static str,
    pub button_label: &'static str,
    pub busy_message: &'static str,
    pub empty_input_message: &'static str,
    pub show_generator_options: bool,
    pub show_commenter_options: bool,
    pub theme_class: &'static str,
}

/// Pure mapping from mode to visibility and label assignments
pub fn view_for(mode: Mode) -> ModeView {
    match mode {
        Mode::Generate => ModeView {
            title: "AI Code Generator",
            description_label: "Description of Code to Generate/Modify:",
            placeholder: "Describe what you want the code to do...",
            button_label: "Execute",
            busy_message: "Generating code...",
            empty_input_message:
                "Please provide a description of the code you want to generate.",
            show_generator_options: true,
            show_commenter_options: false,
            theme_class: "generator-mode",
        },
        Mode::Explain => ModeView {
            title: "AI Code Explainer",
            description_label: "Code to Explain:",
            placeholder: "Paste the code you want to explain...",
            button_label: "Explain",
            busy_message: "Analyzing code...",
            empty_input_message: "Please provide code to explain.",
            show_generator_options: false,
            show_commenter_options: false,
            theme_class: "explainer-mode",
        },
        Mode::Review => ModeView {
            title: "AI Code Reviewer",
            description_label: "Code to Review:",
            placeholder: "Paste the code you want to review...",
            button_label: "Review",
            busy_message: "Reviewing code...",
            empty_input_message: "Please provide code to review.",
            show_generator_options: false,
            show_commenter_options: false,
            theme_class: "reviewer-mode",
        },
        Mode::Comment => ModeView {
            title: "AI Code Commenter",
            description_label: "Code to Comment:",
            placeholder: "Paste the code you want to comment...",
            button_label: "Comment",
            busy_message: "Adding comments...",
            empty_input_message: "Please provide code to comment.",
            show_generator_options: false,
            show_commenter_options: true,
            theme_class: "commenter-mode",
        },
    }
}

/// Highlighting alias used when wrapping generated code: the combined
/// html/css/javascript option highlights as plain html.
pub fn highlight_language(language: &str) -> &str {
    if language.contains("html_css_javascript") {
        "html"
    } else {
        language
    }
}

pub fn escape_html(unsafe_text: &str) -> String {
    unsafe_text
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Wraps generated code in a language-tagged block for display. Markup-heavy
/// languages are escaped so the snippet renders as text instead of being
/// interpreted by the page.
pub fn code_block(language: &str, content: &str) -> String {
    let language = highlight_language(language);
    let body = if language.contains("html") {
        escape_html(content)
    } else {
        content.to_string()
    };
    format!("<pre><code class=\"language-{language}\">{body}</code></pre>")
}
