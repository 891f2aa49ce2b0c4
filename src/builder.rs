use serde_json::json;

use crate::models::{
    CommentParams, CompletionRequest, ExplainParams, GenerateParams, ModeParams, ReviewParams,
};

// Rule blocks and literal response-shape examples embedded in the prompts.
// The JSON examples are formatting guides for the model only and are never
// parsed on the way back.

const GENERATE_RULES: &str = r#"
Rules:
1. Return working, complete code that fulfills the description without any typos or grammar issues
2. If mode is "multiple", provide 3 different implementations
3. If mode is "shortest", provide the most concise implementation
4. If mode is "complete", provide fully documented code with all edge cases handled
5. If mode is "fullyimplemented", similarly to "complete" (but unchanged code is omitted), the generated code should and MUST be implemented completely without ANY placeholders.
6. If includeExplanation is true, include detailed code explanation
7. Use the specified programming language
8. Format the response according to the interface below

interface Response {
  code: string;
  explanation?: string;
  codes?: string[];
}

Example response:
{
  "code": "function greet(name) {\n  return `Hello ${name}!`;\n}",
  "explanation": "This function takes a name parameter and returns a greeting string using template literals.",
  "codes": ["implementation1", "implementation2", "implementation3"]
}"#;

const EXPLAIN_INTERFACE: &str = r#"
And most importantly, format the response according to the interface below

interface Response {
  explanation: string;
}

Example response:
{
  "explanation": "<h2>Purpose</h2><p>This code implements a basic calculator function.</p><h2>Key Components</h2><ul><li>Takes two numbers as input</li><li>Performs basic arithmetic operations</li><li>Returns the result</li></ul><h2>Areas for Improvement</h2><ul><li>Input validation is missing</li><li>Error handling could be improved</li></ul><h2>Code with Potential Fixes/Improvements</h2><p>Here's an improved version of the code that addresses the issues mentioned above:</p><pre><code class=\"language-javascript\">function calculator(a, b) {\n  if (typeof a !== 'number' || typeof b !== 'number') {\n    throw new Error('Both inputs must be numbers');\n  }\n  return a + b;\n}</code></pre>"
}"#;

const REVIEW_INTERFACE: &str = r#"
interface Response {
  review: string;
  score: number;
}

Example response:
{
  "review": "<h2>Code Review Analysis</h2><h3>Bugs and Potential Issues</h3><ul><li>No major bugs found</li><li>Potential null reference in line 23</li></ul><h3>Code Readability</h3><ul><li>Good variable naming</li><li>Could use more comments</li></ul><h3>Recommendations</h3><ul><li>Add input validation</li><li>Implement error handling</li></ul><div class='score high'>Score: 8/10</div><h3>Improved Version</h3><pre><code class='language-javascript'>// Improved code here...</code></pre>",
  "score": 8
}"#;

const COMMENT_RULES: &str = r#"
Rules:
1. For "everywhere" mode, add comments for every meaningful block of code
2. For "necessary" mode, only add comments where clarity is needed
3. For "definitions" mode, focus on documenting classes, methods, and functions
4. Follow language-specific documentation standards:
   - Python: Use docstrings with """ for classes/functions, # for inline
   - JavaScript: Use JSDoc for functions/classes, // for inline
   - Java/C++/C#: Use /** */ for classes/methods, // for inline
   - Ruby: Use =begin/=end for blocks, # for inline
   - PHP: Use /** */ for classes/methods, // or # for inline
5. Match comment detail level to specified specificity:
   - Concise: One-line descriptions
   - Brief: Basic purpose and parameters
   - Somewhat: Include context and basic examples
   - Very: Full documentation with edge cases and detailed examples
6. Keep comments professional and focused
7. For existing comments/docstrings:
   - Enhance incomplete docstrings
   - Don't duplicate existing comments
   - Add additional context if needed
8. Return the complete code with added comments
9. Use appropriate docstring formats:
   - Python: Google style
   - JavaScript: JSDoc
   - Java: Javadoc
   - Others: Match common conventions"#;

const COMMENT_INTERFACE: &str = r#"
Response format should include the commented code and a summary of changes.
Format the response according to the interface below.

interface Response {
  commentedCode: string;
  summary: string;
}

Example response:
{
  "commentedCode": "// Authenticates user credentials\nfunction auth(user, pass) {\n  if (!user || !pass) return false;\n  return checkCreds(user, pass);\n}",
  "summary": "<h2>Comments Added</h2><ul><li>Added function purpose</li></ul>"
}"#;

/// Builds the natural-language instruction payload plus the structured data
/// echo for each operation. One prompt template per mode, selected through a
/// single dispatch.
pub struct RequestBuilder;

impl RequestBuilder {
    pub fn build(params: &ModeParams) -> CompletionRequest {
        match params {
            ModeParams::Generate(p) => build_generate(p),
            ModeParams::Explain(p) => build_explain(p),
            ModeParams::Review(p) => build_review(p),
            ModeParams::Comment(p) => build_comment(p),
        }
    }
}

fn build_generate(p: &GenerateParams) -> CompletionRequest {
    let mut prompt = format!(
        "You are a professional code generator. Generate code based on the following parameters:\n\
         Language: {}\n\
         Description: {}\n\
         Tone: {}\n\
         Mode: {}\n\
         Include Explanation: {}\n",
        p.language,
        p.description,
        p.tone,
        p.code_mode.as_str(),
        p.include_explanation
    );
    prompt.push_str(GENERATE_RULES);

    let data = json!({
        "language": p.language,
        "description": p.description,
        "tone": p.tone,
        "mode": p.code_mode.as_str(),
        "includeExplanation": p.include_explanation,
    });

    CompletionRequest { prompt, data }
}

fn build_explain(p: &ExplainParams) -> CompletionRequest {
    let mut prompt = format!(
        "You are a professional code explainer. Explain the following code in a clear and concise way.\n\
         Make sure to:\n\
         1. Explain the purpose of the code\n\
         2. Break down complex parts\n\
         3. Point out any potential issues or improvements\n\
         4. Use clear, professional language\n\
         5. Provide an improved version of the code that addresses the issues mentioned and is implemented completely without any placeholders.\n\
         \n\
         Language: {}\n\
         Code: {}\n\
         \n\
         Response format should be a clear explanation with HTML formatting for better readability.\n\
         Use <h2> for main sections, <h3> for subsections, <p> for paragraphs, and <ul>/<ol> for lists.\n\
         For the improved code section, wrap the code in <pre><code class=\"language-{}\"> tags.",
        p.language, p.code, p.language
    );
    prompt.push_str(EXPLAIN_INTERFACE);

    let data = json!({
        "language": p.language,
        "code": p.code,
    });

    CompletionRequest { prompt, data }
}

fn build_review(p: &ReviewParams) -> CompletionRequest {
    let mut prompt = format!(
        "You are a professional code reviewer. Review the following code and provide a detailed analysis focusing on:\n\
         1. Bugs and potential issues\n\
         2. Code readability\n\
         3. Scalability\n\
         4. Performance and optimization\n\
         5. Error handling\n\
         6. Code style and structure\n\
         7. Security concerns (if applicable)\n\
         8. Testing considerations\n\
         \n\
         Provide a score from 0 to 10 based on these criteria, where:\n\
         - 0-3: Poor quality, major issues\n\
         - 4-6: Acceptable quality, needs improvement\n\
         - 7-8: Good quality, minor issues\n\
         - 9-10: Excellent quality\n\
         \n\
         Language: {}\n\
         Code: {}\n\
         \n\
         Response format should be clear HTML with scoring. Use <h2> for main sections, <h3> for subsections,\n\
         <p> for paragraphs, and <ul>/<ol> for lists. Format the response according to the interface below.\n",
        p.language, p.code
    );
    prompt.push_str(REVIEW_INTERFACE);

    let data = json!({
        "language": p.language,
        "code": p.code,
    });

    CompletionRequest { prompt, data }
}

fn build_comment(p: &CommentParams) -> CompletionRequest {
    let mut prompt = format!(
        "You are a professional code commenter. Add clear and helpful comments to the following code based on these parameters:\n\
         Comment Mode: {} (everywhere/necessary/definitions)\n\
         Specificity: {} (concise/brief/somewhat/very)\n",
        p.comment_mode.as_str(),
        p.specificity.as_str()
    );
    prompt.push_str(COMMENT_RULES);
    prompt.push_str(&format!(
        "\n\nLanguage: {}\nCode: {}\n",
        p.language, p.code
    ));
    prompt.push_str(COMMENT_INTERFACE);

    let data = json!({
        "language": p.language,
        "code": p.code,
        "mode": p.comment_mode.as_str(),
        "specificity": p.specificity.as_str(),
    });

    CompletionRequest { prompt, data }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CodeMode, CommentMode, Mode, Specificity};

    #[test]
    fn test_generate_prompt_round_trips_parameters() {
        let params = ModeParams::Generate(GenerateParams {
            language: "rust".to_string(),
            description: "a ring buffer with fixed capacity".to_string(),
            tone: "professional".to_string(),
            code_mode: CodeMode::Multiple,
            include_explanation: true,
        });
        let request = RequestBuilder::build(&params);

        assert!(request.prompt.contains("Language: rust"));
        assert!(
            request
                .prompt
                .contains("Description: a ring buffer with fixed capacity")
        );
        assert!(request.prompt.contains("Tone: professional"));
        assert!(request.prompt.contains("Mode: multiple"));
        assert!(request.prompt.contains("Include Explanation: true"));
        assert!(request.prompt.contains("provide 3 different implementations"));
        assert!(request.prompt.contains("interface Response"));

        assert_eq!(request.data["mode"], "multiple");
        assert_eq!(request.data["includeExplanation"], true);
        assert_eq!(request.data["language"], "rust");
    }

    #[test]
    fn test_explain_prompt_round_trips_parameters() {
        let params = ModeParams::Explain(ExplainParams {
            language: "python".to_string(),
            code: "def f(x): return x * 2".to_string(),
        });
        let request = RequestBuilder::build(&params);

        assert!(request.prompt.contains("professional code explainer"));
        assert!(request.prompt.contains("Language: python"));
        assert!(request.prompt.contains("Code: def f(x): return x * 2"));
        assert!(
            request
                .prompt
                .contains("<pre><code class=\"language-python\">")
        );
        assert_eq!(request.data["code"], "def f(x): return x * 2");
    }

    #[test]
    fn test_review_prompt_states_score_bands() {
        let params = ModeParams::Review(ReviewParams {
            language: "go".to_string(),
            code: "func main() {}".to_string(),
        });
        let request = RequestBuilder::build(&params);

        assert!(request.prompt.contains("professional code reviewer"));
        assert!(request.prompt.contains("0-3: Poor quality, major issues"));
        assert!(request.prompt.contains("9-10: Excellent quality"));
        assert!(request.prompt.contains("Language: go"));
        assert!(request.prompt.contains("Code: func main() {}"));
        assert!(request.prompt.contains("score: number"));
    }

    #[test]
    fn test_comment_prompt_round_trips_parameters() {
        let params = ModeParams::Comment(CommentParams {
            language: "java".to_string(),
            code: "class A {}".to_string(),
            comment_mode: CommentMode::Definitions,
            specificity: Specificity::Very,
        });
        let request = RequestBuilder::build(&params);

        assert!(request.prompt.contains("professional code commenter"));
        assert!(request.prompt.contains("Comment Mode: definitions"));
        assert!(request.prompt.contains("Specificity: very"));
        assert!(request.prompt.contains("Language: java"));
        assert!(request.prompt.contains("Code: class A {}"));
        assert!(request.prompt.contains("commentedCode: string"));

        assert_eq!(request.data["mode"], "definitions");
        assert_eq!(request.data["specificity"], "very");
    }

    #[test]
    fn test_mode_dispatch_is_exhaustive() {
        for (params, expected) in [
            (
                ModeParams::Explain(ExplainParams {
                    language: "c".to_string(),
                    code: "int x;".to_string(),
                }),
                Mode::Explain,
            ),
            (
                ModeParams::Review(ReviewParams {
                    language: "c".to_string(),
                    code: "int x;".to_string(),
                }),
                Mode::Review,
            ),
        ] {
            assert_eq!(params.mode(), expected);
            let request = RequestBuilder::build(&params);
            assert!(!request.prompt.is_empty());
        }
    }
}
