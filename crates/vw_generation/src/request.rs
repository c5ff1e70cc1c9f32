use serde::Serialize;

/// Output contract sent with every generation request. The parser copes with
/// models that ignore it, but well-behaved models return exactly this shape.
pub const SYSTEM_INSTRUCTION: &str = "You are a news ghostwriter. Respond with a JSON array of \
exactly 3 objects, one per current news story. Each object must have exactly these keys: \
\"Timestamp\", \"Input person name\", \"Generated article\", \"Source URL\", \
\"Original title\", \"News category\". \"Generated article\" is the story rewritten in the \
requested person's voice, several paragraphs long. Respond with valid JSON only: no markdown \
fences, no commentary, no text outside the array.";

/// Model families that accept a web-search tool declaration. Static
/// capability flags, not a runtime query.
const TOOL_CAPABLE_FAMILIES: &[&str] = &["gpt-4o", "gpt-4.1"];

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub tool_type: String,
}

/// Chat-completions request body. Immutable once built; one per submission.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_completion_tokens: u32,
    pub top_p: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<String>,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SamplingParams {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub stop: Option<String>,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 2000,
            top_p: 1.0,
            stop: None,
        }
    }
}

/// True when the model id belongs to a family with web-search support.
pub fn supports_web_search(model: &str) -> bool {
    TOOL_CAPABLE_FAMILIES
        .iter()
        .any(|family| model.contains(family))
}

/// User message asking for stories in the given person's voice. The name is
/// trimmed but otherwise opaque; downstream rendering accepts any string.
pub fn person_prompt(person: &str) -> String {
    format!(
        "Write 3 short articles about today's biggest news stories, each rewritten in the \
voice of {}. Base them on real current events.",
        person.trim()
    )
}

pub fn build_request(user_prompt: &str, model: &str, params: &SamplingParams) -> GenerationRequest {
    let tools_enabled = supports_web_search(model);
    GenerationRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage {
                role: "system".to_string(),
                content: SYSTEM_INSTRUCTION.to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: user_prompt.trim().to_string(),
            },
        ],
        temperature: params.temperature,
        max_completion_tokens: params.max_tokens,
        top_p: params.top_p,
        stop: params.stop.clone(),
        stream: false,
        tools: tools_enabled.then(|| {
            vec![ToolDefinition {
                tool_type: "web_search".to_string(),
            }]
        }),
        tool_choice: tools_enabled.then(|| "auto".to_string()),
    }
}
