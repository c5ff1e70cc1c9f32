pub mod normalize;
pub mod parser;
pub mod request;
pub mod transport;

pub use normalize::normalize_generated;
pub use parser::{parse_response, sanitize, ParsedResponse};
pub use request::{build_request, person_prompt, GenerationRequest, SamplingParams};
pub use transport::{CompletionBackend, GenerationClient, GenerationResult, HttpBackend};

use vw_core::{Article, Result};

/// Full generation pipeline: build the request, send it through the retry
/// client, decode the untrusted text, normalize into articles. Client errors
/// propagate; parsing irregularities never do (they degrade to a single
/// catch-all article).
pub async fn generate_articles<B: CompletionBackend>(
    client: &GenerationClient<B>,
    person: &str,
    model: &str,
    params: &SamplingParams,
) -> Result<Vec<Article>> {
    let request = build_request(&person_prompt(person), model, params);
    let result = client.send(&request).await?;
    tracing::debug!(
        model = %result.model_id,
        bytes = result.raw_text.len(),
        "Generation response received"
    );

    let records = parse_response(&result.raw_text).into_records();
    Ok(records
        .iter()
        .enumerate()
        .map(|(index, record)| normalize_generated(record, index, person))
        .collect())
}
