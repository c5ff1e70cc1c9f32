use vw_core::{Article, GeneratedRecord};

/// Fixed rotation of placeholder images, assigned by record position. Not
/// content-derived: the same record count always gets the same assignment.
pub const PLACEHOLDER_IMAGES: &[&str] = &[
    "https://picsum.photos/seed/voicewire-1/800/450",
    "https://picsum.photos/seed/voicewire-2/800/450",
    "https://picsum.photos/seed/voicewire-3/800/450",
    "https://picsum.photos/seed/voicewire-4/800/450",
];

/// Source label for generated articles that carry no category of their own.
pub const DEFAULT_SOURCE: &str = "AI Generated";

const TITLE_MAX_CHARS: usize = 80;
const TITLE_TRUNCATE_CHARS: usize = 60;
const SUMMARY_MAX_CHARS: usize = 200;

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// First sentence of the body, truncated when it runs long. An empty body
/// synthesizes a title so the article is never rendered nameless.
fn derive_title(body: &str, person_name: &str) -> String {
    if body.trim().is_empty() {
        return format!("{person_name}'s Perspective on Current Events");
    }
    let fragment = match body.find('.') {
        Some(pos) => &body[..=pos],
        None => body,
    };
    if char_len(fragment) > TITLE_MAX_CHARS {
        format!("{}...", truncate_chars(fragment, TITLE_TRUNCATE_CHARS))
    } else {
        fragment.to_string()
    }
}

/// First paragraph of the body (double newline, falling back to single),
/// truncated to the summary limit. An empty first paragraph falls back to a
/// truncated slice of the whole body.
fn derive_summary(body: &str) -> String {
    let paragraph = if let Some(pos) = body.find("\n\n") {
        &body[..pos]
    } else if let Some(pos) = body.find('\n') {
        &body[..pos]
    } else {
        body
    };

    if char_len(paragraph) > SUMMARY_MAX_CHARS {
        return format!("{}...", truncate_chars(paragraph, SUMMARY_MAX_CHARS));
    }
    if paragraph.trim().is_empty() {
        if body.trim().is_empty() {
            return String::new();
        }
        return format!("{}...", truncate_chars(body, SUMMARY_MAX_CHARS));
    }
    paragraph.to_string()
}

/// Map one generated record into the uniform article shape. Deterministic:
/// the same record, index and person always yield an identical article.
pub fn normalize_generated(record: &GeneratedRecord, index: usize, person_name: &str) -> Article {
    let body = record.generated_article.as_deref().unwrap_or("");

    Article {
        id: (index + 1).to_string(),
        title: derive_title(body, person_name),
        original_title: record.original_title.clone().unwrap_or_default(),
        summary: derive_summary(body),
        original_summary: String::new(),
        image_url: PLACEHOLDER_IMAGES[index % PLACEHOLDER_IMAGES.len()].to_string(),
        published_at: record
            .timestamp
            .clone()
            .unwrap_or_else(|| "Today".to_string()),
        original_url: record.source_url.clone().unwrap_or_default(),
        source: record
            .news_category
            .clone()
            .unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
        person_name: person_name.to_string(),
        ai_generated: true,
        full_generated_text: record.generated_article.clone(),
    }
}
