use serde::{Deserialize, Serialize};

/// One normalized, display-ready article. Built once during normalization
/// and never mutated afterwards; a refresh replaces the whole set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Positional id, 1-based.
    pub id: String,
    pub title: String,
    pub original_title: String,
    pub summary: String,
    pub original_summary: String,
    pub image_url: String,
    /// Free-form display string, not required to be a real timestamp.
    pub published_at: String,
    pub original_url: String,
    pub source: String,
    pub person_name: String,
    pub ai_generated: bool,
    pub full_generated_text: Option<String>,
}

/// One decoded unit of generated content, pre-normalization. The model is
/// asked for these exact keys but is not trusted to provide any of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedRecord {
    #[serde(rename = "Timestamp", default)]
    pub timestamp: Option<String>,
    #[serde(rename = "Input person name", default)]
    pub person_name: Option<String>,
    #[serde(rename = "Generated article", default)]
    pub generated_article: Option<String>,
    #[serde(rename = "Source URL", default)]
    pub source_url: Option<String>,
    #[serde(rename = "Original title", default)]
    pub original_title: Option<String>,
    #[serde(rename = "News category", default)]
    pub news_category: Option<String>,
}
