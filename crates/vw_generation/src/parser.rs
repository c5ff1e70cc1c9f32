use regex::Regex;
use std::sync::OnceLock;

use vw_core::GeneratedRecord;

fn fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"```(?:json)?").expect("fence regex"))
}

fn control_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\x00-\x1F]").expect("control-char regex"))
}

/// Strip formatting wrappers and illegal characters ahead of a decode
/// attempt: trim, drop Markdown fences anywhere in the text, then drop every
/// C0 control character. Raw control characters are a common cause of decode
/// failure in model output and are discarded, not escaped.
pub fn sanitize(raw: &str) -> String {
    let trimmed = raw.trim();
    let unfenced = fence_re().replace_all(trimmed, "");
    let cleaned = control_re().replace_all(&unfenced, "");
    cleaned.trim().to_string()
}

/// Outcome of a best-effort structured decode. The generation endpoint is
/// not contractually guaranteed to return valid JSON, so structure is an
/// optimization, never a requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedResponse {
    Decoded(Vec<GeneratedRecord>),
    Fallback(GeneratedRecord),
}

impl ParsedResponse {
    /// Always at least one record; a parse failure degrades to a single
    /// catch-all record instead of an error.
    pub fn into_records(self) -> Vec<GeneratedRecord> {
        match self {
            ParsedResponse::Decoded(records) => records,
            ParsedResponse::Fallback(record) => vec![record],
        }
    }
}

/// Sanitize and decode the raw model output. Never fails: anything that does
/// not decode becomes one synthetic record carrying the cleaned text.
pub fn parse_response(raw: &str) -> ParsedResponse {
    let cleaned = sanitize(raw);

    if cleaned.starts_with('[') {
        match serde_json::from_str::<Vec<GeneratedRecord>>(&cleaned) {
            // The caller must always receive at least one record; an empty
            // array falls through to the synthetic fallback.
            Ok(records) if !records.is_empty() => return ParsedResponse::Decoded(records),
            Ok(_) => tracing::debug!("Array decoded to zero records, using fallback record"),
            Err(e) => tracing::debug!("Array decode failed, using fallback record: {e}"),
        }
    } else if cleaned.starts_with('{') {
        match serde_json::from_str::<GeneratedRecord>(&cleaned) {
            Ok(record) => return ParsedResponse::Decoded(vec![record]),
            Err(e) => tracing::debug!("Object decode failed, using fallback record: {e}"),
        }
    }

    ParsedResponse::Fallback(GeneratedRecord {
        generated_article: Some(cleaned),
        ..GeneratedRecord::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_fences_and_control_chars() {
        let raw = "```json\n[{\"Generated article\": \"text\"}]\n```";
        let cleaned = sanitize(raw);
        assert!(!cleaned.contains("```"));
        assert!(!cleaned.chars().any(|c| (c as u32) < 0x20));
        assert!(cleaned.starts_with('['));
    }

    #[test]
    fn test_sanitize_strips_embedded_control_chars() {
        let raw = "before\u{0007}mid\u{001F}after";
        assert_eq!(sanitize(raw), "beforemidafter");
    }

    #[test]
    fn test_array_decodes_to_n_records() {
        let raw = r#"[
            {"Generated article": "one", "Original title": "A"},
            {"Generated article": "two"},
            {"Generated article": "three", "News category": "Tech"}
        ]"#;
        let records = parse_response(raw).into_records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].generated_article.as_deref(), Some("one"));
        assert_eq!(records[0].original_title.as_deref(), Some("A"));
        assert_eq!(records[2].news_category.as_deref(), Some("Tech"));
    }

    #[test]
    fn test_single_object_wraps_into_one_record() {
        let raw = r#"{"Generated article": "only one", "Source URL": "https://example.com"}"#;
        match parse_response(raw) {
            ParsedResponse::Decoded(records) => {
                assert_eq!(records.len(), 1);
                assert_eq!(
                    records[0].source_url.as_deref(),
                    Some("https://example.com")
                );
            }
            other => panic!("expected Decoded, got {other:?}"),
        }
    }

    #[test]
    fn test_fenced_array_still_decodes() {
        let raw = "```json\n[{\"Generated article\": \"fenced\"}]\n```";
        let records = parse_response(raw).into_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].generated_article.as_deref(), Some("fenced"));
    }

    #[test]
    fn test_plain_prose_becomes_one_synthetic_record() {
        let raw = "  The model decided to just write prose today. ";
        match parse_response(raw) {
            ParsedResponse::Fallback(record) => {
                assert_eq!(
                    record.generated_article.as_deref(),
                    Some("The model decided to just write prose today.")
                );
                assert!(record.original_title.is_none());
            }
            other => panic!("expected Fallback, got {other:?}"),
        }
    }

    #[test]
    fn test_broken_json_becomes_one_synthetic_record() {
        let raw = r#"[{"Generated article": "unterminated"#;
        let records = parse_response(raw).into_records();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].generated_article.as_deref(),
            Some(r#"[{"Generated article": "unterminated"#)
        );
    }

    #[test]
    fn test_empty_array_still_yields_one_record() {
        match parse_response("```json\n[]\n```") {
            ParsedResponse::Fallback(record) => {
                assert_eq!(record.generated_article.as_deref(), Some("[]"));
            }
            other => panic!("expected Fallback, got {other:?}"),
        }
        assert_eq!(parse_response("[]").into_records().len(), 1);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let raw = r#"[{"Generated article": "x", "extra": "ignored"}]"#;
        let records = parse_response(raw).into_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].generated_article.as_deref(), Some("x"));
    }
}
