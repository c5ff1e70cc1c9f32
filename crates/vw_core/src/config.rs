use std::env;

use crate::error::{Error, Result};

/// Environment variable holding the chat-completions API key.
pub const GENERATION_KEY_VAR: &str = "OPENAI_API_KEY";
/// Environment variable holding the news vendor API key.
pub const NEWS_KEY_VAR: &str = "NEWS_API_KEY";

/// Load a `.env` file if one is present. Missing files are fine; real
/// deployments supply credentials through the process environment.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::info!("Loaded .env from {}", path.display()),
        Err(_) => tracing::debug!("No .env file found, using process environment only"),
    }
}

/// Read the generation credential, failing fast before any network attempt.
pub fn generation_api_key() -> Result<String> {
    require_env(GENERATION_KEY_VAR)
}

/// Read the news vendor credential, failing fast before any network attempt.
pub fn news_api_key() -> Result<String> {
    require_env(NEWS_KEY_VAR)
}

fn require_env(var: &str) -> Result<String> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Config(format!(
            "{var} is not set. Add it to your environment or a .env file."
        ))),
    }
}
