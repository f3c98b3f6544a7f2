//! Prompt configuration.
//!
//! The system prompt drives the voice question loop; the TOC prompt drives
//! table-of-contents planning for longer books. Both are plain strings so
//! deployments can tune the model's behavior without a rebuild.

use serde::{Deserialize, Serialize};

/// Configurable prompts for the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    /// System prompt for the voice question loop
    ///
    /// Must instruct the model to answer with a single JSON object, since
    /// replies are returned to the client as JSON.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Instruction for table-of-contents planning
    #[serde(default = "default_toc_prompt")]
    pub toc_prompt: String,
}

fn default_system_prompt() -> String {
    "You are an audiobook planning assistant. Interview the user with one short \
     question at a time to learn what story they want. Reply with a single JSON \
     object: {\"question\": \"<your next question>\"} while you still need \
     information, or {\"isReady\": \"Done\"} once you know enough to write the book."
        .to_string()
}

fn default_toc_prompt() -> String {
    "You are an author planning an audiobook. Given a topic and a chapter count, \
     produce a table of contents as a single JSON object: \
     {\"contents\": [\"<chapter title>\", ...]} containing exactly the requested \
     number of chapter titles, in reading order."
        .to_string()
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            toc_prompt: default_toc_prompt(),
        }
    }
}

impl PromptConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.system_prompt.trim().is_empty() {
            return Err("system_prompt must not be empty".to_string());
        }
        if self.toc_prompt.trim().is_empty() {
            return Err("toc_prompt must not be empty".to_string());
        }
        Ok(())
    }
}
