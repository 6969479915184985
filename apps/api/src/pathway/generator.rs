//! Pathway Generator: turns a learner profile into curriculum text.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::info;

use crate::llm_client::prompts::{CONCISE_INSTRUCTION, PLAIN_TEXT_INSTRUCTION};
use crate::llm_client::{LlmClient, LlmError};
use crate::models::learner::SkillLevel;
use crate::pathway::prompts::{PATHWAY_PROMPT_TEMPLATE, PATHWAY_SYSTEM};

/// Produces the plain-text pathway for a course. The model's adherence to
/// the requested section structure is not checked.
#[async_trait]
pub trait PathwayGenerator: Send + Sync {
    async fn generate(
        &self,
        course: &str,
        duration: &str,
        level: SkillLevel,
        goals: &str,
    ) -> Result<String, LlmError>;
}

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{(\w+)\}").unwrap());

/// Fills the pathway template with the learner's inputs.
///
/// Single pass over the template: substituted values are never rescanned,
/// so input containing `{goals}` or similar reaches the model verbatim.
pub fn build_prompt(course: &str, duration: &str, level: SkillLevel, goals: &str) -> String {
    PLACEHOLDER_RE
        .replace_all(PATHWAY_PROMPT_TEMPLATE, |caps: &Captures| {
            match &caps[1] {
                "course" => course,
                "level" => level.as_str(),
                "duration" => duration,
                "goals" => goals,
                "plain_text_instruction" => PLAIN_TEXT_INSTRUCTION,
                "concise_instruction" => CONCISE_INSTRUCTION,
                _ => &caps[0],
            }
            .to_string()
        })
        .into_owned()
}

/// Default generator backed by the hosted model.
pub struct LlmPathwayGenerator {
    llm: LlmClient,
}

impl LlmPathwayGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl PathwayGenerator for LlmPathwayGenerator {
    async fn generate(
        &self,
        course: &str,
        duration: &str,
        level: SkillLevel,
        goals: &str,
    ) -> Result<String, LlmError> {
        let prompt = build_prompt(course, duration, level, goals);
        let text = self.llm.call_text(&prompt, PATHWAY_SYSTEM).await?;
        info!(
            "Generated pathway for '{course}' with {} ({} chars)",
            self.llm.model(),
            text.len()
        );
        Ok(text)
    }
}
