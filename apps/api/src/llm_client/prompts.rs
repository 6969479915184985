// Shared prompt fragments. Each service that needs LLM calls defines its own
// prompts.rs alongside it; this file holds the cross-cutting pieces.

/// Output must survive a renderer that understands no markup at all.
pub const PLAIN_TEXT_INSTRUCTION: &str =
    "Output requirements (plain text only - no HTML tags, no markdown tables):";

/// Appended to every long-form prompt.
pub const CONCISE_INSTRUCTION: &str = "Keep it concise, skimmable, and actionable.";
