// All LLM prompt constants for the Pathway module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System instruction for pathway generation.
pub const PATHWAY_SYSTEM: &str = "You are an expert curriculum designer. \
    You write practical, step-by-step learning plans for individual learners.";

/// Pathway prompt template.
/// Replace: {course}, {level}, {duration}, {goals},
///          {plain_text_instruction}, {concise_instruction}
pub const PATHWAY_PROMPT_TEMPLATE: &str = r#"Create a highly practical, step-by-step learning pathway for the course/topic: '{course}'.
Learner current level: {level}
Planned total duration: {duration}
Learner goals: {goals}

{plain_text_instruction}
1) Short intro
2) Weekly breakdown with outcomes (Week 1, Week 2, ...)
3) Key topics & must-learn concepts
4) Hands-on projects (at least 2) with brief briefs
5) Recommended resources (max 6) with one-line why
6) Assessment & milestones
7) Tips to stay consistent
{concise_instruction}"#;
