// Learning pathway pipeline: prompt → hosted model → PDF → email.
// All LLM calls go through llm_client; all SMTP traffic goes through mailer.

pub mod controller;
pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod views;

#[cfg(test)]
pub(crate) mod test_support;
