//! Strips markup and markdown artifacts from generated text before layout.

use once_cell::sync::Lazy;
use regex::Regex;

pub const BULLET: char = '\u{2022}';

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static HSPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());

/// Makes arbitrary model output safe for a renderer with no markup support.
///
/// In order: drops `<...>` tags, code-fence backticks and `**` bold markers,
/// turns a leading `* ` into a bullet, drops any remaining asterisks,
/// collapses runs of spaces and tabs, and trims. Total and idempotent.
/// Only the leading marker becomes a bullet; mid-line `* ` is just stripped.
pub fn sanitize(raw: &str) -> String {
    let text = TAG_RE.replace_all(raw, "");
    let text = text.replace('`', "").replace("**", "");

    let text = text.trim_start();
    let text = match text.strip_prefix("* ") {
        Some(rest) => format!("{BULLET} {rest}"),
        None => text.to_string(),
    };
    let text = text.replace('*', "");

    HSPACE_RE.replace_all(&text, " ").trim().to_string()
}
