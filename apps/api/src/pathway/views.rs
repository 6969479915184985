//! Server-rendered HTML for the learner-facing form.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::models::learner::{PathwayForm, SkillLevel};
use crate::pathway::controller::{DeliveryStatus, SubmissionOutcome};

const STYLE: &str = "body{font-family:sans-serif;max-width:46rem;margin:2rem auto;padding:0 1rem}\
label{display:block;margin-top:.8rem;font-weight:600}\
input,select,textarea{width:100%;padding:.4rem;box-sizing:border-box}\
textarea{min-height:6rem}button,.download{margin-top:1rem;padding:.6rem 1rem;display:inline-block}\
.error{background:#fde8e8;color:#8a1c1c;padding:.6rem;border-radius:4px}\
.success{background:#e6f6ea;color:#1d5b2d;padding:.6rem;border-radius:4px}\
pre{white-space:pre-wrap;background:#f6f6f6;padding:1rem;border-radius:4px}";

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
         <title>Learning Pathway Generator</title><style>{STYLE}</style></head>\
         <body><h1>Automatic Learning Pathway Generator</h1>{body}</body></html>"
    )
}

/// The submission form, optionally with an inline error and the previous input.
pub fn form_page(error: Option<&str>, form: &PathwayForm) -> String {
    let error_html = error
        .map(|msg| format!("<p class=\"error\">{}</p>", escape_html(msg)))
        .unwrap_or_default();

    let options: String = SkillLevel::ALL
        .iter()
        .map(|level| {
            let selected = if level.as_str().eq_ignore_ascii_case(form.level.trim()) {
                " selected"
            } else {
                ""
            };
            format!("<option value=\"{0}\"{selected}>{0}</option>", level.as_str())
        })
        .collect();

    page(&format!(
        "<p>Fill the form, get a personalized pathway as <b>PDF</b> and receive it by <b>email</b>.</p>\
         {error_html}\
         <form method=\"post\" action=\"/pathway\">\
         <label for=\"name\">Your Name</label>\
         <input id=\"name\" name=\"name\" value=\"{name}\">\
         <label for=\"course\">Course / Topic (e.g., Data Science, Web Dev)</label>\
         <input id=\"course\" name=\"course\" value=\"{course}\">\
         <label for=\"duration\">Preferred Duration (e.g., 8 weeks, 3 months)</label>\
         <input id=\"duration\" name=\"duration\" value=\"{duration}\">\
         <label for=\"level\">Current Skill Level</label>\
         <select id=\"level\" name=\"level\">{options}</select>\
         <label for=\"goals\">Your Learning Goals (short bullets are fine)</label>\
         <textarea id=\"goals\" name=\"goals\">{goals}</textarea>\
         <label for=\"email\">Your Email (to receive the PDF)</label>\
         <input id=\"email\" name=\"email\" type=\"email\" value=\"{email}\">\
         <button type=\"submit\">Generate &amp; Send PDF</button>\
         </form>",
        name = escape_html(&form.name),
        course = escape_html(&form.course),
        duration = escape_html(&form.duration),
        goals = escape_html(&form.goals),
        email = escape_html(&form.email),
    ))
}

/// Preview, download link and delivery status for a finished submission.
pub fn result_page(outcome: &SubmissionOutcome) -> String {
    let delivery_html = match &outcome.delivery {
        DeliveryStatus::Sent { recipient } => {
            format!("<p class=\"success\">Sent to {}</p>", escape_html(recipient))
        }
        DeliveryStatus::Failed { message } => format!(
            "<p class=\"error\">Failed to send email: {}</p>",
            escape_html(message)
        ),
    };

    page(&format!(
        "<p>Hi {name}, here is your {level} pathway for <b>{course}</b>.</p>\
         <p class=\"success\">Pathway generated!</p>\
         <h2>Preview (plain text)</h2><pre>{preview}</pre>\
         <p class=\"success\">PDF created!</p>\
         <a class=\"download\" download=\"{file_name}\" href=\"data:application/pdf;base64,{pdf}\">Download PDF</a>\
         {delivery_html}\
         <p><a href=\"/\">Generate another pathway</a></p>",
        name = escape_html(&outcome.profile.name),
        level = outcome.profile.level,
        course = escape_html(&outcome.profile.course),
        preview = escape_html(&outcome.pathway),
        file_name = escape_html(&outcome.download_file_name),
        pdf = STANDARD.encode(&outcome.pdf),
    ))
}
