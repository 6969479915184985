//! Stub collaborators shared by controller and router tests.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm_client::LlmError;
use crate::mailer::{MailError, Mailer};
use crate::models::learner::{PathwayForm, SkillLevel};
use crate::pathway::generator::PathwayGenerator;

pub const SEVEN_SECTION_PATHWAY: &str = "\
1) Intro
This 8-week plan takes you from zero to confident **pandas** user.

2) Weekly breakdown
* Week 1: Python refresher and Jupyter setup
* Week 2: Series, DataFrames and indexing

3) Key topics
Cleaning, reshaping, grouping and `merge`.

4) Hands-on projects
Project 1: Analyse a public transport dataset.
Project 2: Build a sales dashboard notebook.

5) Recommended resources
<a href=\"https://pandas.pydata.org\">pandas docs</a> - the reference.

6) Assessment & milestones
End of week 4: publish a cleaned dataset.

7) Tips to stay consistent
Study 45 minutes every day.
";

pub fn complete_form() -> PathwayForm {
    PathwayForm {
        name: "Asha".to_string(),
        course: "Data Science".to_string(),
        duration: "8 weeks".to_string(),
        level: "Beginner".to_string(),
        goals: "learn pandas".to_string(),
        email: "asha@example.com".to_string(),
    }
}

pub struct StubGenerator {
    text: Option<String>,
    calls: AtomicUsize,
}

impl StubGenerator {
    pub fn returning(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            text: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PathwayGenerator for StubGenerator {
    async fn generate(
        &self,
        _course: &str,
        _duration: &str,
        _level: SkillLevel,
        _goals: &str,
    ) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.text.clone().ok_or(LlmError::Api {
            status: 429,
            message: "Resource exhausted".to_string(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Delivery {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub path: PathBuf,
    /// Attachment bytes as they were on disk at send time.
    pub attachment: Vec<u8>,
}

#[derive(Default)]
pub struct RecordingMailer {
    fail: bool,
    deliveries: Mutex<Vec<Delivery>>,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(
        &self,
        to_address: &str,
        subject: &str,
        body: &str,
        pdf_path: &Path,
    ) -> Result<(), MailError> {
        let attachment = tokio::fs::read(pdf_path).await.map_err(|source| MailError::Io {
            path: pdf_path.display().to_string(),
            source,
        })?;
        self.deliveries.lock().unwrap().push(Delivery {
            to: to_address.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            path: pdf_path.to_path_buf(),
            attachment,
        });
        if self.fail {
            return Err(MailError::Compose("535 authentication failed".to_string()));
        }
        Ok(())
    }
}
