//! Form Controller: runs one submission through the pathway pipeline.
//!
//! Flow: validate → generate → render PDF → offer download → email → cleanup.
//!
//! Each submission walks an explicit state machine. Only the sending step is
//! recovered locally; validation, generation and render failures end the
//! submission with an `AppError`. The temporary PDF is removed before
//! `submit` returns on every path that created it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tempfile::TempPath;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::document::{self, BuildReport};
use crate::errors::AppError;
use crate::mailer::Mailer;
use crate::models::learner::{LearnerProfile, PathwayForm};
use crate::pathway::generator::PathwayGenerator;

// ────────────────────────────────────────────────────────────────────────────
// State machine
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    Idle,
    Validating,
    Generating,
    Generated,
    Rendering,
    Rendered,
    DownloadOffered,
    Sending,
    Sent,
    SendFailed,
    Cleanup,
}

impl SubmissionState {
    /// The transition table. Forward edges follow the pipeline; the abort
    /// edges are Validating→Idle, Generating→Idle, and Rendering/Rendered→Cleanup.
    pub fn can_transition_to(self, next: SubmissionState) -> bool {
        use SubmissionState::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Generating)
                | (Validating, Idle)
                | (Generating, Generated)
                | (Generating, Idle)
                | (Generated, Rendering)
                | (Rendering, Rendered)
                | (Rendering, Cleanup)
                | (Rendered, DownloadOffered)
                | (Rendered, Cleanup)
                | (DownloadOffered, Sending)
                | (Sending, Sent)
                | (Sending, SendFailed)
                | (Sent, Cleanup)
                | (SendFailed, Cleanup)
                | (Cleanup, Idle)
        )
    }
}

/// Tracks one submission's progress through the state machine.
#[derive(Debug)]
pub struct Submission {
    pub id: Uuid,
    state: SubmissionState,
    history: Vec<SubmissionState>,
}

impl Submission {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: SubmissionState::Idle,
            history: vec![SubmissionState::Idle],
        }
    }

    pub fn history(&self) -> &[SubmissionState] {
        &self.history
    }

    pub fn advance(&mut self, next: SubmissionState) -> Result<(), AppError> {
        if !self.state.can_transition_to(next) {
            return Err(AppError::Internal(anyhow::anyhow!(
                "illegal submission transition {:?} -> {:?}",
                self.state,
                next
            )));
        }
        debug!("Submission {}: {:?} -> {:?}", self.id, self.state, next);
        self.state = next;
        self.history.push(next);
        Ok(())
    }
}

impl Default for Submission {
    fn default() -> Self {
        Self::new()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Outcome
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeliveryStatus {
    Sent { recipient: String },
    Failed { message: String },
}

/// Everything the presentation layer needs after a completed submission.
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub submission_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub profile: LearnerProfile,
    pub pathway: String,
    pub download_file_name: String,
    pub pdf: Bytes,
    pub report: BuildReport,
    pub delivery: DeliveryStatus,
    pub states: Vec<SubmissionState>,
}

pub fn document_title(profile: &LearnerProfile) -> String {
    format!("Learning Pathway - {}", profile.course)
}

pub fn email_subject(profile: &LearnerProfile) -> String {
    format!("Your Learning Pathway for {}", profile.course)
}

pub fn email_body(profile: &LearnerProfile) -> String {
    format!(
        "Hi {},\n\nPlease find attached your personalized learning pathway for {}.\n\nAll the best!\n",
        profile.name, profile.course
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Controller
// ────────────────────────────────────────────────────────────────────────────

pub struct PathwayController {
    generator: Arc<dyn PathwayGenerator>,
    mailer: Arc<dyn Mailer>,
    temp_dir: PathBuf,
}

impl PathwayController {
    pub fn new(generator: Arc<dyn PathwayGenerator>, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            generator,
            mailer,
            temp_dir: std::env::temp_dir(),
        }
    }

    /// Directory that holds the per-submission temporary PDFs.
    pub fn with_temp_dir(mut self, temp_dir: PathBuf) -> Self {
        self.temp_dir = temp_dir;
        self
    }

    /// Runs one submission start to finish.
    pub async fn submit(&self, form: PathwayForm) -> Result<SubmissionOutcome, AppError> {
        let started_at = Utc::now();
        let mut submission = Submission::new();

        // Validation
        submission.advance(SubmissionState::Validating)?;
        let profile = match LearnerProfile::try_from(form) {
            Ok(profile) => profile,
            Err(e) => {
                submission.advance(SubmissionState::Idle)?;
                return Err(e);
            }
        };

        // Generation
        submission.advance(SubmissionState::Generating)?;
        info!(
            "Submission {}: generating pathway for '{}' ({})",
            submission.id, profile.course, profile.level
        );
        let pathway = match self
            .generator
            .generate(
                &profile.course,
                &profile.duration,
                profile.level,
                &profile.goals,
            )
            .await
        {
            Ok(text) => text,
            Err(e) => {
                error!("Submission {}: generation failed: {e}", submission.id);
                submission.advance(SubmissionState::Idle)?;
                return Err(AppError::Generation(e.to_string()));
            }
        };
        submission.advance(SubmissionState::Generated)?;

        // Rendering
        submission.advance(SubmissionState::Rendering)?;
        let (pdf_path, report) = match self.render(&profile, &pathway).await {
            Ok(rendered) => rendered,
            Err(e) => {
                // Any partially written file was removed when its TempPath dropped.
                error!("Submission {}: {e}", submission.id);
                submission.advance(SubmissionState::Cleanup)?;
                submission.advance(SubmissionState::Idle)?;
                return Err(e);
            }
        };
        submission.advance(SubmissionState::Rendered)?;
        info!(
            "Submission {}: PDF created ({} body blocks, {} page(s))",
            submission.id, report.body_blocks, report.pages
        );

        // Offer download
        let pdf = match tokio::fs::read(&pdf_path).await {
            Ok(bytes) => Bytes::from(bytes),
            Err(e) => {
                error!("Submission {}: could not read rendered PDF: {e}", submission.id);
                submission.advance(SubmissionState::Cleanup)?;
                cleanup(pdf_path);
                submission.advance(SubmissionState::Idle)?;
                return Err(AppError::Render(e.to_string()));
            }
        };
        submission.advance(SubmissionState::DownloadOffered)?;

        // Sending: the only step whose failure is recovered here.
        submission.advance(SubmissionState::Sending)?;
        let delivery = match self
            .mailer
            .send(
                &profile.email,
                &email_subject(&profile),
                &email_body(&profile),
                &pdf_path,
            )
            .await
        {
            Ok(()) => {
                submission.advance(SubmissionState::Sent)?;
                DeliveryStatus::Sent {
                    recipient: profile.email.clone(),
                }
            }
            Err(e) => {
                warn!("Submission {}: email delivery failed: {e}", submission.id);
                submission.advance(SubmissionState::SendFailed)?;
                DeliveryStatus::Failed {
                    message: e.to_string(),
                }
            }
        };

        // Cleanup
        submission.advance(SubmissionState::Cleanup)?;
        cleanup(pdf_path);
        submission.advance(SubmissionState::Idle)?;

        Ok(SubmissionOutcome {
            submission_id: submission.id,
            started_at,
            download_file_name: profile.download_file_name(),
            profile,
            pathway,
            pdf,
            report,
            delivery,
            states: submission.history().to_vec(),
        })
    }

    /// Allocates a fresh temporary path and renders the PDF into it on the
    /// blocking pool.
    async fn render(
        &self,
        profile: &LearnerProfile,
        pathway: &str,
    ) -> Result<(TempPath, BuildReport), AppError> {
        let pdf_path = allocate_pdf_path(&self.temp_dir)
            .map_err(|e| AppError::Render(format!("could not create temporary PDF: {e}")))?;

        let text = pathway.to_string();
        let title = document_title(profile);
        let path = pdf_path.to_path_buf();

        let report = tokio::task::spawn_blocking(move || document::build(&text, &title, &path))
            .await
            .map_err(|e| AppError::Render(format!("render task failed: {e}")))?
            .map_err(|e| AppError::Render(e.to_string()))?;

        Ok((pdf_path, report))
    }
}

fn allocate_pdf_path(dir: &Path) -> std::io::Result<TempPath> {
    Ok(tempfile::Builder::new()
        .prefix("pathway-")
        .suffix(".pdf")
        .tempfile_in(dir)?
        .into_temp_path())
}

/// Deletes the temporary PDF. Failure is not user-visible.
fn cleanup(pdf_path: TempPath) {
    let shown = pdf_path.display().to_string();
    if let Err(e) = pdf_path.close() {
        debug!("Could not remove temporary PDF {shown}: {e}");
    }
}
