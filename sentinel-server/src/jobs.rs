//! Background assessment jobs
//!
//! Each job owns its request, its progress reporter and its outcome slot.
//! Jobs share nothing with each other; the registry only indexes them by id.

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::AbortHandle;
use uuid::Uuid;

use sentinel_core::{
    AssessmentPipeline, ProgressConfig, ProgressReporter,
    ThreatAssessmentReport, ThreatAssessmentRequest,
};

use crate::models::{JobError, JobView};

#[derive(Debug, Clone)]
enum JobOutcome {
    Completed(ThreatAssessmentReport),
    Failed(JobError),
}

#[derive(Debug, Default)]
struct OutcomeSlot {
    outcome: Option<JobOutcome>,
    finished_at: Option<DateTime<Utc>>,
}

struct Job {
    created_at: DateTime<Utc>,
    reporter: ProgressReporter,
    slot: Arc<Mutex<OutcomeSlot>>,
    task: AbortHandle,
}

pub struct JobRegistry {
    jobs: RwLock<HashMap<Uuid, Job>>,
    progress: ProgressConfig,
    retention: Duration,
}

impl JobRegistry {
    pub fn new(progress: ProgressConfig, retention: Duration) -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
            progress,
            retention,
        }
    }

    /// Start an assessment in the background
    pub fn start(&self, pipeline: AssessmentPipeline, request: ThreatAssessmentRequest) -> Uuid {
        self.prune();

        let id = Uuid::new_v4();
        let reporter = ProgressReporter::new(self.progress.clone());
        let slot = Arc::new(Mutex::new(OutcomeSlot::default()));

        let task = {
            let reporter = reporter.clone();
            let slot = slot.clone();
            tokio::spawn(async move {
                let result = reporter.track(pipeline.assess(&request)).await;
                let outcome = match result {
                    Ok(report) => {
                        tracing::info!("Job {} complete: {}", id, report.threat_level);
                        JobOutcome::Completed(report)
                    }
                    Err(err) => {
                        tracing::warn!("Job {} failed: {}", id, err.kind());
                        JobOutcome::Failed(JobError {
                            kind: err.kind(),
                            message: err.user_message(),
                        })
                    }
                };
                let mut slot = slot.lock();
                slot.outcome = Some(outcome);
                slot.finished_at = Some(Utc::now());
            })
        };

        self.jobs.write().insert(
            id,
            Job {
                created_at: Utc::now(),
                reporter,
                slot,
                task: task.abort_handle(),
            },
        );

        tracing::debug!("Job {} started", id);
        id
    }

    pub fn view(&self, id: Uuid) -> Option<JobView> {
        let jobs = self.jobs.read();
        let job = jobs.get(&id)?;
        let snapshot = job.reporter.snapshot();
        let slot = job.slot.lock();

        let (report, error) = match &slot.outcome {
            Some(JobOutcome::Completed(report)) => (Some(report.clone()), None),
            Some(JobOutcome::Failed(error)) => (None, Some(error.clone())),
            None => (None, None),
        };

        Some(JobView {
            id,
            status: snapshot.status,
            progress: snapshot.progress,
            phase: snapshot.phase,
            report,
            error,
            created_at: job.created_at,
            finished_at: slot.finished_at,
        })
    }

    /// Abandon and forget a job. Returns false for unknown ids.
    pub fn cancel(&self, id: Uuid) -> bool {
        let Some(job) = self.jobs.write().remove(&id) else {
            return false;
        };
        job.reporter.abandon();
        job.task.abort();
        tracing::info!("Job {} cancelled", id);
        true
    }

    pub fn len(&self) -> usize {
        self.jobs.read().len()
    }

    /// Drop finished jobs older than the retention window
    fn prune(&self) {
        let Ok(retention) = chrono::Duration::from_std(self.retention) else {
            return;
        };
        let cutoff = Utc::now() - retention;
        let mut jobs = self.jobs.write();
        let before = jobs.len();
        jobs.retain(|_, job| match job.slot.lock().finished_at {
            Some(finished) => finished > cutoff,
            None => true,
        });
        let pruned = before - jobs.len();
        if pruned > 0 {
            tracing::debug!("Pruned {} finished jobs", pruned);
        }
    }
}
