//! # Demo Load Job
//!
//! `POST /api/demo/load` registers a job as `Pending`, returns its id right
//! away and walks the `DEMO_STAGES` in a background task.
//!
//! ## Workflow:
//!
//! 1.  **Scheduling**: a new `job_id` is stored as `Pending` and a Tokio task
//!     is spawned for the run.
//! 2.  **Stages**: before each stage an `InProgress` update carrying the stage
//!     label and `stage_progress(k)` goes to the job controller, then the task
//!     waits the configured per-stage delay.
//! 3.  **Write**: at `DEMO_WRITE_STAGE` the data set is built and written on the
//!     blocking pool (`spawn_blocking`) inside one transaction.
//! 4.  **Finish**: `Completed` with a summary message and a `demo_loaded` data
//!     event, or `Failed` with the error and nothing written.

use super::scenarios::{build_dataset, write_dataset, WrittenCounts};
use crate::config::AppConfig;
use crate::db::Database;
use crate::error::ServiceError;
use crate::events::DataEvents;
use crate::job_controller::state::{JobUpdate, JobsState};
use actix_web::{web, HttpResponse, Responder};
use common::events::DataEvent;
use common::jobs::JobStatus;
use common::model::demo::{stage_progress, DemoScenario, DEMO_STAGES, DEMO_WRITE_STAGE};
use common::requests::LoadDemoRequest;
use log::{error, info};
use std::time::Duration;
use tokio::sync::mpsc;
use uuid::Uuid;

pub(crate) async fn process(
    state: web::Data<JobsState>,
    db: web::Data<Database>,
    events: web::Data<DataEvents>,
    config: web::Data<AppConfig>,
    payload: web::Json<LoadDemoRequest>,
) -> impl Responder {
    let scenario = DemoScenario::preset(payload.scenario);
    let job_id = schedule_demo_load(
        &state,
        db.get_ref().clone(),
        events.get_ref().clone(),
        config.demo_stage_delay,
        scenario,
    )
    .await;
    HttpResponse::Ok().json(serde_json::json!({ "job_id": job_id }))
}

async fn schedule_demo_load(
    state: &JobsState,
    db: Database,
    events: DataEvents,
    delay: Duration,
    scenario: DemoScenario,
) -> String {
    let job_id = Uuid::new_v4().to_string();
    state
        .jobs
        .write()
        .await
        .insert(job_id.clone(), JobStatus::Pending);
    info!("Scheduled demo load {} for scenario {}", job_id, scenario.id);

    let tx = state.tx.clone();
    let job = job_id.clone();
    tokio::spawn(async move {
        run_demo_load(tx, job, db, events, delay, scenario).await;
    });
    job_id
}

/// Drives one load to completion and returns the final status it reported.
pub async fn run_demo_load(
    tx: mpsc::Sender<JobUpdate>,
    job_id: String,
    db: Database,
    events: DataEvents,
    delay: Duration,
    scenario: DemoScenario,
) -> JobStatus {
    let report = |status: JobStatus| {
        let tx = tx.clone();
        let job_id = job_id.clone();
        async move {
            let _ = tx.send(JobUpdate::new(job_id, status)).await;
        }
    };

    let mut written = None;
    for (index, stage) in DEMO_STAGES.iter().enumerate() {
        report(JobStatus::InProgress {
            progress: stage_progress(index),
            stage: stage.to_string(),
        })
        .await;

        if index == DEMO_WRITE_STAGE {
            match write_scenario(db.clone(), scenario.clone()).await {
                Ok(counts) => written = Some(counts),
                Err(e) => {
                    error!("Demo load {} failed: {}", job_id, e);
                    let failed = JobStatus::Failed(e.to_string());
                    report(failed.clone()).await;
                    return failed;
                }
            }
        }

        if index + 1 < DEMO_STAGES.len() && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    let message = match written {
        Some(counts) => format!(
            "Loaded {}: {} sites, {} users, {} policies",
            scenario.name, counts.sites, counts.users, counts.policies
        ),
        None => format!("Loaded {}", scenario.name),
    };
    info!("Demo load {} completed: {}", job_id, message);
    events.publish(DataEvent::DemoLoaded {
        scenario: scenario.id,
    });
    let completed = JobStatus::Completed(message);
    report(completed.clone()).await;
    completed
}

async fn write_scenario(db: Database, scenario: DemoScenario) -> Result<WrittenCounts, ServiceError> {
    tokio::task::spawn_blocking(move || {
        let mut rng = rand::rng();
        let dataset = build_dataset(&scenario, &mut rng);
        let mut conn = db.open()?;
        write_dataset(&mut conn, dataset)
    })
    .await
    .map_err(|e| ServiceError::Internal(format!("Demo writer panicked: {}", e)))?
}
