//! Fan-out/fan-in delivery of update instruction batches.
//!
//! Each instruction is sent independently: one failure never aborts the
//! others, and the caller gets a three-way outcome split for user-facing
//! reporting. Request timeouts belong to the gateway implementation and must
//! surface as failures, never as success.

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use super::assignment::UpdateInstruction;
use super::domain::QuestionId;

/// Successful outcome of applying one instruction upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AssignmentStatus {
    Assigned,
    AlreadyAssigned,
}

/// Error surfaced by a gateway for a single instruction.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("assignment rejected: {0}")]
    Rejected(String),
    #[error("assignment timed out")]
    Timeout,
    #[error("gateway unavailable: {0}")]
    Unavailable(String),
}

/// Outbound persistence hook for update instructions. Implementations are
/// expected to enforce their own per-request timeout.
pub trait UpdateGateway: Send + Sync {
    fn apply(
        &self,
        instruction: UpdateInstruction,
    ) -> impl Future<Output = Result<AssignmentStatus, GatewayError>> + Send;
}

/// One instruction that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedUpdate {
    pub question_id: QuestionId,
    pub reason: String,
}

/// Aggregated fan-in result, sorted by question id for stable reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchReport {
    pub succeeded: Vec<QuestionId>,
    pub already_assigned: Vec<QuestionId>,
    pub failed: Vec<FailedUpdate>,
}

impl DispatchReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Issues every instruction concurrently and collects each outcome
/// independently. A panicking gateway call is recorded as a failure for that
/// instruction only.
pub async fn dispatch_updates<G>(
    gateway: Arc<G>,
    instructions: Vec<UpdateInstruction>,
) -> DispatchReport
where
    G: UpdateGateway + 'static,
{
    let mut in_flight = Vec::with_capacity(instructions.len());
    for instruction in instructions {
        let question_id = instruction.id;
        let gateway = gateway.clone();
        let handle = tokio::spawn(async move { gateway.apply(instruction).await });
        in_flight.push((question_id, handle));
    }

    let mut report = DispatchReport::default();

    for (question_id, handle) in in_flight {
        match handle.await {
            Ok(Ok(AssignmentStatus::Assigned)) => report.succeeded.push(question_id),
            Ok(Ok(AssignmentStatus::AlreadyAssigned)) => {
                report.already_assigned.push(question_id);
            }
            Ok(Err(error)) => {
                warn!(question = question_id.0, %error, "update instruction failed");
                report.failed.push(FailedUpdate {
                    question_id,
                    reason: error.to_string(),
                });
            }
            Err(_) => {
                warn!(
                    question = question_id.0,
                    "update instruction task did not complete"
                );
                report.failed.push(FailedUpdate {
                    question_id,
                    reason: "dispatch task did not complete".to_string(),
                });
            }
        }
    }

    report.succeeded.sort();
    report.already_assigned.sort();
    report.failed.sort_by_key(|failure| failure.question_id);

    report
}
