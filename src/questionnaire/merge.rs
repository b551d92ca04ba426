//! Reconciles multiple users' independently-submitted answers for one
//! question into a single authoritative state.
//!
//! The reconciliation policy is deliberately last-write-wins across the whole
//! record: the latest submission fully replaces earlier ones, even for
//! checkbox/radio questions where a field-level union might seem plausible.
//! See DESIGN.md for why that policy is preserved as-is.

use std::collections::HashSet;

use serde::Serialize;

use super::content::{self, ContentPayload, DropDownRole};
use super::domain::{AnswerRecord, Question, UserId};

/// Completion state of a question or category. A single question is binary
/// (`Pending`/`Completed`); `Ongoing` only appears at the category level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CompletionStatus {
    Pending,
    Ongoing,
    Completed,
}

impl CompletionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CompletionStatus::Pending => "PENDING",
            CompletionStatus::Ongoing => "ONGOING",
            CompletionStatus::Completed => "COMPLETED",
        }
    }
}

/// Outcome of merging one question's answer records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeResult {
    pub status: CompletionStatus,
    pub merged_answer: Option<ContentPayload>,
    pub remarks: Option<String>,
    pub contributing_user_ids: Vec<UserId>,
}

impl MergeResult {
    fn pending() -> Self {
        Self {
            status: CompletionStatus::Pending,
            merged_answer: None,
            remarks: None,
            contributing_user_ids: Vec::new(),
        }
    }
}

/// Merges the answer records visible to the caller's scope.
///
/// `relevant_users` is supplied explicitly because the same question can be
/// answered by users of different companies; a viewer must only see the
/// records of the assignees in their own scope. Records outside the set never
/// influence the result in any way.
///
/// Within the scope, the record with the latest timestamp is authoritative
/// for content and remarks. A record whose content fails to decode is skipped
/// for content selection but still counts as a contribution when its raw
/// content is non-empty.
pub fn merge(
    question: &Question,
    answers: &[AnswerRecord],
    relevant_users: &HashSet<UserId>,
) -> MergeResult {
    let scoped: Vec<&AnswerRecord> = answers
        .iter()
        .filter(|record| relevant_users.contains(&record.user_id))
        .collect();

    let mut contributing_user_ids = Vec::new();
    for record in &scoped {
        if record.content.trim().is_empty() {
            continue;
        }
        if !contributing_user_ids.contains(&record.user_id) {
            contributing_user_ids.push(record.user_id);
        }
    }

    if contributing_user_ids.is_empty() {
        return MergeResult::pending();
    }

    // Latest-first; the first record that decodes cleanly is authoritative.
    let mut latest_first = scoped;
    latest_first.sort_by(|left, right| right.timestamp.cmp(&left.timestamp));

    let authoritative = latest_first.iter().find_map(|record| {
        let decoded = content::decode(
            question.question_type,
            &record.content,
            DropDownRole::Answer,
        );
        decoded.is_clean().then_some((*record, decoded.payload))
    });

    let (merged_answer, remarks) = match authoritative {
        Some((record, payload)) => (Some(payload), record.remarks.clone()),
        None => (None, None),
    };

    MergeResult {
        status: CompletionStatus::Completed,
        merged_answer,
        remarks,
        contributing_user_ids,
    }
}

/// Category-level rollup over per-question statuses: `Completed` when every
/// question is completed, `Ongoing` when only some are, `Pending` otherwise.
pub fn category_status(statuses: &[CompletionStatus]) -> CompletionStatus {
    if statuses.is_empty() {
        return CompletionStatus::Pending;
    }

    let completed = statuses
        .iter()
        .filter(|status| matches!(status, CompletionStatus::Completed))
        .count();

    if completed == statuses.len() {
        CompletionStatus::Completed
    } else if completed > 0 {
        CompletionStatus::Ongoing
    } else {
        CompletionStatus::Pending
    }
}

/// Completion counts for a category's questions, for progress bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryProgress {
    pub completed: usize,
    pub total: usize,
    pub status: CompletionStatus,
}

/// Rolls merge results up to a category. Title-only rows (`is_not_question`)
/// expect no answer and are excluded from the counts.
pub fn category_progress<'a, I>(items: I) -> CategoryProgress
where
    I: IntoIterator<Item = (&'a Question, &'a MergeResult)>,
{
    let mut statuses = Vec::new();
    for (question, result) in items {
        if question.is_not_question {
            continue;
        }
        statuses.push(result.status);
    }

    let completed = statuses
        .iter()
        .filter(|status| matches!(status, CompletionStatus::Completed))
        .count();

    CategoryProgress {
        completed,
        total: statuses.len(),
        status: category_status(&statuses),
    }
}
