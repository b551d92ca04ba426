//! Turns the flat question list fetched upstream into the display hierarchy:
//! tree order, stable per-branch numbering, and category buckets.
//!
//! Numbering is order-dependent by design: the backing list's relative order
//! within each parent/child group is the single source of truth, and
//! reordering it renumbers the bank.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::warn;

use super::content::{self, DropDownRole};
use super::domain::{Category, CategoryId, Question, QuestionId};

/// A question decorated with its display number and resolved parent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizedQuestion {
    pub question: Question,
    pub display_no: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Question>,
}

/// Questions of one category, in organized order. `category` is `None` for
/// the uncategorized bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBucket {
    pub category: Option<Category>,
    pub question_ids: Vec<QuestionId>,
}

/// Non-fatal data problems found while organizing. The bank is still fully
/// usable; callers decide whether to surface these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntegrityWarning {
    #[error("question {} references missing parent {}", question.0, missing_parent.0)]
    OrphanedParent {
        question: QuestionId,
        missing_parent: QuestionId,
    },
    #[error("question {} is part of a parent cycle", question.0)]
    ParentCycle { question: QuestionId },
    #[error("question {} has malformed stored content: {detail}", question.0)]
    MalformedContent { question: QuestionId, detail: String },
}

/// Full result of organizing one bank.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizedBank {
    pub questions: Vec<OrganizedQuestion>,
    pub categories: Vec<CategoryBucket>,
    #[serde(skip)]
    pub warnings: Vec<IntegrityWarning>,
}

/// Organizes a flat question list into tree order with stable numbering.
///
/// Top-level questions take sequential integers in input order; children take
/// `"{parent}.{index+1}"`, recursively and without a depth bound. A question
/// whose parent does not exist is kept as top-level rather than dropped, with
/// a warning recorded. Stored templates are normalized through the content
/// codec on the way out, so legacy table payloads leave here in the modern
/// shape.
pub fn organize(questions: &[Question]) -> OrganizedBank {
    let known_ids: HashSet<QuestionId> = questions.iter().map(|question| question.id).collect();
    let mut warnings = Vec::new();

    let mut roots: Vec<usize> = Vec::new();
    let mut children: HashMap<QuestionId, Vec<usize>> = HashMap::new();

    for (index, question) in questions.iter().enumerate() {
        match question.parent_id {
            None => roots.push(index),
            Some(parent_id) if known_ids.contains(&parent_id) => {
                children.entry(parent_id).or_default().push(index);
            }
            Some(parent_id) => {
                warn!(
                    question = question.id.0,
                    missing_parent = parent_id.0,
                    "question references a parent that does not exist; keeping it top-level"
                );
                warnings.push(IntegrityWarning::OrphanedParent {
                    question: question.id,
                    missing_parent: parent_id,
                });
                roots.push(index);
            }
        }
    }

    let mut organized = Vec::with_capacity(questions.len());
    let mut visited = HashSet::new();

    for (position, &root) in roots.iter().enumerate() {
        let display_no = (position + 1).to_string();
        emit(
            questions,
            root,
            None,
            display_no,
            &children,
            &mut organized,
            &mut visited,
            &mut warnings,
        );
    }

    // Parent cycles are unreachable from any root; surface their members as
    // top-level instead of silently dropping them.
    let mut next_top_level = roots.len();
    for (index, question) in questions.iter().enumerate() {
        if visited.contains(&question.id) {
            continue;
        }
        warn!(
            question = question.id.0,
            "question is part of a parent cycle; keeping it top-level"
        );
        warnings.push(IntegrityWarning::ParentCycle {
            question: question.id,
        });
        next_top_level += 1;
        emit(
            questions,
            index,
            None,
            next_top_level.to_string(),
            &HashMap::new(),
            &mut organized,
            &mut visited,
            &mut warnings,
        );
    }

    let categories = bucket_by_category(questions, &organized);

    OrganizedBank {
        questions: organized,
        categories,
        warnings,
    }
}

#[allow(clippy::too_many_arguments)]
fn emit(
    questions: &[Question],
    index: usize,
    parent: Option<&Question>,
    display_no: String,
    children: &HashMap<QuestionId, Vec<usize>>,
    organized: &mut Vec<OrganizedQuestion>,
    visited: &mut HashSet<QuestionId>,
    warnings: &mut Vec<IntegrityWarning>,
) {
    let question = &questions[index];
    if !visited.insert(question.id) {
        return;
    }

    organized.push(OrganizedQuestion {
        question: normalized(question, warnings),
        display_no: display_no.clone(),
        parent: parent.cloned(),
    });

    if let Some(child_indexes) = children.get(&question.id) {
        for (position, &child) in child_indexes.iter().enumerate() {
            let child_no = format!("{display_no}.{}", position + 1);
            emit(
                questions,
                child,
                Some(question),
                child_no,
                children,
                organized,
                visited,
                warnings,
            );
        }
    }
}

/// Re-encodes the stored template through the codec so downstream consumers
/// only ever see the modern shapes. Malformed blobs are left untouched and
/// reported instead of being overwritten with defaults.
fn normalized(question: &Question, warnings: &mut Vec<IntegrityWarning>) -> Question {
    let mut question = question.clone();
    if question.question_content.trim().is_empty() {
        return question;
    }

    let decoded = content::decode(
        question.question_type,
        &question.question_content,
        DropDownRole::Template,
    );
    match decoded.error {
        Some(error) => {
            warn!(
                question = question.id.0,
                %error,
                "stored template content is malformed"
            );
            warnings.push(IntegrityWarning::MalformedContent {
                question: question.id,
                detail: error.to_string(),
            });
        }
        None => {
            if let Ok(encoded) = content::encode(&decoded.payload) {
                question.question_content = encoded;
            }
        }
    }

    question
}

/// Bucket order follows first appearance in the raw input; bucket membership
/// follows organized (tree) order.
fn bucket_by_category(input: &[Question], organized: &[OrganizedQuestion]) -> Vec<CategoryBucket> {
    let mut order: Vec<Option<CategoryId>> = Vec::new();
    let mut buckets: HashMap<Option<CategoryId>, CategoryBucket> = HashMap::new();

    for question in input {
        let key = question.category.as_ref().map(|category| category.id);
        if !buckets.contains_key(&key) {
            order.push(key);
            buckets.insert(
                key,
                CategoryBucket {
                    category: question.category.clone(),
                    question_ids: Vec::new(),
                },
            );
        }
    }

    for entry in organized {
        let key = entry.question.category.as_ref().map(|category| category.id);
        if let Some(bucket) = buckets.get_mut(&key) {
            bucket.question_ids.push(entry.question.id);
        }
    }

    order
        .into_iter()
        .filter_map(|key| buckets.remove(&key))
        .collect()
}
