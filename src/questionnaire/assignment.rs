//! Bulk theme/category application over a category bucket.
//!
//! The output is a batch of full-record update instructions: the persistence
//! layer replaces the whole question row, so every field must be carried even
//! though only one of them changed.

use serde::{Deserialize, Serialize};

use super::content::{self, DropDownRole};
use super::domain::{Category, CategoryId, Question, QuestionId, QuestionType, Theme};

/// Self-contained replacement record for one question. Field-for-field the
/// same shape as `Question`, with `question_content` re-serialized through
/// the codec so the persistence layer never re-derives content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInstruction {
    pub id: QuestionId,
    pub title: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub is_required: bool,
    pub has_attachment: bool,
    pub has_remarks: bool,
    pub is_not_question: bool,
    pub parent_id: Option<QuestionId>,
    pub category: Option<Category>,
    pub theme: Option<Theme>,
    pub scope: Option<String>,
    pub question_content: String,
}

/// Applies `theme` to every question in the `category_id` bucket. `None`
/// targets the uncategorized bucket. Zero matches yields an empty batch.
pub fn assign_theme(
    category_id: Option<CategoryId>,
    theme: Theme,
    questions: &[Question],
) -> Vec<UpdateInstruction> {
    in_bucket(category_id, questions)
        .map(|question| instruction_for(question, Some(theme), question.category.clone()))
        .collect()
}

/// Moves every question in the `category_id` bucket into `category`. The
/// questions' themes are left untouched.
pub fn assign_category(
    category_id: Option<CategoryId>,
    category: Category,
    questions: &[Question],
) -> Vec<UpdateInstruction> {
    in_bucket(category_id, questions)
        .map(|question| instruction_for(question, question.theme, Some(category.clone())))
        .collect()
}

fn in_bucket(
    category_id: Option<CategoryId>,
    questions: &[Question],
) -> impl Iterator<Item = &Question> {
    questions.iter().filter(move |question| {
        question.category.as_ref().map(|category| category.id) == category_id
    })
}

fn instruction_for(
    question: &Question,
    theme: Option<Theme>,
    category: Option<Category>,
) -> UpdateInstruction {
    UpdateInstruction {
        id: question.id,
        title: question.title.clone(),
        question_type: question.question_type,
        is_required: question.is_required,
        has_attachment: question.has_attachment,
        has_remarks: question.has_remarks,
        is_not_question: question.is_not_question,
        parent_id: question.parent_id,
        category,
        theme,
        scope: question.scope.clone(),
        question_content: reserialized_content(question),
    }
}

/// Round-trips the stored template through the codec. Legacy table payloads
/// come out in the modern shape; malformed blobs are passed through unchanged
/// rather than overwritten with an empty default.
fn reserialized_content(question: &Question) -> String {
    if question.question_content.trim().is_empty() {
        return question.question_content.clone();
    }

    let decoded = content::decode(
        question.question_type,
        &question.question_content,
        DropDownRole::Template,
    );
    if !decoded.is_clean() {
        return question.question_content.clone();
    }

    content::encode(&decoded.payload).unwrap_or_else(|_| question.question_content.clone())
}
