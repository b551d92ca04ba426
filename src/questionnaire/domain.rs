use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for questions inside a bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub i64);

/// Identifier wrapper for answering users (assignees).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

/// Identifier wrapper for the company/subsidiary an answer was filed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(pub i64);

/// Identifier wrapper for administrator-defined categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub i64);

/// Closed set of question types a bank can contain. The wire names match the
/// stored records, so an unknown type is a deserialization failure rather than
/// a runtime branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionType {
    TextBox,
    Checkbox,
    Radio,
    DropDown,
    Compare,
    Table,
}

impl QuestionType {
    pub const fn label(self) -> &'static str {
        match self {
            QuestionType::TextBox => "textBox",
            QuestionType::Checkbox => "checkbox",
            QuestionType::Radio => "radio",
            QuestionType::DropDown => "dropDown",
            QuestionType::Compare => "compare",
            QuestionType::Table => "table",
        }
    }
}

/// ESG reporting theme, assignable per question or in bulk per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Environmental,
    Social,
    Governance,
}

impl Theme {
    pub const fn label(self) -> &'static str {
        match self {
            Theme::Environmental => "Environmental",
            Theme::Social => "Social",
            Theme::Governance => "Governance",
        }
    }
}

/// Administrator-defined grouping used for bulk theme assignment and
/// category-level progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// One row of a question bank as fetched upstream. `question_content` holds
/// the *template* payload (the option set), never a user's answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    pub title: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub has_attachment: bool,
    #[serde(default)]
    pub has_remarks: bool,
    /// Title-only row; no answer is expected and none is counted.
    #[serde(default)]
    pub is_not_question: bool,
    #[serde(default)]
    pub parent_id: Option<QuestionId>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub theme: Option<Theme>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub question_content: String,
}

/// One user's submission for one question in one reporting cycle. The fetch
/// layer deduplicates identical timestamps before records reach the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub user_id: UserId,
    pub company_id: CompanyId,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub files: Vec<String>,
    pub timestamp: DateTime<Utc>,
}
