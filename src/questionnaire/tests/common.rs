use std::collections::HashSet;

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::questionnaire::domain::{
    AnswerRecord, Category, CategoryId, CompanyId, Question, QuestionId, QuestionType, UserId,
};

pub(super) const LEGACY_TABLE: &str =
    r#"{"headers":["A","B"],"rows":[{"cols":["1","2"]},{"cols":["3","4"]}]}"#;

pub(super) const CHECKBOX_TEMPLATE: &str =
    r#"[{"text":"Scope 1","isChecked":false},{"text":"Scope 2","isChecked":false}]"#;

pub(super) fn question(id: i64, title: &str, question_type: QuestionType) -> Question {
    Question {
        id: QuestionId(id),
        title: title.to_string(),
        question_type,
        is_required: false,
        has_attachment: false,
        has_remarks: false,
        is_not_question: false,
        parent_id: None,
        category: None,
        theme: None,
        scope: None,
        question_content: String::new(),
    }
}

pub(super) fn child_question(
    id: i64,
    title: &str,
    question_type: QuestionType,
    parent: i64,
) -> Question {
    let mut question = question(id, title, question_type);
    question.parent_id = Some(QuestionId(parent));
    question
}

pub(super) fn categorized(mut question: Question, category_id: i64, name: &str) -> Question {
    question.category = Some(Category {
        id: CategoryId(category_id),
        name: name.to_string(),
    });
    question
}

pub(super) fn timestamp(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, minute, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn answer(user: i64, content: &str, minute: u32) -> AnswerRecord {
    AnswerRecord {
        user_id: UserId(user),
        company_id: CompanyId(7),
        content: content.to_string(),
        remarks: None,
        files: Vec::new(),
        timestamp: timestamp(minute),
    }
}

pub(super) fn answer_with_remarks(
    user: i64,
    content: &str,
    remarks: &str,
    minute: u32,
) -> AnswerRecord {
    let mut record = answer(user, content, minute);
    record.remarks = Some(remarks.to_string());
    record
}

pub(super) fn users(ids: &[i64]) -> HashSet<UserId> {
    ids.iter().copied().map(UserId).collect()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
