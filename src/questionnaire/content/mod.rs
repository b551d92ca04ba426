//! Codec between typed question/answer payloads and the polymorphic JSON
//! blobs stored in `questionContent` / `AnswerRecord.content`.
//!
//! Decoding is defensive end to end: historical blobs are sometimes truncated
//! or half-written, and a reader must never be blocked by them. Invalid JSON
//! is the only condition reported back to the caller; every shape mismatch is
//! normalized to a type-appropriate default.

mod options;
mod table;

pub use options::{
    select_radio, CheckboxOption, Comparison, DropDownContent, DropDownOption, RadioOption,
};
pub use table::{TableCell, TableColumn, TableContent};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::domain::QuestionType;

/// Decoded payload variant for each question type. Serialization is untagged:
/// writing a payload reproduces the exact stored wire shape, so `encode` and
/// the serde derive are the same code path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContentPayload {
    TextBox(String),
    Checkbox(Vec<CheckboxOption>),
    Radio(Vec<RadioOption>),
    DropDown(DropDownContent),
    Compare(Comparison),
    Table(TableContent),
}

impl ContentPayload {
    pub const fn kind(&self) -> QuestionType {
        match self {
            ContentPayload::TextBox(_) => QuestionType::TextBox,
            ContentPayload::Checkbox(_) => QuestionType::Checkbox,
            ContentPayload::Radio(_) => QuestionType::Radio,
            ContentPayload::DropDown(_) => QuestionType::DropDown,
            ContentPayload::Compare(_) => QuestionType::Compare,
            ContentPayload::Table(_) => QuestionType::Table,
        }
    }
}

/// Which of the two dropdown wire shapes the caller expects. This is never
/// auto-detected: an empty selection is indistinguishable from a template, so
/// sniffing would be ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropDownRole {
    Template,
    Answer,
}

/// Recoverable decode failure. The payload alongside it is already a usable
/// default; callers may log the error but must not abort on it.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("stored {kind} content is not valid JSON")]
    InvalidJson {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Serialization failure while writing a payload back to its stored form.
#[derive(Debug, thiserror::Error)]
#[error("failed to serialize {kind} content")]
pub struct EncodeError {
    pub kind: &'static str,
    #[source]
    source: serde_json::Error,
}

/// Result of a defensive decode: always a structurally valid payload, plus
/// the recoverable error when the stored blob was not valid JSON.
#[derive(Debug)]
pub struct DecodedContent {
    pub payload: ContentPayload,
    pub error: Option<DecodeError>,
}

impl DecodedContent {
    pub fn is_clean(&self) -> bool {
        self.error.is_none()
    }
}

/// Serializes a payload into its stored JSON form.
pub fn encode(payload: &ContentPayload) -> Result<String, EncodeError> {
    serde_json::to_string(payload).map_err(|source| EncodeError {
        kind: payload.kind().label(),
        source,
    })
}

/// Decodes a stored blob for the given question type. Never fails hard:
/// malformed or empty input yields the type's empty default together with a
/// `DecodeError`, and shape mismatches are silently normalized.
pub fn decode(kind: QuestionType, raw: &str, role: DropDownRole) -> DecodedContent {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(source) => {
            return DecodedContent {
                payload: empty_payload(kind, role),
                error: Some(DecodeError::InvalidJson {
                    kind: kind.label(),
                    source,
                }),
            }
        }
    };

    let payload = match kind {
        QuestionType::TextBox => {
            ContentPayload::TextBox(value.as_str().map(str::to_owned).unwrap_or_default())
        }
        QuestionType::Checkbox => {
            ContentPayload::Checkbox(with_placeholder(lenient::<Vec<CheckboxOption>>(value)))
        }
        QuestionType::Radio => {
            ContentPayload::Radio(with_placeholder(lenient::<Vec<RadioOption>>(value)))
        }
        QuestionType::DropDown => ContentPayload::DropDown(decode_drop_down(value, role)),
        QuestionType::Compare => ContentPayload::Compare(lenient::<Comparison>(value)),
        QuestionType::Table => ContentPayload::Table(table::normalize_table(value)),
    };

    DecodedContent {
        payload,
        error: None,
    }
}

/// Type-appropriate default used when no usable content exists.
pub fn empty_payload(kind: QuestionType, role: DropDownRole) -> ContentPayload {
    match kind {
        QuestionType::TextBox => ContentPayload::TextBox(String::new()),
        QuestionType::Checkbox => ContentPayload::Checkbox(vec![CheckboxOption::default()]),
        QuestionType::Radio => ContentPayload::Radio(vec![RadioOption::default()]),
        QuestionType::DropDown => ContentPayload::DropDown(match role {
            DropDownRole::Template => DropDownContent::Options(Vec::new()),
            DropDownRole::Answer => DropDownContent::Selection {
                options: Vec::new(),
                answer: String::new(),
            },
        }),
        QuestionType::Compare => ContentPayload::Compare(Comparison::default()),
        QuestionType::Table => ContentPayload::Table(TableContent::default()),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSelection {
    #[serde(default)]
    options: Vec<DropDownOption>,
    #[serde(default)]
    answer: String,
}

fn decode_drop_down(value: Value, role: DropDownRole) -> DropDownContent {
    match role {
        DropDownRole::Template => DropDownContent::Options(lenient(value)),
        DropDownRole::Answer => {
            // A bare option list in answer position is an answer that was
            // never selected; keep the options and an empty selection.
            if value.is_array() {
                DropDownContent::Selection {
                    options: lenient(value),
                    answer: String::new(),
                }
            } else {
                let stored: StoredSelection = lenient(value);
                DropDownContent::Selection {
                    options: stored.options,
                    answer: stored.answer,
                }
            }
        }
    }
}

fn lenient<T>(value: Value) -> T
where
    T: DeserializeOwned + Default,
{
    serde_json::from_value(value).unwrap_or_default()
}

/// Rendering always needs at least one row to display, so an empty option
/// list becomes a single blank placeholder.
fn with_placeholder<T: Default>(mut options: Vec<T>) -> Vec<T> {
    if options.is_empty() {
        options.push(T::default());
    }
    options
}
