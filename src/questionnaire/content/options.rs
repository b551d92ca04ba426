use serde::{Deserialize, Serialize};

/// One selectable row of a checkbox question. Template payloads carry the
/// option identities with `is_checked` false; answers layer the user's
/// selection on top, matched by `text`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckboxOption {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub is_checked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// One selectable row of a radio question. At most one option is checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadioOption {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub is_checked: bool,
}

/// One entry of a dropdown's option list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropDownOption {
    #[serde(default)]
    pub text: String,
}

/// Dropdown payloads have two roles on the wire: a bare option list when the
/// question is authored, and an object carrying the selected text when a user
/// answers. The role is always chosen by the caller, never sniffed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DropDownContent {
    Options(Vec<DropDownOption>),
    Selection {
        options: Vec<DropDownOption>,
        answer: String,
    },
}

impl DropDownContent {
    pub fn options(&self) -> &[DropDownOption] {
        match self {
            DropDownContent::Options(options) => options,
            DropDownContent::Selection { options, .. } => options,
        }
    }

    pub fn answer(&self) -> Option<&str> {
        match self {
            DropDownContent::Options(_) => None,
            DropDownContent::Selection { answer, .. } => Some(answer.as_str()),
        }
    }
}

/// Numeric comparison payload, e.g. `12 >= 10`. Range and operator validity
/// are the form layer's concern; the codec only carries the values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    #[serde(default)]
    pub compare_left: f64,
    #[serde(default)]
    pub comparison_type: String,
    #[serde(default)]
    pub compare_right: f64,
}

/// Marks the checked option by text, clearing every other row. Last write
/// wins within a single record.
pub fn select_radio(options: &mut [RadioOption], text: &str) {
    for option in options.iter_mut() {
        option.is_checked = option.text == text;
    }
}
