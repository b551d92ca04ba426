use super::common::{CHECKBOX_TEMPLATE, LEGACY_TABLE};
use crate::questionnaire::content::{
    decode, encode, select_radio, CheckboxOption, Comparison, ContentPayload, DropDownContent,
    DropDownOption, DropDownRole, RadioOption, TableCell, TableColumn, TableContent,
};
use crate::questionnaire::domain::QuestionType;

fn sample_table() -> TableContent {
    TableContent {
        id: 42,
        name: "Emissions by site".to_string(),
        columns: vec![
            TableColumn {
                id: 1,
                header: "Site".to_string(),
                width: 200,
                column_type: "textBox".to_string(),
                is_header: true,
                is_required: true,
            },
            TableColumn {
                id: 2,
                header: "tCO2e".to_string(),
                width: 120,
                column_type: "textBox".to_string(),
                is_header: false,
                is_required: false,
            },
        ],
        cells: vec![
            TableCell {
                id: 1,
                row_index: 0,
                col_index: 0,
                row_span: 1,
                col_span: 1,
                content: "Plant A".to_string(),
                is_header: false,
                is_question: true,
            },
            TableCell {
                id: 2,
                row_index: 0,
                col_index: 1,
                row_span: 1,
                col_span: 1,
                content: "1200".to_string(),
                is_header: false,
                is_question: false,
            },
        ],
        rows: 1,
        cols: 2,
    }
}

#[test]
fn text_box_round_trips() {
    let payload = ContentPayload::TextBox("Net zero by 2040".to_string());
    let encoded = encode(&payload).expect("encodes");
    let decoded = decode(QuestionType::TextBox, &encoded, DropDownRole::Template);

    assert!(decoded.is_clean());
    assert_eq!(decoded.payload, payload);
}

#[test]
fn checkbox_round_trips_including_remarks() {
    let payload = ContentPayload::Checkbox(vec![
        CheckboxOption {
            text: "Scope 1".to_string(),
            is_checked: true,
            remarks: Some("direct emissions".to_string()),
        },
        CheckboxOption {
            text: "Scope 2".to_string(),
            is_checked: false,
            remarks: None,
        },
    ]);
    let encoded = encode(&payload).expect("encodes");
    let decoded = decode(QuestionType::Checkbox, &encoded, DropDownRole::Template);

    assert!(decoded.is_clean());
    assert_eq!(decoded.payload, payload);
}

#[test]
fn radio_round_trips() {
    let payload = ContentPayload::Radio(vec![
        RadioOption {
            text: "Yes".to_string(),
            is_checked: false,
        },
        RadioOption {
            text: "No".to_string(),
            is_checked: true,
        },
    ]);
    let encoded = encode(&payload).expect("encodes");
    let decoded = decode(QuestionType::Radio, &encoded, DropDownRole::Template);

    assert!(decoded.is_clean());
    assert_eq!(decoded.payload, payload);
}

#[test]
fn drop_down_round_trips_in_both_roles() {
    let template = ContentPayload::DropDown(DropDownContent::Options(vec![
        DropDownOption {
            text: "Annually".to_string(),
        },
        DropDownOption {
            text: "Quarterly".to_string(),
        },
    ]));
    let encoded = encode(&template).expect("template encodes");
    let decoded = decode(QuestionType::DropDown, &encoded, DropDownRole::Template);
    assert!(decoded.is_clean());
    assert_eq!(decoded.payload, template);

    let selection = ContentPayload::DropDown(DropDownContent::Selection {
        options: vec![DropDownOption {
            text: "Annually".to_string(),
        }],
        answer: "Annually".to_string(),
    });
    let encoded = encode(&selection).expect("selection encodes");
    let decoded = decode(QuestionType::DropDown, &encoded, DropDownRole::Answer);
    assert!(decoded.is_clean());
    assert_eq!(decoded.payload, selection);
}

#[test]
fn compare_round_trips() {
    let payload = ContentPayload::Compare(Comparison {
        compare_left: 12.5,
        comparison_type: ">=".to_string(),
        compare_right: 10.0,
    });
    let encoded = encode(&payload).expect("encodes");
    let decoded = decode(QuestionType::Compare, &encoded, DropDownRole::Template);

    assert!(decoded.is_clean());
    assert_eq!(decoded.payload, payload);
}

#[test]
fn modern_table_round_trip_is_idempotent() {
    let payload = ContentPayload::Table(sample_table());
    let encoded = encode(&payload).expect("encodes");

    let once = decode(QuestionType::Table, &encoded, DropDownRole::Template);
    assert!(once.is_clean());
    assert_eq!(once.payload, payload);

    let re_encoded = encode(&once.payload).expect("re-encodes");
    assert_eq!(re_encoded, encoded);
}

#[test]
fn legacy_table_is_migrated_to_the_modern_shape() {
    let decoded = decode(QuestionType::Table, LEGACY_TABLE, DropDownRole::Template);
    assert!(decoded.is_clean());

    let ContentPayload::Table(table) = decoded.payload else {
        panic!("table payload expected");
    };

    assert_eq!(table.columns.len(), 2);
    assert_eq!(table.columns[0].header, "A");
    assert_eq!(table.columns[1].header, "B");
    assert_eq!(table.rows, 2);
    assert_eq!(table.cols, 2);
    assert_eq!(table.cells.len(), 4);

    let expected = [
        (0, 0, "1", true),
        (0, 1, "2", true),
        (1, 0, "3", false),
        (1, 1, "4", false),
    ];
    for (row, col, content, is_header) in expected {
        let cell = table
            .cells
            .iter()
            .find(|cell| cell.row_index == row && cell.col_index == col)
            .expect("cell present");
        assert_eq!(cell.content, content);
        assert_eq!(cell.is_header, is_header);
        assert_eq!(cell.row_span, 1);
        assert_eq!(cell.col_span, 1);
    }
}

#[test]
fn legacy_table_blank_headers_get_fallback_names() {
    let raw = r#"{"headers":["", "  "],"rows":[{"cols":["x","y"]}]}"#;
    let decoded = decode(QuestionType::Table, raw, DropDownRole::Template);

    let ContentPayload::Table(table) = decoded.payload else {
        panic!("table payload expected");
    };
    assert_eq!(table.columns[0].header, "Column 1");
    assert_eq!(table.columns[1].header, "Column 2");
}

#[test]
fn legacy_table_ragged_rows_fill_with_empty_cells() {
    let raw = r#"{"headers":["A","B","C"],"rows":[{"cols":["only"]}]}"#;
    let decoded = decode(QuestionType::Table, raw, DropDownRole::Template);

    let ContentPayload::Table(table) = decoded.payload else {
        panic!("table payload expected");
    };
    assert_eq!(table.cols, 3);
    assert_eq!(table.cells.len(), 3);
    assert_eq!(table.cells[0].content, "only");
    assert_eq!(table.cells[1].content, "");
    assert_eq!(table.cells[2].content, "");
}

#[test]
fn invalid_json_yields_default_and_recoverable_error() {
    let decoded = decode(QuestionType::TextBox, "not json", DropDownRole::Template);
    assert!(decoded.error.is_some());
    assert_eq!(decoded.payload, ContentPayload::TextBox(String::new()));

    let decoded = decode(QuestionType::Checkbox, "", DropDownRole::Template);
    assert!(decoded.error.is_some());
    assert_eq!(
        decoded.payload,
        ContentPayload::Checkbox(vec![CheckboxOption::default()])
    );
}

#[test]
fn shape_mismatch_normalizes_silently() {
    // Valid JSON of the wrong shape is not an error, only a normalization.
    let decoded = decode(QuestionType::Checkbox, r#"{"foo":1}"#, DropDownRole::Template);
    assert!(decoded.is_clean());
    assert_eq!(
        decoded.payload,
        ContentPayload::Checkbox(vec![CheckboxOption::default()])
    );
}

#[test]
fn empty_option_lists_get_a_blank_placeholder() {
    let decoded = decode(QuestionType::Radio, "[]", DropDownRole::Template);
    assert!(decoded.is_clean());
    assert_eq!(
        decoded.payload,
        ContentPayload::Radio(vec![RadioOption::default()])
    );
}

#[test]
fn drop_down_role_is_chosen_by_the_caller() {
    let raw = r#"[{"text":"Annually"}]"#;

    let as_template = decode(QuestionType::DropDown, raw, DropDownRole::Template);
    assert!(matches!(
        as_template.payload,
        ContentPayload::DropDown(DropDownContent::Options(_))
    ));

    // The same bytes in answer position are an answer with no selection yet.
    let as_answer = decode(QuestionType::DropDown, raw, DropDownRole::Answer);
    let ContentPayload::DropDown(content) = as_answer.payload else {
        panic!("drop-down payload expected");
    };
    assert_eq!(content.answer(), Some(""));
    assert_eq!(content.options().len(), 1);
}

#[test]
fn checkbox_template_fixture_parses() {
    let decoded = decode(QuestionType::Checkbox, CHECKBOX_TEMPLATE, DropDownRole::Template);
    assert!(decoded.is_clean());
    let ContentPayload::Checkbox(options) = decoded.payload else {
        panic!("checkbox payload expected");
    };
    assert_eq!(options.len(), 2);
    assert!(options.iter().all(|option| !option.is_checked));
}

#[test]
fn select_radio_clears_every_other_option() {
    let mut options = vec![
        RadioOption {
            text: "Yes".to_string(),
            is_checked: true,
        },
        RadioOption {
            text: "No".to_string(),
            is_checked: false,
        },
    ];

    select_radio(&mut options, "No");

    assert!(!options[0].is_checked);
    assert!(options[1].is_checked);
}
