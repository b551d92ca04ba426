use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Modern table payload. All top-level fields are required on purpose: their
/// presence is what distinguishes a modern blob from a legacy one during
/// migration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableContent {
    pub id: i64,
    pub name: String,
    pub columns: Vec<TableColumn>,
    pub cells: Vec<TableCell>,
    pub rows: u32,
    pub cols: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub header: String,
    #[serde(default)]
    pub width: i64,
    #[serde(rename = "type", default)]
    pub column_type: String,
    #[serde(default)]
    pub is_header: bool,
    #[serde(default)]
    pub is_required: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub row_index: u32,
    #[serde(default)]
    pub col_index: u32,
    #[serde(default)]
    pub row_span: u32,
    #[serde(default)]
    pub col_span: u32,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_header: bool,
    #[serde(default)]
    pub is_question: bool,
}

/// Pre-migration table blob: a header list plus rows of plain strings.
#[derive(Debug, Deserialize)]
struct LegacyTable {
    #[serde(default)]
    headers: Vec<String>,
    #[serde(default)]
    rows: Vec<LegacyRow>,
}

#[derive(Debug, Deserialize)]
struct LegacyRow {
    #[serde(default)]
    cols: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredTable {
    Modern(TableContent),
    Legacy(LegacyTable),
}

const MIGRATED_COLUMN_TYPE: &str = "textBox";

/// Normalizes an already-parsed table value. Modern payloads pass through
/// unchanged; legacy payloads are synthesized into the modern structure; any
/// other shape collapses to an empty table.
pub(super) fn normalize_table(value: Value) -> TableContent {
    match serde_json::from_value::<StoredTable>(value) {
        Ok(StoredTable::Modern(table)) => table,
        Ok(StoredTable::Legacy(legacy)) => migrate(legacy),
        Err(_) => TableContent::default(),
    }
}

fn migrate(legacy: LegacyTable) -> TableContent {
    let widest_row = legacy
        .rows
        .iter()
        .map(|row| row.cols.len())
        .max()
        .unwrap_or(0);
    let cols = legacy.headers.len().max(widest_row);
    let rows = legacy.rows.len();

    let columns = (0..cols)
        .map(|index| {
            let header = legacy
                .headers
                .get(index)
                .map(|header| header.trim())
                .filter(|header| !header.is_empty())
                .map(str::to_owned)
                .unwrap_or_else(|| format!("Column {}", index + 1));

            TableColumn {
                id: index as i64 + 1,
                header,
                width: 0,
                column_type: MIGRATED_COLUMN_TYPE.to_string(),
                is_header: false,
                is_required: false,
            }
        })
        .collect();

    // Full rows x cols grid; the first row is the header row by convention.
    let mut cells = Vec::with_capacity(rows * cols);
    for (row_index, row) in legacy.rows.iter().enumerate() {
        for col_index in 0..cols {
            let content = row.cols.get(col_index).cloned().unwrap_or_default();
            cells.push(TableCell {
                id: (row_index * cols + col_index) as i64 + 1,
                row_index: row_index as u32,
                col_index: col_index as u32,
                row_span: 1,
                col_span: 1,
                content,
                is_header: row_index == 0,
                is_question: false,
            });
        }
    }

    TableContent {
        id: 0,
        name: String::new(),
        columns,
        cells,
        rows: rows as u32,
        cols: cols as u32,
    }
}
