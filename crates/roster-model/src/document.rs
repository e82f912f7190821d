use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parsed tabular upload: the ordered header line plus one [`Row`] per
/// non-blank data line.
///
/// Headers keep file order and may contain duplicates; duplicates are
/// tolerated here but unsupported by mapping (within a row the later
/// column's value wins for that header name).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabularDocument {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl TabularDocument {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One data line keyed by header name.
///
/// Built positionally against the header list: every header gets an entry,
/// short lines pad with the empty string, extra cells are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    values: BTreeMap<String, String>,
}

impl Row {
    /// Zip one parsed line against the header list.
    pub fn from_cells(headers: &[String], cells: &[String]) -> Self {
        let mut values = BTreeMap::new();
        for (index, header) in headers.iter().enumerate() {
            let cell = cells.get(index).cloned().unwrap_or_default();
            values.insert(header.clone(), cell);
        }
        Row { values }
    }

    /// Value under `header`, or `""` when the header is unknown.
    ///
    /// Total on purpose: downstream stages never branch on missing keys.
    pub fn value(&self, header: &str) -> &str {
        self.values.get(header).map(String::as_str).unwrap_or("")
    }

    pub fn get(&self, header: &str) -> Option<&str> {
        self.values.get(header).map(String::as_str)
    }
}
