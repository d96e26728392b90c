use crate::models::{DisplayOptions, RosterEntry};
use crate::selection::SelectionStore;

use super::columns::pack_columns;
use super::entry::prepare_entries;
use super::grouper::group_entries;

/// One checkbox row as drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub raw_name: String,
    pub display: String,
    pub checked: bool,
}

/// A bucket header followed by its rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBucket {
    pub label: String,
    pub rows: Vec<RenderedRow>,
}

/// The complete laid-out roster for one column count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterLayout {
    pub columns: Vec<Vec<RenderedBucket>>,
}

impl RosterLayout {
    /// Sort, bucket and pack `rows`, pre-checking names held by `selection`.
    pub fn compute(
        rows: &[RosterEntry],
        options: &DisplayOptions,
        column_count: usize,
        selection: &SelectionStore,
    ) -> Self {
        let entries = prepare_entries(rows, options.sort_mode);
        let buckets = group_entries(entries, options.group_by_mode);

        let rendered: Vec<RenderedBucket> = buckets
            .into_iter()
            .map(|bucket| RenderedBucket {
                label: bucket.label,
                rows: bucket
                    .entries
                    .into_iter()
                    .map(|e| RenderedRow {
                        checked: selection.contains(&e.raw_name),
                        raw_name: e.raw_name,
                        display: e.display,
                    })
                    .collect(),
            })
            .collect();

        Self {
            columns: pack_columns(rendered, column_count, |b| b.rows.len()),
        }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().flatten().all(|b| b.rows.is_empty())
    }

    pub fn total_rows(&self) -> usize {
        self.columns.iter().flatten().map(|b| b.rows.len()).sum()
    }

    /// Rows of one column in display order, headers skipped.
    pub fn column_rows(&self, col: usize) -> impl Iterator<Item = &RenderedRow> {
        self.columns
            .get(col)
            .into_iter()
            .flatten()
            .flat_map(|b| b.rows.iter())
    }

    pub fn column_len(&self, col: usize) -> usize {
        self.column_rows(col).count()
    }

    pub fn row(&self, col: usize, index: usize) -> Option<&RenderedRow> {
        self.column_rows(col).nth(index)
    }

    pub fn row_mut(&mut self, col: usize, index: usize) -> Option<&mut RenderedRow> {
        self.columns
            .get_mut(col)?
            .iter_mut()
            .flat_map(|b| b.rows.iter_mut())
            .nth(index)
    }

    /// Current check-state of every drawn row, for capture before a re-render.
    pub fn check_states(&self) -> impl Iterator<Item = (&str, bool)> {
        self.columns
            .iter()
            .flatten()
            .flat_map(|b| b.rows.iter())
            .map(|r| (r.raw_name.as_str(), r.checked))
    }

    /// Uncheck every drawn row.
    pub fn clear_checks(&mut self) {
        for row in self.columns.iter_mut().flatten().flat_map(|b| b.rows.iter_mut()) {
            row.checked = false;
        }
    }

    /// Plain-text rendering, one block per column.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&format!("== Column {} ==\n", i + 1));
            for bucket in column {
                out.push_str(&format!("{}\n", bucket.label));
                for row in &bucket.rows {
                    let mark = if row.checked { "x" } else { " " };
                    out.push_str(&format!("  [{}] {}\n", mark, row.display));
                }
            }
        }
        out
    }
}
