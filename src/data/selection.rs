use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Row selection with extended (Ctrl / Shift) click semantics
// ---------------------------------------------------------------------------

/// How a click on a table row modifies the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    /// Plain click: the row becomes the only selected row.
    Replace,
    /// Ctrl/Cmd-click: toggle the row, keep the rest.
    Toggle,
    /// Shift-click: select the contiguous range from the anchor to the row.
    Extend,
}

/// A deduplicated, sorted set of row indices into the owning dataset.
///
/// The row count is fixed at construction; indices at or beyond it are
/// ignored, so the set never refers to rows that do not exist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    rows: BTreeSet<usize>,
    anchor: Option<usize>,
    row_count: usize,
}

impl Selection {
    pub fn new(row_count: usize) -> Self {
        Self {
            rows: BTreeSet::new(),
            anchor: None,
            row_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn contains(&self, row: usize) -> bool {
        self.rows.contains(&row)
    }

    /// Selected indices in ascending order.
    pub fn indices(&self) -> Vec<usize> {
        self.rows.iter().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().copied()
    }

    /// Apply a click on `row`. Returns whether the selection changed.
    pub fn click(&mut self, row: usize, kind: ClickKind) -> bool {
        if row >= self.row_count {
            return false;
        }
        let before = self.rows.clone();

        match kind {
            ClickKind::Replace => {
                self.rows.clear();
                self.rows.insert(row);
                self.anchor = Some(row);
            }
            ClickKind::Toggle => {
                if !self.rows.remove(&row) {
                    self.rows.insert(row);
                }
                self.anchor = Some(row);
            }
            ClickKind::Extend => {
                // The anchor stays put so repeated shift-clicks pivot around it.
                let anchor = *self.anchor.get_or_insert(row);
                let (lo, hi) = if anchor <= row { (anchor, row) } else { (row, anchor) };
                self.rows.clear();
                self.rows.extend(lo..=hi);
            }
        }

        self.rows != before
    }

    /// Replace the selection with an explicit set of rows (out-of-range dropped).
    pub fn set(&mut self, rows: impl IntoIterator<Item = usize>) {
        let row_count = self.row_count;
        self.rows = rows.into_iter().filter(|&r| r < row_count).collect();
        self.anchor = self.rows.iter().next().copied();
    }

    pub fn select_all(&mut self) {
        self.set(0..self.row_count);
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.anchor = None;
    }
}
