// Pure page list logic - no Tauri imports allowed.
// Everything the tab strip can do to the page list lives here so it can be
// unit tested without a webview.

/// Rename input is capped at this many characters at the IPC boundary,
/// matching the inline edit field in the frontend.
pub const MAX_LABEL_LEN: usize = 100;

const INITIAL_PAGES: [&str; 4] = ["Info", "Details", "Other", "Ending"];

/// Ordered page labels plus the two cursors the UI paints from: which page
/// is selected, and which one (if any) is in inline rename mode.
///
/// Indices passed to the mutating methods must come from the current list;
/// an out-of-range index is a caller bug and panics like any slice access.
/// The IPC layer validates indices before they get here.
#[derive(Debug, Clone, PartialEq)]
pub struct PageStrip {
    pages: Vec<String>,
    active_idx: usize,
    renaming_idx: Option<usize>,
}

impl Default for PageStrip {
    fn default() -> Self {
        Self::new(INITIAL_PAGES.iter().map(|s| s.to_string()).collect())
    }
}

impl PageStrip {
    pub fn new(pages: Vec<String>) -> Self {
        Self {
            pages,
            active_idx: 0,
            renaming_idx: None,
        }
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn active_idx(&self) -> usize {
        self.active_idx
    }

    pub fn renaming_idx(&self) -> Option<usize> {
        self.renaming_idx
    }

    /// Label used by both add flows: "Page N" where N counts the new page.
    pub fn default_label(&self) -> String {
        format!("Page {}", self.pages.len() + 1)
    }

    /// Insert at `idx` (0..=len). Never shifts the active or renaming
    /// cursor: new pages are not auto-selected except via the explicit
    /// duplicate flow.
    pub fn insert_at(&mut self, idx: usize, label: String) {
        self.pages.insert(idx, label);
    }

    pub fn append(&mut self, label: String) {
        self.pages.push(label);
    }

    pub fn select(&mut self, idx: usize) {
        self.active_idx = idx;
    }

    /// Put page `idx` into inline rename mode. The selection is untouched:
    /// renaming from the settings menu does not switch pages.
    pub fn begin_rename(&mut self, idx: usize) {
        self.renaming_idx = Some(idx);
    }

    pub fn cancel_rename(&mut self) {
        self.renaming_idx = None;
    }

    /// Commit an inline rename. A blank trimmed name keeps the old label.
    /// Rename mode ends either way.
    pub fn rename(&mut self, idx: usize, new_label: &str) {
        let trimmed = new_label.trim();
        if !trimmed.is_empty() {
            self.pages[idx] = trimmed.to_string();
        }
        self.renaming_idx = None;
    }

    /// Remove page `idx`, keeping both cursors consistent:
    /// - renaming: cleared if it was the deleted page, shifted left if it
    ///   was after it
    /// - active: previous page if the active one was deleted (floor 0),
    ///   shifted left if it was after it
    ///
    /// Deleting the last remaining page is allowed and leaves the strip
    /// empty; the UI tolerates zero tabs.
    pub fn delete_at(&mut self, idx: usize) {
        self.pages.remove(idx);
        self.renaming_idx = match self.renaming_idx {
            Some(r) if r == idx => None,
            Some(r) if r > idx => Some(r - 1),
            other => other,
        };
        if self.active_idx == idx {
            self.active_idx = idx.saturating_sub(1);
        } else if self.active_idx > idx {
            self.active_idx -= 1;
        }
    }

    /// Insert a copy of page `idx` right after it and return the copy's
    /// index. Selection and rename mode are NOT touched here: the caller
    /// issues `enter_rename_mode` on its next paint so the new tab exists
    /// on screen before focus moves into its rename input.
    pub fn duplicate_at(&mut self, idx: usize) -> usize {
        let label = duplicate_label(&self.pages, &self.pages[idx]);
        self.pages.insert(idx + 1, label);
        idx + 1
    }

    /// Phase two of duplication: select the page and open its rename input.
    pub fn enter_rename_mode(&mut self, idx: usize) {
        self.active_idx = idx;
        self.renaming_idx = Some(idx);
    }

    /// Move page `idx` to the front. No-op when it is already first.
    /// Active bookkeeping: the moved page stays selected if it was; a
    /// selection before the moved page is pushed right by the front
    /// insertion; a selection after it nets out unchanged (removal and
    /// reinsertion cancel).
    pub fn move_to_front(&mut self, idx: usize) {
        if idx == 0 {
            return;
        }
        let page = self.pages.remove(idx);
        self.pages.insert(0, page);
        if self.active_idx == idx {
            self.active_idx = 0;
        } else if self.active_idx < idx {
            self.active_idx += 1;
        }
    }

    /// Move the page at `from` to position `to`, both indices as of the
    /// list before removal. No-op when equal. Active bookkeeping, in this
    /// order: the moved page follows to `to`; a selection inside (from, to]
    /// shifts left; a selection inside [to, from) shifts right; anything
    /// else is unaffected.
    pub fn reorder(&mut self, from: usize, to: usize) {
        if from == to {
            return;
        }
        let page = self.pages.remove(from);
        self.pages.insert(to, page);
        if self.active_idx == from {
            self.active_idx = to;
        } else if from < self.active_idx && self.active_idx <= to {
            self.active_idx -= 1;
        } else if to <= self.active_idx && self.active_idx < from {
            self.active_idx += 1;
        }
    }
}

/// Derive a label for a duplicate of `base`: "B (Copy)" if unused, else
/// probe "B (Copy 2)", "B (Copy 3)", ... until a free name is found.
/// Deterministic and terminating since the existing label set is finite.
pub fn duplicate_label(pages: &[String], base: &str) -> String {
    let candidate = format!("{} (Copy)", base);
    if !pages.iter().any(|p| *p == candidate) {
        return candidate;
    }
    let mut i = 2;
    while pages.iter().any(|p| *p == format!("{} (Copy {})", base, i)) {
        i += 1;
    }
    format!("{} (Copy {})", base, i)
}
