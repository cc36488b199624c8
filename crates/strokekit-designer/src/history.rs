//! Undo/redo history for glyph edits

use crate::font::Glyph;

/// Represents a single glyph change for undo/redo
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphEdit {
    /// Character whose glyph changed
    pub character: char,
    /// Glyph before the change (`None` if it did not exist)
    pub before: Option<Glyph>,
    /// Glyph after the change (`None` if it was removed)
    pub after: Option<Glyph>,
}

impl GlyphEdit {
    /// Create a new glyph edit
    pub fn new(character: char, before: Option<Glyph>, after: Option<Glyph>) -> Self {
        Self {
            character,
            before,
            after,
        }
    }

    /// Create inverse edit for undo
    pub fn inverse(&self) -> Self {
        Self {
            character: self.character,
            before: self.after.clone(),
            after: self.before.clone(),
        }
    }
}

/// Manages undo/redo stacks of glyph snapshots
#[derive(Debug, Clone)]
pub struct EditHistory {
    undo_stack: Vec<GlyphEdit>,
    redo_stack: Vec<GlyphEdit>,
    max_depth: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl EditHistory {
    /// Create a new history with default depth (100)
    pub fn new() -> Self {
        Self::with_depth(100)
    }

    /// Create with custom maximum undo depth
    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Record an edit. Clears the redo stack.
    pub fn record(&mut self, edit: GlyphEdit) {
        if edit.before == edit.after {
            return;
        }
        self.redo_stack.clear();
        self.undo_stack.push(edit);
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }
    }

    /// Undo last edit, returning the change to apply
    pub fn undo(&mut self) -> Option<GlyphEdit> {
        self.undo_stack.pop().map(|edit| {
            let inverse = edit.inverse();
            self.redo_stack.push(edit);
            inverse
        })
    }

    /// Redo last undone edit
    pub fn redo(&mut self) -> Option<GlyphEdit> {
        self.redo_stack.pop().inspect(|edit| {
            self.undo_stack.push(edit.clone());
        })
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}
