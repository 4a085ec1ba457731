//! Hovered cell, owned by the view layer and passed into each layout pass

/// Index of the bucket under the pointer, if any
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverState {
    index: Option<usize>,
}

impl HoverState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Pointer entered the cell at `index`
    pub fn enter(&mut self, index: usize) {
        self.index = Some(index);
    }

    /// Pointer left the grid container
    pub fn leave(&mut self) {
        self.index = None;
    }

    /// Inputs changed; a stale index could point at a different day
    pub fn clear_on_change(&mut self) {
        self.leave();
    }

    /// Step the hover by `delta` buckets within `0..len`, starting from the
    /// last bucket when nothing is hovered yet
    pub fn step(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.index = None;
            return;
        }
        let current = self.index.unwrap_or(len - 1).min(len - 1) as isize;
        let next = (current + delta).clamp(0, len as isize - 1);
        self.index = Some(next as usize);
    }
}
