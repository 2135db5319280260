//! One scrollable axis of the grid (columns or rows).
//!
//! An axis is a run of indices with pixel sizes, of which the first `frozen`
//! are pinned and the next `hidden` are scrolled out of view. Positions are
//! measured from the viewport's leading edge.
//!
//! An index is *visible* when its leading edge lies inside the viewport and
//! *fully visible* when its trailing edge does too: `pos + size < extent`.
//! An index ending exactly on the viewport edge is only partially visible, so
//! with widths `[10, 20, 30, 40]`, one frozen column and an 80px viewport a
//! single forward step hides columns 1 and 2 together.

/// Pixel sizes along an axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Sizes {
    /// One size per index; indices past the end use `fallback`.
    PerIndex { sizes: Vec<u32>, fallback: u32 },
    /// Every index has the same size.
    Uniform(u32),
}

impl Sizes {
    fn get(&self, index: u32) -> u32 {
        match self {
            Sizes::PerIndex { sizes, fallback } => {
                sizes.get(index as usize).copied().unwrap_or(*fallback)
            }
            Sizes::Uniform(size) => *size,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Axis {
    sizes: Sizes,
    count: u32,
    frozen: u32,
    hidden: u32,
    extent: u32,
    max_hidden: u32,
}

impl Axis {
    pub(crate) fn new(sizes: Sizes, count: u32, frozen: u32, extent: u32) -> Self {
        let mut axis = Self {
            sizes,
            count,
            frozen,
            hidden: 0,
            extent,
            max_hidden: 0,
        };
        axis.relayout();
        axis
    }

    pub(crate) fn count(&self) -> u32 {
        self.count
    }

    pub(crate) fn frozen(&self) -> u32 {
        self.frozen
    }

    pub(crate) fn hidden(&self) -> u32 {
        self.hidden
    }

    pub(crate) fn max_hidden(&self) -> u32 {
        self.max_hidden
    }

    pub(crate) fn extent(&self) -> u32 {
        self.extent
    }

    pub(crate) fn size(&self, index: u32) -> u32 {
        self.sizes.get(index)
    }

    pub(crate) fn set_sizes(&mut self, sizes: Sizes) {
        self.sizes = sizes;
        self.relayout();
    }

    pub(crate) fn set_count(&mut self, count: u32) {
        self.count = count;
        self.relayout();
    }

    pub(crate) fn set_frozen(&mut self, frozen: u32) {
        self.frozen = frozen;
        self.relayout();
    }

    pub(crate) fn set_extent(&mut self, extent: u32) {
        self.extent = extent;
        self.relayout();
    }

    /// Set the hidden count, clamped to `[0, max_hidden]`. Returns true if it changed.
    pub(crate) fn set_hidden(&mut self, hidden: u32) -> bool {
        let clamped = hidden.min(self.max_hidden);
        let changed = clamped != self.hidden;
        self.hidden = clamped;
        changed
    }

    /// Frozen count limited to the data extent.
    fn frozen_len(&self) -> u32 {
        self.frozen.min(self.count)
    }

    /// First non-frozen index currently in view.
    pub(crate) fn first_scrollable(&self) -> u32 {
        self.frozen_len().saturating_add(self.hidden)
    }

    fn frozen_extent(&self) -> u32 {
        (0..self.frozen_len()).fold(0u32, |acc, i| acc.saturating_add(self.size(i)))
    }

    fn relayout(&mut self) {
        self.max_hidden = self.compute_max_hidden();
        self.hidden = self.hidden.min(self.max_hidden);
    }

    /// Smallest hidden count at which the last index is fully visible.
    ///
    /// Walks back from the last index while the trailing run still fits, so
    /// the cost is bounded by the number of indices that fit in the viewport.
    /// When the last index cannot fit on its own, it is allowed to become the
    /// first scrollable index.
    fn compute_max_hidden(&self) -> u32 {
        let frozen_len = self.frozen_len();
        if self.count <= frozen_len {
            return 0;
        }
        let mut trailing = self.frozen_extent();
        let mut first = self.count;
        while first > frozen_len {
            let next = trailing.saturating_add(self.size(first - 1));
            if next >= self.extent {
                break;
            }
            trailing = next;
            first -= 1;
        }
        if first == self.count {
            self.count - 1 - frozen_len
        } else {
            first - frozen_len
        }
    }

    /// Leading edge of `index`, or `None` when it is out of range, scrolled
    /// out, or starts at or beyond the viewport's trailing edge.
    pub(crate) fn position(&self, index: u32) -> Option<u32> {
        if index >= self.count {
            return None;
        }
        let frozen_len = self.frozen_len();
        let (mut pos, start) = if index < frozen_len {
            (0, 0)
        } else if index < self.first_scrollable() {
            return None;
        } else {
            (self.frozen_extent(), self.first_scrollable())
        };
        for i in start..index {
            pos = pos.saturating_add(self.size(i));
            if pos >= self.extent {
                return None;
            }
        }
        (pos < self.extent).then_some(pos)
    }

    /// `(position, size)` of a visible index.
    pub(crate) fn bounds(&self, index: u32) -> Option<(u32, u32)> {
        self.position(index).map(|pos| (pos, self.size(index)))
    }

    pub(crate) fn is_fully_visible(&self, index: u32) -> bool {
        self.bounds(index)
            .is_some_and(|(pos, size)| pos.saturating_add(size) < self.extent)
    }

    /// True if `target` would be fully visible with `hidden` leading indices scrolled out.
    fn fits_at(&self, hidden: u32, target: u32) -> bool {
        let first = self.frozen_len().saturating_add(hidden);
        if target < first {
            return false;
        }
        let mut end = self.frozen_extent();
        for i in first..=target {
            end = end.saturating_add(self.size(i));
            if end >= self.extent {
                return false;
            }
        }
        true
    }

    /// First scrollable index that is not fully visible at the given offset.
    fn first_partial(&self, hidden: u32) -> Option<u32> {
        let mut end = self.frozen_extent();
        let mut i = self.frozen_len().saturating_add(hidden);
        while i < self.count {
            end = end.saturating_add(self.size(i));
            if end >= self.extent {
                return Some(i);
            }
            i += 1;
        }
        None
    }

    /// Offset reached by one forward scroll step from `hidden`.
    ///
    /// The step hides the fewest leading indices that make the first partially
    /// visible index fully visible (or bring it to the leading edge when it is
    /// wider than the viewport). Clamped to `max_hidden`.
    fn next_offset(&self, hidden: u32) -> u32 {
        if hidden >= self.max_hidden {
            return hidden;
        }
        let Some(target) = self.first_partial(hidden) else {
            return hidden;
        };
        let frozen_len = self.frozen_len();
        let mut next = hidden + 1;
        while next < self.max_hidden
            && frozen_len.saturating_add(next) < target
            && !self.fits_at(next, target)
        {
            next += 1;
        }
        next.min(self.max_hidden)
    }

    /// Scroll forward one step. Returns true if the hidden count changed.
    pub(crate) fn scroll_forward(&mut self) -> bool {
        let next = self.next_offset(self.hidden);
        self.set_hidden(next)
    }

    /// Scroll back one step: to the earliest offset whose forward step reaches
    /// the current one, so a forward step followed by a back step returns to
    /// where it started.
    pub(crate) fn scroll_back(&mut self) -> bool {
        if self.hidden == 0 {
            return false;
        }
        let mut prev = self.hidden - 1;
        while prev > 0 && self.next_offset(prev - 1) >= self.hidden {
            prev -= 1;
        }
        self.set_hidden(prev)
    }

    /// Number of fully visible scrollable indices, at least one.
    pub(crate) fn page_size(&self) -> u32 {
        let mut end = self.frozen_extent();
        let mut i = self.first_scrollable();
        let mut page = 0u32;
        while i < self.count {
            end = end.saturating_add(self.size(i));
            if end >= self.extent {
                break;
            }
            page += 1;
            i += 1;
        }
        page.max(1)
    }

    pub(crate) fn page_forward(&mut self) -> bool {
        let page = self.page_size();
        self.set_hidden(self.hidden.saturating_add(page))
    }

    pub(crate) fn page_back(&mut self) -> bool {
        let page = self.page_size();
        self.set_hidden(self.hidden.saturating_sub(page))
    }

    /// Indices rendered at their full size, frozen first, in order.
    pub(crate) fn fully_visible_indexes(&self) -> Vec<u32> {
        let mut indexes = Vec::new();
        let mut end = 0u32;
        let frozen_len = self.frozen_len();
        for i in 0..frozen_len {
            end = end.saturating_add(self.size(i));
            if end >= self.extent {
                return indexes;
            }
            indexes.push(i);
        }
        let mut i = self.first_scrollable();
        while i < self.count {
            end = end.saturating_add(self.size(i));
            if end >= self.extent {
                break;
            }
            indexes.push(i);
            i += 1;
        }
        indexes
    }

    /// Indices with any part in view, frozen first, in order.
    pub(crate) fn visible_indexes(&self) -> Vec<u32> {
        let frozen_len = self.frozen_len();
        let scrollable = self.first_scrollable()..self.count;
        let mut indexes = Vec::new();
        let mut pos = 0u32;
        for i in (0..frozen_len).chain(scrollable) {
            if pos >= self.extent {
                break;
            }
            indexes.push(i);
            pos = pos.saturating_add(self.size(i));
        }
        indexes
    }

    /// Index whose span `[pos, pos + size)` contains `px`.
    pub(crate) fn index_at(&self, px: u32) -> Option<u32> {
        if px >= self.extent {
            return None;
        }
        let frozen_len = self.frozen_len();
        let scrollable = self.first_scrollable()..self.count;
        let mut pos = 0u32;
        for i in (0..frozen_len).chain(scrollable) {
            if pos >= self.extent {
                break;
            }
            let end = pos.saturating_add(self.size(i));
            if px >= pos && px < end {
                return Some(i);
            }
            pos = end;
        }
        None
    }

    /// Scroll until `index` is fully visible or as far into view as it can get.
    /// Frozen and out-of-range indices never scroll. Returns true if anything moved.
    pub(crate) fn reveal(&mut self, index: u32) -> bool {
        if index < self.frozen_len() || index >= self.count {
            return false;
        }
        let start = self.hidden;
        for _ in 0..self.count {
            if self.is_fully_visible(index) || index == self.first_scrollable() {
                break;
            }
            let moved = if index < self.first_scrollable() {
                self.scroll_back()
            } else {
                self.scroll_forward()
            };
            if !moved {
                break;
            }
        }
        self.hidden != start
    }
}
