use alloc::vec::Vec;

use crate::{LayoutError, StickyHeader};

/// Per-section header offsets, as measured from the top of the content.
///
/// Feeds the sticky-header overlay: given a scroll offset it answers which section header is
/// pinned and where.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSectionTops"))]
pub struct SectionTops {
    tops: Vec<f64>,
    heights: Vec<f64>,
}

impl SectionTops {
    /// Builds the index from externally supplied tops and header heights.
    ///
    /// Both slices are indexed by section, so they must have the same length. Tops must be
    /// finite and non-decreasing, heights finite and non-negative.
    pub fn from_parts(tops: Vec<f64>, heights: Vec<f64>) -> Result<Self, LayoutError> {
        let malformed = |reason: &'static str| Err(LayoutError::MalformedLayout { reason });
        if tops.len() != heights.len() {
            return malformed("section tops and header heights differ in length");
        }
        if tops.iter().any(|top| !top.is_finite()) || tops.windows(2).any(|w| w[0] > w[1]) {
            return malformed("section tops must be finite and non-decreasing");
        }
        if heights.iter().any(|h| !(h.is_finite() && *h >= 0.0)) {
            return malformed("section header heights must be finite and non-negative");
        }
        Ok(Self { tops, heights })
    }

    pub(crate) fn with_capacity(sections: usize) -> Self {
        Self {
            tops: Vec::with_capacity(sections),
            heights: Vec::with_capacity(sections),
        }
    }

    pub(crate) fn push(&mut self, top: f64, header_height: f64) {
        debug_assert!(
            self.tops.last().is_none_or(|&prev| prev <= top),
            "section tops must be non-decreasing"
        );
        self.tops.push(top);
        self.heights.push(header_height);
    }

    pub fn len(&self) -> usize {
        self.tops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tops.is_empty()
    }

    pub fn top(&self, section: usize) -> Option<f64> {
        self.tops.get(section).copied()
    }

    /// Height of the header of `section`.
    pub fn header_height(&self, section: usize) -> Option<f64> {
        self.heights.get(section).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.tops
    }

    /// The last section whose header starts at or above `offset`.
    pub fn section_at(&self, offset: f64) -> Option<usize> {
        let n = self.tops.partition_point(|&top| top <= offset);
        n.checked_sub(1)
    }

    /// The header pinned to the top edge of a viewport scrolled to `scroll_offset`.
    ///
    /// Returns `None` while the viewport top is above the first section (e.g. inside the list
    /// header).
    pub fn sticky_header(&self, scroll_offset: f64) -> Option<StickyHeader> {
        let section = self.section_at(scroll_offset)?;
        let top = self.tops[section];
        let mut pinned = scroll_offset.max(top);
        if let Some(&next) = self.tops.get(section + 1) {
            pinned = pinned.min(next - self.heights[section]);
        }
        Some(StickyHeader {
            section,
            top: pinned.max(top),
        })
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawSectionTops {
    tops: Vec<f64>,
    heights: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSectionTops> for SectionTops {
    type Error = LayoutError;

    fn try_from(raw: RawSectionTops) -> Result<Self, Self::Error> {
        Self::from_parts(raw.tops, raw.heights)
    }
}
