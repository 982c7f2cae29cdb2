use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;

use crate::IndexPath;

/// The caller-supplied shape and heights of a sectioned list.
///
/// Implementations must be stable for a given data snapshot: the same query must return the
/// same height until the model is replaced. Heights must be finite and non-negative; the layout
/// pass rejects anything else with [`crate::LayoutError::InvalidHeight`].
pub trait HeightModel {
    fn section_count(&self) -> usize;

    fn row_count(&self, section: usize) -> usize;

    /// Height of the header of `section`. Sections have no visible header by default.
    fn section_height(&self, section: usize) -> f64 {
        let _ = section;
        0.0
    }

    fn row_height(&self, index_path: IndexPath) -> f64;

    /// Total number of items, headers included.
    fn item_count(&self) -> usize {
        (0..self.section_count())
            .map(|s| self.row_count(s).saturating_add(1))
            .sum()
    }
}

impl<M: HeightModel + ?Sized> HeightModel for &M {
    fn section_count(&self) -> usize {
        (**self).section_count()
    }

    fn row_count(&self, section: usize) -> usize {
        (**self).row_count(section)
    }

    fn section_height(&self, section: usize) -> f64 {
        (**self).section_height(section)
    }

    fn row_height(&self, index_path: IndexPath) -> f64 {
        (**self).row_height(index_path)
    }

    fn item_count(&self) -> usize {
        (**self).item_count()
    }
}

impl<M: HeightModel + ?Sized> HeightModel for Arc<M> {
    fn section_count(&self) -> usize {
        (**self).section_count()
    }

    fn row_count(&self, section: usize) -> usize {
        (**self).row_count(section)
    }

    fn section_height(&self, section: usize) -> f64 {
        (**self).section_height(section)
    }

    fn row_height(&self, index_path: IndexPath) -> f64 {
        (**self).row_height(index_path)
    }

    fn item_count(&self) -> usize {
        (**self).item_count()
    }
}

/// A [`HeightModel`] built from per-section row counts and height closures.
///
/// Closures are stored in `Arc`s so the model is cheap to clone.
pub struct SectionedHeights {
    rows: Vec<usize>,
    section_height: Arc<dyn Fn(usize) -> f64 + Send + Sync>,
    row_height: Arc<dyn Fn(IndexPath) -> f64 + Send + Sync>,
}

impl SectionedHeights {
    /// Creates a model with `rows[s]` rows in section `s` and zero-height section headers.
    pub fn new(
        rows: impl Into<Vec<usize>>,
        row_height: impl Fn(IndexPath) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            rows: rows.into(),
            section_height: Arc::new(|_| 0.0),
            row_height: Arc::new(row_height),
        }
    }

    /// Every header is `section_height` tall and every row is `row_height` tall.
    pub fn uniform(rows: impl Into<Vec<usize>>, section_height: f64, row_height: f64) -> Self {
        Self::new(rows, move |_| row_height).with_section_height(move |_| section_height)
    }

    pub fn with_section_height(
        mut self,
        section_height: impl Fn(usize) -> f64 + Send + Sync + 'static,
    ) -> Self {
        self.section_height = Arc::new(section_height);
        self
    }

    pub fn with_row_height(
        mut self,
        row_height: impl Fn(IndexPath) -> f64 + Send + Sync + 'static,
    ) -> Self {
        self.row_height = Arc::new(row_height);
        self
    }

    pub fn rows(&self) -> &[usize] {
        &self.rows
    }
}

impl HeightModel for SectionedHeights {
    fn section_count(&self) -> usize {
        self.rows.len()
    }

    fn row_count(&self, section: usize) -> usize {
        self.rows.get(section).copied().unwrap_or(0)
    }

    fn section_height(&self, section: usize) -> f64 {
        (self.section_height)(section)
    }

    fn row_height(&self, index_path: IndexPath) -> f64 {
        (self.row_height)(index_path)
    }
}

impl Clone for SectionedHeights {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows.clone(),
            section_height: Arc::clone(&self.section_height),
            row_height: Arc::clone(&self.row_height),
        }
    }
}

impl fmt::Debug for SectionedHeights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionedHeights")
            .field("rows", &self.rows)
            .finish_non_exhaustive()
    }
}

/// Iterates every [`IndexPath`] of a model in document order: each section's header first,
/// then its rows.
pub fn index_paths<M: HeightModel + ?Sized>(model: &M) -> IndexPaths<'_, M> {
    IndexPaths {
        model,
        section: 0,
        row: IndexPath::HEADER_ROW,
        sections: model.section_count(),
    }
}

#[derive(Debug)]
pub struct IndexPaths<'a, M: ?Sized> {
    model: &'a M,
    section: usize,
    row: isize,
    sections: usize,
}

impl<M: HeightModel + ?Sized> Iterator for IndexPaths<'_, M> {
    type Item = IndexPath;

    fn next(&mut self) -> Option<IndexPath> {
        if self.section >= self.sections {
            return None;
        }
        let item = IndexPath::new(self.section, self.row);
        let rows = self.model.row_count(self.section);
        let next_row = self.row + 1;
        if usize::try_from(next_row).is_ok_and(|r| r >= rows) {
            self.section += 1;
            self.row = IndexPath::HEADER_ROW;
        } else {
            self.row = next_row;
        }
        Some(item)
    }
}

impl<M: HeightModel + ?Sized> FusedIterator for IndexPaths<'_, M> {}
