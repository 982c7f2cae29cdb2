use alloc::vec::Vec;
use core::fmt;

/// A `(section, row)` coordinate in a sectioned list.
///
/// `row == -1` ([`IndexPath::HEADER_ROW`]) addresses the section header itself; `row >= 0`
/// addresses a data row inside the section.
///
/// The derived ordering is document order: a section's header sorts before its rows, and all
/// items of a section sort before the next section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexPath {
    pub section: usize,
    pub row: isize,
}

impl IndexPath {
    pub const HEADER_ROW: isize = -1;

    pub fn new(section: usize, row: isize) -> Self {
        Self { section, row }
    }

    /// The header of `section`.
    pub fn header(section: usize) -> Self {
        Self {
            section,
            row: Self::HEADER_ROW,
        }
    }

    /// Data row `row` of `section`.
    ///
    /// Rows above `isize::MAX` saturate to `isize::MAX`. No model can hold that many rows, so
    /// such a path resolves as out of range.
    pub fn row(section: usize, row: usize) -> Self {
        Self {
            section,
            row: isize::try_from(row).unwrap_or(isize::MAX),
        }
    }

    pub fn is_header(&self) -> bool {
        self.row == Self::HEADER_ROW
    }

    /// The data row index, or `None` for a header (or a malformed negative row).
    pub fn row_index(&self) -> Option<usize> {
        usize::try_from(self.row).ok()
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_header() {
            write!(f, "{}:header", self.section)
        } else {
            write!(f, "{}:{}", self.section, self.row)
        }
    }
}

/// A contiguous slice of the item sequence assigned to one group.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Run {
    pub items: Vec<IndexPath>,
    /// Offset of the first item from the top of the content (includes the list header).
    pub top: f64,
    pub height: f64,
}

impl Run {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn first(&self) -> Option<IndexPath> {
        self.items.first().copied()
    }

    pub fn last(&self) -> Option<IndexPath> {
        self.items.last().copied()
    }

    pub fn contains(&self, index_path: IndexPath) -> bool {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => first <= index_path && index_path <= last,
            _ => false,
        }
    }
}

/// Measurement state of the list header or footer.
///
/// Heights arrive asynchronously from the host's layout pass. While either side is
/// [`Decoration::Pending`], the computed content height is provisional.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decoration {
    /// The list has no header/footer on this side.
    #[default]
    Absent,
    /// A header/footer is rendered but has not been measured yet.
    Pending,
    Measured(f64),
}

impl Decoration {
    /// The height contributed to the content, `0.0` unless measured.
    pub fn height(self) -> f64 {
        match self {
            Self::Measured(h) => h,
            Self::Absent | Self::Pending => 0.0,
        }
    }

    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// Geometry of the pinned section header at a given scroll offset.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StickyHeader {
    pub section: usize,
    /// Offset of the pinned header from the top of the content.
    ///
    /// Equals the scroll offset while the header is pinned, and is pushed up once the next
    /// section header reaches it.
    pub top: f64,
}
