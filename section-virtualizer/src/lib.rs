//! A headless, group-recycling layout engine for sectioned lists.
//!
//! For scroll tracking, throttled content updates and container plumbing, see the
//! `section-virtualizer-adapter` crate.
//!
//! A list of sections containing rows is rendered with a small, fixed number of recyclable
//! render groups instead of one view per row. This crate computes everything those groups need:
//!
//! - [`partition`] walks the item sequence once and assigns contiguous runs of items to groups
//!   round-robin, while building each group's [`BreakpointTable`] (a piecewise-linear
//!   `scroll offset -> translateY` mapping).
//! - [`SectionTops`] records where each section header starts and resolves the sticky header.
//! - [`index_path_offset`] resolves the pixel offset of any `(section, row)` for programmatic
//!   scrolling.
//! - [`ListLayout`] owns the inputs and recomputes the [`Layout`] whenever one of them changes.
//!
//! It is UI-agnostic. A UI layer is expected to provide:
//! - a [`HeightModel`] with section and row heights
//! - the viewport height and the measured list header/footer heights
//! - an interpolation primitive that evaluates the breakpoint tables against the live scroll
//!   offset (or [`BreakpointTable::sample`])
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod height;
mod list;
mod offset;
mod options;
mod partition;
mod section;
mod table;
mod types;


pub use error::LayoutError;
pub use height::{HeightModel, IndexPaths, SectionedHeights, index_paths};
pub use list::ListLayout;
pub use offset::{index_path_offset, section_extent};
pub use options::{ListOptions, OnScrollCallback};
pub use partition::{GroupLayout, Layout, LayoutParams, partition};
pub use section::SectionTops;
pub use table::{BreakpointTable, MAX_SAFE_OFFSET, MIN_SAFE_OFFSET};
pub use types::{Decoration, IndexPath, Run, StickyHeader};
