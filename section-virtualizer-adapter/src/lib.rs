//! Adapter utilities for the `section-virtualizer` crate.
//!
//! The `section-virtualizer` crate is UI-agnostic and focuses on layout math. This crate provides
//! the framework-neutral plumbing between that layout and a host UI:
//!
//! - A scroll-tracking state machine ([`ScrollTracker`]) with a leading-edge [`Throttle`] for
//!   group content updates
//! - A [`ContainerRegistry`] for group containers that mount asynchronously
//! - Collaborator traits for the scroll surface, group containers and sticky overlay
//! - [`ListController`], which wires all of the above and exposes `scroll_to` /
//!   `scroll_to_index_path` as futures that resolve when the surface settles
//!
//! This crate is intentionally framework-agnostic (no bindings to a particular UI toolkit).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod error;
mod registry;
mod surface;
mod throttle;
mod tracker;

#[cfg(test)]
mod tests;

pub use controller::{ListController, Update};
pub use error::ScrollError;
pub use registry::{ContainerRegistry, Dispatch};
pub use surface::{GroupContainer, ScrollSurface, StickyOverlay};
pub use throttle::Throttle;
pub use tracker::{ScrollEffects, ScrollTracker, TrackingState};
