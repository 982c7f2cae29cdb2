use core::future::Future;

use section_virtualizer::{GroupLayout, SectionTops};

/// The host scroll container that owns the real scroll position.
///
/// It reports offsets back through [`crate::ListController::on_scroll`] and
/// [`crate::ListController::on_momentum_scroll_end`].
pub trait ScrollSurface {
    /// Resolves once an animated (or immediate) scroll has settled.
    type Settled: Future<Output = ()>;

    /// Starts scrolling to `offset`. The returned future must not borrow the surface.
    fn scroll_to(&mut self, offset: f64, animated: bool) -> Self::Settled;

    fn end_refresh(&mut self);

    fn end_loading(&mut self, rebound: bool);
}

/// A mounted render group.
pub trait GroupContainer {
    /// Tells the container which content to show for `scroll_offset`, typically
    /// `group.run_at(scroll_offset)`.
    fn content_conversion(&mut self, group: &GroupLayout, scroll_offset: f64);
}

/// The overlay that renders the pinned section header.
pub trait StickyOverlay {
    /// `force_immediate` is set for programmatic scrolls, where the overlay should jump rather
    /// than follow the animation.
    fn update_offset(&mut self, tops: &SectionTops, scroll_offset: f64, force_immediate: bool);
}
