use core::cell::{Ref, RefCell};
use core::fmt;
use core::future::Future;

use section_virtualizer::{HeightModel, IndexPath, LayoutError, ListLayout, ListOptions};

use crate::{
    ContainerRegistry, Dispatch, GroupContainer, ScrollEffects, ScrollError, ScrollSurface,
    ScrollTracker, StickyOverlay, TrackingState,
};

/// What an event actually refreshed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Update {
    /// The sticky overlay was mounted and received the offset.
    pub overlay: bool,
    /// Set when group contents were recomputed.
    pub groups: Option<Dispatch>,
}

/// A framework-neutral controller that wires a [`ListLayout`] to the host's scroll surface,
/// group containers and sticky overlay.
///
/// All methods take `&self`: a programmatic scroll returned by [`ListController::scroll_to`]
/// can be awaited while the host keeps delivering scroll events. Everything runs on one thread;
/// containers must not call back into the controller from their callbacks.
pub struct ListController<M, S, C, O> {
    list: RefCell<ListLayout<M>>,
    tracker: ScrollTracker,
    groups: RefCell<ContainerRegistry<C>>,
    overlay: RefCell<Option<O>>,
    surface: RefCell<Option<S>>,
}

impl<M, S, C, O> ListController<M, S, C, O>
where
    M: HeightModel,
    S: ScrollSurface,
    C: GroupContainer,
    O: StickyOverlay,
{
    pub fn new(list: ListLayout<M>) -> Self {
        let tracker = ScrollTracker::new(list.options().update_time_interval_ms);
        Self {
            list: RefCell::new(list),
            tracker,
            groups: RefCell::new(ContainerRegistry::new()),
            overlay: RefCell::new(None),
            surface: RefCell::new(None),
        }
    }

    pub fn list(&self) -> Ref<'_, ListLayout<M>> {
        self.list.borrow()
    }

    pub fn into_list(self) -> ListLayout<M> {
        self.list.into_inner()
    }

    pub fn tracking_state(&self) -> TrackingState {
        self.tracker.state()
    }

    /// The last known scroll offset.
    pub fn scroll_offset(&self) -> f64 {
        self.tracker.offset()
    }

    pub fn is_initialized(&self) -> bool {
        self.surface.borrow().is_some()
    }

    pub fn attach_surface(&self, surface: S) -> Option<S> {
        self.surface.borrow_mut().replace(surface)
    }

    pub fn detach_surface(&self) -> Option<S> {
        self.surface.borrow_mut().take()
    }

    pub fn attach_overlay(&self, overlay: O) -> Option<O> {
        self.overlay.borrow_mut().replace(overlay)
    }

    pub fn detach_overlay(&self) -> Option<O> {
        self.overlay.borrow_mut().take()
    }

    /// Mounts the container of `group` and immediately shows the content for the last known
    /// offset.
    pub fn mount_group(&self, group: usize, mut container: C) -> Option<C> {
        let offset = self.scroll_offset();
        if let Some(layout) = self.list.borrow().layout().group(group) {
            container.content_conversion(layout, offset);
        }
        self.groups.borrow_mut().mount(group, container)
    }

    pub fn unmount_group(&self, group: usize) -> Option<C> {
        self.groups.borrow_mut().unmount(group)
    }

    /// Runs `f` on the mounted container of `group`.
    pub fn with_group<R>(&self, group: usize, f: impl FnOnce(&C) -> R) -> Option<R> {
        self.groups.borrow().get(group).map(f)
    }

    pub fn with_overlay<R>(&self, f: impl FnOnce(&O) -> R) -> Option<R> {
        self.overlay.borrow().as_ref().map(f)
    }

    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> Option<R> {
        self.surface.borrow().as_ref().map(f)
    }

    /// A live scroll event from the surface.
    pub fn on_scroll(&self, offset: f64, now_ms: u64) -> Update {
        let effects = self.tracker.on_scroll(offset, now_ms);
        let update = self.apply(effects, offset, false);
        let on_scroll = self.list.borrow().options().on_scroll.clone();
        if let Some(on_scroll) = on_scroll {
            on_scroll(offset);
        }
        update
    }

    /// Scrolling came to rest. Refreshes every group and the overlay unconditionally.
    pub fn on_momentum_scroll_end(&self) -> Update {
        let effects = self.tracker.on_momentum_scroll_end();
        self.apply(effects, self.tracker.offset(), false)
    }

    /// Scrolls to `offset`.
    ///
    /// Fails immediately with [`LayoutError::InvalidParameter`] for a NaN or infinite offset,
    /// with [`ScrollError::NotInitialized`] when no surface is attached and with
    /// [`ScrollError::ScrollInProgress`] while a previous scroll has not settled.
    ///
    /// Otherwise groups and overlay are converted for the target before the surface starts
    /// scrolling, live tracking is suspended, and the returned future resolves once the surface
    /// reports the scroll settled. Tracking resumes when that future completes or is dropped.
    pub fn scroll_to(
        &self,
        offset: f64,
        animated: bool,
    ) -> Result<impl Future<Output = ()>, ScrollError> {
        if !offset.is_finite() {
            vwarn!(offset, "rejecting scroll_to a non-finite offset");
            return Err(LayoutError::InvalidParameter {
                name: "offset",
                value: offset,
            }
            .into());
        }
        let mut slot = self.surface.borrow_mut();
        let Some(surface) = slot.as_mut() else {
            vwarn!(offset, "scroll_to before a scroll surface was attached");
            return Err(ScrollError::NotInitialized);
        };
        self.tracker.suspend(offset)?;
        let guard = ResumeGuard {
            tracker: &self.tracker,
        };
        self.apply(ScrollEffects::ALL, offset, true);
        vdebug!(offset, animated, "scroll_to");
        let settled = surface.scroll_to(offset, animated);
        Ok(async move {
            settled.await;
            drop(guard);
        })
    }

    /// Scrolls so that `index_path` sits at the top of the viewport (list header included).
    pub fn scroll_to_index_path(
        &self,
        index_path: IndexPath,
        animated: bool,
    ) -> Result<impl Future<Output = ()>, ScrollError> {
        let offset = self.list.borrow().offset_for(index_path)?;
        self.scroll_to(offset, animated)
    }

    pub fn end_refresh(&self) {
        if let Some(surface) = self.surface.borrow_mut().as_mut() {
            surface.end_refresh();
        } else {
            vwarn!("end_refresh without a scroll surface");
        }
    }

    pub fn end_loading(&self, rebound: bool) {
        if let Some(surface) = self.surface.borrow_mut().as_mut() {
            surface.end_loading(rebound);
        } else {
            vwarn!(rebound, "end_loading without a scroll surface");
        }
    }

    /// Replaces the data snapshot and refreshes every container.
    pub fn set_model(&self, model: M) -> Result<Update, LayoutError> {
        self.relayout(|list| list.set_model(model))
    }

    pub fn set_options(&self, options: ListOptions) -> Result<Update, LayoutError> {
        let interval_ms = options.update_time_interval_ms;
        let update = self.relayout(|list| list.set_options(options))?;
        self.tracker.set_update_time_interval_ms(interval_ms);
        Ok(update)
    }

    pub fn set_viewport_height(&self, height: f64) -> Result<Update, LayoutError> {
        self.relayout(|list| list.set_viewport_height(height))
    }

    pub fn on_header_layout(&self, height: f64) -> Result<Update, LayoutError> {
        self.relayout(|list| list.on_header_layout(height))
    }

    pub fn on_footer_layout(&self, height: f64) -> Result<Update, LayoutError> {
        self.relayout(|list| list.on_footer_layout(height))
    }

    fn relayout(
        &self,
        f: impl FnOnce(&mut ListLayout<M>) -> Result<(), LayoutError>,
    ) -> Result<Update, LayoutError> {
        f(&mut self.list.borrow_mut())?;
        Ok(self.apply(ScrollEffects::ALL, self.scroll_offset(), true))
    }

    fn apply(&self, effects: ScrollEffects, offset: f64, force_immediate: bool) -> Update {
        let list = self.list.borrow();
        let layout = list.layout();
        let mut update = Update::default();
        if effects.groups {
            let dispatch =
                self.groups
                    .borrow_mut()
                    .dispatch(layout.group_count(), |index, container| {
                        container.content_conversion(&layout.groups()[index], offset);
                    });
            update.groups = Some(dispatch);
        }
        if effects.overlay {
            if let Some(overlay) = self.overlay.borrow_mut().as_mut() {
                overlay.update_offset(layout.section_tops(), offset, force_immediate);
                update.overlay = true;
            }
        }
        update
    }
}

impl<M, S, C, O> fmt::Debug for ListController<M, S, C, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListController")
            .field("tracker", &self.tracker)
            .field(
                "mounted_groups",
                &self.groups.try_borrow().map(|g| g.mounted_count()).ok(),
            )
            .finish_non_exhaustive()
    }
}

/// Returns the tracker to [`TrackingState::Tracking`] when a programmatic scroll ends.
struct ResumeGuard<'a> {
    tracker: &'a ScrollTracker,
}

impl Drop for ResumeGuard<'_> {
    fn drop(&mut self) {
        self.tracker.resume();
    }
}
