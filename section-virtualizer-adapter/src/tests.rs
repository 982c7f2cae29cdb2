use crate::*;

use alloc::rc::Rc;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::Cell;
use core::future::Future;
use core::pin::{Pin, pin};
use core::task::{Context, Poll};
use std::sync::Mutex;

use section_virtualizer::{
    GroupLayout, IndexPath, LayoutError, ListLayout, ListOptions, SectionTops, SectionedHeights,
};

/// A settle signal the test opens by hand.
#[derive(Clone, Debug, Default)]
struct Gate(Rc<Cell<bool>>);

impl Gate {
    fn open(&self) {
        self.0.set(true);
    }
}

impl Future for Gate {
    type Output = ();

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<()> {
        if self.0.get() {
            Poll::Ready(())
        } else {
            Poll::Pending
        }
    }
}

#[derive(Debug, Default)]
struct Surface {
    gate: Gate,
    scrolls: Vec<(f64, bool)>,
    refreshes: usize,
    loads: Vec<bool>,
}

impl ScrollSurface for Surface {
    type Settled = Gate;

    fn scroll_to(&mut self, offset: f64, animated: bool) -> Gate {
        self.scrolls.push((offset, animated));
        self.gate.clone()
    }

    fn end_refresh(&mut self) {
        self.refreshes += 1;
    }

    fn end_loading(&mut self, rebound: bool) {
        self.loads.push(rebound);
    }
}

/// Records every conversion as `(offset, first item of the displayed run)`.
#[derive(Debug, Default)]
struct Recorder {
    conversions: Vec<(f64, Option<IndexPath>)>,
}

impl GroupContainer for Recorder {
    fn content_conversion(&mut self, group: &GroupLayout, scroll_offset: f64) {
        let first = group.run_at(scroll_offset).and_then(|run| run.first());
        self.conversions.push((scroll_offset, first));
    }
}

#[derive(Debug, Default)]
struct Overlay {
    updates: Vec<(f64, bool, Option<usize>)>,
}

impl StickyOverlay for Overlay {
    fn update_offset(&mut self, tops: &SectionTops, scroll_offset: f64, force_immediate: bool) {
        let section = tops.sticky_header(scroll_offset).map(|h| h.section);
        self.updates.push((scroll_offset, force_immediate, section));
    }
}

type Controller = ListController<SectionedHeights, Surface, Recorder, Overlay>;

fn options() -> ListOptions {
    ListOptions::default()
        .with_group_count(2)
        .with_group_min_height(120.0)
}

/// One section of ten 50px rows, two groups, a 200px viewport.
fn controller_with(options: ListOptions) -> Controller {
    let model = SectionedHeights::uniform([10usize], 0.0, 50.0);
    let mut list = ListLayout::new(model, options).unwrap();
    list.set_viewport_height(200.0).unwrap();
    ListController::new(list)
}

fn mounted(gate: &Gate) -> Controller {
    let c = controller_with(options());
    c.mount_group(0, Recorder::default());
    c.mount_group(1, Recorder::default());
    c.attach_overlay(Overlay::default());
    c.attach_surface(Surface {
        gate: gate.clone(),
        ..Surface::default()
    });
    c
}

fn conversions(c: &Controller, group: usize) -> Vec<(f64, Option<IndexPath>)> {
    c.with_group(group, |r| r.conversions.clone()).unwrap()
}

#[test]
fn throttle_is_leading_edge() {
    let mut t = Throttle::new(150);
    assert!(t.try_acquire(1_000));
    assert!(!t.try_acquire(1_050));
    assert!(!t.try_acquire(1_149));
    // Dropped calls do not extend the interval.
    assert!(t.try_acquire(1_150));
    assert_eq!(t.last_ms(), Some(1_150));
    assert!(!t.try_acquire(1_100));
    t.reset();
    assert!(t.try_acquire(0));
}

#[test]
fn tracker_suspends_and_resumes() {
    let t = ScrollTracker::new(150);
    assert_eq!(t.on_scroll(10.0, 0), ScrollEffects::ALL);

    t.suspend(400.0).unwrap();
    assert_eq!(t.state(), TrackingState::Suspended);
    assert_eq!(t.offset(), 400.0);
    assert_eq!(t.suspend(500.0), Err(ScrollError::ScrollInProgress));
    assert_eq!(t.on_scroll(300.0, 1_000), ScrollEffects::NONE);
    assert_eq!(t.offset(), 300.0);

    t.resume();
    assert!(t.is_tracking());
    assert_eq!(
        t.on_scroll(310.0, 1_010),
        ScrollEffects {
            overlay: true,
            groups: true,
        }
    );
    assert_eq!(t.on_momentum_scroll_end(), ScrollEffects::ALL);
}

#[test]
fn tracker_resumes_through_shared_references() {
    let t = ScrollTracker::new(150);
    let (a, b) = (&t, &t);
    a.suspend(10.0).unwrap();
    // A resume can never be blocked by another holder of the tracker.
    b.resume();
    assert!(a.is_tracking());
    a.set_update_time_interval_ms(40);
    assert_eq!(b.throttle().interval_ms(), 40);
}

#[test]
fn resumed_tracking_accepts_the_next_scroll_to() {
    let gate = Gate::default();
    let c = mounted(&gate);
    for target in [100.0, 200.0, 300.0] {
        let pending = c.scroll_to(target, true).unwrap();
        c.on_scroll(target / 2.0, 0);
        drop(pending);
        assert_eq!(c.tracking_state(), TrackingState::Tracking);
    }
    assert_eq!(c.with_surface(|s| s.scrolls.len()), Some(3));
}

#[test]
fn non_finite_scroll_targets_are_rejected() {
    let gate = Gate::default();
    let c = mounted(&gate);
    for offset in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert!(matches!(
            c.scroll_to(offset, true),
            Err(ScrollError::Layout(LayoutError::InvalidParameter {
                name: "offset",
                ..
            }))
        ));
    }
    assert_eq!(c.tracking_state(), TrackingState::Tracking);
    assert_eq!(c.scroll_offset(), 0.0);
    assert_eq!(c.with_surface(|s| s.scrolls.len()), Some(0));
}

#[test]
fn scroll_to_before_surface_fails_fast() {
    let c = controller_with(options());
    assert!(!c.is_initialized());
    assert!(matches!(
        c.scroll_to(100.0, true),
        Err(ScrollError::NotInitialized)
    ));
    assert!(matches!(
        c.scroll_to_index_path(IndexPath::row(0, 5), true),
        Err(ScrollError::NotInitialized)
    ));
    assert_eq!(c.tracking_state(), TrackingState::Tracking);
}

#[test]
fn scroll_to_index_path_resolves_after_surface_settles() {
    let gate = Gate::default();
    let c = mounted(&gate);

    let fut = c
        .scroll_to_index_path(IndexPath::row(0, 5), true)
        .unwrap();
    assert_eq!(
        c.with_surface(|s| s.scrolls.clone()),
        Some(vec![(250.0, true)])
    );
    assert_eq!(c.tracking_state(), TrackingState::Suspended);

    // Content was converted for the target before the surface started moving.
    assert_eq!(
        conversions(&c, 0).last(),
        Some(&(250.0, Some(IndexPath::row(0, 6))))
    );
    assert_eq!(
        conversions(&c, 1).last(),
        Some(&(250.0, Some(IndexPath::row(0, 3))))
    );
    assert_eq!(
        c.with_overlay(|o| o.updates.clone()),
        Some(vec![(250.0, true, Some(0))])
    );

    let mut fut = pin!(fut);
    let mut cx = Context::from_waker(futures_task::noop_waker_ref());
    assert!(fut.as_mut().poll(&mut cx).is_pending());

    // Intermediate events of the animation only move the offset.
    assert_eq!(c.on_scroll(120.0, 10), Update::default());
    assert_eq!(c.scroll_offset(), 120.0);
    assert!(fut.as_mut().poll(&mut cx).is_pending());

    gate.open();
    assert!(fut.as_mut().poll(&mut cx).is_ready());
    assert_eq!(c.tracking_state(), TrackingState::Tracking);
}

#[test]
fn concurrent_scroll_to_is_rejected() {
    let gate = Gate::default();
    let c = mounted(&gate);

    let first = c.scroll_to(300.0, true).unwrap();
    assert!(matches!(
        c.scroll_to(100.0, true),
        Err(ScrollError::ScrollInProgress)
    ));
    assert_eq!(c.with_surface(|s| s.scrolls.len()), Some(1));

    // Dropping an unsettled scroll still resumes tracking.
    drop(first);
    assert_eq!(c.tracking_state(), TrackingState::Tracking);

    gate.open();
    pollster::block_on(c.scroll_to(100.0, false).unwrap());
    assert_eq!(
        c.with_surface(|s| s.scrolls.clone()),
        Some(vec![(300.0, true), (100.0, false)])
    );
    assert_eq!(c.tracking_state(), TrackingState::Tracking);
}

#[test]
fn scroll_events_throttle_group_updates() {
    let gate = Gate::default();
    let c = mounted(&gate);
    let before = conversions(&c, 0).len();

    let first = c.on_scroll(10.0, 1_000);
    assert!(first.overlay);
    assert_eq!(
        first.groups,
        Some(Dispatch {
            delivered: 2,
            missing: Vec::new(),
        })
    );

    for (offset, now_ms) in [(20.0, 1_040), (30.0, 1_080), (40.0, 1_149)] {
        let update = c.on_scroll(offset, now_ms);
        assert!(update.overlay, "overlay must never lag");
        assert_eq!(update.groups, None);
    }
    assert!(c.on_scroll(50.0, 1_150).groups.is_some());
    assert!(c.on_scroll(60.0, 1_200).groups.is_none());

    assert_eq!(conversions(&c, 0).len(), before + 2);
    assert_eq!(c.with_overlay(|o| o.updates.len()), Some(6));

    // Coming to rest always converts, with the last known offset.
    let end = c.on_momentum_scroll_end();
    assert!(end.overlay);
    assert!(end.groups.is_some_and(|d| d.is_complete()));
    assert_eq!(conversions(&c, 0).last().map(|c| c.0), Some(60.0));
    assert_eq!(
        c.with_overlay(|o| o.updates.last().copied()),
        Some(Some((60.0, false, Some(0))))
    );
}

#[test]
fn momentum_end_after_scroll_to_uses_target() {
    let gate = Gate::default();
    gate.open();
    let c = mounted(&gate);
    pollster::block_on(c.scroll_to(280.0, true).unwrap());

    c.on_momentum_scroll_end();
    assert_eq!(conversions(&c, 1).last().map(|c| c.0), Some(280.0));
}

#[test]
fn unmounted_groups_are_skipped_and_reported() {
    let c = controller_with(options());
    c.mount_group(1, Recorder::default());

    let update = c.on_momentum_scroll_end();
    assert!(!update.overlay);
    assert_eq!(
        update.groups,
        Some(Dispatch {
            delivered: 1,
            missing: vec![0],
        })
    );

    let removed = c.unmount_group(1).unwrap();
    assert_eq!(removed.conversions.len(), 2);
    let update = c.on_momentum_scroll_end();
    assert_eq!(update.groups.map(|d| d.missing), Some(vec![0, 1]));
}

#[test]
fn mounting_shows_content_for_the_current_offset() {
    let c = controller_with(options());
    c.on_scroll(260.0, 0);
    c.mount_group(1, Recorder::default());
    assert_eq!(
        conversions(&c, 1),
        vec![(260.0, Some(IndexPath::row(0, 9)))]
    );
}

#[test]
fn relayout_refreshes_every_container() {
    let gate = Gate::default();
    let c = mounted(&gate);
    c.on_scroll(100.0, 0);

    let update = c
        .set_options(options().with_group_count(3).with_update_time_interval_ms(50))
        .unwrap();
    assert_eq!(c.list().layout().group_count(), 3);
    assert_eq!(
        update.groups,
        Some(Dispatch {
            delivered: 2,
            missing: vec![2],
        })
    );
    assert_eq!(c.with_overlay(|o| o.updates.last().map(|u| u.1)), Some(Some(true)));

    // The new interval applies to subsequent events.
    assert!(c.on_scroll(110.0, 60).groups.is_some());
    assert!(c.on_scroll(120.0, 100).groups.is_none());
    assert!(c.on_scroll(130.0, 110).groups.is_some());

    let update = c.on_header_layout(40.0).unwrap();
    assert!(update.overlay);
    assert_eq!(c.list().layout().content_height(), 540.0);

    assert!(c.set_viewport_height(-1.0).is_err());
    assert!(
        c.set_model(SectionedHeights::uniform([2usize], f64::NAN, 10.0))
            .is_err()
    );
    assert_eq!(c.list().layout().item_count(), 11);
}

#[test]
fn scroll_to_index_path_includes_list_header() {
    let gate = Gate::default();
    gate.open();
    let c = mounted(&gate);
    c.on_header_layout(30.0).unwrap();

    pollster::block_on(c.scroll_to_index_path(IndexPath::header(0), false).unwrap());
    pollster::block_on(c.scroll_to_index_path(IndexPath::row(0, 2), true).unwrap());
    assert_eq!(
        c.with_surface(|s| s.scrolls.clone()),
        Some(vec![(30.0, false), (130.0, true)])
    );

    assert!(matches!(
        c.scroll_to_index_path(IndexPath::row(0, 10), true),
        Err(ScrollError::Layout(_))
    ));
}

#[test]
fn refresh_and_loading_pass_through() {
    let c = controller_with(options());
    // Without a surface these are no-ops.
    c.end_refresh();
    c.end_loading(true);

    c.attach_surface(Surface::default());
    c.end_refresh();
    c.end_loading(false);
    c.end_loading(true);
    assert_eq!(c.with_surface(|s| s.refreshes), Some(1));
    assert_eq!(c.with_surface(|s| s.loads.clone()), Some(vec![false, true]));

    assert!(c.detach_surface().is_some());
    assert!(!c.is_initialized());
}

#[test]
fn on_scroll_callback_sees_every_offset() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let options = options().with_on_scroll(Some({
        let seen = Arc::clone(&seen);
        move |offset| seen.lock().unwrap().push(offset)
    }));
    let c = controller_with(options);
    c.on_scroll(5.0, 0);
    c.on_scroll(6.0, 1);
    assert_eq!(*seen.lock().unwrap(), vec![5.0, 6.0]);
}

#[test]
fn set_model_refreshes_mounted_containers() {
    let gate = Gate::default();
    let c = mounted(&gate);
    c.on_scroll(100.0, 0);
    let before = conversions(&c, 0).len();

    let update = c
        .set_model(SectionedHeights::uniform([4usize, 4], 20.0, 50.0))
        .unwrap();
    assert_eq!(
        update.groups,
        Some(Dispatch {
            delivered: 2,
            missing: Vec::new(),
        })
    );
    assert!(update.overlay);
    assert_eq!(c.list().layout().item_count(), 10);
    assert_eq!(conversions(&c, 0).len(), before + 1);

    let list = c.list();
    let expected = list.layout().groups()[0]
        .run_at(100.0)
        .and_then(|run| run.first());
    drop(list);
    assert_eq!(conversions(&c, 0).last(), Some(&(100.0, expected)));
    assert_eq!(
        c.with_overlay(|o| o.updates.last().copied()),
        Some(Some((100.0, true, Some(0))))
    );
}
