// Example: drive a ListController with a simulated fling and a programmatic scroll.
use core::future::{Ready, ready};

use section_virtualizer::{
    GroupLayout, IndexPath, ListLayout, ListOptions, SectionTops, SectionedHeights,
};
use section_virtualizer_adapter::{GroupContainer, ListController, ScrollSurface, StickyOverlay};

/// A surface whose scrolls settle immediately.
struct InstantSurface;

impl ScrollSurface for InstantSurface {
    type Settled = Ready<()>;

    fn scroll_to(&mut self, offset: f64, animated: bool) -> Ready<()> {
        println!("surface: scroll_to({offset}, animated={animated})");
        ready(())
    }

    fn end_refresh(&mut self) {}

    fn end_loading(&mut self, _rebound: bool) {}
}

struct PrintGroup(usize);

impl GroupContainer for PrintGroup {
    fn content_conversion(&mut self, group: &GroupLayout, scroll_offset: f64) {
        let run = group.run_at(scroll_offset);
        println!(
            "  group {} at y={} shows {:?}..{:?}",
            self.0,
            group.translate_y(scroll_offset),
            run.and_then(|r| r.first()),
            run.and_then(|r| r.last()),
        );
    }
}

struct PrintOverlay;

impl StickyOverlay for PrintOverlay {
    fn update_offset(&mut self, tops: &SectionTops, scroll_offset: f64, force_immediate: bool) {
        if force_immediate {
            println!("  sticky header jumps to {:?}", tops.sticky_header(scroll_offset));
        }
    }
}

fn main() {
    let model = SectionedHeights::uniform(vec![40usize; 100], 32.0, 56.0);
    let list = ListLayout::new(model, ListOptions::default()).unwrap();
    let c: ListController<_, _, _, _> = ListController::new(list);
    c.set_viewport_height(640.0).unwrap();
    c.attach_surface(InstantSurface);
    c.attach_overlay(PrintOverlay);
    for g in 0..c.list().layout().group_count() {
        c.mount_group(g, PrintGroup(g));
    }

    // A fling: one event every 16ms, 40px apart. Groups refresh at most every 150ms.
    let mut now_ms = 0u64;
    let mut offset = 0.0;
    let mut refreshed = 0usize;
    for _ in 0..60 {
        offset += 40.0;
        now_ms += 16;
        if c.on_scroll(offset, now_ms).groups.is_some() {
            refreshed += 1;
        }
    }
    println!("60 scroll events, {refreshed} group refreshes");
    println!("momentum end:");
    c.on_momentum_scroll_end();

    println!("scroll_to_index_path(42:3):");
    pollster::block_on(c.scroll_to_index_path(IndexPath::row(42, 3), true).unwrap());
}
