// Example: resolve the pinned section header while scrolling.
use section_virtualizer::{LayoutParams, SectionedHeights, partition};

fn main() {
    let model = SectionedHeights::uniform(vec![3usize; 5], 30.0, 60.0);
    let params = LayoutParams {
        group_count: 4,
        group_min_height: 200.0,
        header_height: 120.0,
        footer_height: 0.0,
        viewport_height: 600.0,
    };
    let layout = partition(&model, &params).expect("valid model");
    let tops = layout.section_tops();
    println!("section_tops={:?}", tops.as_slice());

    let mut offset = 0.0;
    while offset < layout.content_height() {
        println!("offset={offset:>6} sticky={:?}", tops.sticky_header(offset));
        offset += 75.0;
    }
}
