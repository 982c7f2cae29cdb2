// Example: partition a sectioned list into recyclable groups and sample their tables.
use section_virtualizer::{IndexPath, ListLayout, ListOptions, SectionedHeights};

fn main() {
    // 200 sections of 50 rows; headers are 28px, rows alternate between 44px and 88px.
    let model = SectionedHeights::new(vec![50usize; 200], |p: IndexPath| {
        if p.row % 2 == 0 { 44.0 } else { 88.0 }
    })
    .with_section_height(|_| 28.0);

    let mut list = ListLayout::new(model, ListOptions::default()).expect("valid model");
    list.set_viewport_height(800.0).expect("valid viewport");

    let layout = list.layout();
    println!(
        "items={} runs={} content_height={}",
        layout.item_count(),
        layout.run_count(),
        layout.content_height()
    );

    for offset in [0.0, 1_000.0, 50_000.0, 300_000.0] {
        let placed: Vec<_> = layout
            .groups()
            .iter()
            .map(|g| {
                let run = g.run_at(offset);
                (g.translate_y(offset), run.and_then(|r| r.first()))
            })
            .collect();
        println!("offset={offset} groups={placed:?}");
    }

    let target = IndexPath::row(120, 7);
    println!(
        "offset_for({target})={:?}",
        list.offset_for(target).expect("in range")
    );
}
