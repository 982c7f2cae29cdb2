use alloc::vec::Vec;

use crate::error::{check_height, check_parameter};
use crate::table::TableBuilder;
use crate::{BreakpointTable, HeightModel, IndexPath, LayoutError, Run, SectionTops, index_paths};

/// Inputs of one layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutParams {
    /// Number of recyclable render groups.
    pub group_count: usize,
    /// A run closes once its accumulated height reaches this value.
    pub group_min_height: f64,
    /// Height of the list header, i.e. the offset of the first item.
    pub header_height: f64,
    pub footer_height: f64,
    pub viewport_height: f64,
}

impl LayoutParams {
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.group_count == 0 {
            return Err(LayoutError::InvalidGroupCount);
        }
        check_parameter("group_min_height", self.group_min_height)?;
        check_parameter("header_height", self.header_height)?;
        check_parameter("footer_height", self.footer_height)?;
        check_parameter("viewport_height", self.viewport_height)?;
        Ok(())
    }
}

/// One render group: the runs it displays over the whole list, and the table that moves its
/// container from run to run as the list scrolls.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupLayout {
    pub runs: Vec<Run>,
    pub table: BreakpointTable,
}

impl GroupLayout {
    /// Translation of the group container at `scroll_offset`.
    pub fn translate_y(&self, scroll_offset: f64) -> f64 {
        self.table.sample(scroll_offset)
    }

    /// The run this group should display at `scroll_offset`.
    ///
    /// While the table is mid-step the previous run is kept until the container has fully moved
    /// onto the next one.
    pub fn run_at(&self, scroll_offset: f64) -> Option<&Run> {
        let y = self.translate_y(scroll_offset);
        let n = self.runs.partition_point(|run| run.top <= y);
        self.runs.get(n.saturating_sub(1))
    }

    pub fn item_count(&self) -> usize {
        self.runs.iter().map(Run::len).sum()
    }
}

/// The complete derived model of a list: groups, their tables, section tops and content height.
///
/// A `Layout` is the pure output of [`partition`] and is never patched in place. Any change of
/// data, heights, header/footer or viewport produces a new one.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    groups: Vec<GroupLayout>,
    section_tops: SectionTops,
    content_height: f64,
    header_height: f64,
    footer_height: f64,
    item_count: usize,
    run_count: usize,
}

impl Layout {
    pub fn groups(&self) -> &[GroupLayout] {
        &self.groups
    }

    pub fn group(&self, index: usize) -> Option<&GroupLayout> {
        self.groups.get(index)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn section_tops(&self) -> &SectionTops {
        &self.section_tops
    }

    /// Header + items + footer.
    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    pub fn header_height(&self) -> f64 {
        self.header_height
    }

    pub fn footer_height(&self) -> f64 {
        self.footer_height
    }

    /// Number of items (section headers included).
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn run_count(&self) -> usize {
        self.run_count
    }

    /// All runs in the order they were closed. Their concatenation is the full item sequence.
    pub fn runs_in_order(&self) -> impl Iterator<Item = &Run> + '_ {
        let groups = self.groups.len().max(1);
        (0..self.run_count).filter_map(move |k| self.groups.get(k % groups)?.runs.get(k / groups))
    }

    /// The group whose runs contain `index_path`, with the index of that run.
    pub fn locate(&self, index_path: IndexPath) -> Option<(usize, usize)> {
        self.groups.iter().enumerate().find_map(|(g, group)| {
            let r = group
                .runs
                .partition_point(|run| run.last().is_some_and(|last| last < index_path));
            group
                .runs
                .get(r)
                .filter(|run| run.contains(index_path))
                .map(|_| (g, r))
        })
    }
}

/// Walk state threaded through the item sequence.
struct Walk {
    viewport_height: f64,
    group_min_height: f64,
    sum: f64,
    run_top: f64,
    run_height: f64,
    current: usize,
    pending: Vec<IndexPath>,
    last_offset: Vec<f64>,
    runs: Vec<Vec<Run>>,
    tables: Vec<TableBuilder>,
    section_tops: SectionTops,
    item_count: usize,
    run_count: usize,
}

impl Walk {
    fn new(params: &LayoutParams, sections: usize) -> Self {
        let groups = params.group_count;
        let mut tables = Vec::with_capacity(groups);
        tables.push(TableBuilder::seeded(params.header_height));
        tables.resize_with(groups, TableBuilder::default);
        Self {
            viewport_height: params.viewport_height,
            group_min_height: params.group_min_height,
            sum: params.header_height,
            run_top: params.header_height,
            run_height: 0.0,
            current: 0,
            pending: Vec::new(),
            last_offset: alloc::vec![params.header_height; groups],
            runs: (0..groups).map(|_| Vec::new()).collect(),
            tables,
            section_tops: SectionTops::with_capacity(sections),
            item_count: 0,
            run_count: 0,
        }
    }

    fn visit<M: HeightModel + ?Sized>(
        mut self,
        model: &M,
        index_path: IndexPath,
        terminal: bool,
    ) -> Result<Self, LayoutError> {
        let height = if index_path.is_header() {
            let height = check_height(index_path, model.section_height(index_path.section))?;
            self.section_tops.push(self.sum, height);
            height
        } else {
            check_height(index_path, model.row_height(index_path))?
        };
        self.sum += height;
        self.run_height += height;
        self.item_count += 1;
        self.pending.push(index_path);

        if self.run_height >= self.group_min_height || terminal {
            self.close_run(terminal);
        }
        Ok(self)
    }

    fn close_run(&mut self, terminal: bool) {
        let run = Run {
            items: core::mem::take(&mut self.pending),
            top: self.run_top,
            height: self.sum - self.run_top,
        };
        self.runs[self.current].push(run);
        self.run_count += 1;
        self.run_height = 0.0;
        self.run_top = self.sum;
        self.current = (self.current + 1) % self.runs.len();
        if terminal {
            return;
        }

        // The next group takes over at `sum` once the viewport bottom reaches it.
        let next = self.current;
        self.tables[next].push_step(self.last_offset[next], self.sum, self.viewport_height);
        self.last_offset[next] = self.sum;
    }

    fn finish(self, params: &LayoutParams) -> Layout {
        let groups = self
            .runs
            .into_iter()
            .zip(self.tables)
            .map(|(runs, table)| GroupLayout {
                runs,
                table: table.finish(params.header_height),
            })
            .collect();
        Layout {
            groups,
            section_tops: self.section_tops,
            content_height: self.sum + params.footer_height,
            header_height: params.header_height,
            footer_height: params.footer_height,
            item_count: self.item_count,
            run_count: self.run_count,
        }
    }
}

/// Partitions the items of `model` into `params.group_count` groups and builds every group's
/// breakpoint table in a single pass.
///
/// Items are visited in document order. A run accumulates items until its height reaches
/// `group_min_height` (or the last item is reached), then closes and the next group, round-robin,
/// starts a new run. Group 0 always owns the first run, starting at `header_height`.
///
/// Each non-final closure at content height `sum` adds a step to the next group's table: as the
/// viewport's bottom edge crosses `sum` (inputs `sum - viewport` and `sum + 1 - viewport`) the
/// group jumps from its previous run to the run starting at `sum`.
pub fn partition<M: HeightModel + ?Sized>(
    model: &M,
    params: &LayoutParams,
) -> Result<Layout, LayoutError> {
    params.validate()?;
    let sections = model.section_count();
    let total = model.item_count();
    let layout = index_paths(model)
        .enumerate()
        .try_fold(Walk::new(params, sections), |walk, (i, index_path)| {
            walk.visit(model, index_path, i + 1 == total)
        })?
        .finish(params);
    vdebug!(
        sections,
        items = layout.item_count,
        runs = layout.run_count,
        groups = params.group_count,
        content_height = layout.content_height,
        "partition"
    );
    Ok(layout)
}
