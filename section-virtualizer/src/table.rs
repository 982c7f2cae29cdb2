use alloc::vec::Vec;

use crate::LayoutError;

/// Lower sentinel for breakpoint inputs, `-(2^53 - 1)`.
pub const MIN_SAFE_OFFSET: f64 = -9_007_199_254_740_991.0;
/// Upper sentinel for breakpoint inputs, `2^53 - 1`.
pub const MAX_SAFE_OFFSET: f64 = 9_007_199_254_740_991.0;

/// A piecewise-linear `scroll offset -> translateY` mapping for one group.
///
/// `inputs` and `outputs` are parallel, at least two entries long, and `inputs` is
/// non-decreasing, starting at [`MIN_SAFE_OFFSET`] and ending at [`MAX_SAFE_OFFSET`]. Offsets
/// outside the sampled range therefore clamp to the nearest edge translation.
///
/// The table is meant to be handed to a host interpolation primitive (an animated value bound to
/// the live scroll offset). [`BreakpointTable::sample`] evaluates it the same way for hosts
/// without one, and for tests.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawBreakpointTable"))]
pub struct BreakpointTable {
    inputs: Vec<f64>,
    outputs: Vec<f64>,
}

impl BreakpointTable {
    /// A table that pins the group at `translate_y` for every offset.
    pub fn constant(translate_y: f64) -> Self {
        Self {
            inputs: alloc::vec![MIN_SAFE_OFFSET, MAX_SAFE_OFFSET],
            outputs: alloc::vec![translate_y, translate_y],
        }
    }

    /// Builds a table from externally supplied breakpoints, checking every invariant
    /// [`BreakpointTable::sample`] relies on.
    pub fn from_parts(inputs: Vec<f64>, outputs: Vec<f64>) -> Result<Self, LayoutError> {
        let malformed = |reason: &'static str| Err(LayoutError::MalformedLayout { reason });
        if inputs.len() != outputs.len() {
            return malformed("breakpoint inputs and outputs differ in length");
        }
        if inputs.len() < 2 {
            return malformed("a breakpoint table needs at least two entries");
        }
        if inputs.first() != Some(&MIN_SAFE_OFFSET) || inputs.last() != Some(&MAX_SAFE_OFFSET) {
            return malformed("breakpoint inputs must start and end at the safe-offset sentinels");
        }
        if inputs.iter().any(|x| x.is_nan()) || inputs.windows(2).any(|w| w[0] > w[1]) {
            return malformed("breakpoint inputs must be non-decreasing");
        }
        if outputs.iter().any(|y| !y.is_finite()) {
            return malformed("breakpoint outputs must be finite");
        }
        Ok(Self { inputs, outputs })
    }

    pub fn inputs(&self) -> &[f64] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[f64] {
        &self.outputs
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Evaluates the mapping at `scroll_offset`.
    pub fn sample(&self, scroll_offset: f64) -> f64 {
        let (Some(&first_in), Some(&last_in)) = (self.inputs.first(), self.inputs.last()) else {
            return 0.0;
        };
        let first_out = self.outputs.first().copied().unwrap_or(0.0);
        let last_out = self.outputs.last().copied().unwrap_or(first_out);
        if scroll_offset.is_nan() || scroll_offset <= first_in {
            return first_out;
        }
        if scroll_offset >= last_in {
            return last_out;
        }

        // First input strictly greater than the offset; `hi > lo` is guaranteed.
        let hi = self.inputs.partition_point(|&x| x <= scroll_offset);
        let lo = hi - 1;
        let (x0, x1) = (self.inputs[lo], self.inputs[hi]);
        let (y0, y1) = (self.outputs[lo], self.outputs[hi]);
        if y0 == y1 {
            return y0;
        }
        let t = (scroll_offset - x0) / (x1 - x0);
        y0 + (y1 - y0) * t
    }

    /// Iterates `(input, output)` pairs.
    pub fn breakpoints(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.inputs.iter().copied().zip(self.outputs.iter().copied())
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawBreakpointTable {
    inputs: Vec<f64>,
    outputs: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawBreakpointTable> for BreakpointTable {
    type Error = LayoutError;

    fn try_from(raw: RawBreakpointTable) -> Result<Self, Self::Error> {
        Self::from_parts(raw.inputs, raw.outputs)
    }
}

/// Accumulates a group's table during the layout walk.
#[derive(Clone, Debug, Default)]
pub(crate) struct TableBuilder {
    inputs: Vec<f64>,
    outputs: Vec<f64>,
}

impl TableBuilder {
    pub(crate) fn seeded(translate_y: f64) -> Self {
        Self {
            inputs: alloc::vec![MIN_SAFE_OFFSET],
            outputs: alloc::vec![translate_y],
        }
    }

    /// Records the step that moves the group from `from` to a run starting at `to` as the
    /// bottom edge of the viewport crosses `to`.
    ///
    /// A group's first step also pins it at `to` for every earlier offset, so the group already
    /// sits on its first run before that run scrolls into view.
    pub(crate) fn push_step(&mut self, from: f64, to: f64, viewport_height: f64) {
        let from = if self.inputs.is_empty() {
            self.inputs.push(MIN_SAFE_OFFSET);
            self.outputs.push(to);
            to
        } else {
            from
        };

        // Zero-height or sub-pixel runs would otherwise step backwards.
        let floor = self.inputs.last().copied().unwrap_or(MIN_SAFE_OFFSET);
        let start = (to - viewport_height).max(floor);
        let end = (to + 1.0 - viewport_height).max(start);
        self.inputs.push(start);
        self.inputs.push(end);
        self.outputs.push(from);
        self.outputs.push(to);
    }

    /// Terminates the table with the upper sentinel. Groups that never received a run are
    /// pinned at `fallback`.
    pub(crate) fn finish(mut self, fallback: f64) -> BreakpointTable {
        let Some(&last) = self.outputs.last() else {
            return BreakpointTable::constant(fallback);
        };
        self.inputs.push(MAX_SAFE_OFFSET);
        self.outputs.push(last);
        BreakpointTable {
            inputs: self.inputs,
            outputs: self.outputs,
        }
    }
}
