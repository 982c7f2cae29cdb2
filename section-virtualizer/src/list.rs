use crate::error::check_parameter;
use crate::{
    Decoration, HeightModel, IndexPath, Layout, LayoutError, LayoutParams, ListOptions,
    index_path_offset, partition,
};

/// Owns every input of a layout pass and the [`Layout`] derived from them.
///
/// Each setter recomputes the layout from scratch. Inputs and layout are committed together: if
/// the new inputs fail to lay out, the previous inputs and layout are kept and the error is
/// returned, so the held layout always matches the held inputs.
#[derive(Clone, Debug)]
pub struct ListLayout<M> {
    model: M,
    options: ListOptions,
    header: Decoration,
    footer: Decoration,
    viewport_height: Option<f64>,
    layout: Layout,
}

impl<M: HeightModel> ListLayout<M> {
    pub fn new(model: M, options: ListOptions) -> Result<Self, LayoutError> {
        Self::with_decorations(model, options, Decoration::Absent, Decoration::Absent)
    }

    /// Creates a list whose header/footer states are known up front (typically
    /// [`Decoration::Pending`] when the host renders them but has not measured them yet).
    pub fn with_decorations(
        model: M,
        options: ListOptions,
        header: Decoration,
        footer: Decoration,
    ) -> Result<Self, LayoutError> {
        let layout = compute(&model, &options, header, footer, None)?;
        Ok(Self {
            model,
            options,
            header,
            footer,
            viewport_height: None,
            layout,
        })
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    pub fn header(&self) -> Decoration {
        self.header
    }

    pub fn footer(&self) -> Decoration {
        self.footer
    }

    /// Height of the list header, zero while absent or unmeasured.
    pub fn list_header_height(&self) -> f64 {
        self.header.height()
    }

    /// `true` while a header or footer is rendered but not yet measured.
    pub fn is_provisional(&self) -> bool {
        self.header.is_pending() || self.footer.is_pending()
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
            .unwrap_or(self.options.default_viewport_height)
    }

    pub fn params(&self) -> LayoutParams {
        params(&self.options, self.header, self.footer, self.viewport_height)
    }

    /// Replaces the data snapshot.
    pub fn set_model(&mut self, model: M) -> Result<(), LayoutError> {
        let layout = compute(
            &model,
            &self.options,
            self.header,
            self.footer,
            self.viewport_height,
        )?;
        self.model = model;
        self.layout = layout;
        Ok(())
    }

    pub fn set_options(&mut self, options: ListOptions) -> Result<(), LayoutError> {
        let layout = compute(
            &self.model,
            &options,
            self.header,
            self.footer,
            self.viewport_height,
        )?;
        self.options = options;
        self.layout = layout;
        Ok(())
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut ListOptions)) -> Result<(), LayoutError> {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next)
    }

    pub fn set_viewport_height(&mut self, height: f64) -> Result<(), LayoutError> {
        let height = check_parameter("viewport_height", height)?;
        if self.viewport_height == Some(height) {
            return Ok(());
        }
        vtrace!(height, "ListLayout::set_viewport_height");
        let layout = compute(
            &self.model,
            &self.options,
            self.header,
            self.footer,
            Some(height),
        )?;
        self.viewport_height = Some(height);
        self.layout = layout;
        Ok(())
    }

    pub fn set_header(&mut self, header: Decoration) -> Result<(), LayoutError> {
        let layout = compute(
            &self.model,
            &self.options,
            header,
            self.footer,
            self.viewport_height,
        )?;
        self.header = header;
        self.layout = layout;
        Ok(())
    }

    pub fn set_footer(&mut self, footer: Decoration) -> Result<(), LayoutError> {
        let layout = compute(
            &self.model,
            &self.options,
            self.header,
            footer,
            self.viewport_height,
        )?;
        self.footer = footer;
        self.layout = layout;
        Ok(())
    }

    /// Records the measured height of the list header.
    pub fn on_header_layout(&mut self, height: f64) -> Result<(), LayoutError> {
        self.set_header(Decoration::Measured(height))
    }

    /// Records the measured height of the list footer.
    pub fn on_footer_layout(&mut self, height: f64) -> Result<(), LayoutError> {
        self.set_footer(Decoration::Measured(height))
    }

    /// Scroll offset that brings `index_path` to the top of the viewport, list header included.
    pub fn offset_for(&self, index_path: IndexPath) -> Result<f64, LayoutError> {
        Ok(self.list_header_height() + index_path_offset(&self.model, index_path)?)
    }
}

fn params(
    options: &ListOptions,
    header: Decoration,
    footer: Decoration,
    viewport_height: Option<f64>,
) -> LayoutParams {
    let viewport_height = viewport_height.unwrap_or(options.default_viewport_height);
    LayoutParams {
        group_count: options.group_count,
        group_min_height: options.resolved_group_min_height(viewport_height),
        header_height: header.height(),
        footer_height: footer.height(),
        viewport_height,
    }
}

fn compute<M: HeightModel>(
    model: &M,
    options: &ListOptions,
    header: Decoration,
    footer: Decoration,
    viewport_height: Option<f64>,
) -> Result<Layout, LayoutError> {
    let params = params(options, header, footer, viewport_height);
    partition(model, &params).inspect_err(|_err| {
        vwarn!(error = %_err, "layout recomputation rejected");
    })
}
