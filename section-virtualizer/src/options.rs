use alloc::sync::Arc;

/// A callback fired with every live scroll offset the list receives.
pub type OnScrollCallback = Arc<dyn Fn(f64) + Send + Sync>;

/// Configuration for [`crate::ListLayout`] and the adapter's scroll tracking.
///
/// This type is cheap to clone: the callback is stored in an `Arc`.
#[derive(Clone)]
pub struct ListOptions {
    /// Number of recyclable render groups.
    pub group_count: usize,
    /// Minimum height of a run. `None` uses a third of the viewport height.
    pub group_min_height: Option<f64>,
    /// Minimum time between two group content updates while scrolling.
    pub update_time_interval_ms: u64,
    /// Viewport height assumed until the host reports the real one.
    pub default_viewport_height: f64,
    /// Optional observer of live scroll offsets.
    pub on_scroll: Option<OnScrollCallback>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            group_count: 4,
            group_min_height: None,
            update_time_interval_ms: 150,
            default_viewport_height: 700.0,
            on_scroll: None,
        }
    }
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group_count(mut self, group_count: usize) -> Self {
        self.group_count = group_count;
        self
    }

    pub fn with_group_min_height(mut self, group_min_height: f64) -> Self {
        self.group_min_height = Some(group_min_height);
        self
    }

    pub fn with_update_time_interval_ms(mut self, interval_ms: u64) -> Self {
        self.update_time_interval_ms = interval_ms;
        self
    }

    pub fn with_default_viewport_height(mut self, height: f64) -> Self {
        self.default_viewport_height = height;
        self
    }

    pub fn with_on_scroll(
        mut self,
        on_scroll: Option<impl Fn(f64) + Send + Sync + 'static>,
    ) -> Self {
        self.on_scroll = on_scroll.map(|f| Arc::new(f) as _);
        self
    }

    /// The minimum run height for a viewport of `viewport_height`.
    pub fn resolved_group_min_height(&self, viewport_height: f64) -> f64 {
        self.group_min_height.unwrap_or(viewport_height / 3.0)
    }
}

impl core::fmt::Debug for ListOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListOptions")
            .field("group_count", &self.group_count)
            .field("group_min_height", &self.group_min_height)
            .field("update_time_interval_ms", &self.update_time_interval_ms)
            .field("default_viewport_height", &self.default_viewport_height)
            .field("on_scroll", &self.on_scroll.is_some())
            .finish()
    }
}
