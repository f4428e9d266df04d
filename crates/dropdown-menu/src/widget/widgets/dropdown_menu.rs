//! Dropdown menu widget implementation.
//!
//! This module provides [`DropdownMenu`], a panel that slides down from
//! beneath a navigation bar over a translucent backdrop, lists selectable
//! items (optionally filtered by a search row), and slides away again on
//! selection or dismissal.
//!
//! The widget draws nothing itself. It exposes frames, the animated backdrop
//! opacity and panel offset, and the row data through [`ListDataProvider`];
//! a renderer reads those each frame after calling
//! [`advance`](DropdownMenu::advance).
//!
//! # Example
//!
//! ```
//! use dropdown_menu::prelude::*;
//! use std::time::Duration;
//!
//! let ctx = UiContext::new();
//! let mut container = NavigationContainer::new(Rect::new(0.0, 0.0, 390.0, 844.0), 64.0);
//!
//! let menu = DropdownMenu::new(vec!["Inbox".into(), "Archive".into()], &ctx);
//! menu.item_selected.connect(|(item, index)| {
//!     println!("Selected {item} at row {index}");
//! });
//! container.set_dropdown_menu(Some(menu));
//!
//! let menu = container.dropdown_menu_mut().unwrap();
//! menu.show();
//! while menu.is_animating() {
//!     menu.advance(Duration::from_millis(16));
//! }
//! assert_eq!(menu.state(), PresentationState::Shown);
//!
//! menu.select_row(1);
//! assert_eq!(menu.state(), PresentationState::Hiding);
//! ```

use std::fmt;
use std::time::Duration;

use dropdown_menu_core::{Signal, UiContext};

use crate::config::{ConfigResult, MenuConfig};
use crate::geometry::{Color, Rect};
use crate::logging::targets;
use crate::model::{FilterEngine, ListDataProvider, ListSection, RowContent};
use crate::widget::animation::{AnimationOutcome, Interpolate, Transition};

// ============================================================================
// Presentation State
// ============================================================================

/// Visibility phase of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PresentationState {
    /// Not on screen.
    #[default]
    Hidden,
    /// Animating open.
    Showing,
    /// Fully open.
    Shown,
    /// Animating closed.
    Hiding,
}

impl fmt::Display for PresentationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hidden => "hidden",
            Self::Showing => "showing",
            Self::Shown => "shown",
            Self::Hiding => "hiding",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Geometry
// ============================================================================

/// The parts of the host the menu lays itself out against.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HostMetrics {
    /// Content region of the host, in host coordinates.
    pub content_bounds: Rect,
    /// Y coordinate of the navigation bar's bottom edge.
    pub navigation_bar_bottom: f32,
}

/// Resting layout of the menu for a given host, configuration and row count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelGeometry {
    /// Backdrop frame: from the navigation bar bottom to the bottom of the
    /// host content region.
    pub overlay_frame: Rect,
    /// Panel frame at rest. With a search header it starts `header_height`
    /// above the navigation bar bottom.
    pub panel_frame: Rect,
    /// Height of the search header band (0 without search).
    pub header_height: f32,
    /// Natural height of all rows plus the header band.
    pub content_height: f32,
    /// Content scroll offset applied on open; hides the search row under the
    /// navigation bar.
    pub initial_content_offset: f32,
}

impl PanelGeometry {
    /// Compute the resting layout.
    pub fn compute(host: &HostMetrics, config: &MenuConfig, row_count: usize) -> Self {
        let bounds = host.content_bounds;
        let top = host.navigation_bar_bottom;
        let available = (bounds.bottom() - top).max(0.0);
        let header_height = config.header_height();
        let content_height = header_height + row_count as f32 * config.row_height;
        let panel_height = content_height.min(available + header_height);

        Self {
            overlay_frame: Rect::new(bounds.left(), top, bounds.width(), available),
            panel_frame: Rect::new(bounds.left(), top - header_height, bounds.width(), panel_height),
            header_height,
            content_height,
            initial_content_offset: header_height,
        }
    }

    /// Panel offset that places the panel fully above its resting position.
    pub fn offscreen_offset(&self) -> f32 {
        -self.panel_frame.height()
    }
}

/// Animated presentation values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct PresentationValues {
    backdrop_opacity: f32,
    panel_offset: f32,
}

impl Interpolate for PresentationValues {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        Self {
            backdrop_opacity: self.backdrop_opacity.interpolate(&to.backdrop_opacity, t),
            panel_offset: self.panel_offset.interpolate(&to.panel_offset, t),
        }
    }
}

// ============================================================================
// DropdownMenu
// ============================================================================

/// A sliding, filterable dropdown menu.
///
/// All methods run on the UI context's thread. Filter results computed in
/// the background reach the menu only when that context is pumped.
///
/// # Signals
///
/// - `item_selected((String, usize))`: a row was selected; carries the item
///   text and its index in the filtered view
/// - `state_changed(PresentationState)`: the presentation state changed
/// - `animation_completed(AnimationOutcome)`: an open or close run ended,
///   either by reaching its target or by being retargeted
pub struct DropdownMenu {
    config: MenuConfig,
    filter: FilterEngine,
    state: PresentationState,
    visible: bool,
    host: Option<HostMetrics>,
    transition: Transition<PresentationValues>,
    content_offset: f32,
    /// Panel offset that puts the panel fully off-screen; refreshed from the
    /// live geometry whenever a run starts.
    closed_offset: f32,

    /// Signal emitted when a row is selected.
    pub item_selected: Signal<(String, usize)>,

    /// Signal emitted when the presentation state changes.
    pub state_changed: Signal<PresentationState>,

    /// Signal emitted once per animation run with how it ended.
    pub animation_completed: Signal<AnimationOutcome>,
}

impl fmt::Debug for DropdownMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropdownMenu")
            .field("state", &self.state)
            .field("visible", &self.visible)
            .field("attached", &self.host.is_some())
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

impl DropdownMenu {
    /// Create a hidden menu listing `items`, with default configuration.
    ///
    /// Filter results are delivered through `ctx`.
    pub fn new(items: Vec<String>, ctx: &UiContext) -> Self {
        let config = MenuConfig::default();
        let transition = Transition::new(PresentationValues::default())
            .with_easing(config.easing())
            .with_duration(config.duration());

        Self {
            config,
            filter: FilterEngine::new(items, ctx),
            state: PresentationState::Hidden,
            visible: false,
            host: None,
            transition,
            content_offset: 0.0,
            closed_offset: 0.0,
            item_selected: Signal::new(),
            state_changed: Signal::new(),
            animation_completed: Signal::new(),
        }
    }

    /// Replace the configuration (builder pattern).
    ///
    /// Fails if the configuration does not pass [`MenuConfig::validate`].
    pub fn with_config(mut self, config: MenuConfig) -> ConfigResult<Self> {
        self.set_config(config)?;
        Ok(self)
    }

    /// Enable or disable the search row (builder pattern).
    pub fn with_search_enabled(mut self, enabled: bool) -> Self {
        self.set_search_enabled(enabled);
        self
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// The current configuration.
    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// Replace the whole configuration.
    ///
    /// An invalid configuration is rejected and the current one kept.
    /// Animation settings apply from the next show or hide.
    pub fn set_config(&mut self, config: MenuConfig) -> ConfigResult<()> {
        config.validate()?;
        let search_was_enabled = self.config.search_enabled;
        self.config = config;
        if search_was_enabled && !self.config.search_enabled {
            self.clear_query();
        }
        Ok(())
    }

    /// Apply a single-setting change, dropping it if the result is invalid.
    fn update_config(&mut self, update: impl FnOnce(&mut MenuConfig)) {
        let mut config = self.config.clone();
        update(&mut config);
        match config.validate() {
            Ok(()) => self.config = config,
            Err(err) => tracing::warn!(target: targets::CONFIG, %err, "ignoring invalid menu setting"),
        }
    }

    /// Set the open/close animation duration in seconds. Non-positive
    /// durations are ignored.
    pub fn set_animation_duration(&mut self, seconds: f32) {
        self.update_config(|config| config.animation_duration = seconds);
    }

    /// Set the spring damping ratio and initial velocity.
    pub fn set_spring(&mut self, damping: f32, velocity: f32) {
        self.update_config(|config| {
            config.spring_damping = damping;
            config.spring_velocity = velocity;
        });
    }

    /// Set the backdrop color.
    pub fn set_backdrop_color(&mut self, color: Color) {
        self.config.backdrop_color = color;
    }

    /// Set the backdrop opacity reached when fully shown (clamped to 0..=1).
    pub fn set_backdrop_opacity(&mut self, opacity: f32) {
        self.update_config(|config| config.backdrop_opacity = opacity.clamp(0.0, 1.0));
    }

    /// Set the row background color.
    pub fn set_row_background_color(&mut self, color: Color) {
        self.config.row_background_color = color;
    }

    /// Set the separator color.
    pub fn set_separator_color(&mut self, color: Color) {
        self.config.separator_color = color;
    }

    /// Whether the search row is enabled.
    pub fn is_search_enabled(&self) -> bool {
        self.config.search_enabled
    }

    /// Enable or disable the search row. Disabling clears the query.
    pub fn set_search_enabled(&mut self, enabled: bool) {
        if self.config.search_enabled == enabled {
            return;
        }
        self.config.search_enabled = enabled;
        if !enabled {
            self.clear_query();
        }
    }

    /// Set the row height. Non-positive heights are ignored.
    pub fn set_row_height(&mut self, height: f32) {
        self.update_config(|config| config.row_height = height);
    }

    /// Set the search header band height. Negative heights are ignored.
    pub fn set_search_bar_height(&mut self, height: f32) {
        self.update_config(|config| config.search_bar_height = height);
    }

    // =========================================================================
    // Items and Filtering
    // =========================================================================

    /// Replace the item list, keeping the current query.
    pub fn set_items(&mut self, items: Vec<String>) {
        self.filter.set_items(items);
    }

    /// The full item list.
    pub fn items(&self) -> Vec<String> {
        self.filter.items()
    }

    /// The filtered view the rows are built from.
    pub fn filtered_items(&self) -> Vec<String> {
        self.filter.filtered_items()
    }

    /// Change the search query. Ignored unless search is enabled.
    pub fn set_query(&mut self, text: &str) {
        if !self.config.search_enabled {
            tracing::debug!(target: targets::MENU, "search disabled, ignoring query");
            return;
        }
        self.filter.set_query(text);
    }

    /// The current search query.
    pub fn query(&self) -> String {
        self.filter.query()
    }

    /// The query whose result the rows currently show.
    pub fn last_applied_query(&self) -> String {
        self.filter.last_applied_query()
    }

    /// Whether a query result is still being computed.
    pub fn is_filter_pending(&self) -> bool {
        self.filter.is_pending()
    }

    /// Signal emitted with the new row count when the filtered view changes.
    pub fn rows_changed(&self) -> &Signal<usize> {
        &self.filter.rows_changed
    }

    fn clear_query(&mut self) {
        if !self.filter.query().is_empty() {
            self.filter.set_query("");
        }
    }

    // =========================================================================
    // Attachment
    // =========================================================================

    /// Whether the menu is attached to a host.
    pub fn is_attached(&self) -> bool {
        self.host.is_some()
    }

    /// Host geometry recorded at attach time.
    pub fn host_metrics(&self) -> Option<HostMetrics> {
        self.host
    }

    pub(crate) fn attach(&mut self, host: HostMetrics) {
        self.host = Some(host);
        tracing::debug!(target: targets::MENU, ?host, "attached to host");
    }

    pub(crate) fn update_host_metrics(&mut self, host: HostMetrics) {
        if self.host.is_some() {
            self.host = Some(host);
        }
    }

    /// Drop the host reference and snap to hidden without animating.
    pub(crate) fn detach(&mut self) {
        if self.host.take().is_none() {
            return;
        }
        self.jump_to(PresentationValues {
            backdrop_opacity: 0.0,
            panel_offset: self.closed_offset,
        });
        self.visible = false;
        self.set_state(PresentationState::Hidden);
        tracing::debug!(target: targets::MENU, "detached from host");
    }

    // =========================================================================
    // Presentation
    // =========================================================================

    /// The current presentation state.
    pub fn state(&self) -> PresentationState {
        self.state
    }

    /// Whether the menu is on screen (including while animating).
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether an open or close animation is running.
    pub fn is_animating(&self) -> bool {
        self.transition.is_running()
    }

    /// Slide the menu open.
    ///
    /// Does nothing while showing or shown, or when not attached to a host.
    /// While hiding, the running animation turns back toward the open
    /// position from wherever it is.
    pub fn show(&mut self) {
        match self.state {
            PresentationState::Showing | PresentationState::Shown => {
                tracing::trace!(target: targets::MENU, state = %self.state, "show ignored");
                return;
            }
            PresentationState::Hiding => {
                self.refresh_closed_offset();
                self.animate_to(self.open_values());
                self.set_state(PresentationState::Showing);
                return;
            }
            PresentationState::Hidden => {}
        }

        let Some(geometry) = self.geometry() else {
            tracing::warn!(target: targets::MENU, "show() called on a menu with no host");
            return;
        };

        self.closed_offset = geometry.offscreen_offset();
        self.content_offset = geometry.initial_content_offset;
        self.transition.set_easing(self.config.easing());
        self.transition.set_duration(self.config.duration());
        self.jump_to(PresentationValues {
            backdrop_opacity: 0.0,
            panel_offset: self.closed_offset,
        });
        self.visible = true;
        self.animate_to(self.open_values());
        self.set_state(PresentationState::Showing);
    }

    /// Slide the menu closed.
    ///
    /// Does nothing while hidden or hiding.
    pub fn hide(&mut self) {
        match self.state {
            PresentationState::Hidden | PresentationState::Hiding => {
                tracing::trace!(target: targets::MENU, state = %self.state, "hide ignored");
                return;
            }
            PresentationState::Showing | PresentationState::Shown => {}
        }

        self.refresh_closed_offset();
        self.transition.set_easing(self.config.easing());
        self.transition.set_duration(self.config.duration());
        self.animate_to(PresentationValues {
            backdrop_opacity: 0.0,
            panel_offset: self.closed_offset,
        });
        self.set_state(PresentationState::Hiding);
    }

    /// Show when hidden, hide otherwise.
    pub fn toggle(&mut self) {
        if self.state == PresentationState::Hidden {
            self.show();
        } else {
            self.hide();
        }
    }

    /// Select the filtered row at `index`.
    ///
    /// Emits `item_selected` and then hides the menu, whatever the animation
    /// phase. Returns the selected item, or `None` if `index` is out of range.
    pub fn select_row(&mut self, index: usize) -> Option<String> {
        let item = self.filter.item_at(index)?;
        tracing::debug!(target: targets::MENU, index, item = %item, "row selected");
        self.item_selected.emit((item.clone(), index));
        self.hide();
        Some(item)
    }

    /// Advance the open/close animation by one frame.
    pub fn advance(&mut self, dt: Duration) {
        if let Some(outcome) = self.transition.advance(dt) {
            self.on_transition_complete(outcome);
        }
    }

    fn animate_to(&mut self, target: PresentationValues) {
        if let Some(outcome) = self.transition.animate_to(target) {
            self.on_transition_complete(outcome);
        }
    }

    fn jump_to(&mut self, value: PresentationValues) {
        if let Some(outcome) = self.transition.set_value(value) {
            self.on_transition_complete(outcome);
        }
    }

    /// Track row count or host changes made since the last run started.
    fn refresh_closed_offset(&mut self) {
        if let Some(geometry) = self.geometry() {
            self.closed_offset = geometry.offscreen_offset();
        }
    }

    fn on_transition_complete(&mut self, outcome: AnimationOutcome) {
        self.animation_completed.emit(outcome);
        if outcome == AnimationOutcome::Retargeted {
            tracing::trace!(target: targets::MENU, state = %self.state, "animation retargeted");
            return;
        }
        match self.state {
            PresentationState::Showing => self.set_state(PresentationState::Shown),
            PresentationState::Hiding => {
                self.visible = false;
                self.set_state(PresentationState::Hidden);
            }
            PresentationState::Hidden | PresentationState::Shown => {}
        }
    }

    fn open_values(&self) -> PresentationValues {
        PresentationValues {
            backdrop_opacity: self.config.backdrop_opacity,
            panel_offset: 0.0,
        }
    }

    fn set_state(&mut self, state: PresentationState) {
        if self.state == state {
            return;
        }
        tracing::debug!(target: targets::MENU, from = %self.state, to = %state, "presentation state changed");
        self.state = state;
        self.state_changed.emit(state);
    }

    // =========================================================================
    // Render Data
    // =========================================================================

    /// Resting layout for the current host, configuration and rows.
    pub fn geometry(&self) -> Option<PanelGeometry> {
        self.host
            .map(|host| PanelGeometry::compute(&host, &self.config, self.filter.row_count()))
    }

    /// Current backdrop opacity.
    pub fn backdrop_opacity(&self) -> f32 {
        self.transition.value().backdrop_opacity
    }

    /// Backdrop color with the current animated opacity applied.
    pub fn backdrop_fill(&self) -> Color {
        self.config.backdrop_color.with_opacity(self.backdrop_opacity())
    }

    /// Current vertical offset of the panel from its resting position.
    pub fn panel_offset(&self) -> f32 {
        self.transition.value().panel_offset
    }

    /// Panel frame including the current animation offset.
    pub fn panel_frame(&self) -> Option<Rect> {
        let offset = self.panel_offset();
        self.geometry()
            .map(|geometry| geometry.panel_frame.offset(0.0, offset))
    }

    /// Content scroll offset of the panel.
    pub fn content_offset(&self) -> f32 {
        self.content_offset
    }

    /// Update the content scroll offset (e.g. when the user pulls down to
    /// reveal the search row).
    pub fn set_content_offset(&mut self, offset: f32) {
        self.content_offset = offset.max(0.0);
    }
}

static_assertions::assert_impl_all!(DropdownMenu: Send);

impl ListDataProvider for DropdownMenu {
    fn row_count(&self, section: usize) -> usize {
        match ListSection::from_index(section) {
            Some(ListSection::Search) => usize::from(self.config.search_enabled),
            Some(ListSection::Items) => self.filter.row_count(),
            None => 0,
        }
    }

    fn row(&self, section: usize, row: usize) -> Option<RowContent> {
        match ListSection::from_index(section)? {
            ListSection::Search => (self.config.search_enabled && row == 0).then(|| {
                RowContent::SearchField {
                    query: self.filter.query(),
                }
            }),
            ListSection::Items => self
                .filter
                .item_at(row)
                .map(|text| RowContent::Item { text }),
        }
    }

    fn row_height(&self) -> f32 {
        self.config.row_height
    }

    fn did_select_row(&mut self, section: usize, row: usize) -> bool {
        match ListSection::from_index(section) {
            Some(ListSection::Items) => self.select_row(row).is_some(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use parking_lot::Mutex;
    use std::sync::Arc;

    const FRAME: Duration = Duration::from_millis(16);

    fn names() -> Vec<String> {
        ["Julianne", "Eddie", "Patricia", "J.K.", "Alejandro"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn host() -> HostMetrics {
        HostMetrics {
            content_bounds: Rect::new(0.0, 0.0, 320.0, 480.0),
            navigation_bar_bottom: 64.0,
        }
    }

    fn attached_menu(ctx: &UiContext) -> DropdownMenu {
        let mut menu = DropdownMenu::new(names(), ctx);
        menu.attach(host());
        menu
    }

    fn settle(menu: &mut DropdownMenu) {
        for _ in 0..1000 {
            if !menu.is_animating() {
                return;
            }
            menu.advance(FRAME);
        }
        panic!("animation never finished");
    }

    fn record_states(menu: &DropdownMenu) -> Arc<Mutex<Vec<PresentationState>>> {
        let states = Arc::new(Mutex::new(Vec::new()));
        let states_clone = states.clone();
        menu.state_changed.connect(move |state| states_clone.lock().push(*state));
        states
    }

    #[test]
    fn test_geometry_without_search() {
        let geometry = PanelGeometry::compute(&host(), &MenuConfig::default(), 5);
        assert_eq!(geometry.overlay_frame, Rect::new(0.0, 64.0, 320.0, 416.0));
        assert_eq!(geometry.panel_frame, Rect::new(0.0, 64.0, 320.0, 220.0));
        assert_eq!(geometry.header_height, 0.0);
        assert_eq!(geometry.initial_content_offset, 0.0);
        assert_eq!(geometry.offscreen_offset(), -220.0);
    }

    #[test]
    fn test_geometry_with_search_header() {
        let config = MenuConfig::default().with_search_enabled(true);
        let geometry = PanelGeometry::compute(&host(), &config, 2);
        assert_eq!(geometry.panel_frame, Rect::new(0.0, 20.0, 320.0, 132.0));
        assert_eq!(geometry.content_height, 132.0);
        assert_eq!(geometry.initial_content_offset, 44.0);
    }

    #[test]
    fn test_geometry_caps_to_available_space() {
        let geometry = PanelGeometry::compute(&host(), &MenuConfig::default(), 100);
        assert_eq!(geometry.content_height, 4400.0);
        assert_eq!(geometry.panel_frame.height(), 416.0);

        let config = MenuConfig::default().with_search_enabled(true);
        let geometry = PanelGeometry::compute(&host(), &config, 100);
        assert_eq!(geometry.panel_frame.height(), 460.0);
    }

    #[test]
    fn test_show_runs_to_shown() {
        crate::logging::init_test_logging();
        let ctx = UiContext::new();
        let mut menu = attached_menu(&ctx);
        let states = record_states(&menu);

        menu.show();
        assert_eq!(menu.state(), PresentationState::Showing);
        assert!(menu.is_visible());
        assert_eq!(menu.backdrop_opacity(), 0.0);
        assert_eq!(menu.panel_offset(), -220.0);

        settle(&mut menu);
        assert_eq!(menu.state(), PresentationState::Shown);
        assert_eq!(menu.backdrop_opacity(), 0.3);
        assert_eq!(menu.panel_offset(), 0.0);
        assert_eq!(menu.panel_frame(), Some(Rect::new(0.0, 64.0, 320.0, 220.0)));
        assert_eq!(*states.lock(), vec![PresentationState::Showing, PresentationState::Shown]);
    }

    #[test]
    fn test_show_while_shown_is_noop() {
        let ctx = UiContext::new();
        let mut menu = attached_menu(&ctx);
        menu.show();
        settle(&mut menu);
        let states = record_states(&menu);

        menu.show();
        assert_eq!(menu.state(), PresentationState::Shown);
        assert!(!menu.is_animating());
        assert!(states.lock().is_empty());
    }

    #[test]
    fn test_show_while_showing_does_not_restart() {
        let ctx = UiContext::new();
        let mut menu = attached_menu(&ctx);
        menu.show();
        menu.advance(Duration::from_millis(100));
        let offset = menu.panel_offset();

        menu.show();
        assert_eq!(menu.panel_offset(), offset);
        assert_eq!(menu.state(), PresentationState::Showing);
    }

    #[test]
    fn test_show_without_host_is_noop() {
        let ctx = UiContext::new();
        let mut menu = DropdownMenu::new(names(), &ctx);
        menu.show();
        assert_eq!(menu.state(), PresentationState::Hidden);
        assert!(!menu.is_visible());
        assert!(!menu.is_animating());
    }

    #[test]
    fn test_hide_runs_to_hidden() {
        let ctx = UiContext::new();
        let mut menu = attached_menu(&ctx);
        menu.show();
        settle(&mut menu);
        let states = record_states(&menu);

        menu.hide();
        assert_eq!(menu.state(), PresentationState::Hiding);
        assert!(menu.is_visible());
        settle(&mut menu);

        assert_eq!(menu.state(), PresentationState::Hidden);
        assert!(!menu.is_visible());
        assert_eq!(menu.backdrop_opacity(), 0.0);
        assert_eq!(menu.panel_offset(), -220.0);
        assert_eq!(*states.lock(), vec![PresentationState::Hiding, PresentationState::Hidden]);
    }

    #[test]
    fn test_hide_while_hidden_is_noop() {
        let ctx = UiContext::new();
        let mut menu = attached_menu(&ctx);
        let states = record_states(&menu);
        menu.hide();
        assert_eq!(menu.state(), PresentationState::Hidden);
        assert!(states.lock().is_empty());
    }

    #[test]
    fn test_hide_interrupts_showing() {
        let ctx = UiContext::new();
        let mut menu = attached_menu(&ctx);
        menu.show();
        menu.advance(Duration::from_millis(100));

        menu.hide();
        assert_eq!(menu.state(), PresentationState::Hiding);
        settle(&mut menu);
        assert_eq!(menu.state(), PresentationState::Hidden);
    }

    #[test]
    fn test_show_while_hiding_retargets() {
        let ctx = UiContext::new();
        let mut menu = attached_menu(&ctx);
        menu.show();
        settle(&mut menu);
        menu.hide();
        menu.advance(Duration::from_millis(100));
        let opacity = menu.backdrop_opacity();
        let states = record_states(&menu);

        menu.show();
        assert_eq!(menu.state(), PresentationState::Showing);
        assert_eq!(menu.backdrop_opacity(), opacity);
        assert!(menu.is_visible());

        settle(&mut menu);
        assert_eq!(menu.state(), PresentationState::Shown);
        assert_eq!(*states.lock(), vec![PresentationState::Showing, PresentationState::Shown]);
    }

    #[test]
    fn test_hide_after_rows_grow_leaves_screen() {
        let ctx = UiContext::new();
        let mut menu = DropdownMenu::new(vec!["Eddie".to_string()], &ctx);
        menu.attach(host());
        menu.show();
        settle(&mut menu);
        assert_eq!(menu.panel_frame(), Some(Rect::new(0.0, 64.0, 320.0, 44.0)));

        menu.set_items(names());
        assert_eq!(menu.panel_frame(), Some(Rect::new(0.0, 64.0, 320.0, 220.0)));

        menu.hide();
        settle(&mut menu);
        assert_eq!(menu.state(), PresentationState::Hidden);
        assert_eq!(menu.panel_offset(), -220.0);
        let frame = menu.panel_frame().unwrap();
        assert!(frame.bottom() <= 64.0, "panel bottom at {}", frame.bottom());
    }

    #[test]
    fn test_show_while_hiding_after_rows_grow() {
        let ctx = UiContext::new();
        let mut menu = DropdownMenu::new(vec!["Eddie".to_string()], &ctx);
        menu.attach(host());
        menu.show();
        settle(&mut menu);
        menu.hide();
        menu.advance(FRAME);

        menu.set_items(names());
        menu.show();
        settle(&mut menu);
        menu.hide();
        settle(&mut menu);
        assert_eq!(menu.panel_offset(), -220.0);
    }

    #[test]
    fn test_animation_outcomes() {
        let ctx = UiContext::new();
        let mut menu = attached_menu(&ctx);
        let outcomes = Arc::new(Mutex::new(Vec::new()));
        let outcomes_clone = outcomes.clone();
        menu.animation_completed
            .connect(move |outcome| outcomes_clone.lock().push(*outcome));

        menu.show();
        menu.advance(Duration::from_millis(100));
        menu.hide();
        assert_eq!(*outcomes.lock(), vec![AnimationOutcome::Retargeted]);

        settle(&mut menu);
        menu.show();
        settle(&mut menu);
        assert_eq!(
            *outcomes.lock(),
            vec![
                AnimationOutcome::Retargeted,
                AnimationOutcome::Finished,
                AnimationOutcome::Finished,
            ]
        );
    }

    #[test]
    fn test_detach_while_animating_reports_retargeted() {
        let ctx = UiContext::new();
        let mut menu = attached_menu(&ctx);
        let outcomes = Arc::new(Mutex::new(Vec::new()));
        let outcomes_clone = outcomes.clone();
        menu.animation_completed
            .connect(move |outcome| outcomes_clone.lock().push(*outcome));

        menu.show();
        menu.advance(FRAME);
        menu.detach();
        menu.advance(FRAME);
        assert_eq!(*outcomes.lock(), vec![AnimationOutcome::Retargeted]);
    }

    #[test]
    fn test_set_config_rejects_invalid() {
        let ctx = UiContext::new();
        let invalid = MenuConfig::default()
            .with_backdrop(Color::BLACK, 5.0)
            .with_row_height(-44.0);

        let err = DropdownMenu::new(names(), &ctx).with_config(invalid.clone()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "backdrop_opacity", .. }));

        let mut menu = attached_menu(&ctx);
        assert!(menu.set_config(invalid).is_err());
        assert_eq!(menu.config(), &MenuConfig::default());

        menu.show();
        settle(&mut menu);
        assert_eq!(menu.backdrop_opacity(), 0.3);
        assert_eq!(menu.panel_frame(), Some(Rect::new(0.0, 64.0, 320.0, 220.0)));
    }

    #[test]
    fn test_setters_ignore_invalid_values() {
        let ctx = UiContext::new();
        let mut menu = attached_menu(&ctx);

        menu.set_row_height(-44.0);
        menu.set_search_bar_height(f32::NAN);
        menu.set_animation_duration(0.0);
        menu.set_spring(-1.0, 0.5);
        assert_eq!(menu.config(), &MenuConfig::default());

        menu.set_backdrop_opacity(5.0);
        assert_eq!(menu.config().backdrop_opacity, 1.0);
        menu.set_backdrop_opacity(f32::NAN);
        assert_eq!(menu.config().backdrop_opacity, 1.0);

        menu.set_row_height(50.0);
        assert_eq!(menu.row_height(), 50.0);
    }

    #[test]
    fn test_toggle() {
        let ctx = UiContext::new();
        let mut menu = attached_menu(&ctx);
        menu.toggle();
        assert_eq!(menu.state(), PresentationState::Showing);
        menu.toggle();
        assert_eq!(menu.state(), PresentationState::Hiding);
        menu.toggle();
        assert_eq!(menu.state(), PresentationState::Hiding);
        settle(&mut menu);
        assert_eq!(menu.state(), PresentationState::Hidden);
    }

    #[test]
    fn test_select_row_emits_then_hides() {
        let ctx = UiContext::new();
        let mut menu = attached_menu(&ctx);
        menu.show();
        settle(&mut menu);

        let selected = Arc::new(Mutex::new(Vec::new()));
        let selected_clone = selected.clone();
        menu.item_selected.connect(move |(item, index)| {
            selected_clone.lock().push((item.clone(), *index));
        });

        assert_eq!(menu.select_row(2), Some("Patricia".to_string()));
        assert_eq!(*selected.lock(), vec![("Patricia".to_string(), 2)]);
        assert_eq!(menu.state(), PresentationState::Hiding);

        assert_eq!(menu.select_row(5), None);
        assert_eq!(selected.lock().len(), 1);
    }

    #[test]
    fn test_select_row_while_showing() {
        let ctx = UiContext::new();
        let mut menu = attached_menu(&ctx);
        menu.show();
        menu.advance(FRAME);
        assert_eq!(menu.select_row(0), Some("Julianne".to_string()));
        assert_eq!(menu.state(), PresentationState::Hiding);
    }

    #[test]
    fn test_search_section_rows() {
        let ctx = UiContext::new();
        let mut menu = DropdownMenu::new(names(), &ctx);
        assert_eq!(menu.row_count(0), 0);
        assert_eq!(menu.row(0, 0), None);
        assert_eq!(menu.row_count(1), 5);

        menu.set_search_enabled(true);
        assert_eq!(menu.section_count(), 2);
        assert_eq!(menu.row_count(0), 1);
        assert_eq!(menu.row(0, 0), Some(RowContent::SearchField { query: String::new() }));
        assert_eq!(menu.row(1, 3), Some(RowContent::Item { text: "J.K.".into() }));
        assert_eq!(menu.row(1, 5), None);
        assert!(!menu.did_select_row(0, 0));
    }

    #[test]
    fn test_query_ignored_without_search() {
        let ctx = UiContext::new();
        let mut menu = DropdownMenu::new(names(), &ctx);
        menu.set_query("J");
        assert_eq!(menu.query(), "");
        assert!(!menu.is_filter_pending());
    }

    #[test]
    fn test_query_filters_rows() {
        let ctx = UiContext::new();
        let mut menu = DropdownMenu::new(names(), &ctx).with_search_enabled(true);
        menu.set_query("j");
        assert!(ctx.process_events_until(Duration::from_secs(5), || !menu.is_filter_pending()));

        assert_eq!(menu.row_count(1), 2);
        assert!(menu.did_select_row(1, 1));
    }

    #[test]
    fn test_backdrop_fill() {
        let ctx = UiContext::new();
        let mut menu = attached_menu(&ctx);
        menu.set_backdrop_color(Color::from_rgb8(10, 20, 30));
        assert_eq!(menu.backdrop_fill(), Color::from_rgba8(10, 20, 30, 0));
        menu.show();
        settle(&mut menu);
        assert_eq!(menu.backdrop_fill().a, 77);
    }

    #[test]
    fn test_detach_snaps_hidden() {
        let ctx = UiContext::new();
        let mut menu = attached_menu(&ctx);
        menu.show();
        menu.advance(FRAME);

        menu.detach();
        assert!(!menu.is_attached());
        assert_eq!(menu.state(), PresentationState::Hidden);
        assert!(!menu.is_visible());
        assert!(!menu.is_animating());
        assert_eq!(menu.panel_frame(), None);
    }
}
