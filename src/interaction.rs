//! Drag-to-zoom gesture handling and the window-to-plot registry.
//!
//! Backends translate their native events into [`InputEvent`]s and feed them
//! to [`Plot::handle_input`], usually through a [`SessionRegistry`] keyed by
//! the backend's window handle.

use std::collections::HashMap;
use std::hash::Hash;
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::{Arc, PoisonError, RwLock, Weak};

use crate::geom::{ScreenPoint, ScreenRect};
use crate::plot::Plot;
use crate::render::RenderPass;
use crate::view::{Bounds, Range};

/// Mouse buttons reported by window backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Left button; drives zoom selection.
    Primary,
    /// Right button.
    Secondary,
    /// Middle button.
    Middle,
}

/// Backend-neutral input event, positions in window pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A button went down.
    ButtonPressed {
        /// Button pressed.
        button: MouseButton,
        /// Cursor position.
        position: ScreenPoint,
    },
    /// A button went up.
    ButtonReleased {
        /// Button released.
        button: MouseButton,
        /// Cursor position.
        position: ScreenPoint,
    },
    /// The cursor moved.
    CursorMoved(ScreenPoint),
    /// The drawable size changed.
    Resized {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },
    /// The window is about to close.
    CloseRequested,
}

/// State of the zoom gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    /// No selection in progress.
    #[default]
    Idle,
    /// Primary button held after a press inside the drawable interior.
    Selecting {
        /// Press position.
        anchor: ScreenPoint,
        /// Latest cursor position, clamped to the interior.
        cursor: ScreenPoint,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct InteractionState {
    gesture: Gesture,
    full_redraw: bool,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            gesture: Gesture::Idle,
            full_redraw: true,
        }
    }
}

impl Plot {
    /// Apply one input event.
    ///
    /// Returns the redraw the event calls for, if any. A committed zoom or a
    /// resize also arms the one-shot full redraw consumed by
    /// [`Plot::next_pass`].
    pub fn handle_input(&mut self, event: &InputEvent) -> Option<RenderPass> {
        let interior = self.interior();
        match *event {
            InputEvent::ButtonPressed {
                button: MouseButton::Primary,
                position,
            } => {
                if !interior.contains(position) {
                    return None;
                }
                self.interaction.gesture = Gesture::Selecting {
                    anchor: position,
                    cursor: position,
                };
                Some(RenderPass::OverlayOnly)
            }
            InputEvent::CursorMoved(position) => match &mut self.interaction.gesture {
                Gesture::Selecting { cursor, .. } => {
                    *cursor = interior.clamp_point(position);
                    Some(RenderPass::OverlayOnly)
                }
                Gesture::Idle => None,
            },
            InputEvent::ButtonReleased {
                button: MouseButton::Primary,
                position,
            } => {
                let Gesture::Selecting { anchor, .. } = self.interaction.gesture else {
                    return None;
                };
                self.interaction.gesture = Gesture::Idle;
                if self.commit_zoom(anchor, interior.clamp_point(position)) {
                    self.request_full_redraw();
                    Some(RenderPass::Full)
                } else {
                    Some(RenderPass::OverlayOnly)
                }
            }
            InputEvent::Resized { width, height } => {
                self.resize(width, height);
                Some(RenderPass::Full)
            }
            InputEvent::CloseRequested => {
                self.reset_interaction();
                None
            }
            InputEvent::ButtonPressed { .. } | InputEvent::ButtonReleased { .. } => None,
        }
    }

    /// Current gesture.
    pub fn gesture(&self) -> Gesture {
        self.interaction.gesture
    }

    /// Rectangle between the selection anchor and the clamped cursor.
    pub fn selection_rect(&self) -> Option<ScreenRect> {
        match self.interaction.gesture {
            Gesture::Selecting { anchor, cursor } => {
                Some(ScreenRect::new(anchor, cursor).normalized())
            }
            Gesture::Idle => None,
        }
    }

    /// Arm the one-shot full redraw.
    pub fn request_full_redraw(&mut self) {
        self.interaction.full_redraw = true;
    }

    /// Pass for the next frame, consuming the one-shot full redraw.
    pub fn next_pass(&mut self) -> RenderPass {
        if std::mem::take(&mut self.interaction.full_redraw) {
            RenderPass::Full
        } else {
            RenderPass::OverlayOnly
        }
    }

    /// Drop any gesture in progress and arm a full redraw.
    pub(crate) fn reset_interaction(&mut self) {
        self.interaction = InteractionState::default();
    }

    fn commit_zoom(&mut self, anchor: ScreenPoint, release: ScreenPoint) -> bool {
        let rect = ScreenRect::new(anchor, release).normalized();
        let min_px = self.config().min_zoom_px;
        if rect.width() < min_px || rect.height() < min_px {
            log::debug!(
                "zoom selection {}x{} px below {min_px} px, ignored",
                rect.width(),
                rect.height()
            );
            return false;
        }
        let Some(transform) = self.transform() else {
            return false;
        };

        let origin = self.interior().min;
        let local = rect.offset(ScreenPoint::new(-origin.x, -origin.y));
        // Top-left holds the smallest x and, with y flipped, the largest y.
        let top_left = transform.screen_to_data(local.min);
        let bottom_right = transform.screen_to_data(local.max);
        let x = Range::new(top_left.x, bottom_right.x);
        let y = Range::new(bottom_right.y, top_left.y);
        if !x.is_valid() || !y.is_valid() {
            return false;
        }
        self.set_bounds(Bounds::explicit(x, y));
        log::debug!(
            "zoomed to x [{}, {}] y [{}, {}]",
            x.min,
            x.max,
            y.min,
            y.max
        );
        true
    }
}

/// Maps window handles to the plots they display.
///
/// Entries hold weak references: the registry never keeps a plot alive. The
/// registry is `!Send`, so it stays on the thread that runs the event loop.
pub struct SessionRegistry<K> {
    sessions: HashMap<K, Weak<RwLock<Plot>>>,
    _event_thread: PhantomData<Rc<()>>,
}

impl<K: Eq + Hash> SessionRegistry<K> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
            _event_thread: PhantomData,
        }
    }

    /// Associate a window with a plot, replacing any previous association.
    pub fn attach(&mut self, key: K, plot: &Arc<RwLock<Plot>>) {
        self.sessions.insert(key, Arc::downgrade(plot));
    }

    /// Forget a window. Returns whether it was registered.
    pub fn detach(&mut self, key: &K) -> bool {
        self.sessions.remove(key).is_some()
    }

    /// The plot shown in a window, if it is still alive.
    pub fn get(&self, key: &K) -> Option<Arc<RwLock<Plot>>> {
        self.sessions.get(key).and_then(Weak::upgrade)
    }

    /// Check whether a window is registered.
    pub fn contains(&self, key: &K) -> bool {
        self.sessions.contains_key(key)
    }

    /// Number of registered windows.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Check whether no window is registered.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Route an event to the plot of a window.
    ///
    /// [`InputEvent::CloseRequested`] also detaches the window. Entries whose
    /// plot was dropped are removed.
    pub fn dispatch(&mut self, key: &K, event: &InputEvent) -> Option<RenderPass> {
        let Some(plot) = self.get(key) else {
            self.detach(key);
            return None;
        };
        if matches!(event, InputEvent::CloseRequested) {
            self.detach(key);
        }
        let mut plot = plot.write().unwrap_or_else(PoisonError::into_inner);
        plot.handle_input(event)
    }
}

impl<K: Eq + Hash> Default for SessionRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Series;
    use crate::view::AxisLimits;

    fn plot() -> Plot {
        // Interior (50, 10)-(690, 450): 640 x 440 pixels.
        let mut plot = Plot::new(700, 500);
        plot.set_x_limits(0.0, 64.0);
        plot.set_y_limits(0.0, 44.0);
        plot
    }

    fn press(x: f32, y: f32) -> InputEvent {
        InputEvent::ButtonPressed {
            button: MouseButton::Primary,
            position: ScreenPoint::new(x, y),
        }
    }

    fn release(x: f32, y: f32) -> InputEvent {
        InputEvent::ButtonReleased {
            button: MouseButton::Primary,
            position: ScreenPoint::new(x, y),
        }
    }

    fn drag(plot: &mut Plot, from: (f32, f32), to: (f32, f32)) -> Option<RenderPass> {
        plot.handle_input(&press(from.0, from.1));
        plot.handle_input(&InputEvent::CursorMoved(ScreenPoint::new(to.0, to.1)));
        plot.handle_input(&release(to.0, to.1))
    }

    #[test]
    fn drag_zoom_inverse_maps_rectangle() {
        let mut plot = plot();
        plot.next_pass();
        assert_eq!(
            drag(&mut plot, (150.0, 120.0), (350.0, 340.0)),
            Some(RenderPass::Full)
        );
        assert_eq!(
            plot.bounds(),
            Bounds::explicit(Range::new(10.0, 30.0), Range::new(11.0, 33.0))
        );
        assert_eq!(plot.next_pass(), RenderPass::Full);
        assert_eq!(plot.next_pass(), RenderPass::OverlayOnly);
    }

    #[test]
    fn drag_direction_does_not_matter() {
        let mut forward = plot();
        let mut backward = plot();
        drag(&mut forward, (150.0, 120.0), (350.0, 340.0));
        drag(&mut backward, (350.0, 340.0), (150.0, 120.0));
        assert_eq!(forward.bounds(), backward.bounds());

        let mut diagonal = plot();
        drag(&mut diagonal, (150.0, 340.0), (350.0, 120.0));
        assert_eq!(forward.bounds(), diagonal.bounds());
    }

    #[test]
    fn release_is_clamped_to_interior() {
        let mut plot = plot();
        drag(&mut plot, (370.0, 230.0), (900.0, -40.0));
        assert_eq!(
            plot.bounds(),
            Bounds::explicit(Range::new(32.0, 64.0), Range::new(22.0, 44.0))
        );
    }

    #[test]
    fn release_outside_window_ends_selection() {
        let mut plot = plot();
        plot.handle_input(&press(370.0, 230.0));
        assert_eq!(
            plot.handle_input(&release(-300.0, 2000.0)),
            Some(RenderPass::Full)
        );
        assert_eq!(plot.gesture(), Gesture::Idle);
        assert_eq!(plot.selection_rect(), None);
        assert_eq!(
            plot.bounds(),
            Bounds::explicit(Range::new(0.0, 32.0), Range::new(0.0, 22.0))
        );
    }

    #[test]
    fn press_outside_interior_is_ignored() {
        let mut plot = plot();
        assert_eq!(plot.handle_input(&press(20.0, 100.0)), None);
        assert_eq!(plot.gesture(), Gesture::Idle);
        assert_eq!(plot.handle_input(&release(300.0, 300.0)), None);
        assert_eq!(plot.bounds().x, AxisLimits::Explicit(Range::new(0.0, 64.0)));
    }

    #[test]
    fn tiny_selection_commits_nothing() {
        let mut plot = plot();
        let before = plot.bounds();
        assert_eq!(
            drag(&mut plot, (150.0, 110.0), (151.0, 300.0)),
            Some(RenderPass::OverlayOnly)
        );
        assert_eq!(plot.bounds(), before);
        assert_eq!(plot.gesture(), Gesture::Idle);
    }

    #[test]
    fn cursor_motion_tracks_clamped_selection() {
        let mut plot = plot();
        assert_eq!(
            plot.handle_input(&InputEvent::CursorMoved(ScreenPoint::new(100.0, 100.0))),
            None
        );
        plot.handle_input(&press(100.0, 100.0));
        assert_eq!(
            plot.handle_input(&InputEvent::CursorMoved(ScreenPoint::new(800.0, 20.0))),
            Some(RenderPass::OverlayOnly)
        );
        assert_eq!(
            plot.selection_rect(),
            Some(ScreenRect::new(
                ScreenPoint::new(100.0, 20.0),
                ScreenPoint::new(690.0, 100.0)
            ))
        );
    }

    #[test]
    fn secondary_button_does_not_select() {
        let mut plot = plot();
        let event = InputEvent::ButtonPressed {
            button: MouseButton::Secondary,
            position: ScreenPoint::new(200.0, 200.0),
        };
        assert_eq!(plot.handle_input(&event), None);
        assert_eq!(plot.gesture(), Gesture::Idle);
    }

    #[test]
    fn resize_updates_size_and_forces_full_pass() {
        let mut plot = plot();
        plot.next_pass();
        let event = InputEvent::Resized {
            width: 800,
            height: 600,
        };
        assert_eq!(plot.handle_input(&event), Some(RenderPass::Full));
        assert_eq!(plot.size(), (800, 600));
        assert_eq!(plot.interior().max, ScreenPoint::new(790.0, 550.0));
        assert_eq!(plot.next_pass(), RenderPass::Full);
    }

    #[test]
    fn registry_dispatches_and_detaches_on_close() {
        let shared = Arc::new(RwLock::new(plot()));
        let mut registry = SessionRegistry::new();
        registry.attach(7_u32, &shared);
        assert!(registry.contains(&7));

        registry.dispatch(&7, &press(150.0, 110.0));
        registry.dispatch(&7, &release(350.0, 310.0));
        assert!(shared.read().unwrap().bounds().x.is_explicit());
        assert_eq!(
            shared.read().unwrap().bounds().x.range(),
            Some(Range::new(10.0, 30.0))
        );

        assert_eq!(registry.dispatch(&7, &InputEvent::CloseRequested), None);
        assert!(registry.is_empty());
        assert_eq!(registry.dispatch(&7, &press(150.0, 110.0)), None);
        assert_eq!(shared.read().unwrap().gesture(), Gesture::Idle);
    }

    #[test]
    fn registry_does_not_keep_plots_alive() {
        let shared = Arc::new(RwLock::new(Plot::new(100, 100)));
        let mut registry = SessionRegistry::new();
        registry.attach("main", &shared);
        drop(shared);
        assert!(registry.get(&"main").is_none());
        assert_eq!(registry.dispatch(&"main", &InputEvent::CloseRequested), None);
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn zoom_resamples_function_series() {
        let mut plot = Plot::new(700, 500);
        plot.add_series(Series::function(|x| x, Range::new(0.0, 64.0), 64));
        plot.resolve_bounds();
        drag(&mut plot, (370.0, 230.0), (690.0, 10.0));
        plot.resolve_bounds();
        let xs = plot.series()[0].xs();
        assert!((xs[0] - 31.5).abs() < 1e-9);
        assert!(xs.iter().all(|x| *x >= 31.5 && *x < 63.0));
    }
}
