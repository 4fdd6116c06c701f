use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, PoisonError, RwLock};

use gpui::prelude::*;
use gpui::{
    Bounds, CursorStyle, MouseButton, MouseDownEvent, MouseMoveEvent, MouseUpEvent, Pixels,
    Point, Window, canvas, div,
};

use crate::geom::ScreenPoint;
use crate::interaction::{InputEvent, MouseButton as PlotButton};
use crate::plot::Plot;
use crate::render::{RenderList, RenderPass, draw_chrome, render};

use super::WindowRegistry;
use super::paint::paint_frame;

/// Chrome from the last full pass, replayed under every overlay pass.
#[derive(Debug, Default)]
struct FrameCache {
    origin: ScreenPoint,
    chrome: Option<RenderList>,
}

/// Root view of a plot window.
pub(crate) struct PlotWindow {
    plot: Arc<RwLock<Plot>>,
    cache: Rc<RefCell<FrameCache>>,
}

impl PlotWindow {
    pub(crate) fn new(plot: Arc<RwLock<Plot>>) -> Self {
        Self {
            plot,
            cache: Rc::new(RefCell::new(FrameCache::default())),
        }
    }

    fn local(&self, position: Point<Pixels>) -> ScreenPoint {
        let origin = self.cache.borrow().origin;
        ScreenPoint::new(
            f32::from(position.x) - origin.x,
            f32::from(position.y) - origin.y,
        )
    }

    fn dispatch(&self, event: InputEvent, window: &Window, cx: &mut Context<Self>) {
        let id = window.window_handle().window_id();
        let pass = cx
            .global_mut::<WindowRegistry>()
            .sessions
            .dispatch(&id, &event);
        if pass.is_some() {
            cx.notify();
        }
    }

    fn on_mouse_down(&mut self, ev: &MouseDownEvent, window: &mut Window, cx: &mut Context<Self>) {
        let Some(button) = plot_button(ev.button) else {
            return;
        };
        let event = InputEvent::ButtonPressed {
            button,
            position: self.local(ev.position),
        };
        self.dispatch(event, window, cx);
    }

    fn on_mouse_move(&mut self, ev: &MouseMoveEvent, window: &mut Window, cx: &mut Context<Self>) {
        let event = InputEvent::CursorMoved(self.local(ev.position));
        self.dispatch(event, window, cx);
    }

    fn on_mouse_up(&mut self, ev: &MouseUpEvent, window: &mut Window, cx: &mut Context<Self>) {
        let Some(button) = plot_button(ev.button) else {
            return;
        };
        let event = InputEvent::ButtonReleased {
            button,
            position: self.local(ev.position),
        };
        self.dispatch(event, window, cx);
    }
}

impl Render for PlotWindow {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let plot = Arc::clone(&self.plot);
        let cache = Rc::clone(&self.cache);

        div()
            .size_full()
            .cursor(CursorStyle::Crosshair)
            .child(
                canvas(
                    move |bounds, _, _| build_frame(&plot, &cache, bounds),
                    move |bounds, frame, window, cx| {
                        paint_frame(&frame, bounds, window, cx);
                    },
                )
                .size_full(),
            )
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, ev, window, cx| {
                    this.on_mouse_down(ev, window, cx);
                }),
            )
            .on_mouse_down(
                MouseButton::Right,
                cx.listener(|this, ev, window, cx| {
                    this.on_mouse_down(ev, window, cx);
                }),
            )
            .on_mouse_move(cx.listener(|this, ev, window, cx| {
                this.on_mouse_move(ev, window, cx);
            }))
            .on_mouse_up(
                MouseButton::Left,
                cx.listener(|this, ev, window, cx| {
                    this.on_mouse_up(ev, window, cx);
                }),
            )
            .on_mouse_up(
                MouseButton::Right,
                cx.listener(|this, ev, window, cx| {
                    this.on_mouse_up(ev, window, cx);
                }),
            )
            // Releases outside the window still end the selection.
            .on_mouse_up_out(
                MouseButton::Left,
                cx.listener(|this, ev, window, cx| {
                    this.on_mouse_up(ev, window, cx);
                }),
            )
    }
}

/// Record the frame for the current canvas bounds.
///
/// A canvas size change is fed to the plot as a resize. Chrome is rebuilt on
/// full passes only; every frame re-renders the body and selection on top.
fn build_frame(
    plot: &Arc<RwLock<Plot>>,
    cache: &Rc<RefCell<FrameCache>>,
    bounds: Bounds<Pixels>,
) -> RenderList {
    let mut plot = plot.write().unwrap_or_else(PoisonError::into_inner);
    let mut cache = cache.borrow_mut();
    cache.origin = ScreenPoint::new(f32::from(bounds.origin.x), f32::from(bounds.origin.y));

    let width = f32::from(bounds.size.width).round().max(1.0) as u32;
    let height = f32::from(bounds.size.height).round().max(1.0) as u32;
    if plot.size() != (width, height) {
        plot.handle_input(&InputEvent::Resized { width, height });
    }

    let pass = plot.next_pass();
    plot.resolve_bounds();
    if pass == RenderPass::Full || cache.chrome.is_none() {
        let mut chrome = RenderList::new(width as f32, height as f32);
        draw_chrome(&plot, &mut chrome);
        cache.chrome = Some(chrome);
    }

    let mut frame = RenderList::new(width as f32, height as f32);
    if let Some(chrome) = &cache.chrome {
        chrome.replay(&mut frame, ScreenPoint::default());
    }
    render(&mut plot, &mut frame, RenderPass::OverlayOnly);
    frame
}

fn plot_button(button: MouseButton) -> Option<PlotButton> {
    match button {
        MouseButton::Left => Some(PlotButton::Primary),
        MouseButton::Right => Some(PlotButton::Secondary),
        MouseButton::Middle => Some(PlotButton::Middle),
        MouseButton::Navigate(_) => None,
    }
}

