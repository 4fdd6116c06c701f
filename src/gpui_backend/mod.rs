//! GPUI window sessions.
//!
//! [`run_session`] opens one window for a shared [`Plot`] and runs the event
//! loop until the window closes. Mouse input is routed to the plot through a
//! [`SessionRegistry`] keyed by window id, kept as an application global.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, PoisonError, RwLock};

use gpui::{
    AppContext, Application, Bounds, Global, TitlebarOptions, WindowBounds, WindowId,
    WindowOptions, px, size,
};

use crate::error::PlotError;
use crate::interaction::{InputEvent, SessionRegistry};
use crate::plot::Plot;

mod paint;
mod view;

use view::PlotWindow;

/// Window id to plot mapping shared by every open plot window.
#[derive(Default)]
pub(crate) struct WindowRegistry {
    pub(crate) sessions: SessionRegistry<WindowId>,
}

impl Global for WindowRegistry {}

/// Show `plot` in a window titled `title`, blocking until it is closed.
///
/// The window starts at the plot's size. Closing it ends the event loop.
pub(crate) fn run_session(plot: Arc<RwLock<Plot>>, title: &str) -> Result<(), PlotError> {
    let (width, height) = plot.read().unwrap_or_else(PoisonError::into_inner).size();
    let title = title.to_string();
    let failure: Rc<RefCell<Option<PlotError>>> = Rc::new(RefCell::new(None));
    let failure_slot = Rc::clone(&failure);

    Application::new().run(move |cx| {
        if !cx.has_global::<WindowRegistry>() {
            cx.set_global(WindowRegistry::default());
        }
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(width as f32), px(height as f32)),
                cx,
            ))),
            titlebar: Some(TitlebarOptions {
                title: Some(title.clone().into()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let opened = cx.open_window(options, |window, cx| {
            let id = window.window_handle().window_id();
            cx.global_mut::<WindowRegistry>()
                .sessions
                .attach(id, &plot);
            log::debug!("plot window {id:?} attached");
            window.on_window_should_close(cx, move |_, cx| {
                cx.global_mut::<WindowRegistry>()
                    .sessions
                    .dispatch(&id, &InputEvent::CloseRequested);
                log::debug!("plot window {id:?} detached");
                cx.quit();
                true
            });
            cx.new(|_| PlotWindow::new(Arc::clone(&plot)))
        });

        if let Err(err) = opened {
            log::error!("failed to open plot window {title:?}: {err}");
            *failure_slot.borrow_mut() = Some(PlotError::Window(err.to_string()));
            cx.quit();
        }
    });

    match failure.borrow_mut().take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
