//! Scoped global event listeners.
//!
//! Drag tracking has to live at document scope: if the pointer moves
//! fast it leaves the divider handle's hit area, and an element-scoped
//! listener would drop the drag. These guards model that registration
//! as an acquire/release resource: acquired on component mount, always
//! released on [`Drop`], so repeated mounts never leak listeners.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Errors that can occur while registering global listeners.
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    /// A browser API call returned an error or a required object was missing.
    #[error("listener registration failed: {0}")]
    JsError(String),
}

impl From<JsValue> for ListenerError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Document-scoped pointer tracking for the duration of one drag.
///
/// Registers `mousemove`/`touchmove` (forwarding the horizontal
/// viewport coordinate) and `mouseup`/`touchend` (ending the drag) on
/// `document`. Both mouse and touch families get identical semantics.
/// All four listeners are removed when the guard is dropped.
pub struct DocumentDragListeners {
    document: web_sys::Document,
    mousemove: Closure<dyn FnMut(web_sys::MouseEvent)>,
    touchmove: Closure<dyn FnMut(web_sys::TouchEvent)>,
    mouseup: Closure<dyn FnMut(web_sys::Event)>,
    touchend: Closure<dyn FnMut(web_sys::Event)>,
}

impl DocumentDragListeners {
    /// Attach the four drag listeners to `document`.
    ///
    /// `on_move` receives the pointer's `clientX`; `on_end` fires on
    /// release from either pointer family.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::JsError`] if the document is
    /// unavailable or registration fails. On partial failure the
    /// already-registered listeners are detached by the guard's drop.
    pub fn attach(
        mut on_move: impl FnMut(f64) + Clone + 'static,
        mut on_end: impl FnMut() + Clone + 'static,
    ) -> Result<Self, ListenerError> {
        let document = document()?;

        let mousemove = {
            let mut on_move = on_move.clone();
            Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |event: web_sys::MouseEvent| {
                on_move(f64::from(event.client_x()));
            })
        };
        let touchmove =
            Closure::<dyn FnMut(web_sys::TouchEvent)>::new(move |event: web_sys::TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    on_move(f64::from(touch.client_x()));
                }
            });
        let mouseup = {
            let mut on_end = on_end.clone();
            Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
                on_end();
            })
        };
        let touchend = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            on_end();
        });

        let guard = Self {
            document,
            mousemove,
            touchmove,
            mouseup,
            touchend,
        };
        guard.register("mousemove", guard.mousemove.as_ref())?;
        guard.register("touchmove", guard.touchmove.as_ref())?;
        guard.register("mouseup", guard.mouseup.as_ref())?;
        guard.register("touchend", guard.touchend.as_ref())?;
        Ok(guard)
    }

    fn register(&self, kind: &str, callback: &JsValue) -> Result<(), ListenerError> {
        self.document
            .add_event_listener_with_callback(kind, callback.unchecked_ref())?;
        Ok(())
    }

    fn unregister(&self, kind: &str, callback: &JsValue) {
        // Best-effort: teardown failures must not cascade.
        let _ = self
            .document
            .remove_event_listener_with_callback(kind, callback.unchecked_ref());
    }
}

impl Drop for DocumentDragListeners {
    fn drop(&mut self) {
        self.unregister("mousemove", self.mousemove.as_ref());
        self.unregister("touchmove", self.touchmove.as_ref());
        self.unregister("mouseup", self.mouseup.as_ref());
        self.unregister("touchend", self.touchend.as_ref());
    }
}

/// Window-scoped `resize` listener held for a component's lifetime.
///
/// The mask editor recalibrates both raster layers whenever the
/// container width changes; this guard keeps the listener alive until
/// the component is torn down.
pub struct WindowResizeListener {
    window: web_sys::Window,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl WindowResizeListener {
    /// Attach a `resize` listener to `window`.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::JsError`] if the window is unavailable
    /// or registration fails.
    pub fn attach(mut on_resize: impl FnMut() + 'static) -> Result<Self, ListenerError> {
        let window =
            web_sys::window().ok_or_else(|| ListenerError::JsError("no global window".into()))?;
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            on_resize();
        });
        window.add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())?;
        Ok(Self { window, callback })
    }
}

impl Drop for WindowResizeListener {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.callback.as_ref().unchecked_ref());
    }
}

fn document() -> Result<web_sys::Document, ListenerError> {
    web_sys::window()
        .ok_or_else(|| ListenerError::JsError("no global window".into()))?
        .document()
        .ok_or_else(|| ListenerError::JsError("no document".into()))
}
