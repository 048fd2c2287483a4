//! DOM listener and animation frame lifetimes (WASM only)
//!
//! Everything registered with the browser is owned by a guard that
//! deregisters it on drop, so tearing down the game is just dropping it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::EventTarget;

/// An event listener that is removed when dropped
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event: &'static str, callback: F) -> Self
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(callback);
        if target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("Failed to add '{}' listener", event);
        }
        Self {
            target: target.clone(),
            event,
            callback,
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Self-rescheduling `requestAnimationFrame` loop
pub struct AnimationLoop {
    running: Rc<Cell<bool>>,
    handle: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl AnimationLoop {
    /// Start calling `frame` with the rAF timestamp once per display refresh
    pub fn start<F>(mut frame: F) -> Self
    where
        F: FnMut(f64) + 'static,
    {
        let running = Rc::new(Cell::new(true));
        let handle = Rc::new(Cell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        let next = callback.clone();
        let still_running = running.clone();
        let next_handle = handle.clone();
        *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
            if !still_running.get() {
                return;
            }
            frame(time);
            if still_running.get() {
                next_handle.set(request_frame(&next));
            }
        }));

        handle.set(request_frame(&callback));
        Self {
            running,
            handle,
            callback,
        }
    }

    /// Stop rescheduling and cancel the pending frame
    pub fn stop(&mut self) {
        if !self.running.replace(false) {
            return;
        }
        if let (Some(id), Some(window)) = (self.handle.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
        // Breaks the closure's reference to itself
        self.callback.borrow_mut().take();
        log::info!("Animation loop stopped");
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request_frame(callback: &FrameCallback) -> Option<i32> {
    let window = web_sys::window()?;
    let callback = callback.borrow();
    let closure = callback.as_ref()?;
    window
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .ok()
}
