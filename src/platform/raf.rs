//! `requestAnimationFrame` scheduler

use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::scheduler::{FrameScheduler, TickHandle};

/// Frame scheduler backed by the browser's animation frame queue.
///
/// The host installs the frame callback once with [`RafScheduler::set_callback`];
/// every request re-queues that same closure.
pub struct RafScheduler {
    window: Window,
    callback: Option<Closure<dyn FnMut(f64)>>,
}

impl RafScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            callback: None,
        }
    }

    /// Closure run on every animation frame with the frame timestamp (ms)
    pub fn set_callback(&mut self, callback: Closure<dyn FnMut(f64)>) {
        self.callback = Some(callback);
    }
}

impl FrameScheduler for RafScheduler {
    fn request_tick(&mut self) -> TickHandle {
        let Some(callback) = &self.callback else {
            log::warn!("Frame requested before the callback was installed");
            return TickHandle(0);
        };
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => TickHandle(id),
            Err(e) => {
                log::warn!("requestAnimationFrame failed: {:?}", e);
                TickHandle(0)
            }
        }
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        if handle.0 != 0 {
            let _ = self.window.cancel_animation_frame(handle.0);
        }
    }
}
