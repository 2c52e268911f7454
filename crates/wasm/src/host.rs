//! Host bindings driven from JavaScript.
//!
//! The page owns the `requestAnimationFrame` loop and the DOM listeners.
//! Rust only records what the surface wants: whether a frame is pending and
//! which signals it listens to. JS polls [`JsHost::wants_frame`] after each
//! tick and stops forwarding events once a listener is dropped.

use ambient_fx_engines::{FrameId, HostBindings, Listener};

#[derive(Debug, Default)]
pub struct JsHost {
    next: i32,
    pending: Option<FrameId>,
    listening: Vec<Listener>,
}

impl JsHost {
    pub fn wants_frame(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_listening(&self, listener: Listener) -> bool {
        self.listening.contains(&listener)
    }
}

impl HostBindings for JsHost {
    fn request_frame(&mut self) -> FrameId {
        self.next = self.next.wrapping_add(1);
        let id = FrameId(self.next);
        self.pending = Some(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if self.pending == Some(id) {
            self.pending = None;
        }
    }

    fn listen(&mut self, listener: Listener) {
        if !self.listening.contains(&listener) {
            self.listening.push(listener);
        }
    }

    fn unlisten(&mut self, listener: Listener) {
        self.listening.retain(|l| *l != listener);
    }
}

/// Parses a listener name as used on the JS side.
pub fn listener_from_name(name: &str) -> Option<Listener> {
    match name {
        "pointermove" => Some(Listener::PointerMove),
        "pointerleave" => Some(Listener::PointerLeave),
        "resize" => Some(Listener::Resize),
        "visibility" => Some(Listener::Visibility),
        "scroll" => Some(Listener::Scroll),
        _ => None,
    }
}
