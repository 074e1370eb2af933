//! Frame scheduling capability
//!
//! The game never assumes a cadence. It asks the host for "one more frame"
//! and may cancel that request; the host later calls `Game::frame` with a
//! monotonic timestamp. In the browser this is `requestAnimationFrame`
//! (`platform::RafScheduler`); natively and in tests it is `ManualScheduler`.

/// Opaque id of a requested frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(pub i32);

/// Host capability to run the next frame
pub trait FrameScheduler {
    fn request_tick(&mut self) -> TickHandle;
    fn cancel_tick(&mut self, handle: TickHandle);
}

/// Scheduler driven by hand: requests queue up until `fire` pops them
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: i32,
    pending: Vec<TickHandle>,
    /// Total requests ever made
    pub requested: u32,
    /// Total cancellations ever made
    pub cancelled: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests not yet fired or cancelled
    pub fn pending(&self) -> &[TickHandle] {
        &self.pending
    }

    /// Consume the oldest pending request. The caller then runs the frame.
    pub fn fire(&mut self) -> Option<TickHandle> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_tick(&mut self) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        self.pending.push(handle);
        self.requested += 1;
        handle
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        let before = self.pending.len();
        self.pending.retain(|h| *h != handle);
        if self.pending.len() != before {
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_fire_cancel() {
        let mut scheduler = ManualScheduler::new();
        let a = scheduler.request_tick();
        let b = scheduler.request_tick();
        assert_ne!(a, b);
        assert_eq!(scheduler.pending(), &[a, b]);

        scheduler.cancel_tick(a);
        assert_eq!(scheduler.cancelled, 1);
        assert_eq!(scheduler.fire(), Some(b));
        assert_eq!(scheduler.fire(), None);

        // Cancelling something already fired is a no-op
        scheduler.cancel_tick(b);
        assert_eq!(scheduler.cancelled, 1);
    }
}
