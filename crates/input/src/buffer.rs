//! Pending-event buffer between terminal polling and session steps.
//!
//! The terminal may deliver several key presses between two steps, while a step
//! consumes exactly one event. Presses are queued here in arrival order and handed
//! out one per step. The queue is fixed-size; when it is full new presses are
//! dropped so a held key cannot build up a backlog.

use arrayvec::ArrayVec;

use crate::types::InputEvent;

/// Maximum number of presses kept between steps.
pub const INPUT_BUFFER_CAPACITY: usize = 8;

#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    pending: ArrayVec<InputEvent, INPUT_BUFFER_CAPACITY>,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event. Returns false if it was dropped.
    ///
    /// `Quit` always gets in, replacing the newest pending event if needed.
    pub fn push(&mut self, event: InputEvent) -> bool {
        if event.is_none() {
            return false;
        }
        if self.pending.try_push(event).is_ok() {
            return true;
        }
        if event == InputEvent::Quit {
            self.pending.pop();
            self.pending.push(event);
            return true;
        }
        false
    }

    /// Event for the next step: the oldest pending one, or `None` when idle.
    pub fn next_event(&mut self) -> InputEvent {
        if self.pending.is_empty() {
            return InputEvent::None;
        }
        self.pending.remove(0)
    }

    pub fn quit_requested(&self) -> bool {
        self.pending.contains(&InputEvent::Quit)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_when_empty() {
        let mut buf = InputBuffer::new();
        assert_eq!(buf.next_event(), InputEvent::None);
    }

    #[test]
    fn test_fifo_order() {
        let mut buf = InputBuffer::new();
        buf.push(InputEvent::MoveLeft);
        buf.push(InputEvent::Rotate);
        assert_eq!(buf.next_event(), InputEvent::MoveLeft);
        assert_eq!(buf.next_event(), InputEvent::Rotate);
        assert_eq!(buf.next_event(), InputEvent::None);
    }

    #[test]
    fn test_none_is_not_queued() {
        let mut buf = InputBuffer::new();
        assert!(!buf.push(InputEvent::None));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_overflow_drops_new_presses_but_keeps_quit() {
        let mut buf = InputBuffer::new();
        for _ in 0..INPUT_BUFFER_CAPACITY {
            assert!(buf.push(InputEvent::SoftDrop));
        }
        assert!(!buf.push(InputEvent::MoveLeft));
        assert_eq!(buf.len(), INPUT_BUFFER_CAPACITY);

        assert!(buf.push(InputEvent::Quit));
        assert!(buf.quit_requested());
        assert_eq!(buf.len(), INPUT_BUFFER_CAPACITY);
    }
}
