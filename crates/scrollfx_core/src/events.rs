//! Page events
//!
//! Input delivered by the host between frames, and the transition events a
//! scroll trigger reports as the scroll position crosses its range.

/// Input from the host
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PageEvent {
    /// Pointer moved, in viewport coordinates
    PointerMove { x: f32, y: f32 },
    /// Page scrolled to an absolute vertical offset
    Scroll { y: f32 },
    /// Viewport resized
    Resize { width: f32, height: f32 },
    /// Page teardown: detach everything
    Teardown,
}

/// Transition reported by a scroll trigger
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TriggerEvent {
    /// Scrolling forward past the start
    Enter,
    /// Scrolling forward past the end
    Leave,
    /// Scrolling backward past the end
    EnterBack,
    /// Scrolling backward past the start
    LeaveBack,
}

impl TriggerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TriggerEvent::Enter => "enter",
            TriggerEvent::Leave => "leave",
            TriggerEvent::EnterBack => "enter-back",
            TriggerEvent::LeaveBack => "leave-back",
        }
    }
}
