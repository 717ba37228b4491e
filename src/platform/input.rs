//! Buffered input
//!
//! Browser and native handlers push [`InputEvent`]s as they arrive; the loop
//! drains the queue once per frame. Any number of jump presses within one
//! frame collapse into a single jump.

use std::collections::VecDeque;

use crate::sim::TickInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Jump,
    Quit,
    ToggleAutopilot,
}

impl InputEvent {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            " " | "Space" | "Spacebar" | "ArrowUp" | "w" | "W" => Some(InputEvent::Jump),
            "Escape" => Some(InputEvent::Quit),
            "i" | "I" => Some(InputEvent::ToggleAutopilot),
            _ => None,
        }
    }
}

/// Everything that happened since the last drain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub jump: bool,
    pub quit: bool,
    /// Odd number of toggle presses
    pub toggle_autopilot: bool,
}

#[derive(Debug, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
    autopilot: bool,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn push_key(&mut self, key: &str) -> bool {
        match InputEvent::from_key(key) {
            Some(event) => {
                self.push(event);
                true
            }
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Consume all pending events
    pub fn drain(&mut self) -> FrameInput {
        let mut frame = FrameInput::default();
        for event in self.events.drain(..) {
            match event {
                InputEvent::Jump => frame.jump = true,
                InputEvent::Quit => frame.quit = true,
                InputEvent::ToggleAutopilot => frame.toggle_autopilot = !frame.toggle_autopilot,
            }
        }
        if frame.toggle_autopilot {
            self.autopilot = !self.autopilot;
            log::info!("Autopilot {}", if self.autopilot { "on" } else { "off" });
        }
        frame
    }

    /// Drain and build the tick input for this frame
    pub fn next_tick(&mut self) -> (TickInput, FrameInput) {
        let frame = self.drain();
        let input = TickInput {
            jump: frame.jump,
            autopilot: self.autopilot,
        };
        (input, frame)
    }
}
