//! Timeline orchestration for chained tweens
//!
//! Each entry is placed relative to the one added before it:
//! `start = previous_start + previous_duration + offset`, where a negative
//! offset overlaps the two. `previous_duration` includes the previous
//! entry's stagger spread.

use std::str::FromStr;

use scrollfx_core::NodeId;
use slotmap::{new_key_type, SlotMap};

use crate::error::AnimationError;
use crate::tween::Tween;

new_key_type! {
    pub struct TimelineEntryId;
}

/// Where an entry is placed in its timeline
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Position {
    /// Right after the previous entry ends
    #[default]
    Sequential,
    /// Relative to the previous entry's end (`"-=0.8"`, `"+=0.2"`)
    Offset(f32),
    /// Together with the previous entry's start (`"<"`)
    WithPrevious,
    /// Absolute time from the timeline's start
    At(f32),
}

impl FromStr for Position {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || AnimationError::InvalidTimelinePosition(s.to_string());
        if s.is_empty() || s == ">" {
            return Ok(Position::Sequential);
        }
        if s == "<" {
            return Ok(Position::WithPrevious);
        }
        if let Some(rest) = s.strip_prefix("-=") {
            return rest.trim().parse::<f32>().map(|v| Position::Offset(-v)).map_err(|_| invalid());
        }
        if let Some(rest) = s.strip_prefix("+=") {
            return rest.trim().parse::<f32>().map(Position::Offset).map_err(|_| invalid());
        }
        s.parse::<f32>().map(Position::At).map_err(|_| invalid())
    }
}

/// An entry in a timeline
pub struct TimelineEntry {
    pub tween: Tween,
    pub targets: Vec<NodeId>,
    /// Start time in seconds from the timeline's start (after its delay)
    pub start: f32,
}

impl TimelineEntry {
    pub fn duration(&self) -> f32 {
        self.tween.total_duration(self.targets.len())
    }

    pub fn end(&self) -> f32 {
        self.start + self.duration()
    }
}

/// A timeline that chains tweens
pub struct Timeline {
    entries: SlotMap<TimelineEntryId, TimelineEntry>,
    order: Vec<TimelineEntryId>,
    delay: f32,
    current_time: f32,
    duration: f32,
    playing: bool,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            order: Vec::new(),
            delay: 0.0,
            current_time: 0.0,
            duration: 0.0,
            playing: false,
        }
    }

    /// Builder: wait `seconds` before the first entry
    pub fn with_delay(mut self, seconds: f32) -> Self {
        self.delay = seconds.max(0.0);
        self
    }

    /// Builder: append an entry
    pub fn then(mut self, tween: Tween, targets: Vec<NodeId>, position: Position) -> Self {
        self.add(tween, targets, position);
        self
    }

    /// Add a tween at a position relative to the previously added entry
    pub fn add(&mut self, tween: Tween, targets: Vec<NodeId>, position: Position) -> TimelineEntryId {
        let previous = self.order.last().and_then(|id| self.entries.get(*id));
        let (prev_start, prev_end) = previous.map(|e| (e.start, e.end())).unwrap_or((0.0, 0.0));

        let start = match position {
            Position::Sequential => prev_end,
            Position::Offset(offset) => prev_end + offset,
            Position::WithPrevious => prev_start,
            Position::At(time) => time,
        }
        .max(0.0);

        let entry = TimelineEntry {
            tween,
            targets,
            start,
        };
        self.duration = self.duration.max(entry.end());

        let id = self.entries.insert(entry);
        self.order.push(id);
        id
    }

    pub fn start(&mut self) {
        self.current_time = 0.0;
        self.playing = true;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Total length including the initial delay
    pub fn duration(&self) -> f32 {
        self.delay + self.duration
    }

    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    /// Advance the timeline by `dt` seconds; it plays once and holds its last frame
    pub fn tick(&mut self, dt: f32) {
        if !self.playing {
            return;
        }

        self.current_time += dt;

        let total = self.duration();
        if self.current_time >= total {
            self.current_time = total;
            self.playing = false;
        }
    }

    /// Local playhead of an entry (negative before it starts)
    pub fn entry_playhead(&self, id: TimelineEntryId) -> Option<f32> {
        let entry = self.entries.get(id)?;
        Some(self.current_time - self.delay - entry.start)
    }

    pub fn entry(&self, id: TimelineEntryId) -> Option<&TimelineEntry> {
        self.entries.get(id)
    }

    /// Entries in the order they were added
    pub fn entries(&self) -> impl Iterator<Item = (TimelineEntryId, &TimelineEntry)> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(*id).map(|e| (*id, e)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}
