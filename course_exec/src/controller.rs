//! Controller interface
//!
//! The normal course does not drive the hardware itself. Anything able to
//! follow the line for one segment and make a sound implements `Controller`.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

use crate::normal_course::SegmentDescriptor;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Frequency of the F#6 note.
///
/// Units: hertz
pub const NOTE_FS6_HZ: f64 = 1479.98;

/// Duration of the tone played between segments.
///
/// Units: milliseconds
pub const SEGMENT_TONE_DURATION_MS: u32 = 100;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Line tracing setup which stays the same for every segment of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineTraceConfig {
    /// Colour sensor brightness to hold while following the edge.
    pub target_brightness: i32,

    /// `true` to follow the left edge of the line, `false` for the right.
    pub is_left_course: bool,
}

/// A tone to be played on the speaker.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Tone {
    /// Units: hertz
    pub frequency_hz: f64,

    /// Units: milliseconds
    pub duration_ms: u32,
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Steering, motor, colour sensor and speaker access.
pub trait Controller {
    /// Follow the line through one segment using the segment's speed and PID
    /// gains.
    ///
    /// Must not return until the segment's target distance has been
    /// travelled.
    fn trace_segment(&mut self, config: &LineTraceConfig, segment: &SegmentDescriptor);

    /// Play a tone. May return before the tone has finished.
    fn play_tone(&mut self, tone: &Tone);
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Tone {
    /// The short F#6 beep played when a segment ends.
    pub fn segment_end() -> Self {
        Self {
            frequency_hz: NOTE_FS6_HZ,
            duration_ms: SEGMENT_TONE_DURATION_MS,
        }
    }
}

impl<C: Controller + ?Sized> Controller for &mut C {
    fn trace_segment(&mut self, config: &LineTraceConfig, segment: &SegmentDescriptor) {
        (**self).trace_segment(config, segment)
    }

    fn play_tone(&mut self, tone: &Tone) {
        (**self).play_tone(tone)
    }
}
