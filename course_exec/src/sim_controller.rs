//! # Simulated controller
//!
//! Stands in for the robot's hardware when running the normal course off the
//! robot. Segments are logged and archived instead of being driven.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{info, trace, warn};
use serde::Serialize;

// Internal
use course_lib::{
    controller::{Controller, LineTraceConfig, Tone},
    normal_course::SegmentDescriptor,
};
use util::{
    archive::{ArchiveError, Archived, Archiver},
    session::{self, Session},
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A controller which records what it is asked to do.
pub struct SimController {
    /// Number of segments traced so far.
    num_traced: usize,

    /// The most recently traced segment.
    last_segment: Option<SegmentRecord>,
    arch_segments: Archiver,

    /// Number of tones played so far.
    num_tones: usize,
}

/// One archived segment.
///
/// Flattened as the csv writer can't handle nested structs.
#[derive(Clone, Copy, Debug, Serialize)]
struct SegmentRecord {
    time_s: f64,
    index: usize,
    is_left_course: bool,
    target_brightness: i32,
    target_distance: i32,
    target_speed: i32,
    curvature: f64,
    k_p: f64,
    k_i: f64,
    k_d: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SimController {
    /// Create a new simulated controller archiving into the given session.
    pub fn new(session: &Session) -> Result<Self, ArchiveError> {
        Ok(Self {
            num_traced: 0,
            last_segment: None,
            arch_segments: Archiver::from_path(session, "normal_course/segments.csv")?,
            num_tones: 0,
        })
    }

    pub fn num_traced(&self) -> usize {
        self.num_traced
    }

    pub fn num_tones(&self) -> usize {
        self.num_tones
    }
}

impl Controller for SimController {
    fn trace_segment(&mut self, config: &LineTraceConfig, segment: &SegmentDescriptor) {
        info!(
            "[Sim] Tracing the {} edge for {} at speed {} (Kp {}, Ki {}, Kd {})",
            if config.is_left_course { "left" } else { "right" },
            segment.target_distance,
            segment.target_speed,
            segment.pid.k_p,
            segment.pid.k_i,
            segment.pid.k_d
        );

        self.last_segment = Some(SegmentRecord {
            time_s: session::get_elapsed_seconds(),
            index: self.num_traced,
            is_left_course: config.is_left_course,
            target_brightness: config.target_brightness,
            target_distance: segment.target_distance,
            target_speed: segment.target_speed,
            curvature: segment.curvature,
            k_p: segment.pid.k_p,
            k_i: segment.pid.k_i,
            k_d: segment.pid.k_d,
        });
        self.num_traced += 1;

        if let Err(e) = self.write() {
            warn!("Could not archive segment {}: {}", self.num_traced, e);
        }
    }

    fn play_tone(&mut self, tone: &Tone) {
        trace!("[Sim] Beep ({} Hz for {} ms)", tone.frequency_hz, tone.duration_ms);
        self.num_tones += 1;
    }
}

impl Archived for SimController {
    fn write(&mut self) -> Result<(), ArchiveError> {
        match self.last_segment {
            Some(r) => self.arch_segments.serialise(r),
            None => Ok(())
        }
    }
}
