//! Parameters structure for the normal course

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::{BaseSpeedMode, BASE_SPEED, CSV_DELIMITER, L_PID_FILE_NAME, R_PID_FILE_NAME};
use crate::controller::Tone;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the normal course.
///
/// Any missing keys in the parameter file take their default values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Params {

    // ---- FILES ----

    /// PID file used when tracing the left edge.
    pub left_pid_file: PathBuf,

    /// PID file used when tracing the right edge.
    pub right_pid_file: PathBuf,

    /// Field delimiter of the PID files.
    pub csv_delimiter: char,

    // ---- SPEED ----

    /// Base speed handed to the row builder.
    pub base_speed: i32,

    /// Whether `base_speed` is added to each row's `targetSpeed`.
    pub base_speed_mode: BaseSpeedMode,

    // ---- FEEDBACK ----

    /// Tone played at the end of each segment.
    pub segment_tone: Tone,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            left_pid_file: PathBuf::from(L_PID_FILE_NAME),
            right_pid_file: PathBuf::from(R_PID_FILE_NAME),
            csv_delimiter: CSV_DELIMITER,
            base_speed: BASE_SPEED,
            base_speed_mode: BaseSpeedMode::default(),
            segment_tone: Tone::segment_end(),
        }
    }
}

impl Params {
    /// Make relative PID file paths relative to `dir`.
    pub fn with_pid_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        if self.left_pid_file.is_relative() {
            self.left_pid_file = dir.as_ref().join(&self.left_pid_file);
        }
        if self.right_pid_file.is_relative() {
            self.right_pid_file = dir.as_ref().join(&self.right_pid_file);
        }
        self
    }

    /// The PID file for the given edge.
    pub fn pid_file(&self, is_left_course: bool) -> &Path {
        if is_left_course {
            &self.left_pid_file
        }
        else {
            &self.right_pid_file
        }
    }
}
