//! Implementation of the normal course runner

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, error, info, trace, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

// Internal
use super::{
    build_segment, split,
    ColumnMap, HeaderError, NormalCourseError, Params, RowError, SegmentCatalog,
};
use crate::controller::{Controller, LineTraceConfig};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Runs the normal (non-intersection) part of the course.
///
/// Each run loads the PID file for the current edge, builds the list of
/// segments and then hands them to the controller one at a time. Any problem
/// with the file aborts the run before the robot moves.
pub struct NormalCourse<C: Controller> {
    controller: C,

    /// `true` if tracing the left edge of the line.
    is_left_course: bool,

    /// Target colour sensor brightness.
    target_brightness: i32,

    params: Params,

    /// Column positions of the most recently resolved header.
    column_map: Option<ColumnMap>,

    segments: SegmentCatalog,

    run_state: RunState,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Progress of a normal course run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    /// No run has been started.
    Idle,

    /// The PID file header has been resolved.
    HeaderLoaded,

    /// Data rows are being read.
    Populating,

    /// Every row was read, the segments are ready to run.
    Ready,

    /// Segments are being executed.
    Running,

    /// All segments have been executed.
    Done,

    /// The PID file was invalid, nothing was executed.
    Aborted,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<C: Controller> NormalCourse<C> {

    /// Create a new runner using the default parameters.
    ///
    /// The PID files are then looked up relative to the working directory.
    pub fn new(controller: C, is_left_course: bool, target_brightness: i32) -> Self {
        Self::with_params(controller, is_left_course, target_brightness, Params::default())
    }

    /// Create a new runner with the given parameters.
    pub fn with_params(
        controller: C,
        is_left_course: bool,
        target_brightness: i32,
        params: Params
    ) -> Self {
        Self {
            controller,
            is_left_course,
            target_brightness,
            params,
            column_map: None,
            segments: SegmentCatalog::new(),
            run_state: RunState::Idle,
        }
    }

    /// Switch between the left and right edge. Takes effect on the next run.
    pub fn set_is_left_course(&mut self, is_left_course: bool) {
        self.is_left_course = is_left_course;
    }

    pub fn is_left_course(&self) -> bool {
        self.is_left_course
    }

    pub fn target_brightness(&self) -> i32 {
        self.target_brightness
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// The segments loaded by the last header and rows.
    pub fn segments(&self) -> &SegmentCatalog {
        &self.segments
    }

    pub fn column_map(&self) -> Option<&ColumnMap> {
        self.column_map.as_ref()
    }

    /// The PID file the next run will load.
    pub fn pid_file_path(&self) -> &Path {
        self.params.pid_file(self.is_left_course)
    }

    /// Resolve a header line, replacing the current column map and clearing
    /// any loaded segments.
    ///
    /// On failure the previous column map is discarded so that no rows can
    /// be built until a valid header has been resolved.
    pub fn resolve_header(&mut self, header_line: &str) -> Result<(), HeaderError> {
        self.column_map = None;

        let header = split(header_line, self.params.csv_delimiter);
        let map = ColumnMap::resolve(&header)?;

        self.column_map = Some(map);
        self.segments.clear();

        Ok(())
    }

    /// Build a segment from a data line and append it to the loaded segments.
    ///
    /// `base_speed` is only added to the row's target speed if the
    /// parameters' `base_speed_mode` is `add`.
    pub fn build_row(&mut self, row_line: &str, base_speed: i32) -> Result<(), RowError> {
        let map = self.column_map.as_ref().ok_or(RowError::NoHeader)?;

        let fields = split(row_line, self.params.csv_delimiter);
        let segment = build_segment(&fields, map, base_speed, self.params.base_speed_mode)?;

        trace!("Segment {}: {:?}", self.segments.len(), segment);

        self.segments.push(segment);

        Ok(())
    }

    /// Run the normal course.
    ///
    /// The PID file for the current edge is loaded completely before the
    /// robot moves. If the file is invalid an error is logged and returned,
    /// and no segment is executed.
    pub fn run(&mut self) -> Result<(), NormalCourseError> {
        info!("Running the normal course");

        self.set_state(RunState::Idle);

        if let Err(e) = self.load() {
            error!("Normal course aborted: {}", e);
            self.set_state(RunState::Aborted);
            return Err(e);
        }

        self.execute();

        Ok(())
    }

    /// Load the PID file for the current edge into `self.segments`.
    fn load(&mut self) -> Result<(), NormalCourseError> {
        let path = self.pid_file_path().to_path_buf();

        info!(
            "Loading {} edge PID file {:?}",
            if self.is_left_course { "left" } else { "right" },
            path
        );

        // The file is closed when the reader goes out of scope, whatever the
        // outcome of the load.
        let file = File::open(&path)
            .map_err(|e| NormalCourseError::FileOpen(path.clone(), e))?;
        let mut lines = BufReader::new(file).lines();

        // An empty file is treated as an empty header, which will be missing
        // every column.
        let header_line = match lines.next() {
            Some(l) => l.map_err(|e| NormalCourseError::FileRead { line: 1, source: e })?,
            None => String::new(),
        };

        self.resolve_header(&header_line)?;
        self.set_state(RunState::HeaderLoaded);

        self.set_state(RunState::Populating);

        let base_speed = self.params.base_speed;

        for (i, line) in lines.enumerate() {
            let row = i + 1;
            let line_num = i + 2;

            let line = line.map_err(|e| NormalCourseError::FileRead {
                line: line_num,
                source: e,
            })?;

            self.build_row(&line, base_speed)
                .map_err(|e| NormalCourseError::Row {
                    row,
                    line: line_num,
                    source: e,
                })?;
        }

        info!("Loaded {} segments", self.segments.len());
        self.set_state(RunState::Ready);

        Ok(())
    }

    /// Run every loaded segment in order, playing a tone after each one.
    fn execute(&mut self) {
        let config = LineTraceConfig {
            target_brightness: self.target_brightness,
            is_left_course: self.is_left_course,
        };

        self.set_state(RunState::Running);

        if self.segments.is_empty() {
            warn!("The PID file contains no segments, nothing to run");
        }

        let num_segments = self.segments.len();

        for (i, segment) in self.segments.iter().enumerate() {
            info!(
                "Segment {}/{}: distance {}, speed {}, curvature {}",
                i + 1,
                num_segments,
                segment.target_distance,
                segment.target_speed,
                segment.curvature
            );

            self.controller.trace_segment(&config, segment);
            self.controller.play_tone(&self.params.segment_tone);
        }

        self.set_state(RunState::Done);
        info!("Normal course complete");
    }

    fn set_state(&mut self, state: RunState) {
        debug!("NormalCourse state: {:?} -> {:?}", self.run_state, state);
        self.run_state = state;
    }
}
