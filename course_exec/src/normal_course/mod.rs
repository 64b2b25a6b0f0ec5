//! Normal course module
//!
//! Loads the per-segment PID parameter file for the current edge and drives
//! the line tracer through each segment in file order.
//!
//! The parameter file is comma separated. The first line is a header which
//! must name the six required columns (in any order):
//!
//! ```text
//! targetDistance,targetSpeed,curvature,turnP,turnI,turnD,NOTE
//! 820,0,0.0,0.1,0.005,0.01,start straight
//! ```
//!
//! Any other columns are ignored but every data row must have exactly as many
//! fields as the header.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod catalog;
mod column_map;
mod params;
mod segment;
mod split;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::fmt;
use std::path::PathBuf;

// Internal
pub use catalog::*;
pub use column_map::*;
pub use params::*;
pub use segment::*;
pub use split::*;
pub use state::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// The number of columns which must be present in a PID file header.
pub const NUM_REQUIRED_COLUMNS: usize = 6;

/// Delimiter between fields in the PID file.
pub const CSV_DELIMITER: char = ',';

/// PID file used when tracing the left edge of the line.
pub const L_PID_FILE_NAME: &str = "l-pid.csv";

/// PID file used when tracing the right edge of the line.
pub const R_PID_FILE_NAME: &str = "r-pid.csv";

/// Default base speed passed to the row builder.
pub const BASE_SPEED: i32 = 100;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The columns every PID file must contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    TargetDistance,
    TargetSpeed,
    Curvature,
    TurnP,
    TurnI,
    TurnD,
}

/// The broad category of a load failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The header is missing a required column, or no header was loaded.
    Configuration,

    /// A data row has a different number of fields to the header.
    DataShape,

    /// A required field in a data row is empty or not a number.
    DataValue,

    /// The PID file could not be opened or read.
    Io,
}

/// Errors raised while resolving a header line.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HeaderError {
    #[error("Required columns are missing from the header: {}", column_list(.0))]
    MissingColumns(Vec<Column>),
}

/// Errors raised while building a segment from a data row.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowError {
    #[error("No header has been loaded, column positions are unknown")]
    NoHeader,

    #[error("Expected {expected} fields to match the header, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("The \"{0}\" field is empty")]
    EmptyField(Column),

    #[error("The \"{column}\" field is not a valid number: \"{value}\"")]
    InvalidNumber { column: Column, value: String },

    #[error("Target speed {target_speed} plus base speed {base_speed} is out of range")]
    SpeedOutOfRange { target_speed: i32, base_speed: i32 },
}

/// Errors which abort a normal course run.
#[derive(Debug, thiserror::Error)]
pub enum NormalCourseError {
    #[error("Cannot open the PID file {0:?}: {1}")]
    FileOpen(PathBuf, std::io::Error),

    #[error("Cannot read line {line} of the PID file: {source}")]
    FileRead {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("The PID file header is invalid: {0}")]
    Header(#[from] HeaderError),

    #[error("The PID file parameters are invalid at data row {row} (line {line}): {source}")]
    Row {
        row: usize,
        line: usize,
        #[source]
        source: RowError,
    },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Column {
    /// All required columns, in the order they are stored in a `ColumnMap`.
    pub const ALL: [Column; NUM_REQUIRED_COLUMNS] = [
        Column::TargetDistance,
        Column::TargetSpeed,
        Column::Curvature,
        Column::TurnP,
        Column::TurnI,
        Column::TurnD,
    ];

    /// The exact (case sensitive) header name of the column.
    pub fn header_name(self) -> &'static str {
        match self {
            Column::TargetDistance => "targetDistance",
            Column::TargetSpeed => "targetSpeed",
            Column::Curvature => "curvature",
            Column::TurnP => "turnP",
            Column::TurnI => "turnI",
            Column::TurnD => "turnD",
        }
    }

    /// Find the column with the given header name.
    pub fn from_header_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.header_name() == name)
    }

    /// Position of the column in `Column::ALL`.
    pub(crate) fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header_name())
    }
}

impl HeaderError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Configuration
    }
}

impl RowError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RowError::NoHeader => ErrorKind::Configuration,
            RowError::FieldCount { .. } => ErrorKind::DataShape,
            RowError::EmptyField(_)
            | RowError::InvalidNumber { .. }
            | RowError::SpeedOutOfRange { .. } => ErrorKind::DataValue,
        }
    }
}

impl NormalCourseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NormalCourseError::FileOpen(..) | NormalCourseError::FileRead { .. } => ErrorKind::Io,
            NormalCourseError::Header(e) => e.kind(),
            NormalCourseError::Row { source, .. } => source.kind(),
        }
    }

    /// The 1-based data row which failed, if the error came from a data row.
    pub fn row(&self) -> Option<usize> {
        match self {
            NormalCourseError::Row { row, .. } => Some(*row),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn column_list(columns: &[Column]) -> String {
    columns
        .iter()
        .map(|c| c.header_name())
        .collect::<Vec<_>>()
        .join(", ")
}
