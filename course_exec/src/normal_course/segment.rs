//! Segment descriptors and the data row builder

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;
use std::str::FromStr;

// Internal
use super::{Column, ColumnMap, RowError};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Steering PID gains for one segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PidGains {
    /// Proportional gain
    pub k_p: f64,

    /// Integral gain
    pub k_i: f64,

    /// Derivative gain
    pub k_d: f64,
}

/// One homogeneous stretch of the course and the steering tuning to use on
/// it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentDescriptor {
    /// Distance to travel before moving on to the next segment.
    pub target_distance: i32,

    /// Speed demand for the segment.
    pub target_speed: i32,

    /// Curvature of the segment, 0 for a straight.
    pub curvature: f64,

    /// Steering gains
    pub pid: PidGains,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// How the base speed given to the row builder is combined with the
/// `targetSpeed` column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseSpeedMode {
    /// Store the `targetSpeed` column unchanged.
    Ignore,

    /// Store `targetSpeed + base_speed`, the column is an offset from the
    /// base speed.
    Add,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for BaseSpeedMode {
    fn default() -> Self {
        BaseSpeedMode::Ignore
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Build a segment from the fields of one data row.
///
/// Checks are made in order and the first failure is returned:
///     1. The row has exactly `column_map.num_fields()` fields.
///     2. None of the required fields are empty.
///     3. The distance and speed are integers and all other required fields
///        are finite real numbers.
pub fn build_segment<S: AsRef<str>>(
    fields: &[S],
    column_map: &ColumnMap,
    base_speed: i32,
    base_speed_mode: BaseSpeedMode,
) -> Result<SegmentDescriptor, RowError> {
    if fields.len() != column_map.num_fields() {
        return Err(RowError::FieldCount {
            expected: column_map.num_fields(),
            found: fields.len(),
        });
    }

    let field = |column: Column| fields[column_map.position(column)].as_ref().trim();

    if let Some(empty) = Column::ALL.iter().find(|c| field(**c).is_empty()) {
        return Err(RowError::EmptyField(*empty));
    }

    let target_distance: i32 = parse_field(Column::TargetDistance, field(Column::TargetDistance))?;
    let column_speed: i32 = parse_field(Column::TargetSpeed, field(Column::TargetSpeed))?;
    let curvature = parse_real(Column::Curvature, field(Column::Curvature))?;
    let k_p = parse_real(Column::TurnP, field(Column::TurnP))?;
    let k_i = parse_real(Column::TurnI, field(Column::TurnI))?;
    let k_d = parse_real(Column::TurnD, field(Column::TurnD))?;

    let target_speed = match base_speed_mode {
        BaseSpeedMode::Ignore => column_speed,
        BaseSpeedMode::Add => column_speed
            .checked_add(base_speed)
            .ok_or(RowError::SpeedOutOfRange {
                target_speed: column_speed,
                base_speed,
            })?,
    };

    Ok(SegmentDescriptor {
        target_distance,
        target_speed,
        curvature,
        pid: PidGains { k_p, k_i, k_d },
    })
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn parse_field<T: FromStr>(column: Column, value: &str) -> Result<T, RowError> {
    value.parse().map_err(|_| RowError::InvalidNumber {
        column,
        value: value.to_string(),
    })
}

/// Parse a real number, rejecting `inf` and `NaN` which `f64::from_str`
/// accepts.
fn parse_real(column: Column, value: &str) -> Result<f64, RowError> {
    let v: f64 = parse_field(column, value)?;

    if v.is_finite() {
        Ok(v)
    }
    else {
        Err(RowError::InvalidNumber {
            column,
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::normal_course::{split, CSV_DELIMITER};

    const HEADER: &str = "targetDistance,targetSpeed,curvature,turnP,turnI,turnD";

    fn build(header: &str, row: &str) -> Result<SegmentDescriptor, RowError> {
        let map = ColumnMap::resolve(&split(header, CSV_DELIMITER)).unwrap();
        build_segment(&split(row, CSV_DELIMITER), &map, 100, BaseSpeedMode::Ignore)
    }

    #[test]
    fn test_build_valid_rows() {
        assert_eq!(
            build(HEADER, "820,0,0.0,0.1,0.005,0.01"),
            Ok(SegmentDescriptor {
                target_distance: 820,
                target_speed: 0,
                curvature: 0.0,
                pid: PidGains { k_p: 0.1, k_i: 0.005, k_d: 0.01 },
            })
        );

        // Negative speeds are allowed
        assert_eq!(build(HEADER, "820,-10,0.0,0.1,0.005,0.01").unwrap().target_speed, -10);

        // Ignored columns between every required column
        let seg = build(
            "targetDistance,NOTE,targetSpeed,NOTE,curvature,NOTE,turnP,NOTE,turnI,NOTE,turnD,NOTE",
            "820,関係ない列,-10,関係ない列,0.0,関係ない列,0.1,関係ない列,0.005,関係ない列,0.01,関係ない列",
        )
        .unwrap();
        assert_eq!(seg.target_distance, 820);
        assert_eq!(seg.target_speed, -10);
        assert_eq!(seg.pid.k_d, 0.01);

        // Columns out of order
        let seg = build(
            "turnD,turnI,turnP,curvature,targetSpeed,targetDistance",
            " 0.01 , 0.005 , 0.1 , -0.5 , 30 , 1200 ",
        )
        .unwrap();
        assert_eq!(
            seg,
            SegmentDescriptor {
                target_distance: 1200,
                target_speed: 30,
                curvature: -0.5,
                pid: PidGains { k_p: 0.1, k_i: 0.005, k_d: 0.01 },
            }
        );
    }

    #[test]
    fn test_build_field_count() {
        assert_eq!(
            build(HEADER, "820,-10,0.1,0.005,0.01"),
            Err(RowError::FieldCount { expected: 6, found: 5 })
        );
        assert_eq!(
            build(HEADER, "820,-10,0.0,0.1,0.005,0.01,-100000000000000000"),
            Err(RowError::FieldCount { expected: 6, found: 7 })
        );

        // A header with a trailing comment column needs the comment field
        assert_eq!(
            build(&format!("{},NOTE", HEADER), "820,-10,0.0,0.1,0.005,0.01"),
            Err(RowError::FieldCount { expected: 7, found: 6 })
        );
        assert!(build(&format!("{},NOTE", HEADER), "820,-10,0.0,0.1,0.005,0.01,").is_ok());

        // Blank lines are a single empty field
        assert_eq!(
            build(HEADER, ""),
            Err(RowError::FieldCount { expected: 6, found: 1 })
        );
    }

    #[test]
    fn test_build_empty_fields() {
        let rows = [
            (",-10,0.2,0.1,0.005,0.01", Column::TargetDistance),
            ("10000,,0.2,0.1,0.005,0.01", Column::TargetSpeed),
            ("10000,-10,,0.1,0.005,0.01", Column::Curvature),
            ("10000,-10,0.2,,0.005,0.01", Column::TurnP),
            ("10000,-10,0.2,0.1,,0.01", Column::TurnI),
            ("10000,-10,0.2,0.1,0.005,", Column::TurnD),
            ("10000, ,0.2,0.1,0.005,0.01", Column::TargetSpeed),
        ];

        for (row, column) in rows.iter() {
            let result = build(HEADER, row);
            assert_eq!(result, Err(RowError::EmptyField(*column)), "row: {}", row);
        }
    }

    #[test]
    fn test_build_untrimmed_fields() {
        // Fields that did not come from `split` are still trimmed
        let map = ColumnMap::resolve(&split(HEADER, CSV_DELIMITER)).unwrap();
        let fields = ["1", "2", "  ", "0.1", "0.2", "0.3"];

        assert_eq!(
            build_segment(&fields, &map, 0, BaseSpeedMode::Ignore),
            Err(RowError::EmptyField(Column::Curvature))
        );
    }

    #[test]
    fn test_build_invalid_numbers() {
        assert_eq!(
            build(HEADER, "abc,0,0.0,0.1,0.005,0.01"),
            Err(RowError::InvalidNumber {
                column: Column::TargetDistance,
                value: "abc".to_string()
            })
        );

        // Integer columns do not accept reals
        assert_eq!(
            build(HEADER, "820,1.5,0.0,0.1,0.005,0.01"),
            Err(RowError::InvalidNumber {
                column: Column::TargetSpeed,
                value: "1.5".to_string()
            })
        );

        // Trailing garbage is not silently dropped
        assert!(matches!(
            build(HEADER, "820,0,0.0x,0.1,0.005,0.01"),
            Err(RowError::InvalidNumber { column: Column::Curvature, .. })
        ));

        assert!(matches!(
            build(HEADER, "820,0,0.0,0.1,NaN,0.01"),
            Err(RowError::InvalidNumber { column: Column::TurnI, .. })
        ));
        assert!(matches!(
            build(HEADER, "820,0,0.0,0.1,0.005,inf"),
            Err(RowError::InvalidNumber { column: Column::TurnD, .. })
        ));
        assert!(matches!(
            build(HEADER, "99999999999,0,0.0,0.1,0.005,0.01"),
            Err(RowError::InvalidNumber { column: Column::TargetDistance, .. })
        ));
    }

    #[test]
    fn test_build_base_speed_mode() {
        let map = ColumnMap::resolve(&split(HEADER, CSV_DELIMITER)).unwrap();
        let fields = split("820,-10,0.0,0.1,0.005,0.01", CSV_DELIMITER);

        let ignored = build_segment(&fields, &map, 100, BaseSpeedMode::Ignore).unwrap();
        assert_eq!(ignored.target_speed, -10);

        let added = build_segment(&fields, &map, 100, BaseSpeedMode::Add).unwrap();
        assert_eq!(added.target_speed, 90);
        assert_eq!(added.target_distance, ignored.target_distance);

        let fields = split(&format!("820,{},0.0,0.1,0.005,0.01", i32::MAX), CSV_DELIMITER);
        assert_eq!(
            build_segment(&fields, &map, 1, BaseSpeedMode::Add),
            Err(RowError::SpeedOutOfRange { target_speed: i32::MAX, base_speed: 1 })
        );
    }
}
