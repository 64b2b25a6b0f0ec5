//! Header resolution into a column map

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;

// Internal
use super::{Column, HeaderError, NUM_REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Positions of the required columns within one PID file header.
///
/// A `ColumnMap` can only be made by [`ColumnMap::resolve`], so every required
/// column has a known position. It is replaced whenever a new header is read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnMap {
    /// Field index of each column, in `Column::ALL` order.
    positions: [usize; NUM_REQUIRED_COLUMNS],

    /// Total number of fields in the header, including ignored columns.
    num_fields: usize,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ColumnMap {
    /// Locate the required columns in the (already split) header fields.
    ///
    /// Names must match exactly. If a required name appears more than once
    /// the last occurrence is used. Unrecognised names are ignored.
    pub fn resolve<S: AsRef<str>>(header: &[S]) -> Result<Self, HeaderError> {
        let mut found: [Option<usize>; NUM_REQUIRED_COLUMNS] = [None; NUM_REQUIRED_COLUMNS];

        for (i, field) in header.iter().enumerate() {
            if let Some(col) = Column::from_header_name(field.as_ref()) {
                found[col.slot()] = Some(i);
            }
        }

        let missing: Vec<Column> = Column::ALL
            .iter()
            .copied()
            .filter(|c| found[c.slot()].is_none())
            .collect();

        if !missing.is_empty() {
            return Err(HeaderError::MissingColumns(missing));
        }

        let mut positions = [0usize; NUM_REQUIRED_COLUMNS];
        for (pos, f) in positions.iter_mut().zip(found.iter()) {
            *pos = f.unwrap_or_default();
        }

        let map = Self {
            positions,
            num_fields: header.len(),
        };

        trace!("Resolved PID file header: {:?}", map);

        Ok(map)
    }

    /// Field index of the given column.
    pub fn position(&self, column: Column) -> usize {
        self.positions[column.slot()]
    }

    /// Number of fields in the header this map was built from. Data rows
    /// must have exactly this many fields.
    pub fn num_fields(&self) -> usize {
        self.num_fields
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::normal_course::{split, CSV_DELIMITER};

    fn resolve_line(line: &str) -> Result<ColumnMap, HeaderError> {
        ColumnMap::resolve(&split(line, CSV_DELIMITER))
    }

    #[test]
    fn test_resolve_valid_headers() {
        let map = resolve_line("targetDistance,targetSpeed,curvature,turnP,turnI,turnD").unwrap();
        assert_eq!(map.num_fields(), 6);
        for (i, c) in Column::ALL.iter().enumerate() {
            assert_eq!(map.position(*c), i);
        }

        // Column order does not matter
        let map = resolve_line("targetSpeed,targetDistance,turnI,curvature,turnP,turnD").unwrap();
        assert_eq!(map.position(Column::TargetSpeed), 0);
        assert_eq!(map.position(Column::TargetDistance), 1);
        assert_eq!(map.position(Column::TurnI), 2);
        assert_eq!(map.position(Column::Curvature), 3);
        assert_eq!(map.position(Column::TurnP), 4);
        assert_eq!(map.position(Column::TurnD), 5);

        // Extra named columns
        let map = resolve_line("targetDistance,targetSpeed,curvature,turnP,turnI,turnD,NOTE").unwrap();
        assert_eq!(map.num_fields(), 7);

        let map = resolve_line("targetDistance,targetSpeed,COMMENT,curvature,turnP,turnI,turnD,NOTE")
            .unwrap();
        assert_eq!(map.num_fields(), 8);
        assert_eq!(map.position(Column::Curvature), 3);

        // Extra empty columns
        assert!(resolve_line("targetDistance,targetSpeed,curvature,turnP,turnI,turnD,").is_ok());
        let map = resolve_line("targetDistance,,targetSpeed,curvature,turnP,turnI,turnD,").unwrap();
        assert_eq!(map.num_fields(), 8);
        assert_eq!(map.position(Column::TargetSpeed), 2);
    }

    #[test]
    fn test_resolve_duplicate_last_wins() {
        let map = resolve_line("turnP,targetDistance,targetSpeed,curvature,turnP,turnI,turnD,turnP")
            .unwrap();
        assert_eq!(map.position(Column::TurnP), 7);
        assert_eq!(map.num_fields(), 8);
    }

    #[test]
    fn test_resolve_invalid_headers() {
        let invalid = [
            ("target_distance,targetSpeed,curvature,turnP,turnI,turnD", Column::TargetDistance),
            ("targetDistance,targetSSpeed,curvature,turnP,turnI,turnD", Column::TargetSpeed),
            ("targetDistance,targetSpeed,Curvature,turnP,turnI,turnD", Column::Curvature),
            ("targetDistance,targetSpeed,curvature,turn_p,turnI,turnD", Column::TurnP),
            ("targetDistance,targetSpeed,curvature,turnP,turn_I,turnD", Column::TurnI),
            ("targetDistance,targetSpeed,curvature,turnP,turnI,TurnD", Column::TurnD),
            // Inner spaces are not removed
            ("targetDistance,target Speed,curvature,turnP,turnI,turnD", Column::TargetSpeed),
        ];

        for (line, missing) in invalid.iter() {
            assert_eq!(
                resolve_line(line),
                Err(HeaderError::MissingColumns(vec![*missing])),
                "header: {}", line
            );
        }

        // Several columns missing at once
        assert_eq!(
            resolve_line("targetDistance,target Speed,curvature,turnP,turnI"),
            Err(HeaderError::MissingColumns(vec![Column::TargetSpeed, Column::TurnD]))
        );

        // Empty header
        assert_eq!(
            resolve_line(""),
            Err(HeaderError::MissingColumns(Column::ALL.to_vec()))
        );
    }
}
