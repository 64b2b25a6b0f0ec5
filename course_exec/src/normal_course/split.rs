//! Field splitting for PID file lines

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Split a line into fields on `delimiter`, trimming whitespace from both
/// ends of every field.
///
/// Whitespace inside a field is kept, so `"target Speed"` stays as it is. A
/// line ending in the delimiter has a trailing empty field, and a line without
/// any delimiter (including the empty line) is a single field.
pub fn split(line: &str, delimiter: char) -> Vec<String> {
    line.split(delimiter)
        .map(|field| field.trim().to_string())
        .collect()
}
