//! Matrix model and argument grammars.

mod matrix;
mod position;
mod range;

pub use matrix::Matrix;
pub use position::Position;
pub use range::Range;

/// Separates the two halves of a position or range argument (`"2-3"`).
pub const DELIMITER: char = '-';

/// Stands for "every index" in a range argument (`"2-x"`, `"x-3"`).
pub const WILDCARD: &str = "x";

/// Split `text` into exactly two parts around a single [`DELIMITER`].
///
/// Empty parts are kept so the caller's grammar check rejects them.
fn split_pair(text: &str) -> Option<(&str, &str)> {
    let (first, second) = text.split_once(DELIMITER)?;
    if second.contains(DELIMITER) {
        return None;
    }
    Some((first, second))
}

/// Parse a base-10 integer with no fractional part or extraneous characters.
fn parse_index(text: &str) -> Option<i64> {
    text.parse::<i64>().ok()
}
