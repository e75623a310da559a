//! Global ordinal resolution.
//!
//! Users address an entity by a 1-based ordinal that runs across every
//! category in declared order, matching the numbering shown by the list
//! commands. Resolution turns that ordinal into a category name and a
//! 0-based position inside it.

use std::num::IntErrorKind;

use crate::models::Entity;
use crate::repository::CategorizedCollection;
use crate::TrackerError;

/// Parse a raw index token into a positive ordinal.
///
/// Whole numbers too large to represent are reported as out of range
/// against `total`, not as malformed.
pub fn parse_ordinal(raw: Option<&str>, total: usize) -> Result<usize, TrackerError> {
    let token = raw
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(TrackerError::MissingIndex)?;

    match token.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Err(TrackerError::IndexOutOfRange {
            index: token.trim_start_matches('+').to_string(),
            total,
        }),
        _ => Err(TrackerError::InvalidIndexFormat(token.to_string())),
    }
}

/// Resolve a raw index token against `items`.
///
/// Returns the category and the 0-based position of the addressed entity.
pub fn resolve_index<E: Entity>(
    raw: Option<&str>,
    items: &CategorizedCollection<E>,
) -> Result<(String, usize), TrackerError> {
    let total = items.len();
    let ordinal = parse_ordinal(raw, total)?;
    let out_of_range = || TrackerError::IndexOutOfRange {
        index: ordinal.to_string(),
        total,
    };
    if ordinal > total {
        return Err(out_of_range());
    }

    let mut remaining = ordinal;
    for (name, entities) in items.categories() {
        if remaining <= entities.len() {
            return Ok((name.to_string(), remaining - 1));
        }
        remaining -= entities.len();
    }
    Err(out_of_range())
}
