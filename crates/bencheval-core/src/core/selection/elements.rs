use crate::core::models::elements::MAX_ELEMENT;
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("both endpoints of range '{0}' cannot be the wildcard '*'")]
    DoubleWildcard(String),
    #[error("invalid element number '{value}' in '{item}'")]
    InvalidNumber { item: String, value: String },
    #[error("element number {number} in '{item}' is out of range (1-{max})", max = MAX_ELEMENT)]
    OutOfRange { item: String, number: usize },
}

/// Parses a compact element-range specification such as `"1-3,5"` or
/// `"57-71, 81-*"` into a sorted set of 0-based element indices.
///
/// `*` stands for the lowest element as a start and for element 103 as an
/// end; `*-*` is rejected. An empty specification yields an empty set, which
/// callers must treat as "no restriction".
pub fn parse_element_selection(spec: &str) -> Result<BTreeSet<usize>, SelectionError> {
    let mut selected = BTreeSet::new();
    if spec.trim().is_empty() {
        return Ok(selected);
    }

    for item in spec.split(',') {
        let item = item.trim();
        if let Some((start, end)) = item.split_once('-') {
            let start = start.trim();
            let end = end.trim();
            if start == "*" && end == "*" {
                return Err(SelectionError::DoubleWildcard(item.to_string()));
            }
            let start = if start == "*" {
                1
            } else {
                parse_element_number(item, start)?
            };
            let end = if end == "*" {
                MAX_ELEMENT
            } else {
                parse_element_number(item, end)?
            };
            // A reversed range contributes nothing rather than failing.
            selected.extend((start - 1)..end);
        } else {
            let number = parse_element_number(item, item)?;
            selected.insert(number - 1);
        }
    }

    Ok(selected)
}

fn parse_element_number(item: &str, value: &str) -> Result<usize, SelectionError> {
    let number: usize = value.parse().map_err(|_| SelectionError::InvalidNumber {
        item: item.to_string(),
        value: value.to_string(),
    })?;
    if number == 0 || number > MAX_ELEMENT {
        return Err(SelectionError::OutOfRange {
            item: item.to_string(),
            number,
        });
    }
    Ok(number)
}
