//! Device state for one or more columns.
//!
//! A column holds one decimal digit worth of beads. Single-column techniques
//! keep their state as a plain integer in `[0, 9]`, two-column techniques in
//! `[0, 99]`, and the independent column mode keeps one digit per column in a
//! [`ColumnState`].

use serde::{Deserialize, Serialize};

/// Highest value a single column can show.
pub const COLUMN_MAX: i64 = 9;

/// Highest value a pair of columns (tens and units) can show.
pub const TWO_COLUMN_MAX: i64 = 99;

/// Widest device the generator supports: nine display digits plus one column
/// of carry headroom.
pub const MAX_DEVICE_COLUMNS: usize = 10;

/// `10^exp` as a state value.
pub fn pow10(exp: usize) -> i64 {
    10_i64.pow(exp as u32)
}

/// Units digit of a state value.
pub fn units(value: i64) -> i64 {
    value.rem_euclid(10)
}

/// Tens digit of a state value.
pub fn tens(value: i64) -> i64 {
    (value / 10).rem_euclid(10)
}

/// Digit shown on `column` (0 is the units column).
pub fn digit_at(value: i64, column: usize) -> i64 {
    (value / pow10(column)).rem_euclid(10)
}

/// Per-column digits of a multi-column device.
///
/// Columns are stored least significant first, so `digit(0)` is the units
/// column. Every digit stays in `[0, 9]`; the generator never produces a
/// carry between columns in this mode.
///
/// # Example
///
/// ```rust
/// use beadwork::core::ColumnState;
///
/// let state = ColumnState::zeroed(3).apply(&[2, 0, 1]);
/// assert_eq!(state.value(), 102);
/// assert_eq!(state.digit(0), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnState {
    digits: Vec<i64>,
}

impl ColumnState {
    /// A cleared device with `columns` columns.
    pub fn zeroed(columns: usize) -> Self {
        Self {
            digits: vec![0; columns],
        }
    }

    /// Split `value` into `columns` digits. Higher digits are dropped.
    pub fn from_value(value: i64, columns: usize) -> Self {
        Self {
            digits: (0..columns).map(|column| digit_at(value, column)).collect(),
        }
    }

    pub fn columns(&self) -> usize {
        self.digits.len()
    }

    pub fn digit(&self, column: usize) -> i64 {
        self.digits.get(column).copied().unwrap_or(0)
    }

    pub fn digits(&self) -> &[i64] {
        &self.digits
    }

    /// Composite numeric value shown on the device.
    pub fn value(&self) -> i64 {
        self.digits
            .iter()
            .enumerate()
            .map(|(column, digit)| digit * pow10(column))
            .sum()
    }

    pub fn is_zero(&self) -> bool {
        self.digits.iter().all(|digit| *digit == 0)
    }

    /// Apply one delta per column, returning the new state.
    ///
    /// Missing deltas leave their column untouched.
    pub fn apply(&self, deltas: &[i64]) -> Self {
        let digits = self
            .digits
            .iter()
            .enumerate()
            .map(|(column, digit)| digit + deltas.get(column).copied().unwrap_or(0))
            .collect();
        Self { digits }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_helpers_split_values() {
        assert_eq!(units(47), 7);
        assert_eq!(tens(47), 4);
        assert_eq!(digit_at(3052, 0), 2);
        assert_eq!(digit_at(3052, 1), 5);
        assert_eq!(digit_at(3052, 2), 0);
        assert_eq!(digit_at(3052, 3), 3);
        assert_eq!(digit_at(3052, 7), 0);
    }

    #[test]
    fn pow10_matches_place_values() {
        assert_eq!(pow10(0), 1);
        assert_eq!(pow10(2), 100);
        assert_eq!(pow10(MAX_DEVICE_COLUMNS), 10_000_000_000);
    }

    #[test]
    fn zeroed_state_has_no_value() {
        let state = ColumnState::zeroed(4);
        assert_eq!(state.columns(), 4);
        assert!(state.is_zero());
        assert_eq!(state.value(), 0);
    }

    #[test]
    fn from_value_round_trips_through_value() {
        let state = ColumnState::from_value(907, 3);
        assert_eq!(state.digits(), &[7, 0, 9]);
        assert_eq!(state.value(), 907);
    }

    #[test]
    fn apply_is_pure() {
        let state = ColumnState::zeroed(2);
        let moved = state.apply(&[3, 1]);

        assert!(state.is_zero());
        assert_eq!(moved.value(), 13);
    }

    #[test]
    fn apply_with_short_delta_list_keeps_other_columns() {
        let state = ColumnState::from_value(55, 2).apply(&[-4]);
        assert_eq!(state.digits(), &[1, 5]);
    }
}
