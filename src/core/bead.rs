//! Bead model of a single device column.
//!
//! A column has one upper bead worth 5 and four lower beads worth 1 each.
//! These functions decide which moves a learner can make by flipping beads
//! directly, and which moves need the "brother" compensation (`±5 ∓ (5-n)`).

/// Value of the upper bead.
pub const UPPER_BEAD: i64 = 5;

/// Number of unit beads below the bar.
pub const LOWER_BEADS: i64 = 4;

/// Bead configuration that shows a digit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Beads {
    /// Upper bead pushed to the bar.
    pub upper: bool,
    /// Lower beads pushed to the bar.
    pub lower: i64,
}

impl Beads {
    /// Beads showing `digit` (expected in `[0, 9]`).
    pub fn of(digit: i64) -> Self {
        Self {
            upper: digit >= UPPER_BEAD,
            lower: digit % UPPER_BEAD,
        }
    }

    pub fn value(&self) -> i64 {
        if self.upper {
            UPPER_BEAD + self.lower
        } else {
            self.lower
        }
    }
}

/// Complement of `n` to five.
pub fn brother(n: i64) -> i64 {
    UPPER_BEAD - n
}

/// Complement of `n` to ten.
pub fn friend(n: i64) -> i64 {
    10 - n
}

/// Whether `from + delta` can be shown by flipping beads directly.
///
/// Adding needs the required beads to be away from the bar (the upper bead
/// cannot be reused, lower beads cannot go past four). Subtracting is the
/// mirror condition on beads at the bar.
pub fn is_direct_move(from: i64, delta: i64) -> bool {
    let to = from + delta;
    if delta == 0 || !(0..=9).contains(&from) || !(0..=9).contains(&to) {
        return false;
    }

    let magnitude = delta.abs();
    let needs_upper = magnitude >= UPPER_BEAD;
    let ones = magnitude % UPPER_BEAD;
    let beads = Beads::of(from);

    if delta > 0 {
        (!needs_upper || !beads.upper) && ones <= LOWER_BEADS - beads.lower
    } else {
        (!needs_upper || beads.upper) && ones <= beads.lower
    }
}

/// Whether `from + delta` is a brother move: it crosses the upper bead
/// boundary and is made as `±5 ∓ (5-n)`.
pub fn is_brother_move(from: i64, delta: i64) -> bool {
    let n = delta.abs();
    if !(1..LOWER_BEADS + 1).contains(&n) || !(0..=9).contains(&from) {
        return false;
    }

    if delta > 0 {
        from < UPPER_BEAD && from + n >= UPPER_BEAD
    } else {
        from >= UPPER_BEAD && from - n < UPPER_BEAD
    }
}
