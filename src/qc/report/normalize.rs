use std::fmt;

use crate::qc::report::model::Cell;

/// Binary outcome of a single check cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Pass => "Pass",
            Verdict::Fail => "Fail",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a whole tier for one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierVerdict {
    Pass,
    Fail,
    /// None of the tier's check columns exist in the table.
    NotApplicable,
}

impl TierVerdict {
    pub fn as_str(self) -> &'static str {
        match self {
            TierVerdict::Pass => "Pass",
            TierVerdict::Fail => "Fail",
            TierVerdict::NotApplicable => "N/A",
        }
    }

    pub fn to_cell(self) -> Cell {
        Cell::text(self.as_str())
    }
}

impl From<Verdict> for TierVerdict {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Pass => TierVerdict::Pass,
            Verdict::Fail => TierVerdict::Fail,
        }
    }
}

impl fmt::Display for TierVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a raw check value onto [`Verdict`].
///
/// Only text equal to `passed` after trimming, compared case-insensitively,
/// passes. Missing cells, numbers and booleans always fail.
pub fn normalize_pass_fail(cell: &Cell) -> Verdict {
    match cell {
        Cell::Text(value) if value.trim().eq_ignore_ascii_case("passed") => Verdict::Pass,
        _ => Verdict::Fail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passed_in_any_casing_passes() {
        for raw in ["passed", "Passed", "  PASSED ", "\tpAsSeD\n"] {
            assert_eq!(normalize_pass_fail(&Cell::text(raw)), Verdict::Pass, "{raw:?}");
        }
    }

    #[test]
    fn everything_else_fails() {
        let cells = [
            Cell::Missing,
            Cell::text(""),
            Cell::text("Pass"),
            Cell::text("Failed"),
            Cell::text("passed!"),
            Cell::text("pass ed"),
            Cell::Number(1.0),
            Cell::Bool(true),
            Cell::DateTime(45366.0),
        ];
        for cell in &cells {
            assert_eq!(normalize_pass_fail(cell), Verdict::Fail, "{cell:?}");
        }
    }

    #[test]
    fn tier_verdict_labels() {
        assert_eq!(TierVerdict::NotApplicable.to_string(), "N/A");
        assert_eq!(TierVerdict::from(Verdict::Pass).to_cell(), Cell::text("Pass"));
    }
}
