use serde::Serialize;

use crate::qc::report::model::{Cell, Table};
use crate::qc::report::normalize::TierVerdict;
use crate::qc::report::tiers::TIERS;

/// Pass/fail counts of one tier across the final table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierSummary {
    pub tier: String,
    pub pass: usize,
    pub fail: usize,
    /// Row count of the whole table, `N/A` rows included.
    pub total: usize,
}

/// Counts verdicts per tier. Tiers without a verdict column are skipped.
pub fn summarize(table: &Table) -> Vec<TierSummary> {
    TIERS
        .iter()
        .filter_map(|tier| {
            let values = table.column_values(tier.name)?;
            let (mut pass, mut fail) = (0, 0);
            for cell in values {
                match cell {
                    Cell::Text(label) if label == TierVerdict::Pass.as_str() => pass += 1,
                    Cell::Text(label) if label == TierVerdict::Fail.as_str() => fail += 1,
                    _ => {}
                }
            }
            Some(TierSummary {
                tier: tier.name.to_string(),
                pass,
                fail,
                total: table.len(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_pass_and_fail_but_not_na() {
        let mut table = Table::with_columns(vec!["styleId".into()]);
        for id in ["A1", "B2", "C3"] {
            table.push_row(vec![Cell::text(id)]);
        }
        table.push_column(
            TIERS[0].name,
            ["Pass", "Fail", "Pass"].map(Cell::text),
        );
        table.push_column(TIERS[1].name, ["N/A"; 3].map(Cell::text));

        let summary = summarize(&table);

        assert_eq!(summary.len(), 2);
        assert_eq!((summary[0].pass, summary[0].fail, summary[0].total), (2, 1, 3));
        assert_eq!((summary[1].pass, summary[1].fail, summary[1].total), (0, 0, 3));
    }
}
