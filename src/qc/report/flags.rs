use tracing::{debug, instrument};

use crate::qc::report::model::Table;
use crate::qc::report::normalize::{TierVerdict, Verdict, normalize_pass_fail};
use crate::qc::report::tiers::{TIERS, Tier};

/// Appends one verdict column per tier, in tier order.
#[instrument(level = "info", skip_all, fields(rows = table.len()))]
pub fn compute_tier_flags(table: &mut Table) {
    for tier in &TIERS {
        let verdicts = tier_verdicts(table, tier);
        table.push_column(tier.name, verdicts.into_iter().map(TierVerdict::to_cell));
    }
}

/// Evaluates one tier for every row.
///
/// Only the tier's check columns present in `table` take part. With none
/// present every row is [`TierVerdict::NotApplicable`]; otherwise a row passes
/// when all present checks normalise to [`Verdict::Pass`].
pub fn tier_verdicts(table: &Table, tier: &Tier) -> Vec<TierVerdict> {
    let present: Vec<usize> = tier
        .checks
        .iter()
        .filter_map(|check| table.column_index(check))
        .collect();

    debug!(
        tier = tier.name,
        present = present.len(),
        declared = tier.checks.len(),
        "evaluating tier"
    );

    if present.is_empty() {
        return vec![TierVerdict::NotApplicable; table.len()];
    }

    table
        .rows
        .iter()
        .map(|row| {
            let all_pass = present
                .iter()
                .all(|&idx| normalize_pass_fail(&row[idx]) == Verdict::Pass);
            if all_pass {
                TierVerdict::Pass
            } else {
                TierVerdict::Fail
            }
        })
        .collect()
}
