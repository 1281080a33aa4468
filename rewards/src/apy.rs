//! Advisory pool APY derived from recent sections.
//!
//! Duration-weighted average of annualized section yield over the sections
//! that closed inside the lookback window. Never used in settlement math.

use crate::section::SectionLog;
use pospool_types::{Amount, BlockNumber, RATIO_BASE};

/// Estimated annualized yield in basis points, before the pool fee.
///
/// For each closed section ending within `window_blocks` of `now`:
/// annualized yield is `reward * blocks_per_year / (duration * principal)`
/// where `principal = available * vote_value`. Weighting each section by its
/// duration collapses to `reward * blocks_per_year / principal` summed over
/// sections, divided by the total duration.
///
/// Returns 0 when no section qualifies.
pub fn pool_apy(
    log: &SectionLog,
    now: BlockNumber,
    vote_value: Amount,
    window_blocks: u64,
    blocks_per_year: u64,
) -> u64 {
    let window_start = now.as_u64().saturating_sub(window_blocks);
    let mut weighted_bps: u128 = 0;
    let mut total_duration: u128 = 0;

    for section in log.closed_since(0) {
        let end = match section.end {
            Some(end) => end.as_u64(),
            None => continue,
        };
        if end < window_start || section.available == 0 {
            continue;
        }
        let duration = end.saturating_sub(section.start.as_u64());
        if duration == 0 {
            continue;
        }
        let principal = section.available as u128 * vote_value.raw();
        if principal == 0 {
            continue;
        }
        let annualized = section
            .reward
            .raw()
            .saturating_mul(blocks_per_year as u128)
            .saturating_mul(RATIO_BASE as u128)
            / principal;
        weighted_bps = weighted_bps.saturating_add(annualized);
        total_duration += duration as u128;
    }

    if total_duration == 0 {
        return 0;
    }
    u64::try_from(weighted_bps / total_duration).unwrap_or(u64::MAX)
}
