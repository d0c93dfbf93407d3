// Rank-window arithmetic for the profile neighborhood query.

/// Organizations at or below this size return every member as neighbors.
pub const SMALL_COHORT_SIZE: u64 = 3;

/// Inclusive descending-rank window of three members around `position`.
///
/// Top and bottom members get the window clamped to the list edge.
/// Requires `total > SMALL_COHORT_SIZE` and `position < total`.
pub fn adjacent_window(position: u64, total: u64) -> (u64, u64) {
    if position == 0 {
        (0, 2)
    } else if position + 1 == total {
        (total - 3, total - 1)
    } else {
        (position - 1, position + 1)
    }
}

/// Last-in-organization flag: `total == organization_rank + 1`, with the
/// rank 1-indexed and 0 for a member missing from the board.
pub fn is_last_in_organization(organization_rank: u64, total: u64) -> bool {
    total == organization_rank + 1
}
