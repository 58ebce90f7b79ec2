//! Rank-based equal-count binning, NTILE(n) style.
//!
//! With N ranked rows and n groups, the first `N mod n` groups hold
//! `N / n + 1` rows and the rest hold `N / n`. When N < n the trailing
//! groups are empty. Groups are numbered from 1.

use std::cmp::Ordering;

/// Group number (1-based) of the row at `position` (0-based) in a ranked
/// population of `population` rows split into `groups` groups.
pub fn ntile(position: usize, population: usize, groups: usize) -> usize {
    debug_assert!(groups > 0, "ntile() needs at least one group");
    debug_assert!(position < population, "position {position} outside population {population}");

    let base = population / groups;
    let extra = population % groups;
    let large_span = (base + 1) * extra;

    if position < large_span {
        position / (base + 1) + 1
    } else {
        // base > 0 here: position < population implies large_span < population.
        extra + (position - large_span) / base + 1
    }
}

/// Member count of every group, in group order. Sums to `population`.
pub fn group_sizes(population: usize, groups: usize) -> Vec<usize> {
    let base = population / groups;
    let extra = population % groups;
    (0..groups)
        .map(|g| if g < extra { base + 1 } else { base })
        .collect()
}

/// Rank `rows` by `order` and return each row's group, indexed like `rows`.
///
/// `order` must be a total order; callers fold their tie-break into it so
/// equal metric values still rank reproducibly.
pub fn rank_into_groups<T, F>(rows: &[T], groups: usize, order: F) -> Vec<usize>
where
    F: Fn(&T, &T) -> Ordering,
{
    let mut ranked: Vec<usize> = (0..rows.len()).collect();
    ranked.sort_by(|&a, &b| order(&rows[a], &rows[b]));

    let mut assigned = vec![0; rows.len()];
    for (position, &idx) in ranked.iter().enumerate() {
        assigned[idx] = ntile(position, rows.len(), groups);
    }
    assigned
}
