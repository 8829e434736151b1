use std::collections::BTreeSet;

use crate::catalog::store::Catalog;
use crate::core::color::Combination;
use crate::core::types::CombinationId;
use crate::matching::engine::{RankedColor, SearchError};

/// Combinations reachable from a set of matched colors
#[derive(Debug, Clone)]
pub struct Aggregation<'c> {
    /// Ascending by ID, capped at `max_results`
    pub combinations: Vec<&'c Combination>,

    /// Distinct combinations found before the cap
    pub total_found: usize,
}

/// Collect the combinations containing any of the `closest` colors.
///
/// A combination reachable through several matched colors appears once.
/// Ordering is by combination ID so the result does not depend on which
/// color contributed it.
///
/// # Errors
///
/// Returns `SearchError::CatalogCorrupt` if an ID does not resolve. Catalog
/// construction rejects dangling IDs, so this only fires on a catalog built
/// some other way.
pub fn aggregate<'c>(
    closest: &[RankedColor<'_>],
    catalog: &'c Catalog,
    max_results: usize,
) -> Result<Aggregation<'c>, SearchError> {
    let ids: BTreeSet<CombinationId> = closest
        .iter()
        .flat_map(|ranked| ranked.color.combination_ids.iter().copied())
        .collect();
    let total_found = ids.len();

    let mut combinations = ids
        .into_iter()
        .map(|id| {
            catalog
                .combination(id)
                .ok_or(SearchError::CatalogCorrupt { id })
        })
        .collect::<Result<Vec<_>, _>>()?;
    combinations.truncate(max_results);

    Ok(Aggregation {
        combinations,
        total_found,
    })
}
