use std::collections::BTreeSet;

use super::model::{FilterOptions, Listing, RoomCount, ValueRange, WorkingSet};

// ---------------------------------------------------------------------------
// Predicate set: what the sidebar currently selects
// ---------------------------------------------------------------------------

/// The conjunction of filters applied to the working set.
///
/// Categorical selections are inclusion sets: an empty set selects nothing,
/// it is never read as "no filter".
#[derive(Debug, Clone, PartialEq)]
pub struct PredicateSet {
    pub types: BTreeSet<String>,
    pub beds: BTreeSet<RoomCount>,
    pub baths: BTreeSet<RoomCount>,
    /// Whether listings with a null bath count pass the bath filter.
    pub include_unknown_baths: bool,
    pub price: ValueRange,
    pub sqft: ValueRange,
}

impl PredicateSet {
    /// Everything selected: every distinct value and the full observed ranges.
    pub fn full(working_set: &WorkingSet) -> Self {
        let opts = working_set.options();
        PredicateSet {
            types: opts.types.clone(),
            beds: opts.beds.clone(),
            baths: opts.baths.clone(),
            include_unknown_baths: true,
            price: opts.price,
            sqft: opts.sqft,
        }
    }

    /// Whether any categorical selection is empty, which rules out every row.
    /// A bath selection only counts as empty when there were baths to pick.
    pub fn selects_nothing(&self, options: &FilterOptions) -> bool {
        self.types.is_empty()
            || self.beds.is_empty()
            || (self.baths.is_empty() && !options.baths.is_empty())
    }

    /// A listing passes when every predicate holds.
    pub fn matches(&self, listing: &Listing) -> bool {
        let baths_ok = match listing.baths {
            Some(b) => self.baths.contains(&b),
            None => self.include_unknown_baths,
        };
        self.types.contains(&listing.kind)
            && self.beds.contains(&listing.beds)
            && baths_ok
            && self.price.contains(listing.list_price)
            && self.sqft.contains(listing.sqft)
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// The rows of a working set that pass a predicate set, in original order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    working_set: &'a WorkingSet,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// Indices into [`WorkingSet::listings`].
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a Listing> + '_ {
        let listings = self.working_set.listings();
        self.indices.iter().map(move |&i| &listings[i])
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Filter the whole working set from scratch.
///
/// An empty categorical selection short-circuits to an empty view; otherwise
/// a listing is kept only if it passes every predicate.
pub fn apply<'a>(working_set: &'a WorkingSet, predicates: &PredicateSet) -> FilteredView<'a> {
    let indices = if predicates.selects_nothing(working_set.options()) {
        Vec::new()
    } else {
        working_set
            .listings()
            .iter()
            .enumerate()
            .filter(|(_, listing)| predicates.matches(listing))
            .map(|(i, _)| i)
            .collect()
    };

    FilteredView {
        working_set,
        indices,
    }
}
