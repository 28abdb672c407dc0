use std::collections::BTreeSet;

use super::model::{Deal, DealTable};

/// Year span shown when the table has no usable years.
pub const DEFAULT_YEAR_RANGE: (i32, i32) = (2018, 2025);

// ---------------------------------------------------------------------------
// FilterSpec – user-chosen constraints on the table
// ---------------------------------------------------------------------------

/// User-selected constraints narrowing the table to a subset.
///
/// An empty country or industry set means "no restriction"; the year range
/// is inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub year_min: i32,
    pub year_max: i32,
    pub countries: BTreeSet<String>,
    pub industries: BTreeSet<String>,
}

impl Default for FilterSpec {
    fn default() -> Self {
        let (year_min, year_max) = DEFAULT_YEAR_RANGE;
        FilterSpec {
            year_min,
            year_max,
            countries: BTreeSet::new(),
            industries: BTreeSet::new(),
        }
    }
}

impl FilterSpec {
    /// The unrestricted spec for a table: its full year span, all countries,
    /// all industries.
    pub fn for_table(table: &DealTable) -> Self {
        let (year_min, year_max) = table.year_span().unwrap_or(DEFAULT_YEAR_RANGE);
        FilterSpec {
            year_min,
            year_max,
            countries: BTreeSet::new(),
            industries: BTreeSet::new(),
        }
    }

    /// Whether a deal passes every active constraint.
    pub fn matches(&self, deal: &Deal) -> bool {
        if deal.year < self.year_min || deal.year > self.year_max {
            return false;
        }
        if !self.countries.is_empty() && !self.countries.contains(&deal.country) {
            return false;
        }
        if !self.industries.is_empty() && !self.industries.contains(&deal.industry) {
            return false;
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return a new table containing the deals that pass `spec`, in input order.
///
/// Pure and total: an empty result is a valid zero-row table, never an
/// error.
pub fn apply(table: &DealTable, spec: &FilterSpec) -> DealTable {
    let deals: Vec<Deal> = table
        .deals
        .iter()
        .filter(|deal| spec.matches(deal))
        .cloned()
        .collect();

    DealTable::from_deals(deals)
}
