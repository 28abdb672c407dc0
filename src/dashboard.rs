use serde::Serialize;

use crate::data::aggregate::aggregate;
use crate::data::filter::{self, FilterSpec};
use crate::data::model::{DealTable, Dimension, SummaryTable};

/// Default size of the investor leaderboard.
pub const DEFAULT_TOP_INVESTORS: usize = 10;

// ---------------------------------------------------------------------------
// DashboardViews – the structured payload handed to the renderer
// ---------------------------------------------------------------------------

/// Everything the presentation layer needs for one filter selection.
/// Recomputed fresh on every filter change; empty views are represented,
/// not errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardViews {
    /// Number of deals passing the active filters.
    pub deal_count: usize,
    /// The active (inclusive) year range.
    pub year_range: (i32, i32),
    /// Total funding by country, descending.
    pub by_country: SummaryTable,
    /// Total funding by industry, descending.
    pub by_industry: SummaryTable,
    /// Top investors by total funding, descending, truncated.
    pub top_investors: SummaryTable,
    /// Total funding per year, ascending (chronological).
    pub timeline: SummaryTable,
}

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// The loaded table, the active filters, and the derived views.
pub struct Dashboard {
    /// Loaded dataset (None until a table is installed).
    pub table: Option<DealTable>,

    /// Active filter selection.
    pub spec: FilterSpec,

    /// Size of the investor leaderboard.
    pub investor_limit: usize,

    /// Views derived from the current table + spec (cached).
    pub views: Option<DashboardViews>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Dashboard {
            table: None,
            spec: FilterSpec::default(),
            investor_limit: DEFAULT_TOP_INVESTORS,
            views: None,
        }
    }
}

impl Dashboard {
    /// Install a freshly loaded table and reset the filters to its full
    /// year span with no country/industry restriction.
    pub fn set_table(&mut self, table: DealTable) {
        self.spec = FilterSpec::for_table(&table);
        self.table = Some(table);
        self.recompute();
    }

    /// Clamp the active year range.
    pub fn set_year_range(&mut self, year_min: i32, year_max: i32) {
        self.spec.year_min = year_min;
        self.spec.year_max = year_max;
        self.recompute();
    }

    /// Toggle a country in the filter selection.
    pub fn toggle_country(&mut self, country: &str) {
        if !self.spec.countries.remove(country) {
            self.spec.countries.insert(country.to_string());
        }
        self.recompute();
    }

    /// Toggle an industry in the filter selection.
    pub fn toggle_industry(&mut self, industry: &str) {
        if !self.spec.industries.remove(industry) {
            self.spec.industries.insert(industry.to_string());
        }
        self.recompute();
    }

    /// Resize the investor leaderboard.
    pub fn set_investor_limit(&mut self, limit: usize) {
        self.investor_limit = limit;
        self.recompute();
    }

    /// Recompute all views after a table or filter change.
    pub fn recompute(&mut self) {
        let Some(table) = &self.table else {
            self.views = None;
            return;
        };

        let filtered = filter::apply(table, &self.spec);
        self.views = Some(DashboardViews {
            deal_count: filtered.len(),
            year_range: (self.spec.year_min, self.spec.year_max),
            by_country: aggregate(&filtered, Dimension::Country, None),
            by_industry: aggregate(&filtered, Dimension::Industry, None),
            top_investors: aggregate(&filtered, Dimension::Investor, Some(self.investor_limit)),
            timeline: aggregate(&filtered, Dimension::Year, None),
        });
    }
}
