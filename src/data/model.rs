use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Deal – one row of the source table
// ---------------------------------------------------------------------------

/// A single funding deal (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct Deal {
    pub year: i32,
    pub country: String,
    pub industry: String,
    pub investor: String,
    /// Deal size in USD millions. Finite and >= 0 after loading.
    pub amount: f64,
}

// ---------------------------------------------------------------------------
// DealTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full normalized dataset with pre-computed filter options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DealTable {
    /// All deals, in source order.
    pub deals: Vec<Deal>,
    /// Sorted set of distinct years present in the data.
    pub years: BTreeSet<i32>,
    /// Sorted set of distinct countries.
    pub countries: BTreeSet<String>,
    /// Sorted set of distinct industries.
    pub industries: BTreeSet<String>,
}

impl DealTable {
    /// Build the filter-option indices from the loaded deals.
    pub fn from_deals(deals: Vec<Deal>) -> Self {
        let mut years = BTreeSet::new();
        let mut countries = BTreeSet::new();
        let mut industries = BTreeSet::new();

        for deal in &deals {
            years.insert(deal.year);
            countries.insert(deal.country.clone());
            industries.insert(deal.industry.clone());
        }
        DealTable {
            deals,
            years,
            countries,
            industries,
        }
    }

    /// Number of deals.
    pub fn len(&self) -> usize {
        self.deals.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.deals.is_empty()
    }

    /// Smallest and largest year present in the data, if any.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        match (self.years.first(), self.years.last()) {
            (Some(&min), Some(&max)) => Some((min, max)),
            _ => None,
        }
    }

    /// Sum of all deal amounts.
    pub fn total_amount(&self) -> f64 {
        self.deals.iter().map(|d| d.amount).sum()
    }
}

// ---------------------------------------------------------------------------
// Dimension – which field a summary groups by
// ---------------------------------------------------------------------------

/// The field used to group deals for aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Country,
    Industry,
    Investor,
    Year,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::Country => "country",
            Dimension::Industry => "industry",
            Dimension::Investor => "investor",
            Dimension::Year => "year",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// GroupKey – the value a summary row is keyed on
// ---------------------------------------------------------------------------

/// A grouping key: either a text field value or a calendar year.
/// `Ord` + `Hash` so it can key maps and order timeline rows.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum GroupKey {
    Label(String),
    Year(i32),
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Label(s) => write!(f, "{s}"),
            GroupKey::Year(y) => write!(f, "{y}"),
        }
    }
}

// ---------------------------------------------------------------------------
// SummaryRow / SummaryTable – one grouped-and-reduced view
// ---------------------------------------------------------------------------

/// One group's key and its summed funding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub key: GroupKey,
    /// Total funding for the group, in USD millions.
    pub total: f64,
}

/// A grouped-and-reduced view over the filtered table, ordered per the
/// dimension's rule (total descending, or year ascending for the timeline).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable {
    pub dimension: Dimension,
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    /// Number of groups.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the view has any groups.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of all group totals.
    pub fn total_amount(&self) -> f64 {
        self.rows.iter().map(|r| r.total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deal(year: i32, country: &str, industry: &str, investor: &str, amount: f64) -> Deal {
        Deal {
            year,
            country: country.to_string(),
            industry: industry.to_string(),
            investor: investor.to_string(),
            amount,
        }
    }

    #[test]
    fn test_from_deals_builds_filter_options() {
        let table = DealTable::from_deals(vec![
            deal(2020, "Nigeria", "Fintech", "A", 10.0),
            deal(2020, "Kenya", "Fintech", "B", 5.0),
            deal(2021, "Nigeria", "Health", "A", 20.0),
        ]);

        assert_eq!(table.len(), 3);
        assert_eq!(
            table.years.iter().copied().collect::<Vec<_>>(),
            vec![2020, 2021]
        );
        assert_eq!(table.countries.len(), 2);
        assert!(table.countries.contains("Kenya"));
        assert_eq!(
            table.industries.iter().cloned().collect::<Vec<_>>(),
            vec!["Fintech".to_string(), "Health".to_string()]
        );
    }

    #[test]
    fn test_year_span() {
        let table = DealTable::from_deals(vec![
            deal(2023, "Egypt", "Logistics", "C", 1.0),
            deal(2019, "Ghana", "Agritech", "D", 2.0),
        ]);
        assert_eq!(table.year_span(), Some((2019, 2023)));

        let empty = DealTable::default();
        assert_eq!(empty.year_span(), None);
    }

    #[test]
    fn test_group_key_ordering_and_display() {
        assert!(GroupKey::Year(2019) < GroupKey::Year(2020));
        assert_eq!(GroupKey::Year(2020).to_string(), "2020");
        assert_eq!(GroupKey::Label("Fintech".into()).to_string(), "Fintech");
    }
}
