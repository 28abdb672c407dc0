use std::collections::HashMap;

use super::model::{DealTable, Dimension, GroupKey, SummaryRow, SummaryTable};

// ---------------------------------------------------------------------------
// Grouping + reduction
// ---------------------------------------------------------------------------

/// Group `table` by `dimension`, summing deal amounts per group.
///
/// Rows are ordered by total descending; ties keep first-encounter order
/// (the sort is stable). The year dimension instead orders ascending by
/// year so the timeline reads chronologically. `top_n` keeps only the
/// first N rows after sorting.
pub fn aggregate(table: &DealTable, dimension: Dimension, top_n: Option<usize>) -> SummaryTable {
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut rows: Vec<SummaryRow> = Vec::new();

    for deal in &table.deals {
        let key = match dimension {
            Dimension::Country => GroupKey::Label(deal.country.clone()),
            Dimension::Industry => GroupKey::Label(deal.industry.clone()),
            Dimension::Investor => GroupKey::Label(deal.investor.clone()),
            Dimension::Year => GroupKey::Year(deal.year),
        };
        match index.get(&key) {
            Some(&i) => rows[i].total += deal.amount,
            None => {
                index.insert(key.clone(), rows.len());
                rows.push(SummaryRow {
                    key,
                    total: deal.amount,
                });
            }
        }
    }

    match dimension {
        Dimension::Year => rows.sort_by(|a, b| a.key.cmp(&b.key)),
        _ => rows.sort_by(|a, b| b.total.total_cmp(&a.total)),
    }

    if let Some(n) = top_n {
        rows.truncate(n);
    }

    SummaryTable { dimension, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Deal;

    fn deal(year: i32, country: &str, industry: &str, investor: &str, amount: f64) -> Deal {
        Deal {
            year,
            country: country.to_string(),
            industry: industry.to_string(),
            investor: investor.to_string(),
            amount,
        }
    }

    fn row(key: GroupKey, total: f64) -> SummaryRow {
        SummaryRow { key, total }
    }

    fn label(s: &str) -> GroupKey {
        GroupKey::Label(s.to_string())
    }

    fn sample_table() -> DealTable {
        DealTable::from_deals(vec![
            deal(2020, "Nigeria", "Fintech", "A", 10.0),
            deal(2020, "Kenya", "Fintech", "B", 5.0),
            deal(2021, "Nigeria", "Health", "A", 20.0),
        ])
    }

    #[test]
    fn test_country_totals_sorted_descending() {
        let summary = aggregate(&sample_table(), Dimension::Country, None);
        assert_eq!(
            summary.rows,
            vec![row(label("Nigeria"), 30.0), row(label("Kenya"), 5.0)]
        );
    }

    #[test]
    fn test_investor_top_n_sums_across_entries() {
        let summary = aggregate(&sample_table(), Dimension::Investor, Some(1));
        assert_eq!(summary.rows, vec![row(label("A"), 30.0)]);
    }

    #[test]
    fn test_timeline_sorted_ascending_by_year() {
        let table = DealTable::from_deals(vec![
            deal(2024, "Egypt", "Energy", "C", 1.0),
            deal(2019, "Ghana", "Agritech", "D", 100.0),
            deal(2024, "Egypt", "Energy", "C", 2.0),
        ]);

        let summary = aggregate(&table, Dimension::Year, None);
        assert_eq!(
            summary.rows,
            vec![row(GroupKey::Year(2019), 100.0), row(GroupKey::Year(2024), 3.0)]
        );

        let years: Vec<&GroupKey> = summary.rows.iter().map(|r| &r.key).collect();
        let mut sorted = years.clone();
        sorted.sort();
        assert_eq!(years, sorted);
    }

    #[test]
    fn test_ties_keep_encounter_order() {
        let table = DealTable::from_deals(vec![
            deal(2020, "Senegal", "Fintech", "A", 5.0),
            deal(2020, "Morocco", "Fintech", "B", 5.0),
            deal(2020, "Tunisia", "Fintech", "C", 5.0),
        ]);

        let summary = aggregate(&table, Dimension::Country, None);
        let keys: Vec<String> = summary.rows.iter().map(|r| r.key.to_string()).collect();
        assert_eq!(keys, vec!["Senegal", "Morocco", "Tunisia"]);
    }

    #[test]
    fn test_empty_table_yields_empty_summary() {
        let summary = aggregate(&DealTable::default(), Dimension::Industry, None);
        assert!(summary.is_empty());
        assert_eq!(summary.dimension, Dimension::Industry);
    }

    #[test]
    fn test_truncation_is_a_prefix_of_the_full_result() {
        let table = sample_table();
        let full = aggregate(&table, Dimension::Investor, None);
        for n in 0..=3 {
            let truncated = aggregate(&table, Dimension::Investor, Some(n));
            assert!(truncated.len() <= n.min(full.len()));
            assert_eq!(truncated.rows[..], full.rows[..truncated.len()]);
        }
    }

    #[test]
    fn test_totals_are_conserved() {
        let table = sample_table();
        for dimension in [
            Dimension::Country,
            Dimension::Industry,
            Dimension::Investor,
            Dimension::Year,
        ] {
            let summary = aggregate(&table, dimension, None);
            assert!((summary.total_amount() - table.total_amount()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let table = sample_table();
        let summary = aggregate(&table, Dimension::Country, None);

        // Re-ingest the summary rows as deals and aggregate again.
        let regrouped = DealTable::from_deals(
            summary
                .rows
                .iter()
                .map(|r| deal(2020, &r.key.to_string(), "", "", r.total))
                .collect(),
        );
        let again = aggregate(&regrouped, Dimension::Country, None);
        assert_eq!(again.rows, summary.rows);
    }

    #[test]
    fn test_zero_amount_deals_still_form_groups() {
        let table = DealTable::from_deals(vec![deal(2022, "Rwanda", "Edtech", "E", 0.0)]);
        let summary = aggregate(&table, Dimension::Country, None);
        assert_eq!(summary.rows, vec![row(label("Rwanda"), 0.0)]);
    }
}
