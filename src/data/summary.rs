//! KPI totals, per-classification summary and chip counts.

use std::collections::{BTreeMap, BTreeSet};

use crate::format::{format_count, format_number};

use super::model::Record;

/// Group label for records without a classification.
pub const UNCLASSIFIED: &str = "Sin";

// ---------------------------------------------------------------------------
// KPIs
// ---------------------------------------------------------------------------

/// Headline numbers for the current view.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Kpis {
    /// Records in the current (filtered) view.
    pub filtered: usize,
    /// Records in the whole inventory.
    pub total: usize,
    /// Sum of `inv`.
    pub inventory: f64,
    /// Sum of `promedio_vta_mes`.
    pub sales: f64,
    /// Mean of `cobertura_dias_30`; 0 for an empty view.
    pub avg_coverage_days: f64,
}

/// Display strings for the four KPI cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpiText {
    pub products: String,
    pub inventory: String,
    pub sales: String,
    pub avg_coverage_days: String,
}

impl Kpis {
    pub fn formatted(&self) -> KpiText {
        KpiText {
            products: format!("{} / {}", format_count(self.filtered), format_count(self.total)),
            inventory: format_number(self.inventory, 0),
            sales: format_number(self.sales, 0),
            avg_coverage_days: format_number(self.avg_coverage_days, 1),
        }
    }
}

/// Compute KPIs over `rows`; `total` is the size of the unfiltered set.
pub fn compute_kpis<'a>(rows: impl IntoIterator<Item = &'a Record>, total: usize) -> Kpis {
    let mut kpis = Kpis {
        total,
        ..Kpis::default()
    };
    let mut coverage_sum = 0.0;
    for rec in rows {
        kpis.filtered += 1;
        kpis.inventory += rec.inv;
        kpis.sales += rec.promedio_vta_mes;
        coverage_sum += rec.cobertura_dias_30;
    }
    if kpis.filtered > 0 {
        kpis.avg_coverage_days = coverage_sum / kpis.filtered as f64;
    }
    kpis
}

// ---------------------------------------------------------------------------
// Classification summary
// ---------------------------------------------------------------------------

/// Count and inventory of one classification within the view.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSummary {
    pub label: String,
    pub count: usize,
    pub inventory: f64,
}

/// Group `rows` by classification, in the order each group first appears.
pub fn classification_summary<'a>(
    rows: impl IntoIterator<Item = &'a Record>,
) -> Vec<ClassSummary> {
    let mut groups: Vec<ClassSummary> = Vec::new();
    let mut position: BTreeMap<&str, usize> = BTreeMap::new();

    for rec in rows {
        let label = if rec.clasificacion.is_empty() {
            UNCLASSIFIED
        } else {
            rec.clasificacion.as_str()
        };
        let idx = *position.entry(label).or_insert_with(|| {
            groups.push(ClassSummary {
                label: label.to_string(),
                count: 0,
                inventory: 0.0,
            });
            groups.len() - 1
        });
        groups[idx].count += 1;
        groups[idx].inventory += rec.inv;
    }
    groups
}

// ---------------------------------------------------------------------------
// Chips
// ---------------------------------------------------------------------------

/// One classification toggle with its count over the full inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    pub value: String,
    pub count: usize,
    pub active: bool,
}

/// Distinct non-empty classifications of `all_records`, sorted, each with its
/// record count. `active` marks the chips currently selected.
///
/// Active values the records no longer contain still get a chip (count 0) so
/// the selection stays visible and can be toggled off.
pub fn classification_chips(all_records: &[Record], active: &BTreeSet<String>) -> Vec<Chip> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for rec in all_records {
        if !rec.clasificacion.is_empty() {
            *counts.entry(rec.clasificacion.as_str()).or_default() += 1;
        }
    }
    for value in active {
        counts.entry(value.as_str()).or_default();
    }
    counts
        .into_iter()
        .map(|(value, count)| Chip {
            value: value.to_string(),
            count,
            active: active.contains(value),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(clasif: &str, inv: f64, venta: f64, dias: f64) -> Record {
        Record {
            clasificacion: clasif.to_string(),
            inv,
            promedio_vta_mes: venta,
            cobertura_dias_30: dias,
            ..Record::default()
        }
    }

    #[test]
    fn empty_view_has_zero_kpis() {
        let kpis = compute_kpis(std::iter::empty(), 12);
        assert_eq!(
            kpis,
            Kpis {
                filtered: 0,
                total: 12,
                inventory: 0.0,
                sales: 0.0,
                avg_coverage_days: 0.0,
            }
        );
        assert!(!kpis.avg_coverage_days.is_nan());
        let text = kpis.formatted();
        assert_eq!(text.products, "0 / 12");
        assert_eq!(text.inventory, "0");
        assert_eq!(text.sales, "0");
        assert_eq!(text.avg_coverage_days, "0.0");
    }

    #[test]
    fn kpis_sum_and_average() {
        let rows = vec![
            rec("A", 1500.0, 300.0, 45.0),
            rec("B", 250.0, 20.75, 120.0),
            rec("A", 0.0, 0.0, 0.0),
        ];
        let kpis = compute_kpis(&rows, 1200);
        assert_eq!(kpis.filtered, 3);
        assert_eq!(kpis.inventory, 1750.0);
        assert_eq!(kpis.sales, 320.75);
        assert_eq!(kpis.avg_coverage_days, 55.0);

        let text = kpis.formatted();
        assert_eq!(text.products, "3 / 1,200");
        assert_eq!(text.inventory, "1,750");
        assert_eq!(text.sales, "321");
        assert_eq!(text.avg_coverage_days, "55.0");
    }

    #[test]
    fn summary_groups_in_first_seen_order() {
        let rows = vec![
            rec("C", 5.0, 0.0, 0.0),
            rec("", 1.0, 0.0, 0.0),
            rec("A", 10.0, 0.0, 0.0),
            rec("C", 2.0, 0.0, 0.0),
            rec("", 3.0, 0.0, 0.0),
        ];
        let summary = classification_summary(&rows);
        assert_eq!(
            summary,
            vec![
                ClassSummary { label: "C".into(), count: 2, inventory: 7.0 },
                ClassSummary { label: UNCLASSIFIED.into(), count: 2, inventory: 4.0 },
                ClassSummary { label: "A".into(), count: 1, inventory: 10.0 },
            ]
        );
        assert!(classification_summary(std::iter::empty()).is_empty());
    }

    #[test]
    fn chips_are_sorted_and_counted_over_all_records() {
        let rows = vec![
            rec("C", 0.0, 0.0, 0.0),
            rec("A", 0.0, 0.0, 0.0),
            rec("", 0.0, 0.0, 0.0),
            rec("C", 0.0, 0.0, 0.0),
        ];
        let active: BTreeSet<String> = ["C".to_string()].into_iter().collect();
        let chips = classification_chips(&rows, &active);
        assert_eq!(
            chips,
            vec![
                Chip { value: "A".into(), count: 1, active: false },
                Chip { value: "C".into(), count: 2, active: true },
            ]
        );
    }

    #[test]
    fn active_value_missing_from_records_keeps_a_zero_chip() {
        let rows = vec![rec("A", 0.0, 0.0, 0.0), rec("C", 0.0, 0.0, 0.0)];
        let active: BTreeSet<String> = ["B".to_string()].into_iter().collect();
        let chips = classification_chips(&rows, &active);
        assert_eq!(
            chips,
            vec![
                Chip { value: "A".into(), count: 1, active: false },
                Chip { value: "B".into(), count: 0, active: true },
                Chip { value: "C".into(), count: 1, active: false },
            ]
        );
    }

    #[test]
    fn kpi_text_rounds_half_up() {
        let rows = vec![rec("A", 1.0, 0.5, 0.5), rec("A", 1.5, 2.0, 0.0)];
        let text = compute_kpis(&rows, 2).formatted();
        assert_eq!(text.inventory, "3");
        assert_eq!(text.sales, "3");
        assert_eq!(text.avg_coverage_days, "0.3");
    }
}
