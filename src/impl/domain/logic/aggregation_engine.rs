use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::entities::{
    Aggregates, DailyPaid, MonthKey, MonthlyPaid, ProcedureRecord, RegionTotals, Totals,
};

/// Reduces a record sequence to totals and grouped series. Everything is
/// recomputed from scratch on each call.
pub(crate) struct AggregationEngine<'a> {
    records: &'a [ProcedureRecord],
}

impl<'a> AggregationEngine<'a> {
    pub(crate) fn new(records: &'a [ProcedureRecord]) -> Self {
        Self { records }
    }

    pub(crate) fn process(self) -> Aggregates {
        Aggregates {
            totals: self.totals(),
            by_region: self.by_region(),
            daily: self.daily(),
            monthly: self.monthly(),
        }
    }

    pub(crate) fn totals(&self) -> Totals {
        self.records
            .iter()
            .map(Totals::of)
            .fold(Totals::default(), |acc, t| acc + t)
    }

    /// Groups appear in order of first occurrence.
    pub(crate) fn by_region(&self) -> Vec<RegionTotals> {
        let mut groups: Vec<RegionTotals> = Vec::new();
        for r in self.records {
            match groups.iter_mut().find(|g| g.region == r.region) {
                Some(g) => {
                    g.value_performed = g.value_performed.saturating_add(r.value_performed);
                    g.value_billed = g.value_billed.saturating_add(r.value_billed);
                    g.value_paid = g.value_paid.saturating_add(r.value_paid);
                }
                None => groups.push(RegionTotals {
                    region: r.region,
                    value_performed: r.value_performed,
                    value_billed: r.value_billed,
                    value_paid: r.value_paid,
                }),
            }
        }
        groups
    }

    pub(crate) fn daily(&self) -> Vec<DailyPaid> {
        paid_by(self.records, |r| r.date)
            .into_iter()
            .map(|(date, value_paid)| DailyPaid { date, value_paid })
            .collect()
    }

    pub(crate) fn monthly(&self) -> Vec<MonthlyPaid> {
        paid_by(self.records, |r| MonthKey::of(r.date))
            .into_iter()
            .map(|(month, value_paid)| MonthlyPaid { month, value_paid })
            .collect()
    }
}

fn paid_by<K: Ord>(
    records: &[ProcedureRecord],
    key: impl Fn(&ProcedureRecord) -> K,
) -> BTreeMap<K, Decimal> {
    records.iter().fold(BTreeMap::new(), |mut map, r| {
        let sum: &mut Decimal = map.entry(key(r)).or_default();
        *sum = sum.saturating_add(r.value_paid);
        map
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use proptest::prelude::*;

    use super::*;
    use crate::{
        data::seed::{seed_procedures, strategies::records},
        entities::Region,
    };

    fn dec(units: i64) -> Decimal {
        Decimal::new(units, 0)
    }

    fn redated(mut r: ProcedureRecord, date: &str) -> ProcedureRecord {
        r.date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        r
    }

    #[test]
    fn empty_input_yields_zero_totals_and_no_groups() {
        let aggregates = AggregationEngine::new(&[]).process();
        assert_eq!(aggregates, Aggregates::default());
        assert!(aggregates.totals.value_paid.is_zero());
    }

    #[test]
    fn seed_totals() {
        let records = seed_procedures();
        let totals = AggregationEngine::new(&records).totals();
        assert_eq!(totals.value_paid, dec(59000));
        assert_eq!(totals.value_performed, dec(63500));
        assert_eq!(totals.value_billed, dec(61950));
        assert_eq!(totals.qty_performed, 650);
        assert_eq!(totals.qty_billed, 638);
        assert_eq!(totals.qty_paid, 605);
    }

    #[test]
    fn regions_keep_first_occurrence_order_and_merge() {
        let seed = seed_procedures();
        let mut records = seed.clone();
        records.push(seed[1].clone()); // Second "Sul" record.

        let regions = AggregationEngine::new(&records).by_region();
        let order: Vec<Region> = regions.iter().map(|g| g.region).collect();
        assert_eq!(
            order,
            vec![
                Region::Sudeste,
                Region::Sul,
                Region::Nordeste,
                Region::CentroOeste
            ]
        );
        assert_eq!(regions[1].value_paid, dec(28000));
        assert_eq!(regions[1].value_billed, dec(30000));
        // Norte has no records and is omitted rather than zero-filled.
        assert!(regions.iter().all(|g| g.region != Region::Norte));
    }

    #[test]
    fn daily_and_monthly_series_are_sorted_and_grouped() {
        let seed = seed_procedures();
        let records = vec![
            redated(seed[0].clone(), "2024-08-02"),
            redated(seed[1].clone(), "2024-07-21"),
            redated(seed[2].clone(), "2024-08-02"),
            redated(seed[3].clone(), "2023-12-31"),
        ];
        let engine = AggregationEngine::new(&records);

        let daily = engine.daily();
        let days: Vec<String> = daily.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(days, vec!["2023-12-31", "2024-07-21", "2024-08-02"]);
        assert_eq!(daily[2].value_paid, dec(28500));

        let monthly = engine.monthly();
        let months: Vec<String> = monthly.iter().map(|m| m.month.to_string()).collect();
        assert_eq!(months, vec!["2023-12", "2024-07", "2024-08"]);
        assert_eq!(monthly[0].value_paid, dec(16500));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let records = seed_procedures();
        let first = AggregationEngine::new(&records).process();
        let second = AggregationEngine::new(&records).process();
        assert_eq!(first, second);
    }

    #[test]
    fn sums_saturate_instead_of_overflowing() {
        let seed = seed_procedures();
        let mut huge = seed[0].clone();
        huge.qty_performed = u64::MAX;
        huge.value_performed = Decimal::MAX;
        huge.value_paid = Decimal::MAX;
        let records = vec![huge.clone(), huge, seed[1].clone()];

        let aggregates = AggregationEngine::new(&records).process();
        assert_eq!(aggregates.totals.qty_performed, u64::MAX);
        assert_eq!(aggregates.totals.value_performed, Decimal::MAX);
        assert_eq!(aggregates.by_region[0].value_paid, Decimal::MAX);
        assert_eq!(aggregates.daily[0].value_paid, Decimal::MAX);
        assert_eq!(aggregates.monthly[0].value_paid, Decimal::MAX);
    }

    fn sorted_dedup<T: Ord>(mut keys: Vec<T>) -> Vec<T> {
        keys.sort();
        keys.dedup();
        keys
    }

    proptest! {
        #[test]
        fn totals_are_additive(records in records(), split in any::<prop::sample::Index>()) {
            let (left, right) = records.split_at(split.index(records.len() + 1));
            let whole = AggregationEngine::new(&records).totals();
            let left = AggregationEngine::new(left).totals();
            let right = AggregationEngine::new(right).totals();
            prop_assert_eq!(whole, left + right);
        }

        #[test]
        fn every_present_key_appears_exactly_once(records in records()) {
            let aggregates = AggregationEngine::new(&records).process();

            let labels = |regions: Vec<Region>| {
                sorted_dedup(regions.iter().map(|r| r.label()).collect())
            };
            let present = labels(records.iter().map(|r| r.region).collect());
            let grouped: Vec<Region> = aggregates.by_region.iter().map(|g| g.region).collect();
            prop_assert_eq!(grouped.len(), present.len());
            prop_assert_eq!(labels(grouped), present);

            let dates = sorted_dedup(records.iter().map(|r| r.date).collect());
            let days: Vec<NaiveDate> = aggregates.daily.iter().map(|d| d.date).collect();
            prop_assert_eq!(days, dates);

            let months = sorted_dedup(records.iter().map(|r| MonthKey::of(r.date)).collect());
            let got: Vec<MonthKey> = aggregates.monthly.iter().map(|m| m.month).collect();
            prop_assert_eq!(got, months);
        }

        #[test]
        fn series_partition_the_paid_total(records in records()) {
            let aggregates = AggregationEngine::new(&records).process();
            let paid = aggregates.totals.value_paid;

            let by_region: Decimal = aggregates.by_region.iter().map(|g| g.value_paid).sum();
            let daily: Decimal = aggregates.daily.iter().map(|d| d.value_paid).sum();
            let monthly: Decimal = aggregates.monthly.iter().map(|m| m.value_paid).sum();
            prop_assert_eq!(by_region, paid);
            prop_assert_eq!(daily, paid);
            prop_assert_eq!(monthly, paid);
        }
    }
}
