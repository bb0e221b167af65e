use crate::entities::{FilterState, ProcedureRecord};

/// Evaluates a `FilterState` against records. A record is selected iff every
/// active clause matches.
pub(crate) struct FilterPredicate<'a> {
    filter: &'a FilterState,
    search_lower: Option<String>,
}

/// An absent clause accepts everything.
fn clause<T>(value: &Option<T>, test: impl FnOnce(&T) -> bool) -> bool {
    value.as_ref().map_or(true, test)
}

impl<'a> FilterPredicate<'a> {
    pub(crate) fn new(filter: &'a FilterState) -> Self {
        Self {
            filter,
            search_lower: filter.search.as_ref().map(|s| s.to_lowercase()),
        }
    }

    pub(crate) fn matches(&self, r: &ProcedureRecord) -> bool {
        let f = self.filter;

        let matches_term = clause(&self.search_lower, |term| {
            r.procedure_name.to_lowercase().contains(term.as_str())
                || r.hospital_unit.to_lowercase().contains(term.as_str())
        });
        let matches_region = clause(&f.region, |region| r.region == *region);
        let matches_state = clause(&f.state, |state| r.state == *state);
        let matches_hospital = clause(&f.hospital, |h| &r.hospital_unit == h);
        let matches_procedure = clause(&f.procedure, |p| &r.procedure_name == p);
        let matches_creator = clause(&f.creator, |c| &r.created_by == c);
        let matches_date = clause(&f.start, |s| r.date >= *s) && clause(&f.end, |e| r.date <= *e);

        matches_term
            && matches_region
            && matches_state
            && matches_hospital
            && matches_procedure
            && matches_creator
            && matches_date
    }

    /// Selects matching records, preserving input order.
    pub(crate) fn apply(&self, records: &[ProcedureRecord]) -> Vec<ProcedureRecord> {
        records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use proptest::{prelude::*, sample::select};

    use super::*;
    use crate::{
        data::seed::{
            seed_procedures,
            strategies::{record, records},
        },
        entities::{FilterField, Region, StateCode},
    };

    fn filtered(filter: &FilterState) -> Vec<ProcedureRecord> {
        FilterPredicate::new(filter).apply(&seed_procedures())
    }

    fn with(field: FilterField, raw: &str) -> FilterState {
        let mut f = FilterState::default();
        f.set(field, raw).unwrap();
        f
    }

    fn searching(term: &str) -> FilterState {
        FilterState {
            search: Some(term.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_hospital() {
        let by_name = filtered(&with(FilterField::Search, "exame"));
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].procedure_name, "Exame de Sangue");

        let by_hospital = filtered(&with(FilterField::Search, "ALIANÇA"));
        assert_eq!(by_hospital.len(), 1);
        assert_eq!(by_hospital[0].hospital_unit, "Hospital Aliança");

        let absent = with(FilterField::Search, "ressonância");
        assert!(filtered(&absent).is_empty());
    }

    #[test]
    fn exact_clauses_compare_whole_values() {
        let sudeste = filtered(&with(FilterField::Region, "Sudeste"));
        assert_eq!(sudeste.len(), 1);
        assert_eq!(sudeste[0].region, Region::Sudeste);

        let rs = filtered(&with(FilterField::State, "RS"));
        assert_eq!(rs[0].state, StateCode::RS);
        // Partial hospital names only count for the free-text clause.
        let partial = with(FilterField::Hospital, "Hospital");
        assert!(filtered(&partial).is_empty());
        assert_eq!(filtered(&with(FilterField::Creator, "Sistema")).len(), 4);
        let lowercase = with(FilterField::Creator, "sistema");
        assert!(filtered(&lowercase).is_empty());
    }

    #[test]
    fn date_range_is_inclusive() {
        let mut f = FilterState::default();
        f.set(FilterField::Start, "2024-07-21").unwrap();
        f.set(FilterField::End, "2024-07-22").unwrap();
        let dates: Vec<String> = filtered(&f).iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-07-21", "2024-07-22"]);

        let open_end = filtered(&with(FilterField::Start, "2024-07-23"));
        assert_eq!(open_end.len(), 1);
    }

    #[test]
    fn clauses_combine_with_and() {
        let mut f = with(FilterField::Region, "Sul");
        f.set(FilterField::Search, "cardio").unwrap();
        assert!(filtered(&f).is_empty());
    }

    proptest! {
        #[test]
        fn empty_filter_is_identity(records in records()) {
            let all = FilterPredicate::new(&FilterState::default()).apply(&records);
            prop_assert_eq!(all, records);
        }

        #[test]
        fn search_selects_exactly_the_containing_records(
            records in records(),
            term in "[a-zà-ú]{1,3}",
        ) {
            let filter = searching(&term);
            let predicate = FilterPredicate::new(&filter);
            for r in &records {
                let hit = r.procedure_name.to_lowercase().contains(&term)
                    || r.hospital_unit.to_lowercase().contains(&term);
                prop_assert_eq!(predicate.matches(r), hit);
            }
        }

        #[test]
        fn search_ignores_case_of_the_term(r in record(), upper in any::<bool>()) {
            let name = r.procedure_name.clone();
            let term = if upper { name.to_ascii_uppercase() } else { name.to_lowercase() };
            prop_assert!(searching(&term).matches(&r));
        }

        #[test]
        fn selection_is_the_ordered_subsequence_of_matches(
            records in records(),
            region in select(Region::ALL.to_vec()),
            creator in select(vec!["", "Sistema", "Administrador"]),
        ) {
            let filter = FilterState {
                region: Some(region),
                creator: Some(creator.to_string()),
                ..Default::default()
            };
            let selected = FilterPredicate::new(&filter).apply(&records);

            let expected: Vec<ProcedureRecord> = records
                .iter()
                .filter(|r| r.region == region && r.created_by == creator)
                .cloned()
                .collect();
            prop_assert_eq!(selected, expected);
        }

        #[test]
        fn clauses_compose_as_a_conjunction(
            records in records(),
            region in select(Region::ALL.to_vec()),
            start in 0i64..1460,
            span in 0i64..400,
        ) {
            let first = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
            let start = first + chrono::Duration::days(start);
            let end = start + chrono::Duration::days(span);
            let by_region = FilterState { region: Some(region), ..Default::default() };
            let by_dates = FilterState {
                start: Some(start),
                end: Some(end),
                ..Default::default()
            };
            let both = FilterState { region: Some(region), ..by_dates.clone() };

            let chained = FilterPredicate::new(&by_dates)
                .apply(&FilterPredicate::new(&by_region).apply(&records));
            let combined = FilterPredicate::new(&both).apply(&records);
            prop_assert!(combined.iter().all(|r| r.date >= start && r.date <= end));
            prop_assert_eq!(combined, chained);
        }
    }
}
