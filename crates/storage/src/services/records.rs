//! Record detection over the full, date-ordered result history.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::models::{Metric, ResultRow};

use super::descending_missing_last;
use super::reference::ReferenceTables;

/// Record tiers, lowest to highest. `Ord` follows precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordTag {
    Personal,
    National,
    Continental,
    World,
}

impl RecordTag {
    /// Label for every tier except continental, whose label depends on the continent.
    pub fn fixed_label(&self) -> Option<&'static str> {
        match self {
            Self::Personal => Some("PR"),
            Self::National => Some("NR"),
            Self::Continental => None,
            Self::World => Some("WR"),
        }
    }

    /// Display label; continental records use the continent's own record name.
    pub fn render(&self, continent_record_name: Option<&str>) -> Option<String> {
        self.fixed_label()
            .or(continent_record_name)
            .map(str::to_string)
    }
}

/// Results oldest first, best value first within a day. This is the order
/// in which regional records are set.
pub struct RecordTimeline<'a> {
    rows: &'a [ResultRow],
    metric: Metric,
    order: Vec<usize>,
}

impl<'a> RecordTimeline<'a> {
    pub fn new(rows: &'a [ResultRow], metric: Metric) -> Self {
        let mut order: Vec<usize> = (0..rows.len()).collect();
        order.sort_by(|&a, &b| {
            let (a, b) = (&rows[a].core, &rows[b].core);
            a.start_date
                .cmp(&b.start_date)
                .then_with(|| descending_missing_last(metric.value(a), metric.value(b)))
        });

        Self { rows, metric, order }
    }

    /// Highest tier each row attains, aligned with the input rows.
    ///
    /// A row holds a scope's record when its value equals the running maximum of
    /// that scope so far. Values that are missing or not positive never qualify.
    pub fn mark(&self, reference: &ReferenceTables<'_>) -> Vec<Option<RecordTag>> {
        let mut tags = vec![None; self.rows.len()];

        let mut world: Option<f64> = None;
        let mut continents: HashMap<&str, f64> = HashMap::new();
        let mut countries: HashMap<&str, f64> = HashMap::new();
        let mut persons: HashMap<&str, f64> = HashMap::new();

        for &index in &self.order {
            let row = &self.rows[index].core;
            let Some(value) = self.metric.value(row) else {
                continue;
            };

            let world_best = raise_world(&mut world, value);
            let continent_best = reference
                .record_continent(&row.person_country_id)
                .is_some_and(|id| raise(&mut continents, id, value));
            let country_best = raise(&mut countries, &row.person_country_id, value);
            let personal_best = raise(&mut persons, &row.person_id, value);

            if value <= 0.0 {
                continue;
            }

            tags[index] = [
                (world_best, RecordTag::World),
                (continent_best, RecordTag::Continental),
                (country_best, RecordTag::National),
                (personal_best, RecordTag::Personal),
            ]
            .into_iter()
            .find_map(|(holds, tag)| holds.then_some(tag));
        }

        tags
    }
}

/// Results oldest first, lowest raw best result first within a day.
pub struct BestResultTimeline<'a> {
    rows: &'a [ResultRow],
    order: Vec<usize>,
}

impl<'a> BestResultTimeline<'a> {
    pub fn new(rows: &'a [ResultRow]) -> Self {
        let mut order: Vec<usize> = (0..rows.len()).collect();
        order.sort_by(|&a, &b| {
            let (a, b) = (&rows[a].core, &rows[b].core);
            a.start_date
                .cmp(&b.start_date)
                .then(a.best_result.cmp(&b.best_result))
        });

        Self { rows, order }
    }

    /// Rows whose raw best result is valid and at least as good as every
    /// earlier valid best result of the same competitor. Lower raw values are better.
    pub fn personal_records(&self) -> Vec<bool> {
        let mut flags = vec![false; self.rows.len()];
        let mut best: HashMap<&str, i64> = HashMap::new();

        for &index in &self.order {
            let row = &self.rows[index].core;
            if row.best_result <= 0 {
                continue;
            }

            flags[index] = match best.entry(&row.person_id) {
                Entry::Occupied(mut entry) => {
                    if row.best_result <= *entry.get() {
                        entry.insert(row.best_result);
                        true
                    } else {
                        false
                    }
                }
                Entry::Vacant(entry) => {
                    entry.insert(row.best_result);
                    true
                }
            };
        }

        flags
    }
}

fn raise_world(current: &mut Option<f64>, value: f64) -> bool {
    if current.is_some_and(|best| best > value) {
        return false;
    }
    *current = Some(value);
    true
}

fn raise<'k>(maxima: &mut HashMap<&'k str, f64>, key: &'k str, value: f64) -> bool {
    match maxima.entry(key) {
        Entry::Occupied(mut entry) => {
            if value >= *entry.get() {
                entry.insert(value);
                true
            } else {
                false
            }
        }
        Entry::Vacant(entry) => {
            entry.insert(value);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures::{continents, countries, result_with_single};

    fn single_tags(rows: &[ResultRow]) -> Vec<Option<RecordTag>> {
        let continents = continents();
        let countries = countries();
        let reference = ReferenceTables::new(&continents, &countries).unwrap();
        RecordTimeline::new(rows, Metric::Single).mark(&reference)
    }

    #[test]
    fn test_progression_within_one_person() {
        let rows = vec![
            result_with_single("2020NORD01", "Norway", "Comp2020", "2020-01-01", 10.0),
            result_with_single("2020NORD01", "Norway", "Comp2021", "2021-01-01", 12.0),
            result_with_single("2020NORD01", "Norway", "Comp2022", "2022-01-01", 11.0),
        ];
        let tags = single_tags(&rows);

        assert_eq!(tags[0], Some(RecordTag::World));
        assert_eq!(tags[1], Some(RecordTag::World));
        assert_eq!(tags[2], None);
    }

    #[test]
    fn test_highest_tier_wins() {
        let rows = vec![
            result_with_single("2019JAPA01", "Japan", "Tokyo2019", "2019-06-01", 30.0),
            result_with_single("2019SWED01", "Sweden", "Oslo2020", "2020-01-01", 20.0),
            result_with_single("2019NORD01", "Norway", "Oslo2020", "2020-01-01", 25.0),
            result_with_single("2019NORD02", "Norway", "Oslo2021", "2021-01-01", 22.0),
            result_with_single("2019NORD01", "Norway", "Oslo2022", "2022-01-01", 26.0),
            result_with_single("2019NORD02", "Norway", "Oslo2022", "2022-01-01", 23.0),
        ];
        let tags = single_tags(&rows);

        assert_eq!(tags[0], Some(RecordTag::World));
        // Same day as a better European result: only its own country's record.
        assert_eq!(tags[1], Some(RecordTag::National));
        assert_eq!(tags[2], Some(RecordTag::Continental));
        assert_eq!(tags[3], Some(RecordTag::Personal));
        assert_eq!(tags[4], Some(RecordTag::Continental));
        assert_eq!(tags[5], Some(RecordTag::Personal));
    }

    #[test]
    fn test_non_positive_scores_are_never_tagged() {
        let rows = vec![
            result_with_single("2020NORD01", "Norway", "Comp2020", "2020-01-01", -1.0),
            result_with_single("2020NORD01", "Norway", "Comp2021", "2021-01-01", 0.0),
        ];
        assert_eq!(single_tags(&rows), vec![None, None]);
    }

    #[test]
    fn test_equal_score_repeats_the_record() {
        let rows = vec![
            result_with_single("2020NORD01", "Norway", "Comp2020", "2020-01-01", 10.0),
            result_with_single("2020SWED01", "Sweden", "Comp2021", "2021-01-01", 10.0),
        ];
        let tags = single_tags(&rows);

        assert_eq!(tags, vec![Some(RecordTag::World), Some(RecordTag::World)]);
    }

    #[test]
    fn test_continent_without_record_name_skips_continental_tier() {
        let rows = vec![
            result_with_single("2018JAPA01", "Japan", "Tokyo2018", "2018-01-01", 50.0),
            result_with_single("2019XAXA01", "XA", "Tokyo2019", "2019-01-01", 20.0),
        ];
        let tags = single_tags(&rows);

        assert_eq!(tags[1], Some(RecordTag::National));
    }

    #[test]
    fn test_render_uses_continent_record_name() {
        assert_eq!(RecordTag::World.render(Some("ER")).as_deref(), Some("WR"));
        assert_eq!(RecordTag::Continental.render(Some("ER")).as_deref(), Some("ER"));
        assert_eq!(RecordTag::Continental.render(None), None);
        assert_eq!(RecordTag::Personal.render(None).as_deref(), Some("PR"));
    }

    #[test]
    fn test_precedence_order() {
        assert!(RecordTag::World > RecordTag::Continental);
        assert!(RecordTag::Continental > RecordTag::National);
        assert!(RecordTag::National > RecordTag::Personal);
    }

    #[test]
    fn test_personal_records_by_raw_value() {
        let mut rows = vec![
            result_with_single("2020NORD01", "Norway", "Comp2020", "2020-01-01", 10.0),
            result_with_single("2020NORD01", "Norway", "Comp2021", "2021-01-01", 9.0),
            result_with_single("2020NORD01", "Norway", "Comp2022", "2022-01-01", 12.0),
            result_with_single("2020NORD01", "Norway", "Comp2023", "2023-01-01", -1.0),
        ];
        rows[0].core.best_result = 900_300_000;
        rows[1].core.best_result = 910_300_000;
        rows[2].core.best_result = 900_300_000;
        rows[3].core.best_result = -1;

        let flags = BestResultTimeline::new(&rows).personal_records();
        assert_eq!(flags, vec![true, false, true, false]);
    }

    #[test]
    fn test_personal_records_same_day_lower_raw_value_first() {
        let mut rows = vec![
            result_with_single("2020NORD01", "Norway", "Oslo2024", "2024-05-04", 9.0),
            result_with_single("2020NORD01", "Norway", "Oslo2024", "2024-05-04", 10.0),
        ];
        rows[0].core.best_result = 910_300_000;
        rows[1].core.best_result = 900_300_000;

        let flags = BestResultTimeline::new(&rows).personal_records();
        assert_eq!(flags, vec![false, true]);

        rows[0].core.best_result = 900_300_000;
        let flags = BestResultTimeline::new(&rows).personal_records();
        assert_eq!(flags, vec![true, true]);
    }
}
