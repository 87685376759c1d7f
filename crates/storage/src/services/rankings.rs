use std::collections::HashMap;

use crate::models::{Metric, NativeRank, RankingRow, Ranks, ResultRow};

use super::dense_descending;

/// Dense ranks, highest value first, computed separately within each key.
///
/// Entries without a key or with a missing or non-positive value are left unranked.
pub fn dense_ranks(entries: &[(Option<&str>, Option<f64>)]) -> Vec<Option<i64>> {
    let mut groups: HashMap<&str, Vec<(usize, Option<f64>)>> = HashMap::new();
    for (index, (key, value)) in entries.iter().enumerate() {
        if let (Some(key), Some(value)) = (key, value)
            && *value > 0.0
        {
            groups.entry(*key).or_default().push((index, Some(*value)));
        }
    }

    let mut ranks = vec![None; entries.len()];
    for members in groups.into_values() {
        for (index, rank) in dense_descending(members) {
            ranks[index] = Some(rank);
        }
    }
    ranks
}

/// Each competitor's personal best for `metric`, ranked in the world, their
/// continent and their country.
///
/// `results` must already be in canonical order: the earliest row reaching a
/// competitor's best value is the one kept.
pub fn build_rankings(
    results: &[ResultRow],
    metric: Metric,
    native_ranks: &HashMap<&str, &NativeRank>,
) -> Vec<RankingRow> {
    let mut best: HashMap<&str, usize> = HashMap::new();
    let mut persons: Vec<&str> = Vec::new();

    for (index, row) in results.iter().enumerate() {
        let person_id = row.core.person_id.as_str();
        match best.get_mut(person_id) {
            Some(current) => {
                if is_better(metric.value(&row.core), metric.value(&results[*current].core)) {
                    *current = index;
                }
            }
            None => {
                best.insert(person_id, index);
                persons.push(person_id);
            }
        }
    }

    let mut rankings: Vec<RankingRow> = persons
        .iter()
        .map(|person_id| RankingRow {
            core: results[best[person_id]].core.clone(),
            ranks: Ranks::default(),
        })
        .collect();

    let world = rank_by(&rankings, metric, |_| Some("world"));
    let continent = rank_by(&rankings, metric, |row| row.core.continent_id.as_deref());
    let country = rank_by(&rankings, metric, |row| Some(row.core.person_country_id.as_str()));

    for (index, row) in rankings.iter_mut().enumerate() {
        let native = native_ranks.get(row.core.person_id.as_str());
        row.ranks = Ranks {
            world_rank: world[index],
            continent_rank: continent[index],
            country_rank: country[index],
            wca_world_rank: native.map(|rank| rank.world_rank),
            wca_continent_rank: native.map(|rank| rank.continent_rank),
            wca_country_rank: native.map(|rank| rank.country_rank),
        };
    }

    rankings.sort_by(|a, b| {
        let (a_rank, b_rank) = (a.ranks.world_rank, b.ranks.world_rank);
        a_rank
            .is_none()
            .cmp(&b_rank.is_none())
            .then(a_rank.cmp(&b_rank))
            .then_with(|| a.core.person_id.cmp(&b.core.person_id))
    });

    rankings
}

fn rank_by<'r>(
    rankings: &'r [RankingRow],
    metric: Metric,
    key: impl Fn(&'r RankingRow) -> Option<&'r str>,
) -> Vec<Option<i64>> {
    let entries: Vec<(Option<&str>, Option<f64>)> = rankings
        .iter()
        .map(|row| (key(row), metric.value(&row.core)))
        .collect();
    dense_ranks(&entries)
}

fn is_better(candidate: Option<f64>, current: Option<f64>) -> bool {
    match (candidate, current) {
        (Some(candidate), Some(current)) => candidate > current,
        (Some(_), None) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures::result_with_single;

    #[test]
    fn test_dense_ranks_share_ties_without_gaps() {
        let entries = vec![
            (Some("world"), Some(30.0)),
            (Some("world"), Some(25.0)),
            (Some("world"), Some(30.0)),
            (Some("world"), Some(20.0)),
            (Some("world"), Some(25.0)),
        ];
        assert_eq!(
            dense_ranks(&entries),
            vec![Some(1), Some(2), Some(1), Some(3), Some(2)]
        );
    }

    #[test]
    fn test_dense_ranks_are_grouped() {
        let entries = vec![
            (Some("Norway"), Some(10.0)),
            (Some("Japan"), Some(5.0)),
            (Some("Norway"), Some(12.0)),
            (None, Some(50.0)),
        ];
        assert_eq!(dense_ranks(&entries), vec![Some(2), Some(1), Some(1), None]);
    }

    #[test]
    fn test_dense_ranks_skip_invalid_values() {
        let entries = vec![
            (Some("world"), Some(-1.0)),
            (Some("world"), None),
            (Some("world"), Some(0.0)),
            (Some("world"), Some(3.0)),
        ];
        assert_eq!(dense_ranks(&entries), vec![None, None, None, Some(1)]);
    }

    #[test]
    fn test_rankings_keep_each_personal_best() {
        let results = vec![
            result_with_single("2020NORD01", "Norway", "Comp2020", "2020-01-01", 10.0),
            result_with_single("2020NORD01", "Norway", "Comp2021", "2021-01-01", 14.0),
            result_with_single("2020SWED01", "Sweden", "Comp2021", "2021-01-01", 14.0),
            result_with_single("2020JAPA01", "Japan", "Comp2021", "2021-01-01", 11.0),
            result_with_single("2020NORD02", "Norway", "Comp2022", "2022-01-01", -1.0),
        ];
        let rankings = build_rankings(&results, Metric::Single, &HashMap::new());

        let order: Vec<&str> = rankings.iter().map(|r| r.core.person_id.as_str()).collect();
        assert_eq!(order, vec!["2020NORD01", "2020SWED01", "2020JAPA01", "2020NORD02"]);

        assert_eq!(rankings[0].core.competition_id, "Comp2021");
        assert_eq!(rankings[0].ranks.world_rank, Some(1));
        assert_eq!(rankings[1].ranks.world_rank, Some(1));
        assert_eq!(rankings[2].ranks.world_rank, Some(2));
        assert_eq!(rankings[2].ranks.continent_rank, Some(1));
        assert_eq!(rankings[1].ranks.continent_rank, Some(1));
        assert_eq!(rankings[1].ranks.country_rank, Some(1));

        let unranked = &rankings[3];
        assert_eq!(unranked.ranks.world_rank, None);
        assert_eq!(unranked.ranks.continent_rank, None);
        assert_eq!(unranked.ranks.country_rank, None);
    }

    #[test]
    fn test_ties_keep_the_earliest_row() {
        let results = vec![
            result_with_single("2020NORD01", "Norway", "Comp2020", "2020-01-01", 14.0),
            result_with_single("2020NORD01", "Norway", "Comp2021", "2021-01-01", 14.0),
        ];
        let rankings = build_rankings(&results, Metric::Single, &HashMap::new());

        assert_eq!(rankings.len(), 1);
        assert_eq!(rankings[0].core.competition_id, "Comp2020");
    }

    #[test]
    fn test_native_ranks_are_joined_without_changing_ranks() {
        let results = vec![
            result_with_single("2020NORD01", "Norway", "Comp2020", "2020-01-01", 10.0),
            result_with_single("2020SWED01", "Sweden", "Comp2020", "2020-01-01", 20.0),
        ];
        let native = NativeRank {
            person_id: "2020NORD01".to_string(),
            world_rank: 1,
            continent_rank: 1,
            country_rank: 1,
        };
        let lookup = HashMap::from([("2020NORD01", &native)]);
        let rankings = build_rankings(&results, Metric::Single, &lookup);

        assert_eq!(rankings[0].core.person_id, "2020SWED01");
        assert_eq!(rankings[0].ranks.wca_world_rank, None);
        assert_eq!(rankings[1].ranks.world_rank, Some(2));
        assert_eq!(rankings[1].ranks.wca_world_rank, Some(1));
    }
}
