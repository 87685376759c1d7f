use std::collections::HashMap;

use crate::models::ResultRow;

use super::dense_descending;

/// Sets `pos` on every row: dense rank by best score within its competition round.
/// Rows without a best score share the last place of their round.
pub fn assign_positions(results: &mut [ResultRow]) {
    let mut rounds: HashMap<(&str, &str), Vec<(usize, Option<f64>)>> = HashMap::new();
    for (index, row) in results.iter().enumerate() {
        rounds
            .entry((row.core.competition_id.as_str(), row.round_type_id.as_str()))
            .or_default()
            .push((index, row.core.best_score));
    }

    let positions: Vec<(usize, i64)> = rounds.into_values().flat_map(dense_descending).collect();

    for (index, pos) in positions {
        results[index].pos = pos as i32;
    }
}
