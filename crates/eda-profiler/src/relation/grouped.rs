//! Mean of a numeric column per category of another column.

use crate::types::GroupMean;
use std::collections::HashMap;

/// Group `(category, value)` pairs and average each group.
///
/// Groups appear in first-encounter order. Pairs whose value did not parse
/// (`None`) still register their category, but a group with no parsed
/// values is left out of the result.
pub fn grouped_means(pairs: impl IntoIterator<Item = (String, Option<f64>)>) -> Vec<GroupMean> {
    let mut order: Vec<String> = Vec::new();
    let mut sums: HashMap<String, (f64, usize)> = HashMap::new();

    for (group, value) in pairs {
        let entry = sums.entry(group.clone()).or_insert_with(|| {
            order.push(group);
            (0.0, 0)
        });
        if let Some(v) = value {
            entry.0 += v;
            entry.1 += 1;
        }
    }

    order
        .into_iter()
        .filter_map(|group| {
            let (sum, count) = sums.get(&group).copied()?;
            (count > 0).then(|| GroupMean {
                mean: sum / count as f64,
                count,
                group,
            })
        })
        .collect()
}
