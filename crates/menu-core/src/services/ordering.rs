//! Display ordering for ranked collections.
//!
//! Stored rankings may be sparse, duplicated or missing (concurrent appends,
//! deletes without renormalization). Everything here works on whatever is
//! stored and always yields one deterministic sequence.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use menu_shared::types::DocumentId;
use serde::{Deserialize, Serialize};

use crate::domain::MenuItem;
use crate::error::DomainError;

/// A record with a store id and an optional position.
pub trait Ranked {
    fn record_id(&self) -> &str;
    fn rank(&self) -> Option<u32>;
}

impl Ranked for MenuItem {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn rank(&self) -> Option<u32> {
        self.order
    }
}

/// `order` ascending with unranked records last, ties broken by id.
pub fn compare_display<T: Ranked>(a: &T, b: &T) -> Ordering {
    let by_rank = match (a.rank(), b.rank()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_rank.then_with(|| a.record_id().cmp(b.record_id()))
}

pub fn sort_for_display<T: Ranked>(records: &mut [T]) {
    records.sort_by(|a, b| compare_display(a, b));
}

/// One persisted position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAssignment {
    pub id: DocumentId,
    pub order: u32,
}

/// Maps each id to its index in `ordered_ids`.
pub fn assign_positions(ordered_ids: &[DocumentId]) -> Result<Vec<OrderAssignment>, DomainError> {
    let mut seen = HashSet::with_capacity(ordered_ids.len());
    let mut assignments = Vec::with_capacity(ordered_ids.len());

    for (index, id) in ordered_ids.iter().enumerate() {
        if !seen.insert(id.as_str()) {
            return Err(DomainError::validation(
                "ids",
                &format!("Duplicate id in reorder request: {}", id),
            ));
        }
        let order = u32::try_from(index)
            .map_err(|_| DomainError::validation("ids", "Too many ids to rank"))?;
        assignments.push(OrderAssignment { id: id.clone(), order });
    }

    Ok(assignments)
}

/// Moves the element at `from` so it ends up at `to`, shifting the ones in between.
pub fn move_position<T>(records: &mut Vec<T>, from: usize, to: usize) {
    if from >= records.len() || to >= records.len() || from == to {
        return;
    }
    let record = records.remove(from);
    records.insert(to, record);
}

/// Assignments that turn the display sequence into a dense 0..N-1 ranking.
/// Records already at their index are left out.
pub fn compaction_plan<T: Ranked>(display_sequence: &[T]) -> Vec<OrderAssignment> {
    display_sequence
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let order = u32::try_from(index).ok()?;
            (record.rank() != Some(order)).then(|| OrderAssignment {
                id: record.record_id().to_string(),
                order,
            })
        })
        .collect()
}

/// Shape of a stored ranking compared to a dense 0..N-1 one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RankingReport {
    /// Orders held by more than one record.
    pub duplicates: Vec<u32>,
    /// Positions in 0..N with no record.
    pub gaps: Vec<u32>,
    pub unranked: usize,
}

impl RankingReport {
    pub fn is_dense(&self) -> bool {
        self.duplicates.is_empty() && self.gaps.is_empty() && self.unranked == 0
    }
}

pub fn inspect_ranking<T: Ranked>(records: &[T]) -> RankingReport {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    let mut unranked = 0;
    for record in records {
        match record.rank() {
            Some(order) => *counts.entry(order).or_default() += 1,
            None => unranked += 1,
        }
    }

    let duplicates = counts
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(order, _)| *order)
        .collect();
    let size = u32::try_from(records.len()).unwrap_or(u32::MAX);
    let gaps = (0..size).filter(|order| !counts.contains_key(order)).collect();

    RankingReport {
        duplicates,
        gaps,
        unranked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(&'static str, Option<u32>);

    impl Ranked for Row {
        fn record_id(&self) -> &str {
            self.0
        }

        fn rank(&self) -> Option<u32> {
            self.1
        }
    }

    fn ids(rows: &[Row]) -> Vec<&'static str> {
        rows.iter().map(|r| r.0).collect()
    }

    #[test]
    fn test_distinct_orders_sort_ascending() {
        let mut rows = vec![Row("c", Some(2)), Row("a", Some(0)), Row("d", Some(3)), Row("b", Some(1))];
        sort_for_display(&mut rows);
        assert_eq!(ids(&rows), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_unranked_sort_last_by_id() {
        let mut rows = vec![Row("z", None), Row("m", Some(4)), Row("b", None), Row("k", Some(0))];
        sort_for_display(&mut rows);
        assert_eq!(ids(&rows), vec!["k", "m", "b", "z"]);

        // Same result whatever the input order.
        let mut shuffled = vec![Row("b", None), Row("k", Some(0)), Row("z", None), Row("m", Some(4))];
        sort_for_display(&mut shuffled);
        assert_eq!(shuffled, rows);
    }

    #[test]
    fn test_duplicate_orders_tie_break_on_id() {
        let mut rows = vec![Row("y", Some(0)), Row("x", Some(0)), Row("w", Some(1))];
        sort_for_display(&mut rows);
        assert_eq!(ids(&rows), vec!["x", "y", "w"]);
    }

    #[test]
    fn test_assign_positions() {
        let ids: Vec<DocumentId> = vec!["c".into(), "a".into(), "b".into()];
        let assignments = assign_positions(&ids).unwrap();
        assert_eq!(
            assignments,
            vec![
                OrderAssignment { id: "c".into(), order: 0 },
                OrderAssignment { id: "a".into(), order: 1 },
                OrderAssignment { id: "b".into(), order: 2 },
            ]
        );
    }

    #[test]
    fn test_assign_positions_rejects_duplicates() {
        let ids: Vec<DocumentId> = vec!["a".into(), "b".into(), "a".into()];
        assert!(matches!(assign_positions(&ids), Err(DomainError::Validation { .. })));
    }

    #[test]
    fn test_move_position() {
        let mut rows = vec![1, 2, 3];
        move_position(&mut rows, 2, 0);
        assert_eq!(rows, vec![3, 1, 2]);

        move_position(&mut rows, 0, 2);
        assert_eq!(rows, vec![1, 2, 3]);

        move_position(&mut rows, 5, 0);
        assert_eq!(rows, vec![1, 2, 3]);
    }

    #[test]
    fn test_inspect_ranking() {
        let dense = vec![Row("a", Some(0)), Row("b", Some(1))];
        assert!(inspect_ranking(&dense).is_dense());

        let gapped = vec![Row("a", Some(0)), Row("c", Some(2))];
        let report = inspect_ranking(&gapped);
        assert_eq!(report.gaps, vec![1]);
        assert!(report.duplicates.is_empty());

        let raced = vec![Row("a", Some(0)), Row("b", Some(0)), Row("c", None)];
        let report = inspect_ranking(&raced);
        assert_eq!(report.duplicates, vec![0]);
        assert_eq!(report.gaps, vec![1, 2]);
        assert_eq!(report.unranked, 1);
    }

    #[test]
    fn test_compaction_plan_skips_records_in_place() {
        let rows = vec![Row("a", Some(0)), Row("c", Some(2)), Row("d", None)];
        assert_eq!(
            compaction_plan(&rows),
            vec![
                OrderAssignment { id: "c".into(), order: 1 },
                OrderAssignment { id: "d".into(), order: 2 },
            ]
        );
    }
}
