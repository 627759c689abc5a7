//! Reorder resolution: (dragged entity, drop target) -> [`BoardMove`].
//!
//! Placement rules:
//!
//! - Column over column: array-move semantics. The column is taken out and
//!   reinserted at the target's index, so `[A, B, C]` with `A` dropped on `C`
//!   becomes `[B, C, A]`. A column dropped on a task behaves as if dropped on
//!   that task's column.
//! - Task over task in the same column: array-move semantics within the
//!   column. Moving down lands after the target, moving up lands before it.
//! - Task over task in another column: the task joins that column
//!   immediately before the target.
//! - Task over a column: the task joins that column as its last task.
//!
//! The result is always a fresh ordinal between the two new neighbours.
//! Unknown entities (deleted since the drag began) and self-drops resolve to
//! `None`.

use crate::drag::{DragItem, DropTarget};
use crate::error::Result;
use crate::types::{Board, BoardMove, ColumnId, Ordinal, TaskId};
use tracing::{debug, trace};

/// Compute the move that dropping `item` on `target` commits against `board`.
///
/// Returns `Ok(None)` when nothing should change. An `Err` can only come from
/// an ordering-contract violation, which means the board's ordinals are
/// inconsistent.
pub fn resolve(board: &Board, item: &DragItem, target: &DropTarget) -> Result<Option<BoardMove>> {
    let resolved = match item {
        DragItem::Column(id) => resolve_column(board, id, target)?,
        DragItem::Task(id) => resolve_task(board, id, target)?,
    };
    trace!(?item, ?target, ?resolved, "resolved drop");
    Ok(resolved)
}

/// Ordinal for inserting at `index` into `siblings`, which must not contain
/// the entity being moved.
fn ordinal_at(siblings: &[&Ordinal], index: usize) -> Result<Ordinal> {
    let before = index.checked_sub(1).and_then(|i| siblings.get(i)).copied();
    let after = siblings.get(index).copied();
    Ordinal::between(before, after)
}

fn resolve_column(board: &Board, id: &ColumnId, target: &DropTarget) -> Result<Option<BoardMove>> {
    let target_column = match target {
        DropTarget::Column(column) => Some(column.clone()),
        DropTarget::Task(task) => board.task(task).map(|t| t.column.clone()),
    };

    let (Some(from), Some(to)) = (
        board.column_index(id),
        target_column.and_then(|c| board.column_index(&c)),
    ) else {
        debug!(column = %id, ?target, "stale column drop; ignoring");
        return Ok(None);
    };

    if from == to {
        return Ok(None);
    }

    let siblings: Vec<&Ordinal> = board
        .columns()
        .iter()
        .filter(|c| &c.id != id)
        .map(|c| &c.ordinal)
        .collect();

    Ok(Some(BoardMove::Column {
        id: id.clone(),
        ordinal: ordinal_at(&siblings, to)?,
    }))
}

fn resolve_task(board: &Board, id: &TaskId, target: &DropTarget) -> Result<Option<BoardMove>> {
    if board.task(id).is_none() {
        debug!(task = %id, "dragged task no longer exists; ignoring");
        return Ok(None);
    }

    match target {
        DropTarget::Task(target_id) if target_id == id => Ok(None),

        DropTarget::Task(target_id) => {
            let Some(target_task) = board.task(target_id) else {
                debug!(task = %id, target = %target_id, "stale task drop; ignoring");
                return Ok(None);
            };
            let column = target_task.column.clone();

            // Inserting at the target's current index among the other tasks
            // is an array move within one column, and "before the target"
            // when arriving from another column.
            let to = board
                .tasks_in(&column)
                .position(|t| &t.id == target_id)
                .unwrap_or(0);
            let siblings: Vec<&Ordinal> = board
                .tasks_in(&column)
                .filter(|t| &t.id != id)
                .map(|t| &t.ordinal)
                .collect();
            let ordinal = ordinal_at(&siblings, to)?;

            Ok(Some(BoardMove::Task {
                id: id.clone(),
                column,
                ordinal,
            }))
        }

        DropTarget::Column(column) => {
            if board.column(column).is_none() {
                debug!(task = %id, target = %column, "stale column target; ignoring");
                return Ok(None);
            }

            let already_last = board
                .tasks_in(column)
                .last()
                .is_some_and(|last| &last.id == id);
            if already_last {
                return Ok(None);
            }

            let siblings: Vec<&Ordinal> = board
                .tasks_in(column)
                .filter(|t| &t.id != id)
                .map(|t| &t.ordinal)
                .collect();

            Ok(Some(BoardMove::Task {
                id: id.clone(),
                column: column.clone(),
                ordinal: ordinal_at(&siblings, siblings.len())?,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Column, Task};

    fn ord(s: &str) -> Ordinal {
        Ordinal::parse(s).unwrap()
    }

    /// Columns a, b, c (empty); tasks a1..a3 in a, b1 in b
    fn board() -> Board {
        let keys = Ordinal::sequence(3);
        let columns = vec![
            Column::new("a", "A", keys[0].clone()),
            Column::new("b", "B", keys[1].clone()),
            Column::new("c", "C", keys[2].clone()),
        ];
        let tasks = vec![
            Task::new("a1", "a", keys[0].clone()).with_id("a1"),
            Task::new("a2", "a", keys[1].clone()).with_id("a2"),
            Task::new("a3", "a", keys[2].clone()).with_id("a3"),
            Task::new("b1", "b", keys[0].clone()).with_id("b1"),
        ];
        Board::new("Test", columns, tasks).unwrap()
    }

    fn apply(board: &Board, item: DragItem, target: DropTarget) -> Board {
        let mut next = board.clone();
        if let Some(mv) = resolve(board, &item, &target).unwrap() {
            next.apply(&mv).unwrap();
        }
        next
    }

    fn column_order(board: &Board) -> Vec<&str> {
        board.columns().iter().map(|c| c.id.as_str()).collect()
    }

    fn tasks_of<'a>(board: &'a Board, column: &str) -> Vec<&'a str> {
        let column = ColumnId::from(column);
        board
            .tasks_in(&column)
            .map(|t| t.id.as_str())
            .collect::<Vec<_>>()
    }

    #[test]
    fn test_column_onto_last_column() {
        let next = apply(
            &board(),
            DragItem::Column("a".into()),
            DropTarget::Column("c".into()),
        );
        assert_eq!(column_order(&next), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_column_onto_first_column() {
        let next = apply(
            &board(),
            DragItem::Column("c".into()),
            DropTarget::Column("a".into()),
        );
        assert_eq!(column_order(&next), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_column_onto_task_uses_its_column() {
        let next = apply(
            &board(),
            DragItem::Column("c".into()),
            DropTarget::Task("b1".into()),
        );
        assert_eq!(column_order(&next), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_task_down_lands_after_target() {
        let next = apply(
            &board(),
            DragItem::Task("a1".into()),
            DropTarget::Task("a2".into()),
        );
        assert_eq!(tasks_of(&next, "a"), vec!["a2", "a1", "a3"]);
    }

    #[test]
    fn test_task_up_lands_before_target() {
        let next = apply(
            &board(),
            DragItem::Task("a3".into()),
            DropTarget::Task("a1".into()),
        );
        assert_eq!(tasks_of(&next, "a"), vec!["a3", "a1", "a2"]);
    }

    #[test]
    fn test_task_across_columns_lands_before_target() {
        let next = apply(
            &board(),
            DragItem::Task("a2".into()),
            DropTarget::Task("b1".into()),
        );
        assert_eq!(tasks_of(&next, "a"), vec!["a1", "a3"]);
        assert_eq!(tasks_of(&next, "b"), vec!["a2", "b1"]);
        assert_eq!(next.task(&"a2".into()).unwrap().column.as_str(), "b");
    }

    #[test]
    fn test_task_onto_empty_column() {
        let next = apply(
            &board(),
            DragItem::Task("a1".into()),
            DropTarget::Column("c".into()),
        );
        assert_eq!(tasks_of(&next, "c"), vec!["a1"]);
        assert_eq!(tasks_of(&next, "a"), vec!["a2", "a3"]);
    }

    #[test]
    fn test_task_onto_occupied_column_goes_last() {
        let next = apply(
            &board(),
            DragItem::Task("a1".into()),
            DropTarget::Column("b".into()),
        );
        assert_eq!(tasks_of(&next, "b"), vec!["b1", "a1"]);
    }

    #[test]
    fn test_last_task_onto_own_column_is_noop() {
        let board = board();
        let mv = resolve(
            &board,
            &DragItem::Task("a3".into()),
            &DropTarget::Column("a".into()),
        )
        .unwrap();
        assert!(mv.is_none());
    }

    #[test]
    fn test_self_drop_is_noop() {
        let board = board();
        for item in [DragItem::Task("a2".into()), DragItem::Column("b".into())] {
            assert!(resolve(&board, &item, &item.as_target()).unwrap().is_none());
        }
    }

    #[test]
    fn test_stale_targets_are_noop() {
        let board = board();
        let cases = [
            (DragItem::Task("a1".into()), DropTarget::Task("gone".into())),
            (DragItem::Task("a1".into()), DropTarget::Column("gone".into())),
            (DragItem::Task("gone".into()), DropTarget::Task("a1".into())),
            (DragItem::Column("a".into()), DropTarget::Column("gone".into())),
            (DragItem::Column("gone".into()), DropTarget::Column("a".into())),
        ];
        for (item, target) in cases {
            assert!(resolve(&board, &item, &target).unwrap().is_none());
        }
    }

    #[test]
    fn test_new_ordinal_sits_between_neighbours() {
        let board = board();
        let mv = resolve(
            &board,
            &DragItem::Task("a1".into()),
            &DropTarget::Task("a2".into()),
        )
        .unwrap()
        .unwrap();
        let BoardMove::Task { ordinal, .. } = mv else {
            panic!("expected a task move");
        };
        let a2 = &board.task(&"a2".into()).unwrap().ordinal;
        let a3 = &board.task(&"a3".into()).unwrap().ordinal;
        assert!(a2 < &ordinal && &ordinal < a3);
    }

    #[test]
    fn test_inconsistent_ordinals_surface_as_error() {
        assert!(ordinal_at(&[&ord("k"), &ord("V")], 1).is_err());
    }
}
