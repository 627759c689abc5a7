//! End-to-end drag scenarios through the board store

use taskboard::{
    Board, BoardFilter, BoardMove, BoardStore, Column, DragItem, DropTarget, Ordinal, Task,
};

/// Columns A, B, C; t1 and t2 in A, B and C empty
fn board() -> Board {
    let keys = Ordinal::sequence(3);
    let columns = vec![
        Column::new("A", "Backlog", keys[0].clone()),
        Column::new("B", "Current", keys[1].clone()),
        Column::new("C", "Done", keys[2].clone()),
    ];
    let tasks = vec![
        Task::new("First task", "A", keys[0].clone()).with_id("t1"),
        Task::new("Second task", "A", keys[1].clone()).with_id("t2"),
    ];
    Board::new("Scenarios", columns, tasks).unwrap()
}

fn drag(store: &mut BoardStore, item: DragItem, target: DropTarget) -> Option<BoardMove> {
    assert!(store.pick_up(item));
    store.hover(Some(target));
    store.drop()
}

fn column_order(store: &BoardStore) -> Vec<String> {
    store
        .view(&BoardFilter::new())
        .columns
        .iter()
        .map(|c| c.column.id.to_string())
        .collect()
}

fn tasks_in(store: &BoardStore, column: &str) -> Vec<String> {
    store
        .view(&BoardFilter::new())
        .columns
        .iter()
        .find(|c| c.column.id.as_str() == column)
        .map(|c| c.tasks.iter().map(|t| t.id.to_string()).collect())
        .unwrap_or_default()
}

#[test]
fn test_column_a_onto_c() {
    let mut store = BoardStore::new(board());
    let mv = drag(
        &mut store,
        DragItem::Column("A".into()),
        DropTarget::Column("C".into()),
    )
    .unwrap();
    store.confirm(&mv).unwrap();
    assert_eq!(column_order(&store), vec!["B", "C", "A"]);
    assert_eq!(store.board(), store.confirmed());
}

#[test]
fn test_t1_onto_t2_lands_after() {
    let mut store = BoardStore::new(board());
    drag(
        &mut store,
        DragItem::Task("t1".into()),
        DropTarget::Task("t2".into()),
    )
    .unwrap();
    assert_eq!(tasks_in(&store, "A"), vec!["t2", "t1"]);
}

#[test]
fn test_t1_onto_empty_column() {
    let mut store = BoardStore::new(board());
    let mv = drag(
        &mut store,
        DragItem::Task("t1".into()),
        DropTarget::Column("B".into()),
    )
    .unwrap();
    assert!(matches!(mv, BoardMove::Task { ref column, .. } if column.as_str() == "B"));
    assert_eq!(tasks_in(&store, "B"), vec!["t1"]);
    assert_eq!(tasks_in(&store, "A"), vec!["t2"]);
}

#[test]
fn test_only_the_dragged_entity_changes() {
    let before = board();
    let mut store = BoardStore::new(before.clone());
    drag(
        &mut store,
        DragItem::Task("t2".into()),
        DropTarget::Task("t1".into()),
    )
    .unwrap();

    let after = store.board();
    assert_eq!(after.task(&"t1".into()), before.task(&"t1".into()));
    assert_eq!(after.columns(), before.columns());
    assert_ne!(after.task(&"t2".into()), before.task(&"t2".into()));
}

#[test]
fn test_self_drop_leaves_state_unchanged() {
    let before = board();
    let mut store = BoardStore::new(before.clone());
    assert!(drag(
        &mut store,
        DragItem::Task("t1".into()),
        DropTarget::Task("t1".into()),
    )
    .is_none());
    assert_eq!(store.board(), &before);
}

#[test]
fn test_cancel_after_many_hovers_restores_snapshot() {
    let before = board();
    let mut store = BoardStore::new(before.clone());
    store.pick_up(DragItem::Task("t1".into()));
    for target in [
        DropTarget::Column("B".into()),
        DropTarget::Task("t2".into()),
        DropTarget::Column("C".into()),
        DropTarget::Column("B".into()),
    ] {
        store.hover(Some(target));
    }
    store.cancel();
    assert_eq!(store.board(), &before);
    assert!(!store.session().is_active());
}

#[test]
fn test_drop_after_target_deleted_is_noop() {
    let before = board();
    let mut store = BoardStore::new(before.clone());
    store.pick_up(DragItem::Task("t1".into()));
    store.hover(Some(DropTarget::Task("t2".into())));

    let mut fresh = board();
    fresh.remove_task(&"t2".into()).unwrap();
    store.reconcile(fresh.clone());

    assert!(store.drop().is_none());
    assert_eq!(store.board(), &fresh);
}

#[test]
fn test_dragged_task_deleted_mid_drag_ends_session() {
    let mut store = BoardStore::new(board());
    store.pick_up(DragItem::Task("t1".into()));
    store.hover(Some(DropTarget::Column("C".into())));

    let mut fresh = board();
    fresh.remove_task(&"t1".into()).unwrap();
    store.reconcile(fresh);

    assert!(!store.session().is_active());
    assert!(store.drop().is_none());
    assert!(store.board().task(&"t1".into()).is_none());
}

#[test]
fn test_column_drag_preview_and_commit_agree() {
    let mut store = BoardStore::new(board());
    store.pick_up(DragItem::Column("C".into()));
    store.hover(Some(DropTarget::Column("A".into())));
    let preview = store.board().clone();
    let mv = store.drop().unwrap();
    assert_eq!(store.board(), &preview);
    store.confirm(&mv).unwrap();
    assert_eq!(column_order(&store), vec!["C", "A", "B"]);
}

#[test]
fn test_filtered_view_during_drag() {
    let mut store = BoardStore::new(board());
    store.pick_up(DragItem::Task("t2".into()));
    store.hover(Some(DropTarget::Column("C".into())));

    let filter = BoardFilter::new().with_query("second");
    let view = store.view(&filter);
    assert_eq!(view.task_count(), 1);
    assert_eq!(view.columns[2].tasks[0].id.as_str(), "t2");
}
