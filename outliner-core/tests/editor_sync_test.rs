//! Integration tests for the two-tree synchronization model:
//! after any sequence of gestures the visual row tree and the outline
//! node tree must stay isomorphic, the correspondence map bijective, and
//! the parent index consistent with the actual tree shape. Failed
//! operations must leave both trees untouched.

use pdf_outliner::{MemoryDocument, NodeId, OutlineEditor, OutlineError, PageMode, RowId};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tempfile::tempdir;

type Editor = OutlineEditor<MemoryDocument>;

/// Depth-first parallel walk over both trees, checking order, pairing and
/// titles at every node.
fn assert_isomorphic(editor: &Editor) {
    fn walk(editor: &Editor, row_parent: Option<RowId>, node_parent: Option<NodeId>) {
        let rows = editor.rows().children(row_parent);
        let nodes = editor.model().children_of(node_parent);
        assert_eq!(rows.len(), nodes.len(), "sibling count diverged");
        for (&row, &node) in rows.iter().zip(nodes) {
            assert_eq!(editor.correspondence().node_for(row), Some(node));
            assert_eq!(editor.correspondence().row_for(node), Some(row));
            assert_eq!(
                editor.rows().row(row).unwrap().name,
                editor.model().node(node).unwrap().title
            );
            walk(editor, Some(row), Some(node));
        }
    }
    walk(editor, None, None);
    assert_eq!(editor.correspondence().len(), editor.model().node_count());
    assert_eq!(editor.rows().len(), editor.model().node_count());
    assert_eq!(editor.model().node_count(), editor.model().tracked_count());
}

/// Audit the parent index against the actual children sequences.
fn assert_parent_index_consistent(editor: &Editor) {
    fn walk(editor: &Editor, parent: Option<NodeId>, seen: &mut usize) {
        for &child in editor.model().children_of(parent) {
            assert_eq!(editor.model().parent_of(child).unwrap(), parent);
            *seen += 1;
            walk(editor, Some(child), seen);
        }
    }
    let mut seen = 0;
    walk(editor, None, &mut seen);
    assert_eq!(seen, editor.model().node_count());
}

/// All rows in depth-first order.
fn dfs_rows(editor: &Editor) -> Vec<RowId> {
    fn walk(editor: &Editor, parent: Option<RowId>, out: &mut Vec<RowId>) {
        for &row in editor.rows().children(parent) {
            out.push(row);
            walk(editor, Some(row), out);
        }
    }
    let mut out = Vec::new();
    walk(editor, None, &mut out);
    out
}

/// Shape fingerprint of both trees, for before/after comparison around
/// failing operations.
fn shape(editor: &Editor) -> (Vec<String>, Vec<String>) {
    fn rows(editor: &Editor, parent: Option<RowId>, depth: usize, out: &mut Vec<String>) {
        for &row in editor.rows().children(parent) {
            out.push(format!("{depth}:{}", editor.rows().row(row).unwrap().name));
            rows(editor, Some(row), depth + 1, out);
        }
    }
    fn nodes(editor: &Editor, parent: Option<NodeId>, depth: usize, out: &mut Vec<String>) {
        for &node in editor.model().children_of(parent) {
            out.push(format!("{depth}:{}", editor.model().node(node).unwrap().title));
            nodes(editor, Some(node), depth + 1, out);
        }
    }
    let mut r = Vec::new();
    let mut n = Vec::new();
    rows(editor, None, 0, &mut r);
    nodes(editor, None, 0, &mut n);
    (r, n)
}

fn editor_with(titles: &[&str]) -> Editor {
    let mut editor = OutlineEditor::open(MemoryDocument::with_pages(20));
    for (i, title) in titles.iter().enumerate() {
        editor.insert_after(title, i as u32).unwrap();
    }
    editor
}

#[test]
fn spec_scenario_through_gestures() {
    let mut editor = OutlineEditor::open(MemoryDocument::with_pages(10));

    editor.insert_after("Chapter 1", 0).unwrap();
    editor.insert_after("Chapter 2", 5).unwrap();
    let (rows, _) = shape(&editor);
    assert_eq!(rows, ["0:Chapter 1", "0:Chapter 2"]);

    // selection is on Chapter 2
    assert!(editor.move_up_selected().unwrap());
    let (rows, _) = shape(&editor);
    assert_eq!(rows, ["0:Chapter 2", "0:Chapter 1"]);

    let ch1 = editor.row_at_path(&[1]).unwrap();
    editor.select(ch1).unwrap();
    assert!(editor.move_in_selected().unwrap());
    let (rows, _) = shape(&editor);
    assert_eq!(rows, ["0:Chapter 2", "1:Chapter 1"]);

    assert!(editor.move_out_selected().unwrap());
    let (rows, _) = shape(&editor);
    assert_eq!(rows, ["0:Chapter 2", "0:Chapter 1"]);

    assert_isomorphic(&editor);
    assert_parent_index_consistent(&editor);
}

#[test]
fn failed_operations_leave_both_trees_unchanged() {
    let mut editor = editor_with(&["A", "B"]);
    let before = shape(&editor);

    // move_out on a top-level row: structural error
    let a = editor.row_at_path(&[0]).unwrap();
    editor.select(a).unwrap();
    assert!(matches!(
        editor.move_out_selected(),
        Err(OutlineError::AtRoot)
    ));
    assert_eq!(shape(&editor), before);

    // bad page input: rejected at the edit boundary
    assert!(matches!(
        editor.retarget_selected("not-a-page"),
        Err(OutlineError::PageInput(_))
    ));
    assert_eq!(shape(&editor), before);

    // out-of-range page: backend error, no mutation
    assert!(matches!(
        editor.retarget_selected("9999"),
        Err(OutlineError::Backend(_))
    ));
    assert_eq!(shape(&editor), before);

    assert_isomorphic(&editor);
}

#[test]
fn insert_then_remove_restores_shape() {
    let mut editor = editor_with(&["A", "B", "C"]);
    let before = shape(&editor);

    let b = editor.row_at_path(&[1]).unwrap();
    editor.select(b).unwrap();
    editor.insert_after("X", 3).unwrap();
    // selection is on X now
    assert!(editor.delete_selected().unwrap());

    assert_eq!(shape(&editor), before);
    assert_isomorphic(&editor);
}

#[test]
fn move_in_move_out_is_an_inverse_next_to_sibling() {
    let mut editor = editor_with(&["S", "N", "T"]);
    let n = editor.row_at_path(&[1]).unwrap();
    editor.select(n).unwrap();

    let before = shape(&editor);
    assert!(editor.move_in_selected().unwrap());
    assert!(editor.move_out_selected().unwrap());
    assert_eq!(shape(&editor), before);
    assert_isomorphic(&editor);
    assert_parent_index_consistent(&editor);
}

#[test]
fn save_and_reopen_preserves_outline_and_targets() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("edited.json");

    let mut editor = OutlineEditor::open(MemoryDocument::with_pages(10));
    editor.insert_after("Chapter 1", 0).unwrap();
    editor.insert_after("Chapter 2", 5).unwrap();
    editor.move_in_selected().unwrap();
    editor.save(&path, PageMode::ShowThumbnails).unwrap();

    let reopened = MemoryDocument::open(&path).unwrap();
    assert_eq!(reopened.page_mode(), PageMode::ShowThumbnails);

    let editor = OutlineEditor::open(reopened);
    let (rows, nodes) = shape(&editor);
    assert_eq!(rows, ["0:Chapter 1", "1:Chapter 2"]);
    assert_eq!(rows, nodes);

    // targets resolve after the round trip
    let ch2 = editor.row_at_path(&[0, 0]).unwrap();
    assert_eq!(editor.rows().row(ch2).unwrap().target_text, "6");
    assert_isomorphic(&editor);
}

#[test]
fn deep_nesting_stays_synchronized() {
    let mut editor = OutlineEditor::open(MemoryDocument::with_pages(20));
    editor.insert_after("L0", 0).unwrap();
    for depth in 1..6 {
        editor.insert_after(&format!("L{depth}"), depth).unwrap();
        editor.move_in_selected().unwrap();
    }
    assert_eq!(editor.model().node_count(), 6);
    assert_isomorphic(&editor);
    assert_parent_index_consistent(&editor);

    // unwind one level and delete the remaining nested chain
    editor.move_out_selected().unwrap();
    let l1 = editor.row_at_path(&[0, 0]).unwrap();
    editor.select(l1).unwrap();
    editor.delete_selected().unwrap();
    assert_isomorphic(&editor);
    assert_parent_index_consistent(&editor);
}

// --- property test ---------------------------------------------------------

#[derive(Debug, Clone)]
enum Gesture {
    InsertBefore(u8, u8),
    InsertAfter(u8, u8),
    Delete(u8),
    MoveUp(u8),
    MoveDown(u8),
    MoveIn(u8),
    MoveOut(u8),
    Rename(u8),
    Retarget(u8, u8),
}

fn gesture_strategy() -> impl Strategy<Value = Gesture> {
    prop_oneof![
        (any::<u8>(), any::<u8>()).prop_map(|(r, p)| Gesture::InsertBefore(r, p)),
        (any::<u8>(), any::<u8>()).prop_map(|(r, p)| Gesture::InsertAfter(r, p)),
        any::<u8>().prop_map(Gesture::Delete),
        any::<u8>().prop_map(Gesture::MoveUp),
        any::<u8>().prop_map(Gesture::MoveDown),
        any::<u8>().prop_map(Gesture::MoveIn),
        any::<u8>().prop_map(Gesture::MoveOut),
        any::<u8>().prop_map(Gesture::Rename),
        (any::<u8>(), any::<u8>()).prop_map(|(r, p)| Gesture::Retarget(r, p)),
    ]
}

/// Select the pick-th row in depth-first order; false when the tree is empty.
fn select_pick(editor: &mut Editor, pick: u8) -> bool {
    let rows = dfs_rows(editor);
    if rows.is_empty() {
        return false;
    }
    let row = rows[pick as usize % rows.len()];
    editor.select(row).unwrap();
    true
}

fn apply(editor: &mut Editor, gesture: &Gesture, counter: &mut u32) {
    *counter += 1;
    match gesture {
        Gesture::InsertBefore(pick, page) => {
            select_pick(editor, *pick);
            editor
                .insert_before(&format!("n{counter}"), u32::from(*page) % 20)
                .unwrap();
        }
        Gesture::InsertAfter(pick, page) => {
            select_pick(editor, *pick);
            editor
                .insert_after(&format!("n{counter}"), u32::from(*page) % 20)
                .unwrap();
        }
        Gesture::Delete(pick) => {
            if select_pick(editor, *pick) {
                editor.delete_selected().unwrap();
            }
        }
        Gesture::MoveUp(pick) => {
            if select_pick(editor, *pick) {
                editor.move_up_selected().unwrap();
            }
        }
        Gesture::MoveDown(pick) => {
            if select_pick(editor, *pick) {
                editor.move_down_selected().unwrap();
            }
        }
        Gesture::MoveIn(pick) => {
            if select_pick(editor, *pick) {
                editor.move_in_selected().unwrap();
            }
        }
        Gesture::MoveOut(pick) => {
            if select_pick(editor, *pick) {
                // AtRoot is a legal outcome for top-level picks
                let _ = editor.move_out_selected();
            }
        }
        Gesture::Rename(pick) => {
            if select_pick(editor, *pick) {
                editor.rename_selected(&format!("r{counter}")).unwrap();
            }
        }
        Gesture::Retarget(pick, page) => {
            if select_pick(editor, *pick) {
                // display text is 1-based
                let display = u32::from(*page) % 20 + 1;
                editor.retarget_selected(&display.to_string()).unwrap();
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_gesture_sequences_keep_trees_isomorphic(
        gestures in prop::collection::vec(gesture_strategy(), 1..48)
    ) {
        let mut editor = OutlineEditor::open(MemoryDocument::with_pages(20));
        let mut counter = 0u32;
        for gesture in &gestures {
            apply(&mut editor, gesture, &mut counter);
            assert_isomorphic(&editor);
            assert_parent_index_consistent(&editor);
        }
        // every target renders, and round-trips through export
        let exported = editor.model().export();
        let total: usize = exported.iter().map(|e| e.count_all()).sum();
        assert_eq!(total, editor.model().node_count());
    }
}
