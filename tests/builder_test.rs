//! Tests for HierarchyBuilder and LevelOrderFlattener working together

use serde_json::{json, Value};

use insertorder::domain::{
    FieldNames, HierarchyArena, HierarchyBuilder, LevelOrderFlattener, NodeKey, Record,
    TreeDisplay, Traversal,
};

fn records(value: Value) -> Vec<Record> {
    serde_json::from_value(value).expect("array of objects")
}

fn ids(value: Value) -> Vec<Value> {
    value.as_array().expect("array of ids").clone()
}

fn build(value: Value) -> HierarchyArena {
    HierarchyBuilder::default().build(records(value)).unwrap()
}

// root
// ├── a
// │   ├── a1
// │   └── a2
// └── b
//     └── b1
//         └── b11
fn fixture() -> Value {
    json!([
        {"id": "b11", "parent_id": "b1"},
        {"id": "a1", "parent_id": "a"},
        {"id": "b1", "parent_id": "b"},
        {"id": "root", "parent_id": null},
        {"id": "a", "parent_id": "root"},
        {"id": "a2", "parent_id": "a"},
        {"id": "b", "parent_id": "root"},
    ])
}

#[test]
fn given_children_before_parents_when_building_then_single_tree() {
    let tree = build(fixture());

    assert_eq!(tree.len(), 7);
    assert_eq!(tree.placeholders().count(), 0);
    assert_eq!(tree.depth(), 4);
    assert_eq!(
        tree.leaf_keys(),
        vec![NodeKey::from("a1"), NodeKey::from("a2"), NodeKey::from("b11")]
    );
}

#[test]
fn given_tree_when_following_parent_links_then_reaches_root() {
    let tree = build(fixture());
    let root = tree.root().unwrap();

    for (idx, _) in tree.nodes() {
        let mut current = idx;
        let mut steps = 0;
        while let Some(parent) = tree.get_node(current).unwrap().parent {
            current = parent;
            steps += 1;
            assert!(steps <= tree.len(), "parent links form a cycle");
        }
        assert_eq!(current, root);
    }
}

#[test]
fn given_forward_references_when_flattening_then_sibling_order_follows_attachment() {
    // "a1" was attached to "a" before "a2", and "a" to root before "b".
    let order: Vec<Value> = LevelOrderFlattener::new(Traversal::LevelOrder)
        .flatten(build(fixture()))
        .into_iter()
        .map(|r| r["id"].clone())
        .collect();

    assert_eq!(order, ids(json!(["root", "a", "b", "a1", "a2", "b1", "b11"])));
}

#[test]
fn given_stack_traversal_when_flattening_then_last_child_first() {
    let order: Vec<Value> = LevelOrderFlattener::new(Traversal::Stack)
        .flatten(build(fixture()))
        .into_iter()
        .map(|r| r["id"].clone())
        .collect();

    assert_eq!(order, ids(json!(["root", "b", "b1", "b11", "a", "a2", "a1"])));
}

#[test]
fn given_order_when_inspecting_then_arena_untouched() {
    let tree = build(fixture());
    let order = LevelOrderFlattener::default().order(&tree);

    assert_eq!(order.len(), 7);
    assert!(order.iter().all(|&idx| tree.get_node(idx).unwrap().data.is_some()));
}

#[test]
fn given_mixed_number_spellings_when_building_then_same_node() {
    let tree = build(json!([
        {"id": 2, "parent_id": 1.0},
        {"id": 1, "parent_id": null},
    ]));

    assert_eq!(tree.len(), 2);
    assert_eq!(tree.placeholders().count(), 0);
}

#[test]
fn given_numeric_and_string_ids_when_building_then_distinct_nodes() {
    let tree = build(json!([
        {"id": 2, "parent_id": "1"},
        {"id": 1, "parent_id": null},
    ]));

    // "1" stays an undefined placeholder, so node 2 is not below the root.
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.placeholders().count(), 1);
    assert_eq!(LevelOrderFlattener::default().flatten(tree).len(), 1);
}

#[test]
fn given_custom_fields_when_building_then_rendered_tree_uses_keys() {
    let builder = HierarchyBuilder::new(FieldNames::new("code", "up"));
    let tree = builder
        .build(records(json!([
            {"code": 10, "up": null},
            {"code": 11, "up": 10},
        ])))
        .unwrap();

    let rendered = tree.to_tree_string().to_string();
    assert!(rendered.starts_with("10\n"));
    assert!(rendered.contains("11"));
}
