use elysian_core::AppError;
use elysian_domain::{
    FieldMap, FieldNode, FieldPatch, FieldPath, FieldType, SchemaTree, validate_field_map,
};

use super::{SYNTHETIC_FIELD_PREFIX, SchemaEditor, operations};

fn leaf(name: &str, field_type: FieldType) -> (String, FieldNode) {
    (name.to_owned(), FieldNode::new(name, field_type, false))
}

fn object(name: &str, children: Vec<(String, FieldNode)>) -> (String, FieldNode) {
    (
        name.to_owned(),
        FieldNode::new(name, FieldType::Object, true).with_children(children.into_iter().collect()),
    )
}

fn orders_editor() -> SchemaEditor {
    let fields: FieldMap = [leaf("status", FieldType::String)].into_iter().collect();
    SchemaEditor::new(
        SchemaTree::new("orders", false, fields).unwrap_or_else(|_| unreachable!()),
    )
}

fn customer_fields() -> FieldMap {
    [
        leaf("id", FieldType::String),
        object(
            "customer",
            vec![
                leaf("email", FieldType::String),
                object("address", vec![leaf("city", FieldType::String)]),
                leaf("age", FieldType::Number),
            ],
        ),
        leaf("total", FieldType::Number),
    ]
    .into_iter()
    .collect()
}

fn keys(mapping: Option<&FieldMap>) -> Vec<String> {
    mapping
        .map(|mapping| mapping.keys().cloned().collect())
        .unwrap_or_default()
}

#[test]
fn add_child_then_delete_leaves_only_synthetic_key() {
    let mut editor = orders_editor();

    let added = editor
        .add_child(&FieldPath::root())
        .unwrap_or_else(|_| unreachable!());

    assert!(added.starts_with(SYNTHETIC_FIELD_PREFIX));
    assert_eq!(added.len(), SYNTHETIC_FIELD_PREFIX.len() + 4);
    assert_eq!(keys(Some(editor.fields())), vec![added.clone(), "status".to_owned()]);
    assert_eq!(
        editor.fields().get("status"),
        editor.baseline().fields().get("status")
    );

    let new_node = editor.fields().get(&added).cloned();
    assert_eq!(
        new_node,
        Some(FieldNode::new(added.as_str(), FieldType::String, false))
    );

    assert!(editor.delete_field(&FieldPath::root(), "status").is_ok());
    assert_eq!(keys(Some(editor.fields())), vec![added]);
    assert!(editor.has_unsaved_changes());
}

#[test]
fn delete_removes_subtree_and_keeps_siblings() {
    let fields = customer_fields();
    let customer = FieldPath::root().child("customer");

    let edited = operations::delete_field(&fields, &customer, "address");

    let children = edited.get("customer").and_then(FieldNode::children);
    assert_eq!(keys(children), vec!["email".to_owned(), "age".to_owned()]);
    assert_eq!(edited.get("id"), fields.get("id"));
    assert_eq!(edited.get("total"), fields.get("total"));
}

#[test]
fn rename_with_fresh_name_keeps_contents_and_position() {
    let fields = customer_fields();
    let customer = FieldPath::root().child("customer");
    let email = fields
        .get("customer")
        .and_then(|node| node.children())
        .and_then(|children| children.get("email"))
        .cloned()
        .unwrap_or_else(|| unreachable!());

    let edited = operations::rename_field(&fields, &customer, "email", email.clone().renamed("mail"));

    let children = edited.get("customer").and_then(FieldNode::children);
    assert_eq!(
        keys(children),
        vec!["mail".to_owned(), "address".to_owned(), "age".to_owned()]
    );
    let renamed = children.and_then(|children| children.get("mail"));
    assert_eq!(renamed, Some(&email.renamed("mail")));
}

#[test]
fn rename_onto_existing_sibling_overwrites_it() {
    let fields = customer_fields();
    let id = fields.get("id").cloned().unwrap_or_else(|| unreachable!());

    let edited = operations::rename_field(&fields, &FieldPath::root(), "id", id.renamed("total"));

    assert_eq!(keys(Some(&edited)), vec!["total".to_owned(), "customer".to_owned()]);
    assert_eq!(
        edited.get("total").map(FieldNode::field_type),
        Some(FieldType::String)
    );
}

#[test]
fn empty_patch_is_identity() {
    let fields = customer_fields();
    let customer = FieldPath::root().child("customer");

    let edited = operations::update_field(&fields, &customer, "email", FieldPatch::default());

    assert_eq!(edited, fields);
}

#[test]
fn update_at_depth_two_only_touches_target() {
    let mut editor = SchemaEditor::new(
        SchemaTree::new("orders", true, customer_fields()).unwrap_or_else(|_| unreachable!()),
    );
    let address = FieldPath::from_segments(["customer", "address"]);

    let result = editor.update_field(
        &address,
        "city",
        FieldPatch {
            field_type: Some(FieldType::Number),
            required: Some(true),
            ..FieldPatch::default()
        },
    );

    assert!(result.is_ok());
    let city = editor.tree().find(&address, "city").cloned();
    assert_eq!(city, Some(FieldNode::new("city", FieldType::Number, true)));
    assert_eq!(
        editor.tree().find(&FieldPath::root().child("customer"), "email"),
        editor.baseline().find(&FieldPath::root().child("customer"), "email")
    );
    assert!(editor.tree().is_manually_managed());
}

#[test]
fn update_with_new_name_rekeys_in_place() {
    let mut editor = SchemaEditor::new(
        SchemaTree::new("orders", false, customer_fields()).unwrap_or_else(|_| unreachable!()),
    );

    let result = editor.update_field(
        &FieldPath::root(),
        "id",
        FieldPatch {
            name: Some("reference".to_owned()),
            ..FieldPatch::default()
        },
    );

    assert!(result.is_ok());
    assert_eq!(
        keys(Some(editor.fields())),
        vec!["reference".to_owned(), "customer".to_owned(), "total".to_owned()]
    );
    assert!(editor.commit_payload().is_ok());
}

#[test]
fn patch_children_replace_whole_mapping() {
    let fields = customer_fields();
    let replacement: FieldMap = [leaf("vip", FieldType::Boolean)].into_iter().collect();

    let edited = operations::update_field(
        &fields,
        &FieldPath::root(),
        "customer",
        FieldPatch {
            children: Some(replacement.clone()),
            ..FieldPatch::default()
        },
    );

    assert_eq!(
        edited.get("customer").and_then(FieldNode::children),
        Some(&replacement)
    );
}

#[test]
fn add_child_to_leaf_creates_children_mapping() {
    let mut editor = orders_editor();
    let status = FieldPath::root().child("status");

    let added = editor.add_child(&status).unwrap_or_else(|_| unreachable!());

    let children = editor.fields().get("status").and_then(FieldNode::children);
    assert_eq!(keys(children), vec![added]);
}

#[test]
fn missing_targets_are_reported_and_leave_tree_untouched() {
    let mut editor = orders_editor();
    let before = editor.clone();

    let missing_key = editor.delete_field(&FieldPath::root(), "price");
    let missing_path = editor.add_child(&FieldPath::from_segments(["customer", "address"]));

    assert!(matches!(missing_key, Err(AppError::NotFound(_))));
    assert!(matches!(missing_path, Err(AppError::NotFound(_))));
    assert_eq!(editor, before);

    let fields = customer_fields();
    let unchanged = operations::delete_field(&fields, &FieldPath::root().child("nope"), "id");
    assert_eq!(unchanged, fields);
}

#[test]
fn blank_names_are_rejected() {
    let mut editor = orders_editor();

    let renamed = editor.rename_field(&FieldPath::root(), "status", "   ");
    let patched = editor.update_field(
        &FieldPath::root(),
        "status",
        FieldPatch {
            name: Some(String::new()),
            ..FieldPatch::default()
        },
    );

    assert!(matches!(renamed, Err(AppError::Validation(_))));
    assert!(matches!(patched, Err(AppError::Validation(_))));
    assert!(!editor.has_unsaved_changes());
}

#[test]
fn rebase_discards_edits() {
    let mut editor = orders_editor();
    assert!(editor.add_child(&FieldPath::root()).is_ok());
    assert!(editor.has_unsaved_changes());

    let saved = editor.tree();
    editor.rebase(saved.clone());

    assert!(!editor.has_unsaved_changes());
    assert_eq!(editor.baseline(), &saved);
}

#[test]
fn patch_children_are_rekeyed_by_name() {
    let mut editor = orders_editor();
    let children: FieldMap = [(
        "a".to_owned(),
        FieldNode::new("b", FieldType::String, false),
    )]
    .into_iter()
    .collect();

    let updated = editor.update_field(
        &FieldPath::root(),
        "status",
        FieldPatch {
            field_type: Some(FieldType::Object),
            children: Some(children),
            ..FieldPatch::default()
        },
    );

    assert!(updated.is_ok());
    assert_eq!(
        keys(editor.fields().get("status").and_then(FieldNode::children)),
        vec!["b".to_owned()]
    );
    assert!(validate_field_map(editor.fields()).is_ok());
    assert!(editor.commit_payload().is_ok());
}

mod properties {
    use proptest::prelude::*;

    use super::*;

    #[derive(Debug, Clone)]
    enum Edit {
        Add(usize),
        Delete(usize),
        Rename(usize, String),
        Retype(usize, FieldType),
        Replace(usize, Vec<(String, String)>),
    }

    fn edit() -> impl Strategy<Value = Edit> {
        let field_type = proptest::sample::select(FieldType::all().to_vec());
        prop_oneof![
            any::<usize>().prop_map(Edit::Add),
            any::<usize>().prop_map(Edit::Delete),
            (any::<usize>(), "[a-z]{1,5}").prop_map(|(index, name)| Edit::Rename(index, name)),
            (any::<usize>(), field_type).prop_map(|(index, kind)| Edit::Retype(index, kind)),
            (
                any::<usize>(),
                proptest::collection::vec(("[a-z]{1,3}", "[a-z]{0,3}"), 0..4),
            )
                .prop_map(|(index, children)| Edit::Replace(index, children)),
        ]
    }

    fn addresses(fields: &FieldMap, path: &FieldPath, out: &mut Vec<(FieldPath, String)>) {
        for (key, node) in fields {
            out.push((path.clone(), key.clone()));
            if let Some(children) = node.children() {
                addresses(children, &path.child(key.as_str()), out);
            }
        }
    }

    fn pick(fields: &FieldMap, index: usize) -> Option<(FieldPath, String)> {
        let mut all = Vec::new();
        addresses(fields, &FieldPath::root(), &mut all);
        if all.is_empty() {
            return None;
        }
        all.get(index % all.len()).cloned()
    }

    proptest! {
        #[test]
        fn every_edit_sequence_keeps_keys_equal_to_names(
            edits in proptest::collection::vec(edit(), 1..24),
        ) {
            let mut editor = SchemaEditor::new(
                SchemaTree::new("orders", false, customer_fields())
                    .unwrap_or_else(|_| unreachable!()),
            );

            for edit in edits {
                let outcome = match edit {
                    Edit::Add(index) => match pick(editor.fields(), index) {
                        Some((path, key)) => editor.add_child(&path.child(key)).map(|_| ()),
                        None => editor.add_child(&FieldPath::root()).map(|_| ()),
                    },
                    Edit::Delete(index) => match pick(editor.fields(), index) {
                        Some((path, key)) => editor.delete_field(&path, key.as_str()),
                        None => Ok(()),
                    },
                    Edit::Rename(index, name) => match pick(editor.fields(), index) {
                        Some((path, key)) => editor.rename_field(&path, key.as_str(), name.as_str()),
                        None => Ok(()),
                    },
                    Edit::Retype(index, field_type) => match pick(editor.fields(), index) {
                        Some((path, key)) => editor.update_field(
                            &path,
                            key.as_str(),
                            FieldPatch {
                                field_type: Some(field_type),
                                ..FieldPatch::default()
                            },
                        ),
                        None => Ok(()),
                    },
                    Edit::Replace(index, children) => match pick(editor.fields(), index) {
                        Some((path, key)) => editor.update_field(
                            &path,
                            key.as_str(),
                            FieldPatch {
                                children: Some(
                                    children
                                        .into_iter()
                                        .map(|(key, name)| {
                                            (key, FieldNode::new(name, FieldType::String, false))
                                        })
                                        .collect(),
                                ),
                                ..FieldPatch::default()
                            },
                        ),
                        None => Ok(()),
                    },
                };

                prop_assert!(outcome.is_ok());
                prop_assert!(validate_field_map(editor.fields()).is_ok());
            }

            prop_assert!(editor.commit_payload().is_ok());
        }
    }
}
