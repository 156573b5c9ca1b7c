//! Long mutation sequences must keep the document valid and serializable

use parchment_editor::{DocumentKey, EditSession, Mutation, TemplateLibrary};
use parchment_schema::{deserialize, serialize, Document, Node};
use serde_json::json;

fn session() -> EditSession {
    let doc = TemplateLibrary::builtin().instantiate("home").unwrap();
    EditSession::new(DocumentKey::new("st-anne", "home"), doc)
}

fn columns_block(prefix: &str) -> Document {
    Document::from_nodes(
        format!("{}-cols", prefix),
        vec![
            Node::canvas(format!("{}-cols", prefix), "Columns")
                .with_children([format!("{}-a", prefix), format!("{}-b", prefix)]),
            Node::canvas(format!("{}-a", prefix), "Section"),
            Node::canvas(format!("{}-b", prefix), "Section"),
        ],
    )
    .unwrap()
}

#[test]
fn test_sequence_keeps_document_valid() {
    let mut session = session();
    let mutations = vec![
        Mutation::InsertFragment {
            parent_id: "root".into(),
            index: 1,
            fragment: columns_block("extra"),
        },
        Mutation::InsertNode {
            parent_id: "extra-a".into(),
            index: 0,
            node: Node::leaf("note", "TextBlock").with_prop("text", "Parish picnic Sunday"),
        },
        Mutation::MoveNode {
            node_id: "give".into(),
            new_parent_id: "extra-b".into(),
            index: 0,
        },
        Mutation::ReorderChild {
            parent_id: "root".into(),
            from: 0,
            to: 2,
        },
        Mutation::SetProp {
            node_id: "note".into(),
            key: "text".into(),
            value: json!("Parish picnic moved to Saturday"),
        },
        Mutation::RemoveNode {
            node_id: "main".into(),
        },
    ];

    for (step, mutation) in mutations.into_iter().enumerate() {
        session.apply(mutation).unwrap();
        session
            .document()
            .validate()
            .unwrap_or_else(|e| panic!("invalid after step {}: {}", step, e));
        let bytes = serialize(session.document()).unwrap();
        assert_eq!(&deserialize(&bytes).unwrap(), session.document());
    }

    let doc = session.document();
    assert_eq!(session.version(), 6);
    assert!(!doc.contains("mass"), "cascade removed the column contents");
    assert_eq!(doc.parent_of("give"), Some("extra-b"));
    assert_eq!(doc.root().unwrap().children_ids, vec!["extra-cols", "hero"]);
}

#[test]
fn test_cycle_rejected_mid_sequence() {
    let mut session = session();
    let before = session.document().clone();
    let result = session.apply(Mutation::MoveNode {
        node_id: "main".into(),
        new_parent_id: "left".into(),
        index: 0,
    });
    assert!(result.is_err());
    assert_eq!(session.document(), &before);
    assert!(!session.is_dirty());
}
