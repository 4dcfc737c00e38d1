//! Tests for structural and payload validation of flow documents.
mod common;
use chatflow::prelude::*;
use common::*;

#[test]
fn accepts_a_simple_linear_flow() {
    let flow = validate(&welcome_flow()).unwrap();
    assert_eq!(flow.trigger_id().as_str(), "1");
    assert_eq!(flow.entry_id().as_str(), "1");
    assert!(flow.selector_id().is_none());
}

#[test]
fn rejects_a_flow_without_a_trigger() {
    let doc = FlowDocument {
        nodes: vec![message("1", "oi")],
        edges: vec![],
    };
    assert!(matches!(
        validate(&doc),
        Err(ValidationError::Structure(StructureError::MissingTrigger))
    ));
}

#[test]
fn rejects_more_than_one_trigger() {
    let doc = FlowDocument {
        nodes: vec![trigger("1", &["oi"]), trigger("9", &["tchau"])],
        edges: vec![],
    };
    assert!(matches!(
        validate(&doc),
        Err(ValidationError::Structure(StructureError::MultipleTriggers(id))) if id == "9"
    ));
}

#[test]
fn rejects_edges_to_unknown_nodes() {
    let mut doc = welcome_flow();
    doc.edges.push(edge("e9", "3", "ghost"));
    assert!(matches!(
        validate(&doc),
        Err(ValidationError::Structure(StructureError::UnknownNode { node_id, .. }))
            if node_id == "ghost"
    ));
}

#[test]
fn rejects_a_cycle_reachable_from_the_trigger() {
    let mut doc = welcome_flow();
    // 3 -> 2 closes a loop.
    doc.edges.push(edge("e3", "3", "2"));
    assert!(matches!(
        validate(&doc),
        Err(ValidationError::Structure(StructureError::CycleDetected { .. }))
    ));
}

#[test]
fn permits_a_cycle_in_a_disconnected_remnant() {
    let mut doc = welcome_flow();
    doc.nodes.push(message("x", "solto"));
    doc.nodes.push(message("y", "solto"));
    doc.edges.push(edge("ex", "x", "y"));
    doc.edges.push(edge("ey", "y", "x"));
    assert!(validate(&doc).is_ok());
}

#[test]
fn rejects_a_condition_missing_its_false_branch() {
    let doc = FlowDocument {
        nodes: vec![
            trigger("1", &[]),
            condition("2", "tag contains cliente"),
            message("3", "sim"),
        ],
        edges: vec![
            edge("e1", "1", "2"),
            branch_edge("e2", "2", "3", BranchHandle::True),
        ],
    };
    assert!(matches!(
        validate(&doc),
        Err(ValidationError::Structure(StructureError::MissingBranch {
            branch: BranchHandle::False,
            ..
        }))
    ));
}

#[test]
fn rejects_an_unlabeled_condition_edge() {
    let doc = FlowDocument {
        nodes: vec![
            trigger("1", &[]),
            condition("2", "tag contains cliente"),
            message("3", "sim"),
        ],
        edges: vec![edge("e1", "1", "2"), edge("e2", "2", "3")],
    };
    assert!(matches!(
        validate(&doc),
        Err(ValidationError::Structure(
            StructureError::UnlabeledConditionEdge { .. }
        ))
    ));
}

#[test]
fn rejects_fan_out_from_a_message_node() {
    let mut doc = welcome_flow();
    doc.nodes.push(message("4", "outro"));
    doc.edges.push(edge("e3", "2", "4"));
    assert!(matches!(
        validate(&doc),
        Err(ValidationError::Structure(
            StructureError::TooManyOutgoingEdges { count: 2, .. }
        ))
    ));
}

#[test]
fn collapses_duplicate_edges() {
    let mut doc = welcome_flow();
    doc.edges.push(edge("dup", "1", "2"));
    let flow = validate(&doc).unwrap();
    assert_eq!(flow.document().edges.len(), 2);
    assert_eq!(flow.document().edges[0].id, "e1");

    // Normalization is idempotent.
    let again = validate(flow.document()).unwrap();
    assert_eq!(again.document().edges.len(), 2);
}

#[test]
fn rejects_empty_message_content() {
    let doc = FlowDocument {
        nodes: vec![trigger("1", &[]), message("2", "   ")],
        edges: vec![edge("e1", "1", "2")],
    };
    assert!(matches!(
        validate(&doc),
        Err(ValidationError::Payload(PayloadError::EmptyMessageContent(id))) if id == "2"
    ));
}

#[test]
fn rejects_too_many_buttons() {
    let mut node = message("2", "escolha");
    if let NodeKind::Message(ref mut m) = node.kind {
        m.buttons = vec!["a".into(), "b".into(), "c".into(), "d".into()];
    }
    let doc = FlowDocument {
        nodes: vec![trigger("1", &[]), node],
        edges: vec![edge("e1", "1", "2")],
    };
    assert!(matches!(
        validate(&doc),
        Err(ValidationError::Payload(PayloadError::TooManyButtons {
            count: 4,
            max: chatflow::flow::MAX_BUTTONS,
            ..
        }))
    ));
}

#[test]
fn rejects_an_unparseable_predicate() {
    let doc = FlowDocument {
        nodes: vec![
            trigger("1", &[]),
            condition("2", "weather is nice"),
            message("3", "sim"),
            message("4", "não"),
        ],
        edges: vec![
            edge("e1", "1", "2"),
            branch_edge("e2", "2", "3", BranchHandle::True),
            branch_edge("e3", "2", "4", BranchHandle::False),
        ],
    };
    assert!(matches!(
        validate(&doc),
        Err(ValidationError::Payload(PayloadError::InvalidPredicate { .. }))
    ));
}

#[test]
fn rejects_empty_action_details() {
    let doc = FlowDocument {
        nodes: vec![trigger("1", &[]), action("2", ActionKind::AddTag, "")],
        edges: vec![edge("e1", "1", "2")],
    };
    assert!(matches!(
        validate(&doc),
        Err(ValidationError::Payload(PayloadError::EmptyActionDetails(_)))
    ));
}

#[test]
fn skips_payload_checks_on_orphan_nodes() {
    // An orphan message with empty content is editor leftover, never executed.
    let mut doc = welcome_flow();
    doc.nodes.push(message("orphan", ""));
    assert!(validate(&doc).is_ok());
}

#[test]
fn resolves_a_selector_trigger_entry_chain() {
    let doc = FlowDocument {
        nodes: vec![
            selector("0", &["conn-1", "conn-2"]),
            trigger("1", &["oi"]),
            message("2", "Olá!"),
        ],
        edges: vec![edge("e0", "0", "1"), edge("e1", "1", "2")],
    };
    let flow = validate(&doc).unwrap();
    assert_eq!(flow.entry_id().as_str(), "0");
    assert_eq!(flow.trigger_id().as_str(), "1");
    assert_eq!(flow.selector_id().map(String::as_str), Some("0"));
}

#[test]
fn rejects_a_selector_not_wired_into_the_trigger() {
    let doc = FlowDocument {
        nodes: vec![
            selector("0", &["conn-1"]),
            trigger("1", &[]),
            message("2", "Olá!"),
        ],
        edges: vec![edge("e0", "0", "2"), edge("e1", "1", "2")],
    };
    assert!(matches!(
        validate(&doc),
        Err(ValidationError::Structure(
            StructureError::SelectorNotBeforeTrigger { .. }
        ))
    ));
}

#[test]
fn rejects_a_selector_with_no_platforms() {
    let doc = FlowDocument {
        nodes: vec![selector("0", &[]), trigger("1", &[]), message("2", "Olá!")],
        edges: vec![edge("e0", "0", "1"), edge("e1", "1", "2")],
    };
    assert!(matches!(
        validate(&doc),
        Err(ValidationError::Payload(PayloadError::NoPlatformsSelected(_)))
    ));
}

#[test]
fn rejects_duplicate_node_ids() {
    let doc = FlowDocument {
        nodes: vec![trigger("1", &["oi"]), message("2", "primeiro"), message("2", "segundo")],
        edges: vec![edge("e1", "1", "2")],
    };
    assert!(matches!(
        validate(&doc),
        Err(ValidationError::Structure(StructureError::DuplicateNodeId(id))) if id == "2"
    ));
}

#[test]
fn rejects_a_node_id_colliding_with_the_trigger() {
    let doc = FlowDocument {
        nodes: vec![trigger("1", &["oi"]), message("1", "impostor")],
        edges: vec![],
    };
    assert!(matches!(
        validate(&doc),
        Err(ValidationError::Structure(StructureError::DuplicateNodeId(id))) if id == "1"
    ));
}

#[test]
fn rejects_an_oversized_message_delay() {
    let doc = FlowDocument {
        nodes: vec![
            trigger("1", &["oi"]),
            delayed_message("2", "até já", chatflow::flow::MAX_DELAY_SECS + 1),
        ],
        edges: vec![edge("e1", "1", "2")],
    };
    assert!(matches!(
        validate(&doc),
        Err(ValidationError::Payload(PayloadError::DelayTooLong {
            max: chatflow::flow::MAX_DELAY_SECS,
            ..
        }))
    ));
}

#[test]
fn accepts_the_maximum_message_delay() {
    let doc = FlowDocument {
        nodes: vec![
            trigger("1", &["oi"]),
            delayed_message("2", "até já", chatflow::flow::MAX_DELAY_SECS),
        ],
        edges: vec![edge("e1", "1", "2")],
    };
    assert!(validate(&doc).is_ok());
}

#[test]
fn unknown_node_type_fails_deserialization() {
    let json = r#"{
        "nodes": [{"id": "1", "type": "hologram", "data": {}}],
        "edges": []
    }"#;
    assert!(FlowDocument::from_json(json).is_err());
}

#[test]
fn editor_fields_are_ignored_on_deserialization() {
    let json = r#"{
        "nodes": [
            {"id": "1", "type": "trigger", "position": {"x": 250, "y": 50},
             "data": {"label": "Início", "keywords": ["oi", "olá"]}},
            {"id": "2", "type": "message", "position": {"x": 250, "y": 200},
             "data": {"content": "Olá! Como posso ajudar?", "buttons": []}}
        ],
        "edges": [{"id": "e1", "source": "1", "target": "2"}]
    }"#;
    let doc = FlowDocument::from_json(json).unwrap();
    assert!(validate(&doc).is_ok());
}
