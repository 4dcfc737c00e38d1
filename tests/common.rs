//! Common test utilities for building flow documents, messages and rules.
use chatflow::prelude::*;
use chrono::{TimeZone, Utc};

#[allow(dead_code)]
pub fn trigger(id: &str, keywords: &[&str]) -> Node {
    Node {
        id: id.to_string(),
        kind: NodeKind::Trigger(TriggerNode {
            label: "Quando usuário envia mensagem".to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }),
    }
}

#[allow(dead_code)]
pub fn message(id: &str, content: &str) -> Node {
    Node {
        id: id.to_string(),
        kind: NodeKind::Message(MessageNode {
            content: content.to_string(),
            buttons: Vec::new(),
            delay: None,
        }),
    }
}

#[allow(dead_code)]
pub fn delayed_message(id: &str, content: &str, delay_secs: u64) -> Node {
    Node {
        id: id.to_string(),
        kind: NodeKind::Message(MessageNode {
            content: content.to_string(),
            buttons: Vec::new(),
            delay: Some(delay_secs),
        }),
    }
}

#[allow(dead_code)]
pub fn condition(id: &str, predicate: &str) -> Node {
    Node {
        id: id.to_string(),
        kind: NodeKind::Condition(ConditionNode {
            condition: predicate.to_string(),
        }),
    }
}

#[allow(dead_code)]
pub fn action(id: &str, kind: ActionKind, details: &str) -> Node {
    Node {
        id: id.to_string(),
        kind: NodeKind::Action(ActionNode {
            action: kind,
            details: details.to_string(),
        }),
    }
}

#[allow(dead_code)]
pub fn broadcast(id: &str, content: &str, tags: &[&str]) -> Node {
    Node {
        id: id.to_string(),
        kind: NodeKind::Broadcast(BroadcastNode {
            content: content.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }),
    }
}

#[allow(dead_code)]
pub fn selector(id: &str, platforms: &[&str]) -> Node {
    Node {
        id: id.to_string(),
        kind: NodeKind::PlatformSelector(PlatformSelectorNode {
            selected_platforms: platforms.iter().map(|p| p.to_string()).collect(),
        }),
    }
}

#[allow(dead_code)]
pub fn edge(id: &str, source: &str, target: &str) -> Edge {
    Edge {
        id: id.to_string(),
        source: source.to_string(),
        target: target.to_string(),
        source_handle: None,
    }
}

#[allow(dead_code)]
pub fn branch_edge(id: &str, source: &str, target: &str, handle: BranchHandle) -> Edge {
    Edge {
        id: id.to_string(),
        source: source.to_string(),
        target: target.to_string(),
        source_handle: Some(handle),
    }
}

/// Trigger(["oi"]) -> Message("Olá {name}!") -> Action(add_tag, "novo").
#[allow(dead_code)]
pub fn welcome_flow() -> FlowDocument {
    FlowDocument {
        nodes: vec![
            trigger("1", &["oi"]),
            message("2", "Olá {name}!"),
            action("3", ActionKind::AddTag, "novo"),
        ],
        edges: vec![edge("e1", "1", "2"), edge("e2", "2", "3")],
    }
}

/// A straight chain of `len` message nodes behind a catch-all trigger.
#[allow(dead_code)]
pub fn chain_flow(len: usize) -> FlowDocument {
    let mut nodes = vec![trigger("t", &[])];
    let mut edges = Vec::new();
    let mut prev = "t".to_string();
    for i in 0..len {
        let id = format!("m{i}");
        nodes.push(message(&id, "passo"));
        edges.push(edge(&format!("e{i}"), &prev, &id));
        prev = id;
    }
    FlowDocument { nodes, edges }
}

#[allow(dead_code)]
pub fn inbound(text: &str) -> InboundMessage {
    InboundMessage {
        text: text.to_string(),
        sender_platform_id: "9001".to_string(),
        connection_id: "conn-1".to_string(),
        timestamp: Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap(),
    }
}

#[allow(dead_code)]
pub fn ana() -> Contact {
    Contact {
        name: Some("Ana".to_string()),
        phone: Some("+55 11 91234-5678".to_string()),
        email: None,
        tags: Vec::new(),
    }
}

#[allow(dead_code)]
pub fn rule(id: &str, priority: i32, keywords: &[&str], reply: &str) -> KeywordRule {
    KeywordRule {
        id: id.to_string(),
        name: format!("Regra {id}"),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        match_type: MatchType::Contains,
        case_sensitive: false,
        reply_type: ReplyType::Text,
        reply_message: reply.to_string(),
        tags: Vec::new(),
        priority,
        status: RuleStatus::Active,
    }
}
