//! Trigger matching for inbound messages.

use crate::data::InboundMessage;
use crate::flow::TriggerNode;

/// Returns whether an inbound message satisfies a trigger node.
///
/// An empty keyword set is a catch-all: every message matches. Otherwise the
/// message matches when its text contains any configured keyword as a
/// case-insensitive substring. Substring (not whole-word) matching is the
/// intended behavior: the keyword `"oi"` fires on `"Opa, oi!"` and also on
/// `"foiem"`. Deliberately permissive, so short greetings buried in longer
/// messages still trigger.
pub fn matches(trigger: &TriggerNode, message: &InboundMessage) -> bool {
    if trigger.keywords.iter().all(|k| k.trim().is_empty()) {
        return true;
    }
    let text = message.text.to_lowercase();
    trigger
        .keywords
        .iter()
        .filter(|k| !k.trim().is_empty())
        .any(|k| text.contains(&k.to_lowercase()))
}
