//! Standalone keyword auto-reply rules.
//!
//! Unlike flows, keyword rules are flat records evaluated in priority order.
//! Matching is pure; a matched rule is translated into the same
//! [`Instruction`] vocabulary the flow interpreter emits, so the dispatcher
//! handles both mechanisms identically.

use crate::data::{Contact, InboundMessage};
use crate::instruction::Instruction;
use crate::interpreter::template;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// How a rule keyword is compared against the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Exact,
    Contains,
    StartsWith,
    EndsWith,
}

/// What a matched rule replies with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyType {
    Text,
    Tag,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleStatus {
    Active,
    Inactive,
}

/// One keyword auto-reply rule, mirroring the persisted `keywords` row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordRule {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub keywords: Vec<String>,
    pub match_type: MatchType,
    #[serde(default)]
    pub case_sensitive: bool,
    pub reply_type: ReplyType,
    #[serde(default)]
    pub reply_message: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub priority: i32,
    pub status: RuleStatus,
}

impl KeywordRule {
    /// Whether any of the rule's keywords matches the message text under the
    /// rule's match type and case policy.
    pub fn matches(&self, message: &InboundMessage) -> bool {
        self.keywords
            .iter()
            .filter(|k| !k.trim().is_empty())
            .any(|keyword| self.keyword_matches(keyword, &message.text))
    }

    fn keyword_matches(&self, keyword: &str, text: &str) -> bool {
        let (text, keyword) = if self.case_sensitive {
            (text.to_string(), keyword.to_string())
        } else {
            (text.to_lowercase(), keyword.to_lowercase())
        };
        match self.match_type {
            MatchType::Exact => text.trim() == keyword,
            MatchType::Contains => text.contains(&keyword),
            MatchType::StartsWith => text.starts_with(&keyword),
            MatchType::EndsWith => text.ends_with(&keyword),
        }
    }
}

/// Returns the first active rule matching the message, highest priority first.
///
/// The input may be in any order; rules are ranked with a stable sort on
/// priority descending, so equal-priority rules keep their given
/// (creation) order. Pure; emits nothing.
pub fn find_match<'a>(
    rules: &'a [KeywordRule],
    message: &InboundMessage,
) -> Option<&'a KeywordRule> {
    let mut active: Vec<&KeywordRule> = rules
        .iter()
        .filter(|r| r.status == RuleStatus::Active)
        .collect();
    active.sort_by_key(|r| Reverse(r.priority));

    let hit = active.into_iter().find(|r| r.matches(message));
    if let Some(rule) = hit {
        tracing::debug!(rule = %rule.id, priority = rule.priority, "keyword rule matched");
    }
    hit
}

/// Translates a matched rule into instructions, mirroring the action-node
/// semantics of the interpreter: a text reply (with variable substitution)
/// and/or one tag application per rule tag.
pub fn instructions(rule: &KeywordRule, contact: &Contact) -> Vec<Instruction> {
    let mut out = Vec::new();
    if matches!(rule.reply_type, ReplyType::Text | ReplyType::Both)
        && !rule.reply_message.trim().is_empty()
    {
        out.push(Instruction::text(template::render(
            &rule.reply_message,
            contact,
        )));
    }
    if matches!(rule.reply_type, ReplyType::Tag | ReplyType::Both) {
        for tag in rule.tags.iter().filter(|t| !t.trim().is_empty()) {
            out.push(Instruction::AddTag { tag: tag.clone() });
        }
    }
    out
}
