//! The condition-node predicate grammar.
//!
//! The editor stores predicates as free text. The engine narrows that to one
//! clause of the form:
//!
//! ```text
//! <subject> [not] <operator> <value>
//! ```
//!
//! where subject is `tag`/`tags` or `message`/`mensagem`, operator is
//! `contains`/`contém` or `is`/`é`/`=`/`equals`, and the value may be single-
//! or double-quoted. Keywords are matched case-insensitively, so the
//! Portuguese spellings the UI suggests ("Tag contém 'cliente'") parse as-is.

use crate::data::{Contact, InboundMessage};

/// What the predicate inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    /// The contact's tag set.
    Tag,
    /// The inbound message text.
    Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Contains,
    Equals,
}

/// A parsed condition predicate. Construction is only possible through
/// [`Predicate::parse`], so a stored `Predicate` is always evaluable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub subject: Subject,
    pub comparison: Comparison,
    pub negated: bool,
    pub value: String,
}

impl Predicate {
    /// Parses the free-text predicate of a condition node. The error string
    /// is user-facing; the validator wraps it in a payload error.
    pub fn parse(input: &str) -> Result<Self, String> {
        let tokens: Vec<&str> = input.split_whitespace().collect();
        if tokens.is_empty() {
            return Err("predicate is empty".to_string());
        }

        let subject = match tokens[0].to_lowercase().as_str() {
            "tag" | "tags" => Subject::Tag,
            "message" | "mensagem" => Subject::Message,
            other => {
                return Err(format!(
                    "unknown subject '{other}'; expected 'tag' or 'message'"
                ));
            }
        };

        let mut idx = 1;
        let mut negated = false;
        if matches!(
            tokens.get(idx).map(|t| t.to_lowercase()).as_deref(),
            Some("not") | Some("não") | Some("nao")
        ) {
            negated = true;
            idx += 1;
        }

        let comparison = match tokens.get(idx).map(|t| t.to_lowercase()).as_deref() {
            Some("contains") | Some("contém") | Some("contem") => Comparison::Contains,
            Some("is") | Some("é") | Some("=") | Some("equals") => Comparison::Equals,
            Some(other) => {
                return Err(format!(
                    "unknown operator '{other}'; expected 'contains' or 'is'"
                ));
            }
            None => return Err("predicate is missing an operator".to_string()),
        };
        idx += 1;

        let value = unquote(&tokens[idx..].join(" "));
        if value.is_empty() {
            return Err("predicate is missing a value".to_string());
        }

        Ok(Self {
            subject,
            comparison,
            negated,
            value,
        })
    }

    /// Evaluates the predicate against the current message and contact.
    /// All comparisons are case-insensitive; `tag contains X` and `tag is X`
    /// are both tag-set membership.
    pub fn evaluate(&self, message: &InboundMessage, contact: &Contact) -> bool {
        let hit = match (self.subject, self.comparison) {
            (Subject::Tag, _) => contact.has_tag(&self.value),
            (Subject::Message, Comparison::Contains) => message
                .text
                .to_lowercase()
                .contains(&self.value.to_lowercase()),
            (Subject::Message, Comparison::Equals) => {
                message.text.trim().to_lowercase() == self.value.to_lowercase()
            }
        };
        hit != self.negated
    }
}

/// Strips one matching pair of surrounding quotes, if present.
fn unquote(value: &str) -> String {
    let v = value.trim();
    for quote in ['\'', '"'] {
        if v.len() >= 2 && v.starts_with(quote) && v.ends_with(quote) {
            return v[1..v.len() - 1].to_string();
        }
    }
    v.to_string()
}
