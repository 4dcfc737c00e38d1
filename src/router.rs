//! Per-message orchestration: keyword rules first, then flow triggers.
//!
//! The router is the crate's top-level runtime entry point. It is stateless
//! across messages; one [`Router`] can be shared freely between threads and
//! invoked concurrently, because every call builds its own
//! [`ExecutionContext`].

use crate::data::{Contact, InboundMessage};
use crate::flow::{ValidatedFlow, trigger};
use crate::instruction::Instruction;
use crate::interpreter::{self, DEFAULT_NODE_BUDGET, ExecutionContext};
use crate::keyword::{self, KeywordRule};

/// Routing knobs.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Node-visit budget passed to the interpreter.
    pub node_budget: usize,
    /// When set, flow triggers are still evaluated after a keyword rule
    /// already replied. Off by default so one message never gets two
    /// automated responses.
    pub flows_after_keyword_reply: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            node_budget: DEFAULT_NODE_BUDGET,
            flows_after_keyword_reply: false,
        }
    }
}

/// A validated flow together with its stored id, as activated by the user.
#[derive(Debug, Clone)]
pub struct ActiveFlow {
    pub id: String,
    pub flow: ValidatedFlow,
}

/// Evaluates one inbound message against the account's keyword rules and
/// active flows, producing the instruction list for the dispatcher.
pub struct Router {
    rules: Vec<KeywordRule>,
    flows: Vec<ActiveFlow>,
    config: RouterConfig,
}

impl Router {
    pub fn new(rules: Vec<KeywordRule>, flows: Vec<ActiveFlow>) -> Self {
        Self {
            rules,
            flows,
            config: RouterConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RouterConfig) -> Self {
        self.config = config;
        self
    }

    /// Routes one message. Never fails and never panics: runtime execution
    /// errors are logged at warn level and contribute zero instructions, so a
    /// broken flow cannot take down message processing.
    ///
    /// Keyword rules are checked first and take precedence; their
    /// match-or-no-match outcome is known before any flow trigger is
    /// evaluated, so a single message cannot be answered twice (unless
    /// [`RouterConfig::flows_after_keyword_reply`] opts into that).
    pub fn route(&self, message: &InboundMessage, contact: &Contact) -> Vec<Instruction> {
        let mut out = Vec::new();

        if let Some(rule) = keyword::find_match(&self.rules, message) {
            out.extend(keyword::instructions(rule, contact));
            if !self.config.flows_after_keyword_reply {
                return out;
            }
        }

        for active in &self.flows {
            // Platform gate: a flow scoped to other connections is skipped,
            // leaving later flows a chance to answer.
            if let Some(selector) = active.flow.selector_node() {
                if !selector.selected_platforms.contains(&message.connection_id) {
                    continue;
                }
            }
            if !trigger::matches(active.flow.trigger_node(), message) {
                continue;
            }

            let ctx = ExecutionContext::new(message, contact).with_budget(self.config.node_budget);
            match interpreter::execute(&active.flow, ctx) {
                Ok(instructions) => {
                    tracing::debug!(
                        flow = %active.id,
                        instructions = instructions.len(),
                        "flow matched and executed"
                    );
                    out.extend(instructions);
                    break;
                }
                Err(err) => {
                    tracing::warn!(flow = %active.id, error = %err, "flow execution discarded");
                    break;
                }
            }
        }

        out
    }
}
