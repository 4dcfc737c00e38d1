//! # chatflow - Automation Flow Engine
//!
//! **chatflow** is the runtime core of a social-media chat CRM's automations:
//! it decides, for each inbound message, which automated response (if any)
//! fires. Flows are directed graphs of typed nodes (trigger, message,
//! condition, action, broadcast, platform selector) edited visually and
//! persisted as JSON; keyword rules are flat priority-ordered auto-replies.
//! The engine validates flow documents before activation and interprets them
//! at runtime, emitting an ordered list of [`Instruction`]s for an external
//! dispatcher. It performs no network I/O itself.
//!
//! ## Core workflow
//!
//! 1. **Load**: deserialize the persisted editor document into a
//!    [`FlowDocument`].
//! 2. **Validate**: [`flow::validate`] gates activation, returning a
//!    normalized [`flow::ValidatedFlow`] or a descriptive error for the
//!    editing user.
//! 3. **Route**: per inbound message, a [`router::Router`] checks keyword
//!    rules first, then flow triggers, and hands the winning mechanism to the
//!    interpreter.
//! 4. **Dispatch**: the returned instructions (send message, add tag, call
//!    API, start sequence, enqueue broadcast) go to the external dispatcher
//!    for delivery.
//!
//! ## Quick start
//!
//! ```rust
//! use chatflow::prelude::*;
//! use chrono::Utc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let doc = FlowDocument::from_json(r#"{
//!         "nodes": [
//!             {"id": "1", "type": "trigger",
//!              "data": {"label": "Boas-vindas", "keywords": ["oi"]}},
//!             {"id": "2", "type": "message",
//!              "data": {"content": "Olá {name}!"}},
//!             {"id": "3", "type": "action",
//!              "data": {"action": "add_tag", "details": "novo"}}
//!         ],
//!         "edges": [
//!             {"id": "e1", "source": "1", "target": "2"},
//!             {"id": "e2", "source": "2", "target": "3"}
//!         ]
//!     }"#)?;
//!
//!     // Gate activation on validation.
//!     let flow = chatflow::flow::validate(&doc)?;
//!
//!     let message = InboundMessage {
//!         text: "oi".to_string(),
//!         sender_platform_id: "9001".to_string(),
//!         connection_id: "conn-1".to_string(),
//!         timestamp: Utc::now(),
//!     };
//!     let contact = Contact {
//!         name: Some("Ana".to_string()),
//!         ..Contact::default()
//!     };
//!
//!     let router = Router::new(vec![], vec![ActiveFlow { id: "flow-1".into(), flow }]);
//!     let instructions = router.route(&message, &contact);
//!
//!     assert_eq!(instructions[0], Instruction::text("Olá Ana!"));
//!     assert_eq!(instructions[1], Instruction::AddTag { tag: "novo".into() });
//!     Ok(())
//! }
//! ```

pub mod data;
pub mod error;
pub mod flow;
pub mod instruction;
pub mod interpreter;
pub mod keyword;
pub mod prelude;
pub mod router;

pub use instruction::Instruction;

#[doc(inline)]
pub use flow::FlowDocument;
