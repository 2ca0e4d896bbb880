//! Tour Scout - Conversational tour search assistant.
//!
//! Guides a chat user through a multi-step dialogue to collect travel-search
//! parameters, submits them to an external tour-inventory provider, polls the
//! search job until it converges, and renders a ranked result digest back
//! into the conversation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
