//! Adapters - concrete implementations of the ports.
//!
//! Each submodule talks to one external system and translates between its
//! wire format and the domain types. Nothing in here is reachable from the
//! domain except through the port traits.

pub mod ai;
pub mod tourvisor;
pub mod transport;
