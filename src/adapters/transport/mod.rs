//! Transport adapters - concrete chat delivery backends.

mod chunker;
mod console;
mod in_memory;

pub use chunker::split_message;
pub use console::ConsoleTransport;
pub use in_memory::InMemoryTransport;
