//! Responder memory.
//!
//! - `facts`: long-term, persisted user facts with write-through storage.
//! - `transcript`: short-term, in-process log of recent turns.

pub mod facts;
pub mod transcript;

pub use facts::{FactKey, FactSink, FactStore, Facts, JsonFactSink, MemoryFactSink};
pub use transcript::{Role, Transcript, Turn};
