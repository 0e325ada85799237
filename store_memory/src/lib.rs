//! In-memory storage backend.
//!
//! Both collections live behind one mutex, so every constraint check and
//! every compound commit observes and mutates a single consistent state.
//! This is the reference backend and the test backend; a document-database
//! backend would map the same trait contracts onto its own transactions and
//! partial unique indexes.

mod memory;

pub use memory::MemoryStore;
