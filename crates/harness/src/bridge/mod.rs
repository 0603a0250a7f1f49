//! Collaborators injected into the harness.
//!
//! The harness talks to the outside world through two traits:
//! 1. **Memory:** `AddressSpace` is the external virtual address space; `MemoryBridge`
//!    adapts it to the `MemoryPort` the model calls during evaluation.
//! 2. **Faults:** `FaultReporter` receives illegal-instruction reports.

/// Fault reporting collaborator.
pub mod fault;

/// Memory bridge and address spaces.
pub mod memory;

pub use fault::{FaultReporter, LogReporter};
pub use memory::{AddressSpace, MemoryBridge, MemoryPort, SparseMemory};
