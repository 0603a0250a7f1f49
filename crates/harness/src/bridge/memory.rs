//! Memory bridge between the model and the external address space.
//!
//! This module provides:
//! 1. **`MemoryPort`:** What the model sees during evaluation: one read and one write call
//!    per load or store it issues.
//! 2. **`AddressSpace`:** The external virtual address space the checker owns.
//! 3. **`MemoryBridge`:** The pass-through between the two. It performs no validation.
//! 4. **`SparseMemory`:** A byte-addressed address space for replays and tests.
//!
//! Reads are always 8 bytes wide regardless of the access the model intended; narrowing
//! happens on the model side. Writes forward the model's byte-enable mask in the address
//! space's `len` slot unchanged.

use std::collections::BTreeMap;
use std::fmt;

use crate::common::constants::MEM_READ_WIDTH;

/// Memory interface the model calls while it evaluates.
pub trait MemoryPort {
    /// Serves a load issued by the model.
    fn mem_read(&mut self, raddr: u64) -> u64;

    /// Serves a store issued by the model.
    fn mem_write(&mut self, waddr: u64, wdata: u64, wmask: u8);
}

/// External virtual address space.
pub trait AddressSpace {
    /// Reads `len` bytes at `addr`, little-endian.
    fn vaddr_read(&mut self, addr: u64, len: usize) -> u64;

    /// Writes `data` at `addr`.
    ///
    /// Calls routed through [`MemoryBridge`] carry the model's byte-enable mask in `len`.
    fn vaddr_write(&mut self, addr: u64, len: usize, data: u64);
}

/// Forwards model memory traffic to an [`AddressSpace`].
pub struct MemoryBridge {
    space: Box<dyn AddressSpace>,
}

impl MemoryBridge {
    /// Wraps an address space.
    pub fn new(space: Box<dyn AddressSpace>) -> Self {
        Self { space }
    }

    /// Mutable access to the wrapped address space.
    pub fn space_mut(&mut self) -> &mut dyn AddressSpace {
        self.space.as_mut()
    }
}

impl fmt::Debug for MemoryBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryBridge").finish_non_exhaustive()
    }
}

impl MemoryPort for MemoryBridge {
    fn mem_read(&mut self, raddr: u64) -> u64 {
        self.space.vaddr_read(raddr, MEM_READ_WIDTH)
    }

    fn mem_write(&mut self, waddr: u64, wdata: u64, wmask: u8) {
        self.space.vaddr_write(waddr, wmask as usize, wdata);
    }
}

/// Sparse byte-addressed memory.
///
/// Unwritten bytes read as zero. `vaddr_read` treats `len` as a byte count (at most 8);
/// `vaddr_write` treats `len` as the byte-enable mask the bridge forwards, so bit `i`
/// writes byte `i` of `data` to `addr + i`.
#[derive(Debug, Clone, Default)]
pub struct SparseMemory {
    bytes: BTreeMap<u64, u8>,
}

impl SparseMemory {
    /// Creates an empty memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies a flat image into memory starting at `base`.
    pub fn load_image(&mut self, base: u64, image: &[u8]) {
        for (offset, &byte) in (0u64..).zip(image) {
            let _ = self.bytes.insert(base.wrapping_add(offset), byte);
        }
    }

    /// Reads a single byte.
    pub fn read_u8(&self, addr: u64) -> u8 {
        self.bytes.get(&addr).copied().unwrap_or(0)
    }

    /// Number of bytes that have ever been written.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AddressSpace for SparseMemory {
    fn vaddr_read(&mut self, addr: u64, len: usize) -> u64 {
        (0..len.min(8) as u64).fold(0, |acc, i| {
            acc | (u64::from(self.read_u8(addr.wrapping_add(i))) << (8 * i))
        })
    }

    fn vaddr_write(&mut self, addr: u64, len: usize, data: u64) {
        for i in 0..8u64 {
            if len & (1 << i) != 0 {
                let _ = self
                    .bytes
                    .insert(addr.wrapping_add(i), (data >> (8 * i)) as u8);
            }
        }
    }
}
