//! Register and CSR dump formatting.
//!
//! Debug output consumed by whatever sits on top of the harness. It provides:
//! 1. **Registers:** `RegisterDump`, one `name: value` line per register, PC first.
//! 2. **CSRs:** `Display` for [`Csrs`] on one line.
//! 3. **Stages:** `Display` for [`StageSignals`], used by per-edge stage tracing.

use std::fmt;

use crate::common::constants::GPR_COUNT;
use crate::dut::{Csrs, PipelineSnapshot, StageSignals};

/// ABI names of the integer registers, indexed by register number.
pub const ABI_NAMES: [&str; GPR_COUNT] = [
    "$0", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

/// PC and general-purpose registers captured at one point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterDump {
    /// Program counter.
    pub pc: u64,
    /// Register values, `x0` first.
    pub gpr: [u64; GPR_COUNT],
}

impl fmt::Display for RegisterDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "pc: {:#x}", self.pc)?;
        for (name, value) in ABI_NAMES.iter().zip(self.gpr) {
            writeln!(f, "{name}: {value:#x}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Csrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mtvec {:#x} mcause {:#x} mepc {:#x} mstatus {:#x}",
            self.mtvec, self.mcause, self.mepc, self.mstatus
        )
    }
}

impl fmt::Display for StageSignals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id {:?} pc {:#x} rs1 {:#x} rs2 {:#x} imm {:#x} branch {} result {:#x} exception {:#x}",
            self.id,
            self.pc,
            self.rs1_value,
            self.rs2_value,
            self.imm,
            u8::from(self.branch),
            self.result,
            self.exception
        )
    }
}

/// Multi-line view of every stage of a snapshot.
#[derive(Clone, Copy, Debug)]
pub struct StageDump<'a>(pub &'a PipelineSnapshot);

impl fmt::Display for StageDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        writeln!(f, "fetch pc {:#x} instr {:#010x}", s.fetch.pc, s.fetch.inst)?;
        writeln!(
            f,
            "dec   pc {:#x} instr {:#010x} id {:?}",
            s.decode.pc, s.decode.inst, s.decode.id
        )?;
        writeln!(f, "alu   {}", s.alu)?;
        writeln!(f, "dmem  {}", s.memory)?;
        writeln!(f, "wb    {}", s.writeback)?;
        write!(f, "csr   {}", s.csr)
    }
}
