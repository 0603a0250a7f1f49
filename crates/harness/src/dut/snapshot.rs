//! Pipeline snapshot types.
//!
//! A snapshot is the semantic view of one model evaluation: five stage records and the
//! machine-mode CSR block. Adapters translate their model's raw signals into these types,
//! so the resolver and detectors never see signal names or numeric instruction ids.

use serde::Deserialize;

use crate::config::EncodingConfig;

/// Instruction identity as far as the harness cares.
///
/// Every instruction the harness does not interpret is `Other`, carrying the model's raw
/// id for diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InstrKind {
    /// Empty slot after reset.
    Invalid,
    /// Stall or flush bubble.
    #[default]
    Bubble,
    /// Encoding the decoder did not recognise.
    Illegal,
    /// Indirect jump (`jalr`).
    Jalr,
    /// Environment call (`ecall`).
    Ecall,
    /// Machine trap return (`mret`).
    Mret,
    /// Any other instruction.
    Other(u8),
}

impl InstrKind {
    /// Maps a raw decoder id through the model's encoding table.
    pub fn from_raw(raw: u8, encoding: &EncodingConfig) -> Self {
        match raw {
            id if id == encoding.invalid => Self::Invalid,
            id if id == encoding.bubble => Self::Bubble,
            id if id == encoding.illegal => Self::Illegal,
            id if id == encoding.jalr => Self::Jalr,
            id if id == encoding.ecall => Self::Ecall,
            id if id == encoding.mret => Self::Mret,
            id => Self::Other(id),
        }
    }

    /// Returns `true` if the slot holds something other than the invalid or bubble
    /// sentinel.
    ///
    /// An illegal instruction still counts: it retires and is caught by the sanity
    /// checker.
    pub const fn is_instruction(self) -> bool {
        !matches!(self, Self::Invalid | Self::Bubble)
    }
}

/// Signals of one pipeline stage.
///
/// Not every stage drives every field; unused fields stay zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StageSignals {
    /// Program counter of the instruction in this stage.
    pub pc: u64,
    /// Raw 32-bit encoding (fetch and decode only).
    pub inst: u32,
    /// Instruction identity.
    pub id: InstrKind,
    /// Value of source register rs1.
    pub rs1_value: u64,
    /// Value of source register rs2.
    pub rs2_value: u64,
    /// Sign-extended immediate.
    pub imm: u64,
    /// Set for branch and jump instructions.
    pub branch: bool,
    /// ALU result; for branches, the evaluated condition.
    pub result: u64,
    /// Exception code raised in this stage, 0 if none.
    pub exception: u64,
}

impl StageSignals {
    /// Conditional branch whose condition evaluated true.
    pub const fn branch_taken(&self) -> bool {
        self.branch && self.result != 0
    }

    /// Whether this stage raised a synchronous exception.
    pub const fn has_exception(&self) -> bool {
        self.exception > 0
    }
}

/// Machine-mode trap CSRs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Csrs {
    /// Trap vector base address.
    pub mtvec: u64,
    /// Trap cause.
    pub mcause: u64,
    /// Exception program counter.
    pub mepc: u64,
    /// Machine status.
    pub mstatus: u64,
}

/// Signals of the whole pipeline after one evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PipelineSnapshot {
    /// Fetch stage.
    pub fetch: StageSignals,
    /// Decode stage.
    pub decode: StageSignals,
    /// Execute (ALU) stage.
    pub alu: StageSignals,
    /// Memory stage.
    pub memory: StageSignals,
    /// Writeback stage.
    pub writeback: StageSignals,
    /// Trap CSRs.
    pub csr: Csrs,
}
