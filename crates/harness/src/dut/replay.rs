//! Trace-replay model adapter.
//!
//! `ReplayModel` stands in for a live simulation by replaying recorded signal frames. A
//! trace is JSON lines, one frame per rising edge, holding the raw signals the model
//! exposed after that edge:
//!
//! ```json
//! {"memory":{"pc":4096,"id":7,"imm":32,"branch":true,"result":1},"writeback":{"pc":4092,"id":12}}
//! ```
//!
//! Raw instruction ids are translated through an [`EncodingConfig`]. Omitted stages are
//! bubbles and omitted fields are zero. A frame may list memory reads and writes the model
//! issued on its edge; they are replayed through the memory port in order, reads first.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Deserialize;

use crate::bridge::MemoryPort;
use crate::common::constants::GPR_COUNT;
use crate::common::error::{HarnessError, Result};
use crate::config::EncodingConfig;
use crate::dut::snapshot::{Csrs, InstrKind, PipelineSnapshot, StageSignals};
use crate::dut::traits::{HardwareModel, PipelineProbe};

/// Raw signals of one stage as recorded.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawStage {
    /// Program counter.
    pub pc: u64,
    /// Raw encoding.
    pub inst: u32,
    /// Raw decoder id; absent means bubble.
    pub id: Option<u8>,
    /// rs1 value.
    pub rs1_value: u64,
    /// rs2 value.
    pub rs2_value: u64,
    /// Immediate.
    pub imm: u64,
    /// Branch flag.
    pub branch: bool,
    /// Result.
    pub result: u64,
    /// Exception code.
    pub exception: u64,
}

impl RawStage {
    fn decode(&self, encoding: &EncodingConfig) -> StageSignals {
        StageSignals {
            pc: self.pc,
            inst: self.inst,
            id: self
                .id
                .map_or(InstrKind::Bubble, |raw| InstrKind::from_raw(raw, encoding)),
            rs1_value: self.rs1_value,
            rs2_value: self.rs2_value,
            imm: self.imm,
            branch: self.branch,
            result: self.result,
            exception: self.exception,
        }
    }
}

/// Recorded store request.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RawWrite {
    /// Target address.
    pub addr: u64,
    /// Store data.
    pub data: u64,
    /// Byte-enable mask.
    pub mask: u8,
}

/// One recorded rising edge.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TraceFrame {
    /// Fetch stage.
    pub fetch: RawStage,
    /// Decode stage.
    pub decode: RawStage,
    /// Execute stage.
    pub alu: RawStage,
    /// Memory stage.
    pub memory: RawStage,
    /// Writeback stage.
    pub writeback: RawStage,
    /// CSRs.
    pub csr: Csrs,
    /// Register file; absent keeps the previous frame's values.
    pub gpr: Option<[u64; GPR_COUNT]>,
    /// Load addresses issued on this edge.
    pub mem_reads: Vec<u64>,
    /// Stores issued on this edge.
    pub mem_writes: Vec<RawWrite>,
}

impl TraceFrame {
    fn decode(&self, encoding: &EncodingConfig) -> PipelineSnapshot {
        PipelineSnapshot {
            fetch: self.fetch.decode(encoding),
            decode: self.decode.decode(encoding),
            alu: self.alu.decode(encoding),
            memory: self.memory.decode(encoding),
            writeback: self.writeback.decode(encoding),
            csr: self.csr,
        }
    }
}

/// Hardware model that replays a recorded trace.
///
/// Each rising edge outside reset consumes one frame. While reset is asserted a rising
/// edge empties the pipeline and rewinds to the first frame. Once the trace is exhausted
/// the pipeline holds bubbles.
#[derive(Debug, Clone)]
pub struct ReplayModel {
    frames: Vec<TraceFrame>,
    encoding: EncodingConfig,
    cursor: usize,
    clock: bool,
    evaluated_clock: bool,
    reset: bool,
    current: PipelineSnapshot,
    gpr: [u64; GPR_COUNT],
    last_load: Option<u64>,
    load_count: u64,
}

impl ReplayModel {
    /// Creates a replay model over already-parsed frames.
    pub fn new(frames: Vec<TraceFrame>, encoding: EncodingConfig) -> Self {
        Self {
            frames,
            encoding,
            cursor: 0,
            clock: false,
            evaluated_clock: false,
            reset: false,
            current: PipelineSnapshot::default(),
            gpr: [0; GPR_COUNT],
            last_load: None,
            load_count: 0,
        }
    }

    /// Parses a JSON-lines trace. Blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::TraceRead`] if a line cannot be read and
    /// [`HarnessError::TraceFrame`] if a line is not a valid frame.
    pub fn from_reader(reader: impl BufRead, encoding: EncodingConfig) -> Result<Self> {
        let mut frames = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| HarnessError::TraceRead {
                line: idx + 1,
                source,
            })?;
            if line.trim().is_empty() {
                continue;
            }
            let frame: TraceFrame =
                serde_json::from_str(&line).map_err(|source| HarnessError::TraceFrame {
                    line: idx + 1,
                    source,
                })?;
            frames.push(frame);
        }
        Ok(Self::new(frames, encoding))
    }

    /// Opens and parses a JSON-lines trace file.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Io`] if the file cannot be opened, otherwise the errors
    /// of [`ReplayModel::from_reader`].
    pub fn from_file(path: impl AsRef<Path>, encoding: EncodingConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| HarnessError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), encoding)
    }

    /// Number of recorded frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if the trace holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Returns `true` once every frame has been replayed.
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.frames.len()
    }

    /// Value returned by the memory port for the most recent replayed load.
    pub const fn last_load(&self) -> Option<u64> {
        self.last_load
    }

    /// Number of loads replayed so far.
    pub const fn load_count(&self) -> u64 {
        self.load_count
    }

    fn rising_edge(&mut self, mem: &mut dyn MemoryPort) {
        if self.reset {
            self.cursor = 0;
            self.current = PipelineSnapshot::default();
            self.gpr = [0; GPR_COUNT];
            return;
        }
        let Some(frame) = self.frames.get(self.cursor) else {
            self.current = PipelineSnapshot::default();
            return;
        };
        self.cursor += 1;
        for &addr in &frame.mem_reads {
            self.last_load = Some(mem.mem_read(addr));
            self.load_count += 1;
        }
        for write in &frame.mem_writes {
            mem.mem_write(write.addr, write.data, write.mask);
        }
        self.current = frame.decode(&self.encoding);
        if let Some(gpr) = frame.gpr {
            self.gpr = gpr;
        }
    }
}

impl PipelineProbe for ReplayModel {
    fn snapshot(&self) -> PipelineSnapshot {
        self.current
    }

    fn gpr(&self) -> [u64; GPR_COUNT] {
        self.gpr
    }
}

impl HardwareModel for ReplayModel {
    fn clock(&self) -> bool {
        self.clock
    }

    fn set_clock(&mut self, high: bool) {
        self.clock = high;
    }

    fn set_reset(&mut self, asserted: bool) {
        self.reset = asserted;
    }

    fn eval(&mut self, mem: &mut dyn MemoryPort) {
        let rising = self.clock && !self.evaluated_clock;
        self.evaluated_clock = self.clock;
        if rising {
            self.rising_edge(mem);
        }
    }
}
