//! # Replay Model Tests
//!
//! Parsing JSON-lines traces and driving the harness from them.

use std::io::{Cursor, Write};

use npcsim_core::Config;
use npcsim_core::Harness;
use npcsim_core::bridge::SparseMemory;
use npcsim_core::common::HarnessError;
use npcsim_core::config::EncodingConfig;
use npcsim_core::dut::{InstrKind, PipelineProbe, ReplayModel};
use pretty_assertions::assert_eq;

use crate::common::mocks::fault::SharedReporter;
use crate::common::mocks::memory::{Access, RecordingMemory};

const BRANCH_TRACE: &str = r#"{}
{"memory":{"pc":4096,"id":20,"branch":true,"result":1,"imm":32}}
{"writeback":{"pc":4096,"id":20,"branch":true,"result":1,"imm":32}}
{"writeback":{"pc":4128,"id":1},"gpr":[0,1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16,17,18,19,20,21,22,23,24,25,26,27,28,29,30,31]}
"#;

fn parse(text: &str) -> ReplayModel {
    ReplayModel::from_reader(Cursor::new(text), EncodingConfig::default()).unwrap()
}

fn harness_over(model: ReplayModel, max_sim_time: u64) -> Harness<ReplayModel> {
    let mut config = Config::default();
    config.general.max_sim_time = Some(max_sim_time);
    let mut harness = Harness::new(
        model,
        Box::new(SparseMemory::new()),
        Box::new(SharedReporter::new()),
        &config,
    );
    harness.reset();
    harness
}

// ══════════════════════════════════════════════════════════
// 1. Parsing
// ══════════════════════════════════════════════════════════

#[test]
fn test_parse_counts_frames_and_skips_blank_lines() {
    let model = parse("{}\n\n   \n{}\n");
    assert_eq!(model.len(), 2);
    assert!(!model.is_empty());
    assert!(!model.is_exhausted());
}

#[test]
fn test_empty_trace() {
    let model = parse("");
    assert!(model.is_empty());
    assert!(model.is_exhausted());
}

#[test]
fn test_malformed_frame_reports_line_number() {
    let err = ReplayModel::from_reader(
        Cursor::new("{}\n\n{\"memory\": 3}\n"),
        EncodingConfig::default(),
    )
    .unwrap_err();
    match err {
        HarnessError::TraceFrame { line, .. } => assert_eq!(line, 3),
        other => panic!("expected TraceFrame, got {other:?}"),
    }
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(BRANCH_TRACE.as_bytes()).unwrap();

    let model = ReplayModel::from_file(file.path(), EncodingConfig::default()).unwrap();
    assert_eq!(model.len(), 4);
}

#[test]
fn test_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = ReplayModel::from_file(dir.path().join("none.jsonl"), EncodingConfig::default())
        .unwrap_err();
    assert!(matches!(err, HarnessError::Io { .. }), "got {err:?}");
}

// ══════════════════════════════════════════════════════════
// 2. Driving the harness
// ══════════════════════════════════════════════════════════

#[test]
fn test_replayed_branch_resolves_target() {
    let mut harness = harness_over(parse(BRANCH_TRACE), 20);

    assert_eq!(harness.step(), Some(0x1000));
    assert_eq!(harness.dnpc(), 0x1020);

    assert_eq!(harness.step(), Some(0x1020));
    assert_eq!(harness.dnpc(), 0);

    assert_eq!(harness.step(), None, "trace exhausted, bound expires");
    assert!(harness.model().is_exhausted());
}

#[test]
fn test_replayed_registers_reach_dump() {
    let mut harness = harness_over(parse(BRANCH_TRACE), 20);
    let _ = harness.step();

    let regs = harness.dump_registers();
    assert_eq!(regs[10], 10);
    assert_eq!(regs[31], 31);
    assert_eq!(harness.register_dump().pc, 0x1000);
}

#[test]
fn test_unmapped_id_commits_and_trace_end_is_bubbles() {
    let mut harness = harness_over(parse(r#"{"writeback":{"pc":8,"id":17}}"#), 10);
    assert_eq!(harness.step(), Some(8), "unmapped ids are ordinary instructions");
    assert_eq!(harness.stats().commits, 1);
    assert_eq!(
        harness.model().snapshot().writeback.id,
        InstrKind::Bubble,
        "settle edges ran past the end of the trace"
    );
}

#[test]
fn test_reset_rewinds_trace() {
    let mut harness = harness_over(parse(BRANCH_TRACE), 100);
    assert_eq!(harness.step(), Some(0x1000));

    harness.reset();
    assert_eq!(harness.model().snapshot().writeback.id, InstrKind::Bubble);
    assert_eq!(harness.dump_registers(), [0; 32]);
    assert_eq!(harness.step(), Some(0x1000), "replay starts over");
}

#[test]
fn test_memory_traffic_is_replayed_through_bridge() {
    let trace = r#"{"mem_reads":[2147483648],"mem_writes":[{"addr":2147483904,"data":4660,"mask":3}]}
{"writeback":{"pc":0,"id":1}}
"#;
    let memory = RecordingMemory::new().with_image(0x8000_0000, &[0xef, 0xbe, 0xad, 0xde]);
    let log = memory.log();
    let mut config = Config::default();
    config.general.max_sim_time = Some(10);
    let mut harness = Harness::new(
        parse(trace),
        Box::new(memory),
        Box::new(SharedReporter::new()),
        &config,
    );
    harness.reset();

    assert_eq!(harness.step(), Some(0), "a commit at pc 0 is still a commit");
    assert_eq!(harness.model().last_load(), Some(0xdead_beef));
    assert_eq!(harness.model().load_count(), 1);
    assert_eq!(
        *log.borrow(),
        vec![
            Access::Read {
                addr: 0x8000_0000,
                len: 8
            },
            Access::Write {
                addr: 0x8000_0100,
                len: 3,
                data: 0x1234
            },
        ]
    );
    assert_eq!(harness.memory_mut().vaddr_read(0x8000_0100, 2), 0x1234);
}

#[test]
fn test_redirect_without_queued_target_underflows() {
    let trace = r#"{"writeback":{"pc":4096,"id":20,"branch":true,"result":1,"imm":32}}"#;
    let mut harness = harness_over(parse(trace), 10);

    assert_eq!(harness.step(), Some(0x1000));
    assert_eq!(harness.dnpc(), 0, "empty queue resolves to no redirection");
    assert_eq!(harness.stats().queue_underflows, 1);
    assert_eq!(harness.stats().redirects_resolved, 0);
}

#[test]
fn test_load_tracking_keeps_only_latest_value() {
    let trace = "{\"mem_reads\":[16,24]}\n{\"mem_reads\":[32]}\n{\"writeback\":{\"pc\":0,\"id\":1}}\n";
    let mut memory = SparseMemory::new();
    memory.load_image(16, &[1, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 3]);
    let mut config = Config::default();
    config.general.max_sim_time = Some(20);
    let mut harness = Harness::new(
        parse(trace),
        Box::new(memory),
        Box::new(SharedReporter::new()),
        &config,
    );
    harness.reset();

    assert_eq!(harness.step(), Some(0));
    assert_eq!(harness.model().load_count(), 3);
    assert_eq!(harness.model().last_load(), Some(3));
}
