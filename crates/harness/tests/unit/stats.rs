//! # Statistics Tests

use npcsim_core::core::{Redirect, RedirectKind, Resolution};
use npcsim_core::stats::HarnessStats;

use crate::common::builder::instruction::{add, branch, jalr};
use crate::common::harness::TestContext;

#[test]
fn test_record_queued_by_kind() {
    let mut stats = HarnessStats::default();
    stats.record_queued(RedirectKind::Branch);
    stats.record_queued(RedirectKind::Branch);
    stats.record_queued(RedirectKind::IndirectJump);
    stats.record_queued(RedirectKind::Exception);
    stats.record_queued(RedirectKind::SystemCall);
    stats.record_queued(RedirectKind::TrapReturn);

    assert_eq!(stats.branches, 2);
    assert_eq!(stats.indirect_jumps, 1);
    assert_eq!(stats.exceptions, 1);
    assert_eq!(stats.system_calls, 1);
    assert_eq!(stats.trap_returns, 1);
    assert_eq!(stats.redirects_queued(), 6);
}

#[test]
fn test_record_commit_by_resolution() {
    let mut stats = HarnessStats::default();
    stats.record_commit(Resolution::Sequential);
    stats.record_commit(Resolution::Redirected(Redirect::new(
        RedirectKind::Branch,
        0x10,
    )));
    stats.record_commit(Resolution::Underflow(RedirectKind::TrapReturn));

    assert_eq!(stats.commits, 3);
    assert_eq!(stats.redirects_resolved, 1);
    assert_eq!(stats.queue_underflows, 1);
}

#[test]
fn test_harness_stats_after_run() {
    let mut ctx = TestContext::new([
        branch(0x1000, 0x20, true),
        add(0x1020),
        jalr(0x1024, 0x3000, 0),
        add(0x3000),
    ])
    .reset();
    let _ = ctx.run_commits(4);

    let stats = ctx.harness.stats();
    assert_eq!(stats.commits, 4);
    assert_eq!(stats.branches, 1);
    assert_eq!(stats.indirect_jumps, 1);
    assert_eq!(stats.redirects_resolved, 2);
    assert_eq!(stats.queue_underflows, 0);
    assert_eq!(stats.half_edges, ctx.harness.clock().half_edges());
    assert_eq!(
        stats.rising_edges, 5,
        "later commits were already in writeback after each settle"
    );
}

#[test]
fn test_display_report() {
    let stats = HarnessStats {
        half_edges: 20,
        rising_edges: 10,
        commits: 5,
        branches: 2,
        ..HarnessStats::default()
    };
    let report = stats.to_string();

    assert!(report.contains("CO-SIMULATION STATISTICS"));
    assert!(report.contains("sim_commits              5"));
    assert!(report.contains("sim_ipc                  0.5000"));
    assert!(report.contains("  queued                 2"));
}

#[test]
fn test_display_with_no_cycles() {
    let report = HarnessStats::default().to_string();
    assert!(report.contains("sim_ipc                  0.0000"));
}
