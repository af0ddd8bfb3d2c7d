//! Standalone lifecycle benchmark for the panel-stack engine.
//!
//! Runs a scripted open/close/dismiss storm against a stack with simulated
//! time (the engine never reads the wall clock, so deadlines are advanced by
//! stepping a synthetic `Instant`) and reports throughput. Useful for
//! catching accidental quadratic behavior in the reconcile path.

use std::time::{Duration, Instant};

use clap::Parser;

use side_stack::stack::{PanelStack, StackConfig};

#[derive(Debug, Parser)]
#[command(name = "stack-bench", about = "Panel-stack lifecycle throughput benchmark")]
struct Args {
    /// Number of scripted lifecycle rounds to run.
    #[arg(long, default_value_t = 100_000)]
    rounds: u64,

    /// Animation duration in milliseconds used for the simulated timers.
    #[arg(long, default_value_t = 300)]
    duration_ms: u64,
}

/// One round: grow to depth four, escape the top, close the oldest panel,
/// advance past every deadline, then tear the rest down. Exercises slot
/// promotion, window eviction, timer firing and close-all cancellation.
fn run_round(stack: &mut PanelStack, mut now: Instant, step: Duration) -> (Instant, u64) {
    let mut ops = 0u64;

    let first = stack.open(now);
    stack.open(now);
    stack.open(now);
    stack.open(now);
    ops += 4;

    stack.handle_escape(now);
    stack.close(first, now);
    ops += 2;

    while stack.on_frame() {
        ops += 1;
    }

    now += step + Duration::from_millis(1);
    stack.tick(now);
    ops += 1;

    stack.close_all();
    ops += 1;

    debug_assert!(stack.is_empty());
    debug_assert_eq!(stack.pending_timer_count(), 0);
    (now, ops)
}

fn main() {
    let args = Args::parse();
    let step = Duration::from_millis(args.duration_ms);
    let config = StackConfig {
        animation_duration: step,
        ..StackConfig::default()
    };
    let mut stack = PanelStack::with_width_sequence(config, &[40, 48, 56]);

    let mut sim_now = Instant::now();
    let mut total_ops = 0u64;
    let started = Instant::now();
    for _ in 0..args.rounds {
        let (next_now, ops) = run_round(&mut stack, sim_now, step);
        sim_now = next_now;
        total_ops += ops;
    }
    let elapsed = started.elapsed();

    let per_op = elapsed
        .checked_div(total_ops.max(1) as u32)
        .unwrap_or_default();
    println!(
        "{} rounds, {} ops in {:.3}s ({:.0} ops/s, {:?}/op)",
        args.rounds,
        total_ops,
        elapsed.as_secs_f64(),
        total_ops as f64 / elapsed.as_secs_f64().max(f64::EPSILON),
        per_op,
    );
}
