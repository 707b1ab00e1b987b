use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};

use hello_config::HelloConfig;
use hello_core::alloc::{BoundedAllocator, HeapAllocator, RecordAllocator};
use hello_core::clock::{Clock, MonotonicClock, VirtualClock};
use hello_core::{ActivationError, ActivationManager, CountPolicy, NoticeSink, TracingSink};
use hello_telemetry::logging::{self, lifecycle_span};
use hello_telemetry::{MetricsRecorder, MetricsSink};

#[derive(Parser)]
#[command(name = "hello", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Activate the module, then deactivate it
    Run(RunArgs),
    /// Report how a count would be treated, without allocating anything
    Check(CheckArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Configuration file; defaults to config/hello.yaml and HELLO_* variables
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// The number of times to print 'Hello, world!'
    #[arg(short = 'n', long)]
    pub count: Option<u32>,
    /// Record budget; allocation fails once it is used up
    #[arg(long)]
    pub capacity: Option<usize>,
    /// Stamp records with a deterministic clock instead of the monotonic one
    #[arg(long)]
    pub virtual_clock: bool,
    /// Print prometheus counters when done
    #[arg(long)]
    pub metrics: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(short = 'n', long)]
    pub count: Option<u32>,
}

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Run(args) => run(args),
        Commands::Check(args) => check(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<HelloConfig> {
    match path {
        Some(path) => HelloConfig::load_from_path(path)
            .with_context(|| format!("loading {}", path.display())),
        None => HelloConfig::load().context("loading configuration"),
    }
}

fn run(args: RunArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(count) = args.count {
        config.module.count = count;
    }
    if args.capacity.is_some() {
        config.module.capacity = args.capacity;
    }
    config.telemetry.metrics |= args.metrics;

    logging::init(&config.telemetry).map_err(|e| anyhow!(e))?;
    let metrics = MetricsRecorder::new().context("registering metrics")?;
    let sink = MetricsSink::new(TracingSink, metrics.clone());
    let count = config.module.count;

    let virtual_clock = || VirtualClock::new(0).with_step(1);
    let outcome = match (config.module.capacity, args.virtual_clock) {
        (Some(capacity), true) => {
            host(BoundedAllocator::new(capacity), virtual_clock(), sink, count)
        }
        (Some(capacity), false) => {
            host(BoundedAllocator::new(capacity), MonotonicClock::new(), sink, count)
        }
        (None, true) => host(HeapAllocator::new(), virtual_clock(), sink, count),
        (None, false) => host(HeapAllocator::new(), MonotonicClock::new(), sink, count),
    };

    if config.telemetry.metrics {
        print!("{}", metrics.gather_metrics().context("gathering metrics")?);
    }

    outcome.with_context(|| format!("module activation with count {count} failed"))?;
    check_released(&metrics)
}

/// Every record counted as allocated must also have been counted as freed.
fn check_released(metrics: &MetricsRecorder) -> anyhow::Result<()> {
    let live = metrics.live_items();
    anyhow::ensure!(live == 0, "{live} records still live after deactivation");
    Ok(())
}

fn host<A, C, S>(allocator: A, clock: C, sink: S, count: u32) -> Result<(), ActivationError>
where
    A: RecordAllocator,
    C: Clock,
    S: NoticeSink,
{
    let mut manager = ActivationManager::with_parts(allocator, clock, sink);
    run_lifecycle(&mut manager, count)
}

/// Activation followed by deactivation. A refused activation skips the
/// deactivate hook, as an unloaded module is never stopped.
pub fn run_lifecycle<A, C, S>(
    manager: &mut ActivationManager<A, C, S>,
    count: u32,
) -> Result<(), ActivationError>
where
    A: RecordAllocator,
    C: Clock,
    S: NoticeSink,
{
    lifecycle_span("activate", count)
        .in_scope(|| manager.activate(count))
        .map_err(|err| {
            error!(code = err.code(), "{err}");
            err
        })?;
    lifecycle_span("deactivate", count).in_scope(|| manager.deactivate());
    info!(
        allocations = manager.allocator().stats().allocations(),
        frees = manager.allocator().stats().frees(),
        "lifecycle complete"
    );
    Ok(())
}

fn check(args: CheckArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let count = args.count.unwrap_or(config.module.count);
    println!("{}", describe(count));
    Ok(())
}

fn describe(count: u32) -> String {
    let policy = CountPolicy::classify(count);
    let verdict = if policy.permits_activation() {
        "accepted"
    } else {
        "refused"
    };
    format!("count {count}: {policy} ({verdict})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use hello_core::notice::{MemorySink, Notice};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_run_flags() {
        let cli = Cli::try_parse_from([
            "hello",
            "run",
            "-n",
            "3",
            "--capacity",
            "2",
            "--virtual-clock",
        ])
        .unwrap();
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.count, Some(3));
                assert_eq!(args.capacity, Some(2));
                assert!(args.virtual_clock);
                assert!(!args.metrics);
            }
            Commands::Check(_) => panic!("expected run"),
        }
    }

    #[test]
    fn unreleased_records_are_reported() {
        let metrics = MetricsRecorder::new().unwrap();
        metrics.items_allocated.inc_by(3);
        metrics.items_freed.inc_by(2);
        let err = check_released(&metrics).unwrap_err();
        assert_eq!(err.to_string(), "1 records still live after deactivation");

        metrics.items_freed.inc();
        assert!(check_released(&metrics).is_ok());
    }

    #[test]
    fn metered_lifecycle_releases_everything() {
        let metrics = MetricsRecorder::new().unwrap();
        let sink = MetricsSink::new(MemorySink::new(), metrics.clone());
        let mut manager =
            ActivationManager::with_parts(BoundedAllocator::new(10), VirtualClock::new(0), sink);

        run_lifecycle(&mut manager, 8).unwrap();
        assert_eq!(metrics.items_allocated.get(), 8);
        assert!(check_released(&metrics).is_ok());
    }

    #[test]
    fn describe_reports_policy() {
        assert_eq!(describe(0), "count 0: empty (accepted)");
        assert_eq!(describe(3), "count 3: nominal (accepted)");
        assert_eq!(describe(7), "count 7: advisory (accepted)");
        assert_eq!(describe(11), "count 11: out of range (refused)");
    }

    #[test]
    fn lifecycle_frees_everything() {
        let mut manager = ActivationManager::with_parts(
            HeapAllocator::new(),
            VirtualClock::new(0).with_step(1),
            MemorySink::new(),
        );
        run_lifecycle(&mut manager, 4).unwrap();

        assert!(manager.is_empty());
        assert_eq!(manager.allocator().stats().live(), 0);
        assert_eq!(
            manager.sink().notices().last(),
            Some(&Notice::DeactivationFinished)
        );
    }

    #[test]
    fn refused_activation_skips_deactivate() {
        let mut manager = ActivationManager::with_parts(
            HeapAllocator::new(),
            VirtualClock::new(0),
            MemorySink::new(),
        );
        assert!(run_lifecycle(&mut manager, 12).is_err());
        assert_eq!(
            manager.sink().notices(),
            &[Notice::CountOutOfRange { count: 12 }]
        );
    }
}
