// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! `banker`: checks whether an allocation state is safe.
//!
//! Reads an instance in the whitespace format understood by
//! `banker_model::loading::InstanceLoader`, or checks a built-in sample when
//! no file is given. Exit code 0 means safe, 1 unsafe, and 2 unknown (a limit
//! stopped the search). Malformed input is reported as an error.

use anyhow::{Context, Result};
use banker_model::configuration::{Configuration, ReleaseAccounting};
use banker_model::loading::InstanceLoader;
use banker_model::resources::ResourceVector;
use banker_safety::monitor::composite::CompositeMonitor;
use banker_safety::monitor::expansion::ExpansionLimitMonitor;
use banker_safety::monitor::log::LogMonitor;
use banker_safety::monitor::time::TimeLimitMonitor;
use banker_safety::{SafetyChecker, SearchPolicy, Verdict};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, info};

/// Multi-resource Banker's safety checker
#[derive(Parser, Debug)]
#[command(name = "banker", version, about, long_about = None)]
struct Cli {
    /// Instance file; the built-in sample is checked when omitted
    instance: Option<PathBuf>,

    /// What to do at a configuration no owner can leave
    #[arg(long, value_enum, default_value = "exhaustive")]
    policy: PolicyArg,

    /// How a completing owner's resources return to the free pool
    #[arg(long, value_enum, default_value = "footprint")]
    accounting: AccountingArg,

    /// Enqueue configurations even if they were seen before
    #[arg(long)]
    no_dedup: bool,

    /// Abort after this many milliseconds
    #[arg(long, value_name = "N")]
    time_limit_ms: Option<u64>,

    /// Abort after this many expanded configurations
    #[arg(long, value_name = "N")]
    max_expansions: Option<u64>,

    /// Print search statistics
    #[arg(long)]
    stats: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    /// Keep exploring after a dead end
    Exhaustive,
    /// Stop at the first dead end
    FirstDeadEnd,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum AccountingArg {
    /// free + owned + required
    Footprint,
    /// free - required + owned + required
    Held,
}

impl Cli {
    fn search_policy(&self) -> SearchPolicy {
        let policy = match self.policy {
            PolicyArg::Exhaustive => SearchPolicy::exhaustive(),
            PolicyArg::FirstDeadEnd => SearchPolicy::first_dead_end(),
        };
        let accounting = match self.accounting {
            AccountingArg::Footprint => ReleaseAccounting::Footprint,
            AccountingArg::Held => ReleaseAccounting::Held,
        };
        let policy = policy.with_accounting(accounting);
        if self.no_dedup {
            policy.with_deduplication(false)
        } else {
            policy
        }
    }

    fn monitor<'a>(&self) -> CompositeMonitor<'a, u64> {
        let mut monitor = CompositeMonitor::with_capacity(3);
        if let Some(ms) = self.time_limit_ms {
            monitor.add_monitor(TimeLimitMonitor::new(Duration::from_millis(ms)));
        }
        if let Some(max) = self.max_expansions {
            monitor.add_monitor(ExpansionLimitMonitor::new(max));
        }
        monitor.add_monitor(LogMonitor::default());
        monitor
    }
}

/// Two owners with three resource kinds, neither of which fits the free pool.
fn sample_instance() -> Result<Configuration<u64>> {
    let demands = [
        (ResourceVector::from([0, 0, 0]), ResourceVector::from([5, 7, 9])),
        (ResourceVector::from([0, 2, 0]), ResourceVector::from([1, 3, 4])),
    ];
    Ok(Configuration::from_demands(
        demands,
        ResourceVector::from([5, 2, 3]),
    )?)
}

fn load_instance(path: Option<&PathBuf>) -> Result<Configuration<u64>> {
    match path {
        Some(path) => InstanceLoader::new()
            .from_path(path)
            .with_context(|| format!("failed to load instance from {}", path.display())),
        None => {
            info!("no instance file given, checking the built-in sample");
            sample_instance()
        }
    }
}

fn exit_code(verdict: Verdict) -> u8 {
    match verdict {
        Verdict::Safe => 0,
        Verdict::Unsafe => 1,
        Verdict::Unknown => 2,
    }
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    debug!(?cli, "parsed arguments");

    let instance = load_instance(cli.instance.as_ref())?;
    let policy = cli.search_policy();
    info!(%policy, "checking {}", instance);

    let outcome = SafetyChecker::with_policy(policy).check(&instance, cli.monitor());

    println!("{}", outcome);
    if cli.stats {
        print!("{}", outcome.statistics());
    }

    Ok(ExitCode::from(exit_code(outcome.verdict())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use banker_safety::TerminationPolicy;
    use banker_safety::monitor::no_op::NoOperationMonitor;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_map_to_exhaustive_policy() {
        let cli = Cli::try_parse_from(["banker"]).unwrap();
        assert!(cli.instance.is_none());
        assert_eq!(cli.search_policy(), SearchPolicy::exhaustive());
        assert!(!cli.stats);
    }

    #[test]
    fn test_flags_map_to_policy() {
        let cli = Cli::try_parse_from([
            "banker",
            "state.txt",
            "--policy",
            "first-dead-end",
            "--accounting",
            "held",
            "--no-dedup",
            "--stats",
        ])
        .unwrap();

        let policy = cli.search_policy();
        assert_eq!(policy.termination(), TerminationPolicy::FirstDeadEnd);
        assert_eq!(policy.accounting(), ReleaseAccounting::Held);
        assert!(!policy.deduplicate());
        assert_eq!(cli.instance, Some(PathBuf::from("state.txt")));
        assert!(cli.stats);
    }

    #[test]
    fn test_limits_add_monitors() {
        let cli = Cli::try_parse_from([
            "banker",
            "--time-limit-ms",
            "500",
            "--max-expansions",
            "10",
        ])
        .unwrap();
        assert_eq!(cli.monitor().len(), 3);

        let plain = Cli::try_parse_from(["banker"]).unwrap();
        assert_eq!(plain.monitor().len(), 1);
    }

    #[test]
    fn test_rejects_unknown_policy() {
        assert!(Cli::try_parse_from(["banker", "--policy", "greedy"]).is_err());
    }

    #[test]
    fn test_sample_instance_is_unsafe() {
        let sample = sample_instance().unwrap();
        let outcome = SafetyChecker::new().check(&sample, NoOperationMonitor::new());
        assert_eq!(outcome.verdict(), Verdict::Unsafe);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(Verdict::Safe), 0);
        assert_eq!(exit_code(Verdict::Unsafe), 1);
        assert_eq!(exit_code(Verdict::Unknown), 2);
    }

    #[test]
    fn test_missing_instance_file_is_an_error() {
        let missing = PathBuf::from("/nonexistent/banker-instance.txt");
        let err = load_instance(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("failed to load instance"));
    }
}
