//! Command implementations for the `fmtrules` binary.

use anyhow::{Context, Result, bail};
use fmtrules_registry::{SelectOptions, SharedRegistry};
use tracing::debug;

use fmtrules_cli::report::{CheckReport, check_values, describe_rule, rule_listings};

use crate::cli::{CheckArgs, ListArgs, ShowArgs};
use crate::summary::{print_check_report, print_rule_table};

pub fn run_list(registry: &SharedRegistry, args: &ListArgs) -> Result<()> {
    let listings = rule_listings(&registry.snapshot());
    if args.json {
        let json = serde_json::to_string_pretty(&listings).context("serialize rule listing")?;
        println!("{json}");
    } else {
        print_rule_table(&listings);
    }
    Ok(())
}

pub fn run_show(registry: &SharedRegistry, args: &ShowArgs) -> Result<()> {
    let Some(rule) = registry.lookup(&args.name) else {
        bail!("no rule named `{}`", args.name);
    };
    let deprecation = registry.deprecation(&args.name);
    print!("{}", describe_rule(&rule, deprecation.as_ref()));
    Ok(())
}

pub fn run_check(registry: &SharedRegistry, args: &CheckArgs) -> Result<CheckReport> {
    let options = SelectOptions {
        using: args.using.clone(),
    };
    debug!(attribute = %args.attribute, using = ?options.using, "resolving rule");
    let report = check_values(registry, &args.attribute, &args.values, &options)
        .with_context(|| format!("resolve rule for `{}`", args.attribute))?;
    print_check_report(&report);
    Ok(report)
}
