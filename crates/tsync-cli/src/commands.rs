use std::fmt::Write as _;

use anyhow::Context;
use colored::Colorize;
use serde_json::json;
use tsync_diff::{diff_keyed, diff_positional, DiffError, KeyedDiff};
use tsync_store::RemoteTableHandle;
use tsync_sync::{
    parse_remote_rows, ParsePolicy, SyncAction, SyncError, SyncOutcome, SyncReport,
    TableSyncEngine,
};
use tsync_types::Table;

use crate::cli::*;
use crate::config::Config;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    match cli.command.unwrap_or(Command::Run(RunArgs::default())) {
        Command::Run(args) => cmd_run(&config, args, cli.format).await,
        Command::Diff(args) => cmd_diff(&config, args, cli.format).await,
        Command::Show => cmd_show(&config, cli.format).await,
    }
}

fn abort(err: SyncError) -> anyhow::Error {
    let stage = err.stage();
    anyhow::Error::new(err).context(format!("sync aborted during {stage}"))
}

async fn cmd_run(config: &Config, args: RunArgs, format: OutputFormat) -> anyhow::Result<()> {
    let source = config.source()?;
    let remote = config.remote();
    let engine = TableSyncEngine::new(config.sync.clone());

    if args.dry_run {
        let authoritative = source.fetch().await.map_err(|e| abort(e.into()))?;
        let plan = engine.plan(&authoritative, &remote).await.map_err(abort)?;
        return print_plan(&plan.action, &authoritative, format);
    }

    let report = engine.run(&*source, &remote).await.map_err(abort)?;
    print_report(&report, format)
}

fn print_plan(action: &SyncAction, authoritative: &Table, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        let value = match action {
            SyncAction::Create => json!({ "action": "create", "rows": authoritative.len() }),
            SyncAction::Noop => json!({ "action": "noop" }),
            SyncAction::Patch(writes) => json!({ "action": "patch", "writes": writes }),
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }
    match action {
        SyncAction::Create => {
            println!("{} would create table with {} rows", "dry run:".yellow(), authoritative.len());
        }
        SyncAction::Noop => println!("{} table already up to date", "dry run:".yellow()),
        SyncAction::Patch(writes) => {
            println!("{} would patch {} rows", "dry run:".yellow(), writes.len());
            for write in writes {
                for (row, (code, desc)) in write.rows().zip(&write.values) {
                    println!("  row {}: {}\t{}", row.to_string().bold(), code, desc);
                }
            }
        }
    }
    Ok(())
}

fn print_report(report: &SyncReport, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    let mark = match report.outcome {
        SyncOutcome::Unchanged => "=".dimmed(),
        _ => "✓".green().bold(),
    };
    println!("{} {}", mark, report.outcome);
    if !report.parse_issues.is_empty() {
        println!(
            "{} {} remote row code(s) were not numbers and were read as 0:",
            "warning:".yellow().bold(),
            report.parse_issues.len()
        );
        for issue in &report.parse_issues {
            println!("  {}", issue);
        }
    }
    Ok(())
}

async fn cmd_diff(config: &Config, args: DiffArgs, format: OutputFormat) -> anyhow::Result<()> {
    let authoritative = config.source()?.fetch().await.map_err(|e| abort(e.into()))?;
    let remote = config.remote();
    let current = if remote.exists().await.map_err(|e| abort(SyncError::RemoteRead(e)))? {
        let raw = remote.fetch_rows().await.map_err(|e| abort(SyncError::RemoteRead(e)))?;
        Some(parse_remote_rows(&raw, ParsePolicy::Lenient).map_err(abort)?.0)
    } else {
        None
    };

    let rendered = render_diff(&authoritative, current.as_ref(), args.keyed, format)?;
    if let Some(note) = &rendered.note {
        eprintln!("{note}");
    }
    print!("{}", rendered.out);
    Ok(())
}

/// Output of `tsync diff`: the body goes to stdout, the note to stderr so
/// JSON output stays parseable.
struct Rendered {
    out: String,
    note: Option<String>,
}

fn render_diff(
    authoritative: &Table,
    current: Option<&Table>,
    keyed: bool,
    format: OutputFormat,
) -> anyhow::Result<Rendered> {
    let Some(current) = current else {
        let out = if format == OutputFormat::Json {
            let value = json!({ "action": "create", "rows": authoritative.len() });
            format!("{}\n", serde_json::to_string_pretty(&value)?)
        } else {
            format!("No remote table; {} rows would be created.\n", authoritative.len())
        };
        return Ok(Rendered { out, note: None });
    };

    if keyed {
        let out = render_keyed(&diff_keyed(authoritative, current), format)?;
        return Ok(Rendered { out, note: None });
    }

    match diff_positional(authoritative, current) {
        Ok(diff) => {
            let mut out = String::new();
            if format == OutputFormat::Json {
                let changes: Vec<_> = diff
                    .iter()
                    .map(|(i, row)| json!({ "index": i, "theirs": current[i], "ours": row }))
                    .collect();
                writeln!(out, "{}", serde_json::to_string_pretty(&changes)?)?;
            } else if diff.is_empty() {
                writeln!(out, "No changes.")?;
            } else {
                for (i, row) in diff.iter() {
                    writeln!(out, "{} {}", format!("- {:>4}", i).red(), current[i])?;
                    writeln!(out, "{} {}", format!("+ {:>4}", i).green(), row)?;
                }
            }
            Ok(Rendered { out, note: None })
        }
        Err(DiffError::ShapeMismatch { authoritative: ours, remote: theirs }) => {
            let note = format!(
                "{} source has {} rows, remote has {}; showing keyed diff",
                "shape mismatch:".yellow().bold(),
                ours,
                theirs
            );
            let out = render_keyed(&diff_keyed(authoritative, current), format)?;
            Ok(Rendered { out, note: Some(note) })
        }
    }
}

fn render_keyed(diff: &KeyedDiff, format: OutputFormat) -> anyhow::Result<String> {
    let mut out = String::new();
    if format == OutputFormat::Json {
        let value = json!({
            "added": diff.added,
            "removed": diff.removed,
            "changed": diff.changed.iter()
                .map(|c| json!({ "code": c.code, "old": c.old, "new": c.new }))
                .collect::<Vec<_>>(),
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        return Ok(out);
    }
    if diff.is_empty() {
        writeln!(out, "No changes.")?;
        return Ok(out);
    }
    for row in &diff.added {
        writeln!(out, "{} {}", "+".green(), row)?;
    }
    for row in &diff.removed {
        writeln!(out, "{} {}", "-".red(), row)?;
    }
    for change in &diff.changed {
        writeln!(out, "{} {}\t{} → {}", "~".yellow(), change.code, change.old, change.new)?;
    }
    writeln!(out, "{}", diff.to_string().dimmed())?;
    Ok(out)
}

async fn cmd_show(config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    let remote = config.remote();
    if !remote.exists().await.context("reading remote document")? {
        println!("No table at index {} in {}.", remote.table_index(), remote.path().display());
        return Ok(());
    }
    let rows = remote.fetch_rows().await.context("reading remote table")?;
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    for (i, (code, desc)) in rows.iter().enumerate() {
        println!("{:>4}  {}\t{}", i.to_string().dimmed(), code.bold(), desc);
    }
    Ok(())
}
