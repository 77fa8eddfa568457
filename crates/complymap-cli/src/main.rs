//! CLI entry point for complymap.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and
//! exit codes. All business logic lives in the `complymap-app` crate.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use complymap_app::{
    EvaluateInput, ExplainOutput, GapInput, MapInput, parse_report_json, run_evaluate, run_explain,
    run_gap, run_map, runtime_error_report, serialize_report, to_renderable, verdict_exit_code,
};
use complymap_render::{render_csv, render_markdown};
use complymap_settings::Overrides;

#[derive(Parser, Debug)]
#[command(
    name = "complymap",
    version,
    about = "Compliance standard mapping and policy rule evaluation"
)]
struct Cli {
    /// Directory containing standard catalog TOML files.
    #[arg(long, default_value = "standards")]
    catalog_dir: Utf8PathBuf,

    /// Rulepack TOML file (repeatable).
    #[arg(long = "rules", default_value = "rules.toml")]
    rulepacks: Vec<Utf8PathBuf>,

    /// Path to complymap config TOML.
    #[arg(long, default_value = "complymap.toml")]
    config: Utf8PathBuf,

    /// Override profile (strict|lenient).
    #[arg(long)]
    profile: Option<String>,

    /// Override maximum rule outcomes to emit.
    #[arg(long)]
    max_results: Option<u32>,

    /// Override worker threads for rule evaluation.
    #[arg(long)]
    max_workers: Option<u32>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate configured identifiers against a snapshot and write artifacts.
    Evaluate {
        /// Environment snapshot file (JSON object).
        #[arg(long, default_value = "snapshot.json")]
        snapshot: Utf8PathBuf,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/complymap/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/complymap/report.md")]
        markdown_out: Utf8PathBuf,
    },

    /// Resolve identifiers to rules and print the mapping as JSON.
    Map {
        /// Identifiers or glob patterns to resolve.
        identifiers: Vec<String>,
    },

    /// Report the coverage gap for a standard family.
    Gap {
        /// Standard family to audit (e.g. CIS-AWS).
        #[arg(long)]
        standard: String,

        /// Required control section (repeatable, e.g. --control 1.4).
        #[arg(long = "control")]
        controls: Vec<String>,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/complymap/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render CSV from an existing JSON report.
    Csv {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/complymap/report.json")]
        report: Utf8PathBuf,

        /// Where to write the CSV output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Explain a report or error code with remediation guidance.
    Explain {
        /// The code (e.g., "unknown_identifier") to explain.
        code: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Evaluate {
            ref snapshot,
            ref report_out,
            write_markdown,
            ref markdown_out,
        } => cmd_evaluate(
            &cli,
            snapshot.clone(),
            report_out.clone(),
            write_markdown,
            markdown_out.clone(),
        ),
        Commands::Map { ref identifiers } => cmd_map(&cli, identifiers.clone()),
        Commands::Gap {
            ref standard,
            ref controls,
        } => cmd_gap(&cli, standard.clone(), controls.clone()),
        Commands::Md { report, output } => cmd_md(report, output),
        Commands::Csv { report, output } => cmd_csv(report, output),
        Commands::Explain { code } => cmd_explain(&code),
    }
}

fn overrides(cli: &Cli) -> Overrides {
    Overrides {
        profile: cli.profile.clone(),
        max_results: cli.max_results,
        max_workers: cli.max_workers,
    }
}

fn cmd_evaluate(
    cli: &Cli,
    snapshot: Utf8PathBuf,
    report_out: Utf8PathBuf,
    write_markdown: bool,
    markdown_out: Utf8PathBuf,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        // Load config if present; missing file is allowed (defaults apply).
        let cfg_text = std::fs::read_to_string(&cli.config).unwrap_or_default();

        let input = EvaluateInput {
            catalog_dir: &cli.catalog_dir,
            rulepacks: &cli.rulepacks,
            config_text: &cfg_text,
            overrides: overrides(cli),
            snapshot_path: &snapshot,
        };

        let output = run_evaluate(input)?;

        write_report_file(&report_out, &output.report).context("write report json")?;

        if write_markdown {
            let renderable = to_renderable(&output.report);
            let md = render_markdown(&renderable);
            write_text_file(&markdown_out, &md).context("write markdown")?;
        }

        Ok(verdict_exit_code(output.report.verdict))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = runtime_error_report(&format!("{err:#}"));
            let _ = write_report_file(&report_out, &report);
            eprintln!("complymap error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn cmd_map(cli: &Cli, identifiers: Vec<String>) -> anyhow::Result<()> {
    let json = run_map(MapInput {
        catalog_dir: &cli.catalog_dir,
        rulepacks: &cli.rulepacks,
        identifiers: &identifiers,
    })?;
    println!("{}", json);
    Ok(())
}

fn cmd_gap(cli: &Cli, standard: String, controls: Vec<String>) -> anyhow::Result<()> {
    let report = run_gap(GapInput {
        catalog_dir: &cli.catalog_dir,
        rulepacks: &cli.rulepacks,
        standard: &standard,
        required_controls: &controls,
    })?;
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("serialize gap report")?
    );
    Ok(())
}

fn cmd_md(report_path: Utf8PathBuf, output: Option<Utf8PathBuf>) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(&report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;
    let renderable = to_renderable(&report);
    let md = render_markdown(&renderable);

    if let Some(out_path) = output {
        write_text_file(&out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_csv(report_path: Utf8PathBuf, output: Option<Utf8PathBuf>) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(&report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;
    let renderable = to_renderable(&report);
    let csv = render_csv(&renderable);

    if let Some(out_path) = output {
        write_text_file(&out_path, &csv).context("write csv output")?;
    } else {
        print!("{}", csv);
    }

    Ok(())
}

fn cmd_explain(code: &str) -> anyhow::Result<()> {
    match run_explain(code) {
        ExplainOutput::Found(exp) => {
            print!("{}", complymap_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            code,
            available_codes,
        } => {
            eprint!("{}", complymap_app::format_not_found(&code, available_codes));
            std::process::exit(1);
        }
    }
}

fn write_report_file(
    path: &camino::Utf8Path,
    report: &complymap_types::EvalReport,
) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(report).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn write_text_file(path: &camino::Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}
