use clap::Parser;
use colored::*;
use datasurvey::api::{CmdMessage, MessageLevel, SurveyApi};
use datasurvey::commands::ReportOptions;
use datasurvey::config::SurveyConfig;
use datasurvey::error::Result;
use datasurvey::probe::command::CommandProbe;
use datasurvey::report::SplitSummary;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod args;
use args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let api = init_api(&cli)?;
    let max_files = cli.max_files();

    match cli.command {
        Some(Commands::Report) | None => handle_report(&api, cli.data_root, cli.report, max_files),
        Some(Commands::Check { json }) => handle_check(&api, cli.data_root, max_files, json),
        Some(Commands::Probe { files, json }) => handle_probe(&api, files, json),
        Some(Commands::Config) => handle_config(&api),
    }
}

fn init_api(cli: &Cli) -> Result<SurveyApi<CommandProbe>> {
    let (config, source) = SurveyConfig::resolve(cli.config.as_deref())?;
    tracing::debug!(source = ?source, "configuration loaded");
    Ok(SurveyApi::from_config(config).with_config_source(source))
}

fn handle_report(
    api: &SurveyApi<CommandProbe>,
    data_root: PathBuf,
    report_path: PathBuf,
    max_files: Option<usize>,
) -> Result<()> {
    let result = api.report(&ReportOptions {
        data_root,
        report_path,
        max_files,
    })?;
    if let Some(text) = &result.report {
        print!("{}", text);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_check(
    api: &SurveyApi<CommandProbe>,
    data_root: PathBuf,
    max_files: Option<usize>,
    json: bool,
) -> Result<()> {
    let result = api.check(&data_root, max_files)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result.splits)?);
    } else {
        let example_ids = api.config().example_ids;
        for split in &result.splits {
            print_split(split, example_ids);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_probe(api: &SurveyApi<CommandProbe>, files: Vec<PathBuf>, json: bool) -> Result<()> {
    let result = api.probe_files(&files)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result.probed)?);
    } else {
        for meta in &result.probed {
            println!("{}: {}", meta.name.bold(), meta.fields.describe());
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(api: &SurveyApi<CommandProbe>) -> Result<()> {
    let result = api.show_config();
    if let Some(config) = &result.config {
        println!("{}", serde_json::to_string_pretty(config)?);
    }
    let source = match &result.config_source {
        Some(path) => format!("Loaded from {}", path.display()),
        None => "No config file found, using defaults".to_string(),
    };
    print_messages(&[CmdMessage::info(source)]);
    Ok(())
}

fn print_split(split: &SplitSummary, example_ids: usize) {
    let r = &split.reconciliation;
    let label = format!("{:<13}", split.split.key());
    if r.is_exact() {
        println!("{} {} files, {}", label.bold(), split.files, "ok".green());
        return;
    }
    let mut parts = Vec::new();
    if !r.missing.is_empty() {
        parts.push(counted("missing", &r.missing, example_ids));
    }
    if !r.extra.is_empty() {
        parts.push(counted("extra", &r.extra, example_ids));
    }
    println!("{} {} files, {}", label.bold(), split.files, parts.join(", ").yellow());
}

/// `missing 3 (001, 002, …)`, or just `missing 3` when no examples are shown.
fn counted(label: &str, ids: &[String], example_ids: usize) -> String {
    let shown: Vec<&str> = ids.iter().take(example_ids).map(String::as_str).collect();
    if shown.is_empty() {
        return format!("{} {}", label, ids.len());
    }
    let more = if ids.len() > shown.len() { ", …" } else { "" };
    format!("{} {} ({}{})", label, ids.len(), shown.join(", "), more)
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => eprintln!("{}", message.content.dimmed()),
            MessageLevel::Success => eprintln!("{}", message.content.green()),
            MessageLevel::Warning => eprintln!("{}", message.content.yellow()),
        }
    }
}
