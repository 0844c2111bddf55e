use super::script::{parse_script, run_script};
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use element_editor::{Document, EditSession, EditorConfig, HeadlessHost, PageNode};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Html,
    Json,
}

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Page snapshot (JSON array of nodes)
    pub page: PathBuf,

    /// Script of user events (JSON array of steps)
    pub script: PathBuf,

    /// Config file (defaults to element-editor.config.json in the current directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Format of the resulting page
    #[arg(short, long, value_enum, default_value = "html")]
    pub format: OutputFormat,

    /// Write the resulting page here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Final state of a replayed session
#[derive(Debug)]
pub struct ReplayReport {
    pub page: String,
    pub changes: usize,
    pub steps: usize,
}

pub fn replay(args: ReplayArgs, cwd: &str) -> Result<()> {
    let config = match &args.config {
        Some(path) => EditorConfig::from_path(path)
            .with_context(|| format!("Cannot read config {}", path.display()))?,
        None => EditorConfig::load(cwd)?,
    };

    let page = fs::read_to_string(&args.page)
        .with_context(|| format!("Cannot read page {}", args.page.display()))?;
    let script = fs::read_to_string(&args.script)
        .with_context(|| format!("Cannot read script {}", args.script.display()))?;

    println!("{}", "▶️  Replaying session...".bright_blue().bold());

    let report = run(&page, &script, config, args.format)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &report.page)?;
            println!("  {} Wrote {}", "✓".green(), path.display());
        }
        None => {
            println!();
            println!("{}", report.page);
        }
    }

    println!();
    println!(
        "{} Replayed {} steps, {} changes in history",
        "✅".green(),
        report.steps,
        report.changes
    );

    Ok(())
}

/// Replay `script_json` against `page_json`
///
/// The session is closed at the end so the exported page never contains
/// the toolbar; the change count is taken before closing.
pub fn run(
    page_json: &str,
    script_json: &str,
    config: EditorConfig,
    format: OutputFormat,
) -> Result<ReplayReport> {
    let nodes: Vec<PageNode> = serde_json::from_str(page_json).context("Invalid page")?;
    let steps = parse_script(script_json)?;

    let mut session = EditSession::with_config(HeadlessHost::new(Document::from_page(&nodes)), config);
    let outcomes = run_script(&mut session, &steps)?;

    for (index, outcome) in outcomes.iter().enumerate() {
        let marker = if outcome.consumed { "●".cyan() } else { "○".dimmed() };
        println!("  {} {:>3}. {}", marker, index + 1, outcome.step);
        for message in &outcome.messages {
            println!("        {} {}", "→".green(), message);
        }
    }

    session.finish_inline_edit();
    let changes = session.log().len();

    let host = session.into_host();
    let document = host.document();
    let page = match format {
        OutputFormat::Html => document.to_html(),
        OutputFormat::Json => serde_json::to_string_pretty(&document.to_page())?,
    };

    Ok(ReplayReport {
        page,
        changes,
        steps: outcomes.len(),
    })
}
