use anyhow::Result;
use clap::Args;
use colored::Colorize;
use element_editor::{EditorConfig, DEFAULT_CONFIG_NAME};
use std::fs;
use std::path::{Path, PathBuf};

const EXAMPLE_PAGE: &str = r#"[
  {
    "type": "Element",
    "tag": "h1",
    "attributes": { "id": "title" },
    "children": [{ "type": "Text", "content": "Welcome" }]
  },
  {
    "type": "Element",
    "tag": "p",
    "attributes": { "id": "intro" },
    "children": [{ "type": "Text", "content": "Click things to change them." }]
  },
  {
    "type": "Element",
    "tag": "img",
    "attributes": { "id": "hero", "src": "hero.png" },
    "children": []
  }
]
"#;

const EXAMPLE_SCRIPT: &str = r#"[
  { "action": "toggle" },
  { "action": "selectMode", "mode": "edit" },
  { "action": "click", "target": "title" },
  { "action": "type", "text": "Hello" },
  { "action": "key", "key": "Enter" },
  { "action": "click", "target": "hero", "prompt": "new-hero.png" },
  { "action": "selectMode", "mode": "remove" },
  { "action": "click", "target": "intro" },
  { "action": "undo" }
]
"#;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Skip writing page.json and script.json
    #[arg(long)]
    pub no_example: bool,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing element editor...".bright_blue().bold());

    EditorConfig::default().save(&config_path)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    if !args.no_example {
        write_if_missing(&PathBuf::from(cwd).join("page.json"), EXAMPLE_PAGE)?;
        write_if_missing(&PathBuf::from(cwd).join("script.json"), EXAMPLE_SCRIPT)?;
    }

    println!();
    println!("{}", "✅ Ready!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit page.json and script.json");
    println!("  2. Run: element-editor replay page.json script.json");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    fs::write(path, content)?;
    if let Some(name) = path.file_name() {
        println!("  {} Created {}", "✓".green(), name.to_string_lossy());
    }
    Ok(())
}
