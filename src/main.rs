// ABOUTME: Entry point for the kegd CLI application.
// ABOUTME: Parses arguments and dispatches to the validate and syntax commands.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use kegd::config::{KegdProperties, TemplatingSyntax};
use kegd::error::Result;
use kegd::output::Output;
use kegd::strategy::DeploymentStrategy;
use std::env;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let output = Output::new(cli.output);
    if let Err(e) = run(cli.command, &output) {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(command: Commands, output: &Output) -> Result<()> {
    match command {
        Commands::Validate { file } => validate(&file, output),
        Commands::Syntax { config } => {
            let properties = match config {
                Some(path) => KegdProperties::load(&path)?,
                None => KegdProperties::discover_or_default(&env::current_dir()?)?,
            };
            syntax(&properties, output)
        }
    }
}

/// Parse a strategy file and report what it contains.
fn validate(file: &Path, output: &Output) -> Result<()> {
    let strategy = DeploymentStrategy::load(file)?;

    for script in &strategy {
        let reversible = if script.is_reversible() {
            "reversible"
        } else {
            "not reversible"
        };
        output.detail(&format!(
            "  {}: {} task(s), {}",
            script.name(),
            script.deploy().len(),
            reversible
        ));
        for task in script.deploy() {
            output.detail(&format!("    - {task}"));
        }
    }

    output.success(
        &format!(
            "{} is valid: {} compose script(s)",
            file.display(),
            strategy.len()
        ),
        &strategy,
    )?;
    Ok(())
}

fn syntax(properties: &KegdProperties, output: &Output) -> Result<()> {
    let profiles = [
        ("strategy", &properties.strategy.templating.syntax),
        ("element", &properties.element.templating.syntax),
    ];
    for (profile, syntax) in profiles {
        output.detail(&format!("{profile}:"));
        print_delimiters(syntax, output);
    }
    output.success("templating syntax loaded", properties)?;
    Ok(())
}

fn print_delimiters(syntax: &TemplatingSyntax, output: &Output) {
    for (key, delimiter) in syntax.delimiters() {
        output.detail(&format!("  {key}: {delimiter}"));
    }
}
