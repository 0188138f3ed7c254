use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use serde_json::Value;

mod cli;

use cli::Cli;
use cli::commands::{Commands, args_to_json};
use mcp_this::Registry;
use mcp_this::config::{CatalogLocator, ValidationMode};
use mcp_this::tools::BuildFailure;

fn setup_logging(verbose: bool) {
    // stdout carries tool output, so logs go to stderr
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();
}

fn build_registry(cli: &Cli) -> Result<(Registry, Vec<BuildFailure>)> {
    let mut locator = CatalogLocator::new();
    if let Some(path) = &cli.config {
        locator = locator.with_path(path);
    }
    if let Some(value) = &cli.config_value {
        locator = locator.with_inline(value);
    }

    let mode = if cli.top_level_only {
        ValidationMode::TopLevelOnly
    } else {
        ValidationMode::Full
    };

    let catalog = locator.load().context("Failed to load catalog")?;
    let built = Registry::from_catalog(&catalog, mode).context("Invalid catalog")?;
    Ok(built)
}

async fn run_application(cli: &Cli) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        eprintln!("{}", "Verbose mode enabled".yellow());
    }

    let (registry, failures) = build_registry(cli)?;

    match &cli.command {
        Commands::Check => handle_check_command(&registry, &failures),
        Commands::List { detailed } => handle_list_command(&registry, *detailed),
        Commands::Call { tool, args } => handle_call_command(&registry, tool, &args_to_json(args)).await,
        Commands::Prompt { name, args } => handle_prompt_command(&registry, name, &args_to_json(args)),
    }
}

fn handle_check_command(registry: &Registry, failures: &[BuildFailure]) -> Result<()> {
    println!(
        "{} {} tool(s), {} prompt(s)",
        "Catalog OK:".green(),
        registry.tool_count(),
        registry.prompt_count()
    );
    if !failures.is_empty() {
        println!("{} {} tool(s) skipped", "Warning:".yellow(), failures.len());
        for failure in failures {
            println!("  {}", failure);
        }
    }
    Ok(())
}

fn signature_line(schema: &Value) -> String {
    let required: Vec<&str> = schema["required"]
        .as_array()
        .map(|r| r.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    schema["properties"]
        .as_object()
        .map(|props| {
            props
                .keys()
                .map(|name| {
                    if required.contains(&name.as_str()) {
                        name.clone()
                    } else {
                        format!("[{}]", name)
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default()
}

fn handle_list_command(registry: &Registry, detailed: bool) -> Result<()> {
    println!("{}", "Tools:".cyan());
    for tool in registry.list_tools() {
        println!("  {} {}", tool.name().green(), signature_line(&tool.input_schema()));
        if detailed {
            for line in tool.description().lines() {
                println!("      {}", line);
            }
        }
    }

    println!("{}", "Prompts:".cyan());
    for prompt in registry.list_prompts() {
        let args: Vec<String> = prompt
            .arguments()
            .map(|(name, arg)| if arg.required { name.to_string() } else { format!("[{}]", name) })
            .collect();
        println!("  {} {}", prompt.name().green(), args.join(" "));
        if detailed && !prompt.description().is_empty() {
            println!("      {}", prompt.description());
        }
    }
    Ok(())
}

async fn handle_call_command(registry: &Registry, tool: &str, args: &Value) -> Result<()> {
    info!("Calling tool '{}'", tool);
    let output = registry
        .call_tool(tool, args.clone())
        .await
        .with_context(|| format!("Failed to call tool '{}'", tool))?;
    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn handle_prompt_command(registry: &Registry, name: &str, args: &Value) -> Result<()> {
    info!("Rendering prompt '{}'", name);
    let text = registry
        .get_prompt(name, args)
        .with_context(|| format!("Failed to render prompt '{}'", name))?;
    println!("{}", text);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    setup_logging(cli.is_verbose());

    run_application(&cli).await.context("Application failed")?;

    Ok(())
}
