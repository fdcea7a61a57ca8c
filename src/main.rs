//! mdsection: list, read and rewrite markdown sections from the command line.
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use mdsection::config::Config;
use mdsection::edit_plan::UpdateMode;
use mdsection::engine::{Engine, Request, Response};
use mdsection::{input, output, SectionError};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mdsection")]
#[command(about = "Resolve, read and rewrite markdown sections", long_about = None)]
struct Args {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Maximum number of headers suggested for unresolved identifiers
    #[arg(long, global = true, value_name = "N")]
    max_suggestions: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show every section as an indented tree
    List {
        /// Markdown file to inspect
        file: PathBuf,
    },
    /// Print the content of one section
    Get {
        /// Markdown file to inspect
        file: PathBuf,
        /// Header text, title or hierarchical path of the section
        identifier: String,
    },
    /// Replace, append to or prepend to one section and write the file back
    Update {
        /// Markdown file to edit
        file: PathBuf,
        /// Header text, title or hierarchical path of the section
        identifier: String,
        /// How the new content is combined with the existing body
        #[arg(long, short = 'm', value_name = "replace|append|prepend")]
        mode: UpdateMode,
        /// New content (read from stdin when neither this nor --content-file is given)
        #[arg(long, short = 'c', conflicts_with = "content_file")]
        content: Option<String>,
        /// File holding the new content
        #[arg(long, value_name = "PATH")]
        content_file: Option<PathBuf>,
        /// Print the updated document instead of writing it
        #[arg(long)]
        dry_run: bool,
    },
    /// Run a raw JSON request ({"op": ..., "identifier": ..., ...}) against a file
    Request {
        /// Markdown file to operate on
        file: PathBuf,
        /// Request object as JSON
        request: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut cfg = Config::load();

    // Override config with command line args
    if args.json {
        cfg.output = "json".to_string();
    }
    if let Some(limit) = args.max_suggestions {
        cfg.max_suggestions = limit;
    }

    match run(args.command, &cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let payload = e.payload();
            if cfg.wants_json() {
                if let Ok(json) = serde_json::to_string_pretty(&payload) {
                    println!("{json}");
                }
            } else {
                eprint!("{}", output::render_error(&payload));
            }
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, cfg: &Config) -> mdsection::Result<()> {
    let engine = Engine::new(cfg.max_suggestions);

    match command {
        Command::List { file } => {
            let document = input::read_document(&file)?;
            if cfg.wants_json() {
                print_json(&engine.list(&document)?)?;
            } else {
                print!("{}", output::render_tree(&input::parse_document(&document)?));
            }
        }
        Command::Get { file, identifier } => {
            let document = input::read_document(&file)?;
            let view = engine.get(&document, &identifier)?;
            if cfg.wants_json() {
                print_json(&view)?;
            } else {
                print!("{}", output::render_view(&view));
            }
        }
        Command::Update {
            file,
            identifier,
            mode,
            content,
            content_file,
            dry_run,
        } => {
            let content = read_content(content, content_file.as_deref())?;
            let document = input::read_document(&file)?;
            let outcome = engine.update(&document, &identifier, mode, &content)?;

            if dry_run {
                print!("{}", outcome.document);
                return Ok(());
            }

            fs::write(&file, &outcome.document)?;
            tracing::info!(file = %file.display(), "section updated");
            if cfg.wants_json() {
                print_json(&outcome.summary)?;
            } else {
                print!("{}", output::render_update(&outcome.summary));
            }
        }
        Command::Request { file, request } => {
            let request: Request = serde_json::from_str(&request)?;
            let document = input::read_document(&file)?;
            let response = engine.execute(&document, &request)?;
            if let Response::Update { outcome } = &response {
                fs::write(&file, &outcome.document)?;
            }
            print_json(&response)?;
        }
    }

    Ok(())
}

fn read_content(inline: Option<String>, path: Option<&Path>) -> mdsection::Result<String> {
    if let Some(content) = inline {
        return Ok(content);
    }
    if let Some(path) = path {
        return Ok(fs::read_to_string(path)?);
    }

    let mut content = String::new();
    io::stdin().read_to_string(&mut content)?;
    if content.is_empty() {
        return Err(SectionError::Validation(
            "'content' is required for update (use --content, --content-file or stdin)"
                .to_string(),
        ));
    }
    Ok(content)
}

fn print_json(value: &impl Serialize) -> mdsection::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
