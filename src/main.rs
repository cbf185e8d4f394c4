//! Component Template CLI
//!
//! Renders table data through the HTML table component set.
//!
//! Usage:
//!   component-template [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --config <FILE>  Template configuration (TOML format)
//!       --class <CLASS>  CSS class of the rendered table
//!       --headless       Render without the header block
//!   -u, --uppercase      Uppercase every body cell
//!       --strict         Fail on missing components
//!   -d, --debug          Log component dispatch to stderr
//!   -h, --help           Print help

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use component_template::html::table::{table_renderer, DEFAULT_TABLE_CLASS};
use component_template::html::{
    headless_table_template, render_table, table_template, uppercase_values, Table,
};
use component_template::{TemplateConfig, DEFAULT_TOP_LEVEL};

#[derive(Parser)]
#[command(name = "component-template")]
#[command(about = "Render tables through overridable HTML components")]
struct Cli {
    /// Table data file with `cols` and `rows` (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Template configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CSS class of the rendered table
    #[arg(long)]
    class: Option<String>,

    /// Render without the header block
    #[arg(long)]
    headless: bool,

    /// Uppercase every body cell
    #[arg(short, long)]
    uppercase: bool,

    /// Fail on missing components instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Log component dispatch to stderr
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug { "trace" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(io::stderr)
        .init();

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let config = cli.config.as_ref().map(|path| match TemplateConfig::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    });

    // Read input
    let source = match &cli.input {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let table = match Table::from_str(&source) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // --class wins over the config file
    let class = cli
        .class
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.class.clone()));

    let template = if cli.headless {
        headless_table_template()
    } else {
        table_template(class.as_deref().unwrap_or(DEFAULT_TABLE_CLASS))
    };
    let mut template = match template {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if cli.headless {
        if let Some(class) = &class {
            // headless keeps its own class unless one is given
            if let Err(e) = template.set_fn("table", table_renderer(class)) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }

    if let Some(config) = &config {
        template.set_strict(config.strict);
        if template.exists(&config.top_level) {
            template.set_top_level_name(config.top_level.clone());
        } else if config.top_level != DEFAULT_TOP_LEVEL {
            warn!(
                top_level = %config.top_level,
                "configured top-level component does not exist, keeping '{}'",
                template.top_level_name()
            );
        }
    }
    if cli.strict {
        template.set_strict(true);
    }

    if cli.uppercase {
        if let Some(td) = template.get_mut("td") {
            td.add_filter(uppercase_values);
        }
    }

    debug!(
        top_level = template.top_level_name(),
        strict = template.is_strict(),
        components = template.len(),
        "rendering table"
    );

    match render_table(&template, table) {
        Ok(html) => {
            println!("{}", html);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_intro() {
    println!(
        r#"Component Template - render tables through overridable HTML components

USAGE:
    component-template [OPTIONS] [FILE]
    cat table.toml | component-template

OPTIONS:
    -c, --config       Template configuration (TOML file)
    --class            CSS class of the rendered table
    --headless         Render without the header block
    -u, --uppercase    Uppercase every body cell
    --strict           Fail on missing components
    -d, --debug        Log component dispatch to stderr
    -h, --help         Print help

INPUT:
    cols = ["Name", "Qty"]
    rows = [["apple", "3"], ["pear", "5"]]"#
    );
}
