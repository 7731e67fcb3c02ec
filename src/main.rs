use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

mod collection_processor;
mod compare;
mod config;
mod error;
mod generators;
mod output;
mod parsers;

use collection_processor::collection_version;
use config::{load_config, merge_with_cli_args, CliOverrides};
use generators::{generate_text, RenderOptions, Template, DEFAULT_TEMPLATE};
use output::{create_unique_file_name, read_input, resolve_destination, Destination, STD_STREAM};
use parsers::{parse_collection, parse_status_ranges};

const JSON_HELP: &str =
    "You can get a JSON file from Postman by exporting a collection as a v2.1.0 collection";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, after_help = JSON_HELP)]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Postman collection exported as v2.1.0 JSON, or `-` to read stdin
    json_file: Option<PathBuf>,

    /// Output file, or `-` for stdout (default: named after the collection)
    output: Option<PathBuf>,

    #[command(flatten)]
    filter: FilterArgs,

    /// Custom Tera template to render with
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Save the default template into a new file and exit
    #[arg(short, long)]
    get_template: bool,

    /// Overwrite the output file if it already exists
    #[arg(short, long)]
    replace: bool,

    /// Path to config file (overrides default location)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(ClapArgs, Debug, Default)]
struct FilterArgs {
    /// Include only the sample responses with status codes in the given range(s),
    /// e.g. "200-299" or "200-299,400-499"
    #[arg(short, long)]
    statuses: Option<String>,

    /// Include the names of sample responses in the output
    #[arg(short = 'n', long)]
    show_response_names: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Test a custom template against the output you expect from it
    Test {
        /// Postman collection exported as v2.1.0 JSON
        json_file: PathBuf,

        /// Tera template to test
        template: PathBuf,

        /// File holding the expected output
        expected: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    match args.command {
        Some(Command::Test {
            json_file,
            template,
            expected,
            filter,
        }) => run_test(&json_file, &template, &expected, filter),
        None => run_convert(args),
    }
}

fn run_convert(args: Args) -> Result<()> {
    validate_args(&args)?;

    if args.get_template {
        let file_name = create_unique_file_name("default", ".md.tera")?;
        fs::write(&file_name, DEFAULT_TEMPLATE)
            .with_context(|| format!("Failed to write template: {:?}", file_name))?;
        eprintln!("Created {}", file_name);
        return Ok(());
    }

    let config = load_config(args.config.as_deref())?;
    let config = merge_with_cli_args(
        config,
        CliOverrides {
            statuses: args.filter.statuses,
            show_response_names: args.filter.show_response_names,
            template: args.template,
            output: args.output,
            replace: args.replace,
        },
    );
    if let Some(template) = &config.template {
        ensure_template_path(template)?;
    }

    let options = RenderOptions {
        status_ranges: parse_status_ranges(config.statuses.as_deref().unwrap_or_default())?,
        show_response_names: config.show_response_names,
    };

    let json_file = args
        .json_file
        .ok_or_else(|| anyhow::anyhow!("No collection given. {}", JSON_HELP))?;
    let collection = parse_collection(&read_input(&json_file)?)
        .with_context(|| format!("Failed to parse collection: {:?}", json_file))?;
    let template = Template::load(config.template.as_deref())?;

    let document_name = match collection_version(&collection) {
        Some(version) => format!("{} {}", collection.info.name, version),
        None => collection.info.name.clone(),
    };
    let destination = resolve_destination(config.output.as_deref(), &document_name, config.replace)?;
    log::info!("Rendering {:?} into {}", json_file, destination.name());

    let content = generate_text(collection, template, &options)?;
    destination.write(&content)?;

    if destination != Destination::Stdout {
        eprintln!("Created {}", destination.name());
    }

    Ok(())
}

fn run_test(json_file: &Path, template: &Path, expected: &Path, filter: FilterArgs) -> Result<()> {
    ensure_json_path(json_file)?;
    ensure_template_path(template)?;

    let options = RenderOptions {
        status_ranges: parse_status_ranges(filter.statuses.as_deref().unwrap_or_default())?,
        show_response_names: filter.show_response_names,
    };

    let collection = parse_collection(&read_input(json_file)?)
        .with_context(|| format!("Failed to parse collection: {:?}", json_file))?;
    let actual = generate_text(collection, Template::load(Some(template))?, &options)?;
    let wanted = fs::read_to_string(expected)
        .with_context(|| format!("Failed to read expected output: {:?}", expected))?;

    compare::assert_no_diff(&actual, &wanted)?;
    eprintln!("Perfect match!");

    Ok(())
}

/// Checks clap cannot express: file suffixes and the optional collection
fn validate_args(args: &Args) -> Result<()> {
    if args.get_template {
        return Ok(());
    }

    let json_file = args
        .json_file
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("Missing the collection JSON file. {}", JSON_HELP))?;
    ensure_json_path(json_file)?;

    if let Some(template) = &args.template {
        ensure_template_path(template)?;
    }

    Ok(())
}

fn ensure_json_path(path: &Path) -> Result<()> {
    if path.as_os_str() == STD_STREAM || has_extension(path, "json") {
        return Ok(());
    }
    anyhow::bail!("{:?} does not end with .json", path)
}

fn ensure_template_path(path: &Path) -> Result<()> {
    if has_extension(path, "tera") {
        return Ok(());
    }
    anyhow::bail!("{:?} must end with .tera", path)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}
