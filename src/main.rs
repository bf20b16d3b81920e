//! Snipsheet - formula sheets over document highlights

mod config;

use anyhow::{Context, Result, bail};
use snipsheet_core::storage::{load_document, load_sheets, load_snippets, write_csv, write_markdown};
use snipsheet_core::{
    Document, SheetSession, SheetStore, Snippet, SortDirection, SortSpec, Value,
};
use snipsheet_engine::engine::{FormulaEngine, format_value};
use std::env;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt};

fn print_usage() {
    eprintln!("Usage: snipsheet [OPTIONS] [DOCUMENT]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [DOCUMENT]                Text document the snippets point into");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --snippets <FILE>     Snippets JSON (default: <DOCUMENT>.snippets.json)");
    eprintln!("  --sheets <FILE>           Sheet config TOML (default: config dir sheets.toml)");
    eprintln!("  -n, --sheet <NAME>        Sheet to render (default: first)");
    eprintln!("  --sort <COLUMN>           Sort rows by column");
    eprintln!("  --desc                    Sort descending");
    eprintln!("  -o, --output <FILE>       Export to .csv or markdown (non-interactive)");
    eprintln!("  -c, --command <FORMULA>   Evaluate a formula and print the result");
    eprintln!("  -h, --help                Print help");
}

#[derive(Debug, Default)]
struct Options {
    document: Option<PathBuf>,
    snippets: Option<PathBuf>,
    sheets: Option<PathBuf>,
    sheet: Option<String>,
    sort: Option<String>,
    descending: bool,
    output: Option<PathBuf>,
    command: Option<String>,
}

fn required_value(args: &[String], i: usize, what: &str) -> String {
    match args.get(i) {
        Some(value) => value.clone(),
        None => {
            eprintln!("Error: {} requires a value", what);
            std::process::exit(1);
        }
    }
}

fn parse_args(args: &[String]) -> Options {
    let mut opts = Options::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                std::process::exit(0);
            }
            "-s" | "--snippets" => {
                i += 1;
                opts.snippets = Some(PathBuf::from(required_value(args, i, "--snippets")));
            }
            "--sheets" => {
                i += 1;
                opts.sheets = Some(PathBuf::from(required_value(args, i, "--sheets")));
            }
            "-n" | "--sheet" => {
                i += 1;
                opts.sheet = Some(required_value(args, i, "--sheet"));
            }
            "--sort" => {
                i += 1;
                opts.sort = Some(required_value(args, i, "--sort"));
            }
            "--desc" => opts.descending = true,
            "-o" | "--output" => {
                i += 1;
                opts.output = Some(PathBuf::from(required_value(args, i, "--output")));
            }
            "-c" | "--command" => {
                i += 1;
                opts.command = Some(required_value(args, i, "--command"));
            }
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                print_usage();
                std::process::exit(1);
            }
            _ => {
                if opts.document.is_none() {
                    opts.document = Some(PathBuf::from(&args[i]));
                } else {
                    eprintln!("Error: Unexpected argument: {}", args[i]);
                    print_usage();
                    std::process::exit(1);
                }
            }
        }
        i += 1;
    }
    opts
}

/// Load a document and its snippets.
fn load_inputs(document: &Path, snippets: Option<&Path>) -> Result<(Document, Vec<Snippet>)> {
    let doc = load_document(document)
        .with_context(|| format!("failed to read document {}", document.display()))?;
    let snippets_path = match snippets {
        Some(path) => path.to_path_buf(),
        None => config::default_snippets_path(document),
    };
    let snippets = load_snippets(&snippets_path)
        .with_context(|| format!("failed to read snippets {}", snippets_path.display()))?;
    Ok((doc, snippets))
}

fn run_command(opts: &Options, formula: &str) -> Result<()> {
    let (document, snippets) = match &opts.document {
        Some(path) => load_inputs(path, opts.snippets.as_deref())?,
        None => (Document::new(""), Vec::new()),
    };
    let engine = FormulaEngine::new(&document, &snippets);
    match engine.try_evaluate(formula)? {
        Value::Unit => {}
        Value::List(items) => {
            for item in &items {
                println!("{}", format_value(item));
            }
        }
        value => println!("{}", format_value(&value)),
    }
    Ok(())
}

fn load_store(path: Option<&Path>) -> Result<SheetStore> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => config::default_sheets_path()
            .context("could not determine the config directory; pass --sheets")?,
    };
    load_sheets(&path).with_context(|| format!("failed to load sheets {}", path.display()))
}

fn run_sheet(opts: &Options) -> Result<()> {
    let Some(document_path) = &opts.document else {
        print_usage();
        bail!("no document given");
    };
    let (document, snippets) = load_inputs(document_path, opts.snippets.as_deref())?;
    let store = load_store(opts.sheets.as_deref())?;

    let mut session = SheetSession::new();
    if let Some(column) = &opts.sort {
        let direction = if opts.descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        session.sort = Some(SortSpec::new(column.as_str(), direction));
    }

    let name = match &opts.sheet {
        Some(name) => name.clone(),
        None => match store.first() {
            Some(sheet) => sheet.name.clone(),
            None => {
                tracing::warn!("sheet config has no sheets");
                return Ok(());
            }
        },
    };
    let Some(view) = store.view(&name, &document, &snippets, &session) else {
        tracing::debug!(sheet = %name, "no such sheet, nothing to render");
        return Ok(());
    };

    match &opts.output {
        Some(output) => {
            let is_csv = output
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            if is_csv {
                write_csv(output, &view)?;
            } else {
                write_markdown(output, &view)?;
            }
            println!("Exported to {}", output.display());
        }
        None => print!("{}", view.render_table()),
    }
    Ok(())
}

fn run(opts: &Options) -> Result<()> {
    match &opts.command {
        Some(formula) => run_command(opts, formula),
        None => run_sheet(opts),
    }
}

fn main() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let opts = parse_args(&args);

    if let Err(e) = run(&opts) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
