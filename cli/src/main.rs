use crate::cli::{Args, Command};
use anyhow::{bail, Context};
use askql::compiler::{QueryOptions, SortDirection, SparqlQuery};
use askql::model::AskParser;
use askql::store::{SparqlStore, StoreConfig};
use clap::Parser;
use oxrdfio::{RdfFormat, RdfParser};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{self, stdin, stdout, BufReader, Read, Write};
use std::path::Path;
use tracing::{info, Level};

mod cli;

pub fn main() -> anyhow::Result<()> {
    let matches = Args::parse();
    init_logging(matches.verbose);
    match matches.command {
        Command::Compile {
            query,
            facts,
            format,
            base,
            config,
            sort,
            order,
            limit,
            offset,
            count,
        } => {
            let config = load_config(config.as_deref(), &sort, &order)?;
            let store = SparqlStore::new(config).context("Invalid store configuration")?;
            for path in &facts {
                load_facts(&store, path, format.as_deref(), base.as_deref())?;
            }

            let query = read_query(query)?;
            let options = QueryOptions::default()
                .with_limit(limit)
                .with_offset(offset)
                .with_count(count);
            let compiled = store.query(&query, &options)?;

            let mut stdout = stdout().lock();
            match compiled.query {
                SparqlQuery::Empty => info!("The query has no results"),
                SparqlQuery::Constant(name) => writeln!(stdout, "{name}")?,
                SparqlQuery::Ask(text) | SparqlQuery::Select(text) => write!(stdout, "{text}")?,
            }
            stdout.flush()?;
            Ok(())
        }
        Command::Parse { query } => {
            let query = read_query(query)?;
            let description = AskParser::default().parse(&query)?;
            let mut stdout = stdout().lock();
            writeln!(stdout, "{description}")?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn load_config(
    path: Option<&Path>,
    sort: &[String],
    order: &[SortDirection],
) -> anyhow::Result<StoreConfig> {
    let mut config = if let Some(path) = path {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read the configuration {}", path.display()))?;
        StoreConfig::from_json(&json)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?
    } else {
        StoreConfig::default()
    };
    if order.len() > sort.len() {
        bail!("Every --order must follow a --sort");
    }
    for (position, key) in sort.iter().enumerate() {
        let direction = order.get(position).copied().unwrap_or_default();
        config.compiler = config.compiler.with_sort_key(key, direction);
    }
    Ok(config)
}

fn load_facts(
    store: &SparqlStore,
    path: &Path,
    format: Option<&str>,
    base: Option<&str>,
) -> anyhow::Result<()> {
    let format = if let Some(format) = format {
        rdf_format_from_name(format)?
    } else {
        rdf_format_from_path(path)?
    };
    let mut parser = RdfParser::from_format(format);
    if let Some(base) = base {
        parser = parser
            .with_base_iri(base)
            .with_context(|| format!("Invalid base IRI {base}"))?;
    }
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let added = store
        .load_from_reader(parser, BufReader::new(file))
        .with_context(|| format!("Failed to load the facts of {}", path.display()))?;
    info!(path = %path.display(), added, "Loaded fact file");
    Ok(())
}

fn read_query(query: Option<String>) -> anyhow::Result<String> {
    let query = if let Some(query) = query {
        query
    } else {
        let mut query = String::new();
        stdin()
            .lock()
            .read_to_string(&mut query)
            .context("Failed to read the query from stdin")?;
        query
    };
    if query.trim().is_empty() {
        bail!("The query is empty");
    }
    Ok(query)
}

fn format_from_path<T>(
    path: &Path,
    from_extension: impl FnOnce(&str) -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    if let Some(ext) = path.extension().and_then(OsStr::to_str) {
        from_extension(ext).map_err(|e| {
            e.context(format!(
                "Not able to guess the file format from file name extension '{ext}'"
            ))
        })
    } else {
        bail!(
            "The path {} has no extension to guess a file format from",
            path.display()
        )
    }
}

fn rdf_format_from_path(path: &Path) -> anyhow::Result<RdfFormat> {
    format_from_path(path, |ext| {
        RdfFormat::from_extension(ext)
            .with_context(|| format!("The file extension '{ext}' is unknown"))
    })
}

fn rdf_format_from_name(name: &str) -> anyhow::Result<RdfFormat> {
    if let Some(t) = RdfFormat::from_extension(name) {
        return Ok(t);
    }
    if let Some(t) = RdfFormat::from_media_type(name) {
        return Ok(t);
    }
    bail!("The file format '{name}' is unknown")
}
