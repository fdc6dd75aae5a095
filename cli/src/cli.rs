use askql::compiler::SortDirection;
use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about, version, name = "askql")]
/// Compiles semantic-wiki ask queries into SPARQL
pub struct Args {
    /// Print more log messages to stderr (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compile an ask query into SPARQL and print the query text
    ///
    /// Queries without results print nothing. Queries with a single known result print the name
    /// of that result.
    Compile {
        /// The ask query, e.g. "[[Category:City]] [[Located in::Germany]]"
        ///
        /// If no query is given, stdin is read.
        query: Option<String>,
        /// Files with the facts of the wiki (redirects, hierarchies, concepts and property types)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        facts: Vec<PathBuf>,
        /// The format of the fact files
        ///
        /// It can be an extension like "ttl" or a MIME type like "text/turtle".
        ///
        /// By default the format is guessed from each file extension.
        #[arg(long)]
        format: Option<String>,
        /// Base IRI of the fact files
        #[arg(long, value_hint = ValueHint::Url)]
        base: Option<String>,
        /// JSON configuration of the store and the compiler
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        config: Option<PathBuf>,
        /// Property to sort the results by; an empty value sorts by the result page
        ///
        /// Can be given several times, the first key takes precedence.
        #[arg(long)]
        sort: Vec<String>,
        /// Direction of the sort key at the same position (ASC or DESC, default ASC)
        #[arg(long)]
        order: Vec<SortDirection>,
        /// Maximal number of results
        #[arg(long)]
        limit: Option<usize>,
        /// Number of results to skip
        #[arg(long, default_value_t = 0)]
        offset: usize,
        /// Count the results instead of listing them
        #[arg(long)]
        count: bool,
    },
    /// Parse an ask query and print it in its canonical form
    Parse {
        /// The ask query
        ///
        /// If no query is given, stdin is read.
        query: Option<String>,
    },
}
