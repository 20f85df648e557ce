//! CLI entry point for treecat

use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use treecat::{
    CompositeFilter, FilterConfig, Formatter, OutputConfig, OutputFormat, Scanner,
    TextNormalizer, build, print_json,
};

#[derive(Parser, Debug)]
#[command(name = "treecat")]
#[command(about = "Combine a directory's files into one document with a tree header, for LLM context")]
#[command(version)]
struct Args {
    /// Directory to combine
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Exclude paths matching glob patterns (comma-separated, can be used multiple times)
    #[arg(short = 'e', long = "exclude", value_delimiter = ',')]
    exclude: Vec<String>,

    /// Only include files matching glob patterns (comma-separated, can be used multiple times)
    #[arg(short = 'i', long = "include", value_delimiter = ',')]
    include: Vec<String>,

    /// Do not apply the root .gitignore
    #[arg(long = "no-gitignore")]
    no_gitignore: bool,

    /// Decode every file from this encoding (e.g. shift_jis, euc-jp, windows-1252)
    #[arg(long = "encoding", value_name = "NAME")]
    encoding: Option<String>,

    /// Per-extension encodings, overriding --encoding (e.g. txt:shift_jis,log:euc-jp)
    #[arg(long = "encoding-map", value_name = "MAP")]
    encoding_map: Option<String>,

    /// Output a JSON document instead of text
    #[arg(long = "json")]
    json: bool,

    /// Log progress to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

fn run(args: Args) -> treecat::Result<()> {
    let filter_config = FilterConfig {
        use_gitignore: !args.no_gitignore,
        include_patterns: args.include,
        exclude_patterns: args.exclude,
    };
    let output_config = OutputConfig {
        format: if args.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        },
        encoding: args.encoding,
        encoding_map: args.encoding_map,
    };

    // Bad encoding options are reported before any scanning happens.
    let transform = TextNormalizer::from_config(&output_config)?;

    let scanner = Scanner::new(&args.path)?;
    let filter = CompositeFilter::from_config(scanner.root(), &filter_config)?;
    let entries = scanner.with_filter(filter).scan()?;
    let tree = build(&entries);
    log::info!(
        "{} entries, {} files",
        entries.len(),
        entries.iter().filter(|e| !e.is_dir()).count()
    );

    let mut writer = BufWriter::new(io::stdout().lock());
    match output_config.format {
        OutputFormat::Text => Formatter::new(writer)
            .with_transform(transform)
            .format(&tree, &entries),
        OutputFormat::Json => print_json(&mut writer, &tree, &entries, &transform),
    }
}

fn main() {
    let args = Args::parse();
    setup_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("treecat: {}", e);
        process::exit(1);
    }
}
