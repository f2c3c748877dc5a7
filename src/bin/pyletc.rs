//! Driver for the Pylet front end. Reads a source file, runs it through the
//! preprocessor, lexer and parser, and optionally dumps the intermediate
//! artifacts for debugging and golden tests.

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::error;

use pylet::source::SourceFile;
use pylet::{lex, parse, preprocess};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// The path to the Pylet source file.
    file: PathBuf,

    /// Dump the token stream after lexing.
    #[arg(long)]
    dump_tokens: bool,

    /// Dump the syntax tree after parsing.
    #[arg(long)]
    dump_ast: bool,

    /// Emit dumps as JSON instead of plain text.
    #[arg(long)]
    json: bool,

    /// Specify the log level of the front end.
    #[arg(value_enum, short, long, default_value_t = LogLevel::default())]
    verbosity: LogLevel,
}

/// Enum for specifying the log level of the driver.
#[derive(ValueEnum, Clone, Default, Debug)]
enum LogLevel {
    /// Only critical errors will be logged.
    #[default]
    #[value(alias("0"))]
    Error,

    /// Also log warnings.
    #[value(alias("1"))]
    Warn,

    /// Log information about the general progress of the front end.
    #[value(alias("2"))]
    Info,

    /// Log everything which happens internally.
    #[value(alias("3"))]
    Debug,

    /// Log extra information.
    #[value(alias("4"))]
    Trace,
}

impl From<&LogLevel> for log::Level {
    fn from(value: &LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();

    simple_logger::init_with_level((&args.verbosity).into()).unwrap();

    let source = SourceFile::from_file(&args.file)?;
    let source = preprocess(&source);

    let tokens = match lex(&source) {
        Ok(tokens) => tokens,
        Err(errors) => {
            error!("{errors}");
            std::process::exit(1);
        }
    };

    if args.dump_tokens {
        if args.json {
            println!("{}", serde_json::to_string_pretty(&tokens)?);
        } else {
            print!("{}", pylet::lexer::dump_tokens(&tokens));
        }
    }

    let tree = match parse(&tokens) {
        Ok(tree) => tree,
        Err(errors) => {
            error!("{errors}");
            std::process::exit(1);
        }
    };

    if args.dump_ast {
        if args.json {
            println!("{}", serde_json::to_string_pretty(&tree)?);
        } else {
            print!("{}", tree.dump());
        }
    }

    Ok(())
}
