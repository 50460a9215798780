mod project;
mod query;

use clap::{Parser, Subcommand};
use hierscope_core::config::{EngineConfig, ReaderStrategy};
use hierscope_core::logging::init_logging;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "hierscope",
    version,
    about = "Answer type hierarchy questions about a Java project",
    long_about = "Hierscope decodes class files or parses Java sources on demand to answer \
                  subtype questions: what a class extends, which interfaces it implements, \
                  and which project classes are subtypes of a given type."
)]
pub struct Cli {
    /// Project descriptor (hierscope.json) or the directory containing it
    #[arg(long, global = true, value_name = "PATH")]
    pub project: Option<PathBuf>,

    /// Extra class directories or jars, searched after the project's own
    #[arg(long, global = true, value_name = "PATH")]
    pub classpath: Vec<PathBuf>,

    /// Extra source roots
    #[arg(long = "source-root", global = true, value_name = "PATH")]
    pub source_roots: Vec<PathBuf>,

    /// Read hierarchy facts from compiled classes or from source
    #[arg(long, global = true, value_name = "bytecode|source")]
    pub reader: Option<ReaderStrategy>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Also log to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Print the direct superclass of a class
    Supertype {
        #[arg(value_name = "CLASS")]
        class: String,
    },
    /// Print the interfaces a class declares directly
    Interfaces {
        #[arg(value_name = "CLASS")]
        class: String,
    },
    /// Check whether CLASS is ANCESTOR or has it in its superclass chain
    Extends {
        #[arg(value_name = "CLASS")]
        class: String,
        #[arg(value_name = "ANCESTOR")]
        ancestor: String,
    },
    /// Check whether CLASS implements INTERFACE, directly or inherited
    Implements {
        #[arg(value_name = "CLASS")]
        class: String,
        #[arg(value_name = "INTERFACE")]
        interface: String,
    },
    /// Print the superclass chain and every implemented interface
    Hierarchy {
        #[arg(value_name = "CLASS")]
        class: String,
    },
    /// List project classes that extend or implement TARGET
    #[command(
        long_about = "Scans every class in the project's output directories (or source roots \
                      with --reader source) and lists those that extend or implement TARGET. \
                      Library classes are resolved but not listed."
    )]
    Subtypes {
        #[arg(value_name = "TARGET")]
        target: String,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = EngineConfig::from_env()?;
    if let Some(reader) = cli.reader {
        config.reader = reader;
    }
    let _guard = init_logging(&config.log_dir, "cli", cli.verbose);

    let layout = project::assemble(&cli)?;
    tracing::info!(
        "querying project {} with the {} reader",
        layout.id,
        config.reader
    );

    let report = query::execute(&cli.command, layout, config.reader)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}
