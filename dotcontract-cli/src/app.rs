use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// dotcontract - render the public contract of .NET modules
#[derive(Debug, Parser)]
#[command(name = "dotcontract", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Emit output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Leave nested public types out of the contract.
    #[arg(long, global = true)]
    pub no_nested: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the Markdown contract of one or more modules.
    Contract {
        /// Module files, or directories searched recursively for .dll and .exe files.
        #[arg(value_name = "FILE", required = true)]
        paths: Vec<PathBuf>,

        /// Write to this file (one module) or directory (several modules) instead of stdout.
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// List the exported types of a module with their contract section.
    Types {
        /// Path to the .NET module file.
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// Show only one section (e.g. Classes, Enums, "Extension Methods").
        #[arg(long)]
        category: Option<String>,
    },
}
