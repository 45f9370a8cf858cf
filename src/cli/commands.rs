//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tagdex")]
#[command(about = "Build the tag index of a static blog", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a tagdex site
    Init {
        /// Site root (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Directory holding post sources, relative to the site root
        #[arg(long, default_value = "_posts")]
        posts_dir: String,
    },

    /// Build the tag index
    Build {
        /// Output format (json, markdown, html)
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Write to this file (relative to the site root) instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Tag order (first-seen, alphabetical, frequency)
        #[arg(long)]
        order: Option<String>,

        /// Fail on malformed posts instead of skipping them
        #[arg(long)]
        strict: bool,
    },

    /// List all tags with their post counts
    Tags {
        /// Tag order (first-seen, alphabetical, frequency)
        #[arg(long)]
        order: Option<String>,
    },

    /// List the posts under one tag
    Show {
        /// Tag to look up (exact match)
        tag: String,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
