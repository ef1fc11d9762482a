//! CLI argument parsing and command definitions.
//!
//! Every document command reads markdown from a file path, or from stdin
//! when the path is `-` (the default).

use clap::{Parser, Subcommand};

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level CLI arguments for the `quill` binary.
#[derive(Parser, Debug)]
#[command(name = "quill", author, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "QUILL_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Document and configuration commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render markdown to HTML.
    Render {
        /// Markdown file, or `-` for stdin.
        #[arg(default_value = "-")]
        input: String,

        /// Pass raw HTML in the source through unescaped.
        #[arg(long)]
        no_sanitize: bool,

        /// Do not turn fence language tags into classes.
        #[arg(long)]
        no_highlight: bool,

        /// Include a heading outline (JSON output only).
        #[arg(long)]
        toc: bool,

        /// Print the full result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the document as plain text.
    Plain {
        /// Markdown file, or `-` for stdin.
        #[arg(default_value = "-")]
        input: String,
    },

    /// Print a plain-text excerpt for feeds and meta descriptions.
    Excerpt {
        /// Markdown file, or `-` for stdin.
        #[arg(default_value = "-")]
        input: String,

        /// Maximum excerpt length in characters (defaults to config).
        #[arg(short = 'n', long)]
        length: Option<usize>,
    },

    /// Print the estimated reading time in minutes.
    ReadingTime {
        /// Markdown file, or `-` for stdin.
        #[arg(default_value = "-")]
        input: String,
    },

    /// Print the URL slug for a title.
    Slug {
        /// Post title.
        title: String,
    },

    /// Check a document for structural issues.
    Validate {
        /// Markdown file, or `-` for stdin.
        #[arg(default_value = "-")]
        input: String,

        /// Exit with an error when any issue is found.
        #[arg(long)]
        strict: bool,
    },

    /// Print the heading outline.
    Toc {
        /// Markdown file, or `-` for stdin.
        #[arg(default_value = "-")]
        input: String,
    },

    /// Print version information.
    Version,

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "render.sanitize").
        key: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },

    /// Export configuration as environment variables.
    Export {
        /// Format as Docker --env flags.
        #[arg(long)]
        docker_env: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================
