//! Command-line front end for the Quill markdown processor.
//!
//! # Key Abstractions
//!
//! - [`CliArgs`]: clap argument tree for the `quill` binary
//! - [`QuillConfig`]: TOML/env configuration loaded with `confyg`
//! - [`QuillCli`]: loads config, installs logging, dispatches commands

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod content_handlers;

pub use app::QuillCli;
pub use cli::{CliArgs, Command, ConfigAction, ConfigCommand};
pub use config::{ExcerptConfig, QuillConfig};
