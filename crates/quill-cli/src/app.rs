//! QuillCli application.
//!
//! Loads configuration, installs logging and dispatches commands to the
//! content and config handlers.

use crate::cli::{CliArgs, Command};
use crate::config::QuillConfig;
use crate::{config_handlers, content_handlers};
use quill_core::Result;
use tracing_subscriber::EnvFilter;

// ============================================================================
// QuillCli
// ============================================================================

/// The `quill` command-line application.
pub struct QuillCli {
    name: String,
    config: QuillConfig,
    version: String,
}

impl QuillCli {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let config = QuillConfig::load(args.config.as_deref())?;
        Ok(Self::new(name, config))
    }

    /// Create a new CLI application.
    pub fn new(name: impl Into<String>, config: QuillConfig) -> Self {
        Self {
            name: name.into(),
            config,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Get a reference to the loaded configuration.
    pub fn config(&self) -> &QuillConfig {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
    /// Records from the `log` facade used by the library crates are captured too.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // A subscriber may already be installed (e.g. in tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Run the CLI with the given arguments.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);

        let Some(command) = args.command else {
            println!("{} {} — use --help for usage", self.name, self.version);
            return Ok(());
        };

        let output = self.execute(command, args.config.as_deref()).await?;
        if !output.is_empty() {
            println!("{output}");
        }
        Ok(())
    }

    /// Execute one command and return what it prints.
    async fn execute(&self, command: Command, config_path: Option<&str>) -> Result<String> {
        match command {
            Command::Render {
                input,
                no_sanitize,
                no_highlight,
                toc,
                json,
            } => {
                let document = content_handlers::read_document(&input).await?;
                let options = self
                    .config
                    .render
                    .with_sanitize(self.config.render.sanitize && !no_sanitize)
                    .with_highlight_code(self.config.render.highlight_code && !no_highlight)
                    .with_toc(self.config.render.generate_toc || toc);
                content_handlers::handle_render(&document, &options, json)
            }
            Command::Plain { input } => {
                let document = content_handlers::read_document(&input).await?;
                Ok(content_handlers::handle_plain(&document))
            }
            Command::Excerpt { input, length } => {
                let document = content_handlers::read_document(&input).await?;
                let max_length = length.unwrap_or(self.config.excerpt.max_length);
                Ok(content_handlers::handle_excerpt(&document, max_length))
            }
            Command::ReadingTime { input } => {
                let document = content_handlers::read_document(&input).await?;
                Ok(content_handlers::handle_reading_time(&document))
            }
            Command::Slug { title } => Ok(content_handlers::handle_slug(&title)),
            Command::Validate { input, strict } => {
                let document = content_handlers::read_document(&input).await?;
                content_handlers::handle_validate(&document, strict)
            }
            Command::Toc { input } => {
                let document = content_handlers::read_document(&input).await?;
                Ok(content_handlers::handle_toc(&document))
            }
            Command::Version => Ok(format!("{} {}", self.name, self.version)),
            Command::Config(config_cmd) => {
                config_handlers::handle_config_command(config_path, &self.config, config_cmd.command)
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn write_post(dir: &tempfile::TempDir, body: &str) -> String {
        let path = dir.path().join("post.md");
        std::fs::write(&path, body).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_quill_cli_new() {
        let cli = QuillCli::new("quill", QuillConfig::default());
        assert_eq!(cli.name, "quill");
        assert_eq!(cli.config().excerpt.max_length, 160);
    }

    #[test]
    fn test_quill_cli_with_version() {
        let cli = QuillCli::new("quill", QuillConfig::default()).with_version("1.2.3");
        assert_eq!(cli.version, "1.2.3");
    }

    #[test]
    fn test_init_logging_twice_does_not_panic() {
        let cli = QuillCli::new("quill", QuillConfig::default());
        cli.init_logging(false, false);
        cli.init_logging(true, false);
        cli.init_logging(false, true);
    }

    #[tokio::test]
    async fn test_run_no_command() {
        let cli = QuillCli::new("quill", QuillConfig::default());
        let args = CliArgs::parse_from(["quill"]);
        assert!(cli.run(args).await.is_ok());
    }

    #[tokio::test]
    async fn test_execute_version() {
        let cli = QuillCli::new("quill", QuillConfig::default()).with_version("0.1.0");
        let out = cli.execute(Command::Version, None).await.unwrap();
        assert_eq!(out, "quill 0.1.0");
    }

    #[tokio::test]
    async fn test_execute_render_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = write_post(&dir, "# Hi\n\n<b>x</b>");
        let cli = QuillCli::new("quill", QuillConfig::default());

        let args = CliArgs::parse_from(["quill", "render", input.as_str()]);
        let out = cli.execute(args.command.unwrap(), None).await.unwrap();
        assert_eq!(out, "<h1>Hi</h1>\n<p>&lt;b&gt;x&lt;/b&gt;</p>");

        let args = CliArgs::parse_from(["quill", "render", input.as_str(), "--no-sanitize"]);
        let out = cli.execute(args.command.unwrap(), None).await.unwrap();
        assert_eq!(out, "<h1>Hi</h1>\n<p><b>x</b></p>");
    }

    #[tokio::test]
    async fn test_execute_excerpt_uses_config_length() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = write_post(&dir, "alpha beta gamma delta");
        let mut config = QuillConfig::default();
        config.excerpt.max_length = 12;
        let cli = QuillCli::new("quill", config);

        let args = CliArgs::parse_from(["quill", "excerpt", input.as_str()]);
        let out = cli.execute(args.command.unwrap(), None).await.unwrap();
        assert_eq!(out, "alpha beta…");

        let args = CliArgs::parse_from(["quill", "excerpt", input.as_str(), "-n", "100"]);
        let out = cli.execute(args.command.unwrap(), None).await.unwrap();
        assert_eq!(out, "alpha beta gamma delta");
    }

    #[tokio::test]
    async fn test_execute_validate_strict_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = write_post(&dir, "short");
        let cli = QuillCli::new("quill", QuillConfig::default());

        let args = CliArgs::parse_from(["quill", "validate", input.as_str(), "--strict"]);
        assert!(cli.execute(args.command.unwrap(), None).await.is_err());
    }

    #[tokio::test]
    async fn test_execute_missing_input() {
        let cli = QuillCli::new("quill", QuillConfig::default());
        let args = CliArgs::parse_from(["quill", "plain", "/nonexistent/post.md"]);
        assert!(cli.execute(args.command.unwrap(), None).await.is_err());
    }

    #[tokio::test]
    async fn test_execute_slug() {
        let cli = QuillCli::new("quill", QuillConfig::default());
        let args = CliArgs::parse_from(["quill", "slug", "Hello, World!"]);
        let out = cli.execute(args.command.unwrap(), None).await.unwrap();
        assert_eq!(out, "hello-world");
    }

    #[test]
    fn test_quill_cli_from_args_with_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[excerpt]\nmax_length = 42\n").unwrap();

        let args = CliArgs::parse_from(["quill", "--config", path.to_str().unwrap()]);
        let cli = QuillCli::from_args("quill", &args).unwrap();
        assert_eq!(cli.config().excerpt.max_length, 42);
    }
}
