//! `strapdoc render` command implementation.

use std::fmt::Write as _;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use strapdoc_config::{CliSettings, Config};
use strapdoc_renderer::{DocumentRenderer, Node, RenderResult, encode};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// JSON document tree to render (`-` reads stdin).
    input: PathBuf,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover strapdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Comma-separated classes added to every table (overrides config).
    #[arg(long, env = "STRAPDOC_TABLE_STYLE")]
    table_style: Option<String>,

    /// Heading level of top-level section titles (overrides config).
    #[arg(long)]
    initial_header_level: Option<u8>,

    /// Use plain HTML5 markup instead of Bootstrap classes.
    #[arg(long)]
    plain: bool,

    /// Wrap the body in a complete HTML page with head and meta tags.
    #[arg(long)]
    standalone: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the input is not a valid
    /// document tree, or rendering fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            table_style: self.table_style,
            initial_header_level: self.initial_header_level,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Using config");
        }

        let source = read_input(&self.input)?;
        let result = render_source(&source, &config, self.plain)?;

        for warning in &result.warnings {
            output.warning(&format!("Warning: {warning}"));
        }

        let html = if self.standalone {
            standalone_page(&result)
        } else {
            result.html
        };

        match &self.output {
            Some(path) => {
                std::fs::write(path, html)?;
                output.success(&format!("Rendered {}", path.display()));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(html.as_bytes())?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

fn read_input(path: &Path) -> Result<String, CliError> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Parse a JSON document tree and render it with the configured settings.
fn render_source(source: &str, config: &Config, plain: bool) -> Result<RenderResult, CliError> {
    let document: Node = serde_json::from_str(source)?;
    let renderer = if plain {
        DocumentRenderer::html5()
    } else {
        DocumentRenderer::new()
    };
    let result = renderer
        .with_settings(config.render_settings())
        .render(&document)?;
    Ok(result)
}

fn standalone_page(result: &RenderResult) -> String {
    let mut page = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    for meta in &result.meta {
        page.push_str(meta);
        page.push('\n');
    }
    if let Some(title) = &result.title {
        writeln!(page, "<title>{}</title>", encode(title)).unwrap();
    }
    page.push_str("</head>\n<body>\n");
    page.push_str(&result.html);
    if !result.html.ends_with('\n') {
        page.push('\n');
    }
    page.push_str("</body>\n</html>\n");
    page
}
