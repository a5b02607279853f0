//! Command-line interface for the bowsprit utility
//!
//! Provides a CLI to process class diagram declarations and inspect the
//! resulting model as text or JSON.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use crate::colorizer::colorize_output;
use bowsprit::commands::LineProcessor;
use bowsprit::core::logging::init_logging;
use bowsprit::model::{AddressingMode, ClassDiagram, ClassifierKind, LeafEntity};
use bowsprit::style::ColorChannel;

/// Bowsprit - Process class diagram declarations into an inspectable model
#[derive(Parser)]
#[command(name = "bowsprit")]
#[command(about = "A Rust utility to process PlantUML-style class diagram declarations")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Process declarations and print the resulting model
    Inspect {
        /// Input file containing declarations (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the model dump (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = FormatChoice::Text)]
        format: FormatChoice,

        /// When to use colors in text output
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,

        /// Use the legacy addressing mode (dotted paths collapse)
        #[arg(long)]
        legacy: bool,

        /// Only show entities of one classifier kind (e.g. class, interface)
        #[arg(long)]
        kind: Option<String>,
    },

    /// Validate declarations without printing the model
    Check {
        /// Input file to validate (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Use the legacy addressing mode
        #[arg(long)]
        legacy: bool,
    },
}

/// Output formats for the inspect command
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum FormatChoice {
    /// Indented human-readable listing
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
}

/// When to colorize output
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Use colors if output is a terminal and NO_COLOR is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Main CLI application
pub struct BowspritApp {
    processor: LineProcessor,
}

impl BowspritApp {
    pub fn new() -> Self {
        Self {
            processor: LineProcessor::new(),
        }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over CLI flags
        let log_level = std::env::var("BOWSPRIT_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| cli.log_level.as_str().to_string());
        let log_format = std::env::var("BOWSPRIT_LOG_FORMAT")
            .ok()
            .unwrap_or_else(|| cli.log_format.as_str().to_string());

        if let Err(e) = init_logging(Some(&log_level), Some(&log_format)) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Bowsprit v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Inspect {
                input,
                output,
                format,
                color,
                legacy,
                kind,
            } => self.inspect_command(input, output, format, color, legacy, kind, cli.verbose),
            Commands::Check { input, legacy } => self.check_command(input, legacy, cli.verbose),
        }
    }

    /// Handle the inspect command
    #[allow(clippy::too_many_arguments)]
    fn inspect_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        format: FormatChoice,
        color: ColorChoice,
        legacy: bool,
        kind: Option<String>,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let kind_filter = kind
            .map(|token| {
                ClassifierKind::from_token(&token)
                    .ok_or_else(|| anyhow!("unknown classifier kind '{}'", token))
            })
            .transpose()?;

        let diagram = self
            .processor
            .process_with_mode(&content, addressing_mode(legacy))?;

        if verbose {
            eprintln!(
                "Processed {} entities, {} relations",
                diagram.leaf_count(),
                diagram.relation_count()
            );
        }

        let rendered = match format {
            FormatChoice::Text => render_text(&diagram, kind_filter),
            FormatChoice::Json => render_json(&diagram, kind_filter)?,
        };

        let final_output =
            if format == FormatChoice::Text && self.should_colorize(&output, color) {
                colorize_output(&rendered)
            } else {
                rendered
            };
        self.write_output(output, &final_output)
    }

    /// Handle the check command
    fn check_command(&self, input: Option<PathBuf>, legacy: bool, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let diagram = self
            .processor
            .process_with_mode(&content, addressing_mode(legacy))?;
        println!(
            "ok: {} entities, {} relations",
            diagram.leaf_count(),
            diagram.relation_count()
        );
        Ok(())
    }

    /// Determine if we should colorize based on color choice and destination
    fn should_colorize(&self, output: &Option<PathBuf>, color: ColorChoice) -> bool {
        match color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                match output {
                    None => crossterm::tty::IsTty::is_tty(&io::stdout()),
                    Some(p) if p.to_str() == Some("-") => {
                        crossterm::tty::IsTty::is_tty(&io::stdout())
                    }
                    Some(_) => false,
                }
            }
        }
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::read_to_string(&path)
                    .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e))
            }
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                if content.is_empty() || content.ends_with('\n') {
                    print!("{}", content);
                } else {
                    println!("{}", content);
                }
                io::stdout().flush()?;
            }
        }
        Ok(())
    }
}

impl Default for BowspritApp {
    fn default() -> Self {
        Self::new()
    }
}

fn addressing_mode(legacy: bool) -> AddressingMode {
    if legacy {
        AddressingMode::Legacy
    } else {
        AddressingMode::Modern
    }
}

/// Render the model as an indented human-readable listing
pub fn render_text(diagram: &ClassDiagram, kind_filter: Option<ClassifierKind>) -> String {
    let mut out = String::new();
    for leaf in filtered(diagram, kind_filter) {
        out.push_str(&format!("{} {}", leaf.kind(), leaf.code()));
        if let Some(generic) = leaf.generic() {
            out.push_str(&format!("<{}>", generic));
        }
        if let Some(stereotype) = leaf.stereotype() {
            out.push(' ');
            out.push_str(stereotype.raw());
        }
        for tag in leaf.tags() {
            out.push_str(&format!(" ${}", tag));
        }
        out.push('\n');

        if leaf.display().as_text() != leaf.code() {
            out.push_str(&format!(
                "  display: {}\n",
                leaf.display().as_text().replace('\n', " / ")
            ));
        }
        for url in leaf.urls() {
            out.push_str(&format!("  url: {}\n", url.link()));
        }
        let colors = leaf.colors();
        if !colors.is_empty() {
            out.push_str("  colors:");
            if let Some(back) = colors.get(ColorChannel::Back) {
                out.push_str(&format!(" back={}", back.as_hex()));
            }
            if let Some(line) = colors.get(ColorChannel::Line) {
                out.push_str(&format!(" line={}", line.as_hex()));
            }
            if let Some(stroke) = colors.stroke() {
                out.push_str(&format!(" stroke={}", stroke));
            }
            out.push('\n');
        }
        for relation in leaf.relations() {
            out.push_str(&format!("  {} -> {}\n", relation.kind, relation.target));
        }
    }
    out
}

/// Render the model as JSON
pub fn render_json(diagram: &ClassDiagram, kind_filter: Option<ClassifierKind>) -> Result<String> {
    let entities: Vec<_> = filtered(diagram, kind_filter).map(entity_json).collect();
    let value = serde_json::json!({
        "entity_count": diagram.leaf_count(),
        "relation_count": diagram.relation_count(),
        "entities": entities,
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

fn filtered(
    diagram: &ClassDiagram,
    kind_filter: Option<ClassifierKind>,
) -> impl Iterator<Item = &LeafEntity> {
    diagram
        .leaves()
        .filter(move |leaf| kind_filter.is_none() || kind_filter == Some(leaf.kind()))
}

fn entity_json(leaf: &LeafEntity) -> serde_json::Value {
    serde_json::json!({
        "code": leaf.code(),
        "kind": leaf.kind().to_string(),
        "display": leaf.display().as_text(),
        "generic": leaf.generic(),
        "stereotype": leaf.stereotype().map(|s| s.raw()),
        "tags": leaf.tags().iter().collect::<Vec<_>>(),
        "urls": leaf.urls().iter().map(|u| u.link()).collect::<Vec<_>>(),
        "relations": leaf
            .relations()
            .iter()
            .map(|r| serde_json::json!({ "kind": r.kind.to_string(), "target": r.target }))
            .collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::tempdir;

    fn process(source: &str) -> ClassDiagram {
        LineProcessor::new().process(source).unwrap()
    }

    #[test]
    fn test_cli_parsing_inspect_command() {
        let args = vec![
            "bowsprit", "inspect", "--input", "model.puml", "--output", "out.txt", "--format",
            "json", "--legacy",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Inspect {
                input,
                output,
                format,
                color,
                legacy,
                kind,
            } => {
                assert_eq!(input.unwrap().to_string_lossy(), "model.puml");
                assert_eq!(output.unwrap().to_string_lossy(), "out.txt");
                assert_eq!(format, FormatChoice::Json);
                assert_eq!(color, ColorChoice::Auto); // default
                assert!(legacy);
                assert!(kind.is_none());
            }
            _ => panic!("Expected Inspect command"),
        }
    }

    #[test]
    fn test_cli_parsing_kind_filter() {
        let args = vec!["bowsprit", "inspect", "--kind", "interface"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Inspect { kind, .. } => {
                assert_eq!(kind.as_deref(), Some("interface"));
            }
            _ => panic!("Expected Inspect command"),
        }
    }

    #[test]
    fn test_cli_parsing_check_command() {
        let args = vec!["bowsprit", "check", "--input", "model.puml"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Check { input, legacy } => {
                assert_eq!(input.unwrap().to_string_lossy(), "model.puml");
                assert!(!legacy);
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_verbose_flag() {
        let cli = Cli::try_parse_from(vec!["bowsprit", "--verbose", "check"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_read_input_from_file() {
        let app = BowspritApp::new();
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.puml");
        std::fs::write(&path, "class Foo\n").unwrap();
        assert_eq!(app.read_input(Some(path)).unwrap(), "class Foo\n");
    }

    #[test]
    fn test_read_input_missing_file_reports_path() {
        let app = BowspritApp::new();
        let err = app
            .read_input(Some(PathBuf::from("/nonexistent/model.puml")))
            .unwrap_err();
        assert!(format!("{}", err).contains("/nonexistent/model.puml"));
    }

    #[test]
    fn test_write_output_to_file() {
        let app = BowspritApp::new();
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        app.write_output(Some(path.clone()), "class Foo\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "class Foo\n");
    }

    #[test]
    fn test_render_text_lists_entities() {
        let diagram = process("class Foo<T> $core extends Bar");
        let text = render_text(&diagram, None);
        assert!(text.contains("class Foo<T> $core"));
        assert!(text.contains("extends -> Bar"));
        assert!(text.contains("class Bar"));
    }

    #[test]
    fn test_render_text_shows_display_when_distinct() {
        let diagram = process("interface \"My Display\" as I1");
        let text = render_text(&diagram, None);
        assert!(text.contains("interface I1"));
        assert!(text.contains("display: My Display"));
    }

    #[test]
    fn test_render_text_kind_filter() {
        let diagram = process("class Foo\ninterface Bar");
        let text = render_text(&diagram, Some(ClassifierKind::Interface));
        assert!(text.contains("interface Bar"));
        assert!(!text.contains("class Foo"));
    }

    #[test]
    fn test_render_text_colors_line() {
        let diagram = process("class Foo #red ##[dotted]blue");
        let text = render_text(&diagram, None);
        assert!(text.contains("colors: back=#FF0000 line=#0000FF stroke=dotted"));
    }

    #[test]
    fn test_render_json_shape() {
        let diagram = process("class Foo extends Bar");
        let json = render_json(&diagram, None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["entity_count"], 2);
        assert_eq!(value["relation_count"], 1);
        assert_eq!(value["entities"][0]["code"], "Foo");
        assert_eq!(value["entities"][0]["relations"][0]["target"], "Bar");
    }

    #[test]
    fn test_unknown_kind_filter_fails() {
        let app = BowspritApp::new();
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.puml");
        std::fs::write(&path, "class Foo\n").unwrap();
        let err = app
            .inspect_command(
                Some(path),
                Some(dir.path().join("out.txt")),
                FormatChoice::Text,
                ColorChoice::Never,
                false,
                Some("widget".to_string()),
                false,
            )
            .unwrap_err();
        assert!(format!("{}", err).contains("widget"));
    }

    #[test]
    fn test_inspect_command_end_to_end() {
        let app = BowspritApp::new();
        let dir = tempdir().unwrap();
        let input = dir.path().join("model.puml");
        let output = dir.path().join("out.txt");
        std::fs::write(&input, "class Foo extends Bar\n").unwrap();
        app.inspect_command(
            Some(input),
            Some(output.clone()),
            FormatChoice::Text,
            ColorChoice::Never,
            false,
            None,
            false,
        )
        .unwrap();
        let text = std::fs::read_to_string(&output).unwrap();
        assert!(text.contains("class Foo"));
        assert!(text.contains("extends -> Bar"));
    }
}
