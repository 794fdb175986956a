use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indentml::{LineKind, Options, SelfClosingMode, SelfClosingTags};
use std::io::Read;
use std::path::Path;

mod build;
mod config;

#[derive(Parser)]
#[command(name = "iml", version, about = "Transpile indentation-driven tag shorthand to HTML")]
struct Cli {
    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ModeArg {
    Xhtml,
    Html5,
    Html4,
}

impl From<ModeArg> for SelfClosingMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Xhtml => SelfClosingMode::Xhtml,
            ModeArg::Html5 => SelfClosingMode::Html5,
            ModeArg::Html4 => SelfClosingMode::Html4,
        }
    }
}

/// Flags that override `indentml.json`.
#[derive(clap::Args)]
struct OptionArgs {
    /// How self-closing tags are terminated
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Keep source indentation instead of re-indenting by depth
    #[arg(long)]
    no_format: bool,

    /// Spaces per nesting level when formatting
    #[arg(long)]
    indent: Option<usize>,
}

impl OptionArgs {
    fn apply(&self, mut options: Options) -> Options {
        if let Some(mode) = self.mode {
            options.self_closing_mode = mode.into();
        }
        if self.no_format {
            options.format_output = false;
        }
        if let Some(indent) = self.indent {
            options.indent_unit = indent;
        }
        options
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Transpile one file (or `-` for stdin) to HTML
    Render {
        /// Path to the source file
        file: String,

        #[command(flatten)]
        options: OptionArgs,

        /// Write output here instead of stdout
        #[arg(long)]
        out: Option<String>,

        /// Colour the output for the terminal
        #[arg(long)]
        highlight: bool,
    },

    /// Report diagnostics for source file(s)
    Check {
        /// Paths to the source files
        files: Vec<String>,
    },

    /// Print each tag line's parsed form as JSON lines
    Parse {
        /// Path to the source file
        file: String,
    },

    /// Transpile every source file under a directory
    Build {
        /// Source directory
        dir: String,

        /// Output directory (default: `outDir` from indentml.json)
        #[arg(long)]
        out: Option<String>,

        #[command(flatten)]
        options: OptionArgs,

        /// Rebuild when source files change
        #[arg(long)]
        watch: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(default_filter));

    let config = config::load_config(Path::new("."))?;

    match cli.command {
        Commands::Render {
            file,
            options,
            out,
            highlight,
        } => {
            let options = options.apply(config.options);
            handle_render(&file, &options, out.as_deref(), highlight)?;
        }
        Commands::Check { files } => {
            handle_check(&files, &config.options)?;
        }
        Commands::Parse { file } => {
            handle_parse(&file)?;
        }
        Commands::Build {
            dir,
            out,
            options,
            watch,
        } => {
            let options = options.apply(config.options.clone());
            let out_dir = out.unwrap_or_else(|| config.out_dir.clone());
            let opts = build::BuildOpts {
                src_dir: Path::new(&dir),
                out_dir: Path::new(&out_dir),
                extension: &config.extension,
                options: &options,
                quiet: cli.quiet,
            };
            let report = build::handle_build(&opts)?;
            if watch {
                build::watch_and_rebuild(&opts)?;
            } else if report.failed > 0 {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn read_source(file: &str) -> Result<String> {
    if file == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        return Ok(content);
    }
    std::fs::read_to_string(file).with_context(|| format!("Failed to read '{}'", file))
}

fn handle_render(file: &str, options: &Options, out: Option<&str>, highlight: bool) -> Result<()> {
    let content = read_source(file)?;

    let result = indentml::transpile_with_diagnostics(&content, options)
        .with_context(|| format!("Failed to transpile '{}'", file))?;

    // Print diagnostics to stderr
    for diag in &result.diagnostics {
        let line_info = match diag.line {
            Some(line) => format!("{}:{}", file, line),
            None => file.to_string(),
        };
        eprintln!("{}: {}", line_info, diag.message);
    }

    match out {
        Some(path) => {
            std::fs::write(path, format!("{}\n", result.output))
                .with_context(|| format!("Failed to write '{}'", path))?;
        }
        None if highlight => println!("{}", indentml::render_term::highlight(&result.output)),
        None => println!("{}", result.output),
    }
    Ok(())
}

fn handle_check(files: &[String], options: &Options) -> Result<()> {
    let mut has_errors = false;

    for file in files {
        let content = read_source(file)?;

        let diagnostics = match indentml::transpile_with_diagnostics(&content, options) {
            Ok(result) => result.diagnostics,
            Err(e) => vec![indentml::Diagnostic {
                severity: indentml::Severity::Error,
                message: e.to_string(),
                line: match e {
                    indentml::TranspileError::Structural { line, .. } => Some(line),
                    _ => None,
                },
                code: None,
            }],
        };

        if diagnostics.is_empty() {
            println!("{}: {}", file, "OK".green());
            continue;
        }

        for diag in &diagnostics {
            let severity_str = match diag.severity {
                indentml::Severity::Error => {
                    has_errors = true;
                    format!("{}", "error".red().bold())
                }
                indentml::Severity::Warning => format!("{}", "warning".yellow().bold()),
                indentml::Severity::Info => format!("{}", "info".cyan().bold()),
            };

            let line_info = match diag.line {
                Some(line) => format!("{}:{}", file, line),
                None => file.to_string(),
            };

            let code_str = match &diag.code {
                Some(c) => format!("[{}] ", c),
                None => String::new(),
            };

            println!("{line_info}: {severity_str}: {code_str}{}", diag.message);
        }
    }

    if has_errors {
        std::process::exit(1);
    }

    Ok(())
}

fn handle_parse(file: &str) -> Result<()> {
    let content = read_source(file)?;
    let normalised = content.replace("\r\n", "\n");

    for line in indentml::classify::split_lines(&normalised) {
        if indentml::classify::classify(&line) != LineKind::Tag {
            continue;
        }
        let parsed = indentml::parse_tag_line(line.content, SelfClosingTags::html());
        let record = serde_json::json!({
            "line": line.number + 1,
            "indent": line.indent,
            "spec": parsed.spec,
        });
        println!("{record}");
    }
    Ok(())
}
