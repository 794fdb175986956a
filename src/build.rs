//! `iml build`: transpile every source file under a directory into a mirrored
//! tree of `.html` files, optionally watching for changes.

use anyhow::{Context, Result};
use colored::Colorize;
use indentml::Options;
use notify::{EventKind, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};
use walkdir::WalkDir;

/// Settings for one build run.
pub struct BuildOpts<'a> {
    pub src_dir: &'a Path,
    pub out_dir: &'a Path,
    pub extension: &'a str,
    pub options: &'a Options,
    pub quiet: bool,
}

/// Counts from a build run.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub written: usize,
    pub failed: usize,
    pub warnings: usize,
}

/// Collect source files with the configured extension, sorted for stable output.
pub fn find_sources(src_dir: &Path, extension: &str) -> Vec<PathBuf> {
    let mut sources: Vec<PathBuf> = WalkDir::new(src_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == extension))
        .collect();
    sources.sort();
    sources
}

/// Map `src_dir/a/b.haml` to `out_dir/a/b.html`.
pub fn output_path(src_dir: &Path, out_dir: &Path, source: &Path) -> PathBuf {
    let relative = source.strip_prefix(src_dir).unwrap_or(source);
    out_dir.join(relative).with_extension("html")
}

pub fn handle_build(opts: &BuildOpts<'_>) -> Result<BuildReport> {
    let sources = find_sources(opts.src_dir, opts.extension);
    let mut report = BuildReport::default();

    if sources.is_empty() && !opts.quiet {
        println!(
            "{} no .{} files under {}",
            "Nothing to build:".yellow().bold(),
            opts.extension,
            opts.src_dir.display()
        );
    }

    for source in &sources {
        let content = std::fs::read_to_string(source)
            .with_context(|| format!("Failed to read '{}'", source.display()))?;

        let result = match indentml::transpile_with_diagnostics(&content, opts.options) {
            Ok(result) => result,
            Err(e) => {
                eprintln!("{}: {} {}", source.display(), "error:".red().bold(), e);
                report.failed += 1;
                continue;
            }
        };

        for diag in &result.diagnostics {
            let line_info = match diag.line {
                Some(line) => format!("{}:{}", source.display(), line),
                None => source.display().to_string(),
            };
            eprintln!("{}: {}", line_info, diag.message);
        }
        report.warnings += result.diagnostics.len();

        let target = output_path(opts.src_dir, opts.out_dir, source);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create '{}'", parent.display()))?;
        }
        std::fs::write(&target, format!("{}\n", result.output))
            .with_context(|| format!("Failed to write '{}'", target.display()))?;
        report.written += 1;

        if !opts.quiet {
            println!("  {} {}", "Wrote".green(), target.display());
        }
    }

    if !opts.quiet {
        println!(
            "{} {} written, {} failed, {} warnings",
            "Build complete:".green().bold(),
            report.written,
            report.failed,
            report.warnings
        );
    }

    Ok(report)
}

/// Watch the source directory and rebuild on each save.
///
/// Debounces rapid events (e.g. editors that write in stages) with a 200ms window.
/// Ctrl+C exits cleanly.
pub fn watch_and_rebuild(opts: &BuildOpts<'_>) -> Result<()> {
    let watch_dir = std::fs::canonicalize(opts.src_dir)
        .with_context(|| format!("Cannot resolve path '{}'", opts.src_dir.display()))?;

    println!(
        "{} {} for changes (Ctrl+C to stop)",
        "Watching".cyan().bold(),
        opts.src_dir.display()
    );

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    watcher.watch(&watch_dir, RecursiveMode::Recursive)?;

    let mut last_rebuild = Instant::now();
    let debounce = Duration::from_millis(200);

    loop {
        match rx.recv_timeout(Duration::from_secs(1)) {
            Ok(event) => {
                let relevant_kind = matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_));
                let touches_source = event
                    .paths
                    .iter()
                    .any(|p| p.extension().is_some_and(|ext| ext == opts.extension));

                if relevant_kind && touches_source && last_rebuild.elapsed() > debounce {
                    // Let the editor finish writing.
                    std::thread::sleep(Duration::from_millis(50));

                    match handle_build(opts) {
                        Ok(_) => last_rebuild = Instant::now(),
                        Err(e) => eprintln!("{} {}", "Build error:".red().bold(), e),
                    }
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}
