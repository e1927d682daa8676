// Render every text document under a directory into its own mind map.
// First non-empty line is the topic, everything after it the description.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::config::Settings;
use crate::engine::build_mind_map;
use crate::error::{Error, Result};
use crate::export::{OutputFormat, export_map, write_tree_json};

const TEXT_EXTENSIONS: &[&str] = &["txt", "md"];

#[derive(Debug, Default)]
pub struct BatchReport {
    /// Images written, in walk order
    pub rendered: Vec<PathBuf>,
    /// Inputs that could not be rendered, with the reason
    pub skipped: Vec<(PathBuf, String)>,
}

/// Split a document into `(topic, description)`.
/// Markdown heading markers are dropped from the topic line.
pub fn parse_document(contents: &str) -> Option<(String, Option<String>)> {
    let mut lines = contents.lines().skip_while(|l| l.trim().is_empty());
    let topic = lines.next()?.trim().trim_start_matches('#').trim();
    if topic.is_empty() {
        return None;
    }

    let rest = lines.collect::<Vec<_>>().join("\n");
    let description = Some(rest.trim().to_string()).filter(|d| !d.is_empty());
    Some((topic.to_string(), description))
}

fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| TEXT_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn render_document(
    path: &Path,
    target: &Path,
    format: OutputFormat,
    settings: &Settings,
) -> Result<()> {
    let contents = fs::read_to_string(path)?;
    let (topic, description) =
        parse_document(&contents).ok_or_else(|| Error::EmptyDocument(path.to_path_buf()))?;

    let tree = build_mind_map(&topic, description.as_deref());

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    export_map(&tree, settings, target, format)?;
    write_tree_json(&tree, &target.with_extension("json"))?;
    Ok(())
}

/// Output path for `relative` under `output`. The source extension is kept
/// (`cells.md` -> `cells.md.svg`) so files sharing a stem do not collide.
fn output_path(output: &Path, relative: &Path, format: OutputFormat) -> PathBuf {
    let mut name = relative.as_os_str().to_os_string();
    name.push(".");
    name.push(format.extension());
    output.join(name)
}

/// Walk `input` (sorted by name) and render each `.txt`/`.md` file into
/// `output`, mirroring the directory layout. A bad file or unreadable entry
/// is skipped and reported; it does not stop the batch. An input that is
/// missing or not a directory is an error.
pub fn render_directory(
    input: &Path,
    output: &Path,
    format: OutputFormat,
    settings: &Settings,
) -> Result<BatchReport> {
    if !fs::metadata(input)?.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a directory", input.display()),
        )
        .into());
    }
    fs::create_dir_all(output)?;

    let mut report = BatchReport::default();
    let mut paths: Vec<PathBuf> = Vec::new();

    for entry in WalkDir::new(input).sort_by_file_name() {
        match entry {
            Ok(e) if e.file_type().is_file() && is_text_file(e.path()) => {
                paths.push(e.path().to_path_buf())
            }
            Ok(_) => {}
            Err(e) => {
                let path = e.path().unwrap_or(input).to_path_buf();
                warn!("skipped {}: {}", path.display(), e);
                report.skipped.push((path, e.to_string()));
            }
        }
    }

    info!(count = paths.len(), input = %input.display(), "rendering documents");

    for (i, path) in paths.iter().enumerate() {
        let relative = path.strip_prefix(input).unwrap_or(path);
        let target = output_path(output, relative, format);

        match render_document(path, &target, format, settings) {
            Ok(()) => {
                info!("[{}/{}] {}", i + 1, paths.len(), target.display());
                report.rendered.push(target);
            }
            Err(e) => {
                warn!("[{}/{}] skipped {}: {}", i + 1, paths.len(), path.display(), e);
                report.skipped.push((path.clone(), e.to_string()));
            }
        }
    }

    Ok(report)
}
