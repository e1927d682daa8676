use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mindmap::config::DEFAULT_SETTINGS_FILE;
use mindmap::viewer::lock_state;
use mindmap::{
    OutputFormat, Settings, ViewerState, build_mind_map, export_map, extract_keywords,
    render_directory, spawn_viewer,
};

#[derive(Parser, Debug)]
#[command(name = "mindmap", version, about = "Offline keyword mind maps")]
struct Cli {
    /// Settings file (JSON); defaults apply when it does not exist
    #[arg(long, global = true, default_value = DEFAULT_SETTINGS_FILE)]
    config: PathBuf,
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the keywords extracted from TEXT
    Keywords { text: String },
    /// Print the mind-map tree as JSON
    Tree {
        topic: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Render one mind map to a PNG or SVG file
    Render {
        topic: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        out: PathBuf,
        /// Overrides the format implied by the file extension
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Render every .txt/.md file under DIR
    Batch {
        dir: PathBuf,
        #[arg(short, long, default_value = "maps")]
        out: PathBuf,
        #[arg(long, value_enum, default_value = "png")]
        format: OutputFormat,
    },
    /// Open a live window and type topics at a prompt
    View,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "mindmap=info",
        1 => "mindmap=debug",
        _ => "mindmap=trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = Settings::load_or_default(&cli.config)
        .with_context(|| format!("loading settings from {}", cli.config.display()))?;

    match cli.command {
        Command::Keywords { text } => {
            for word in extract_keywords(&text) {
                println!("{}", word);
            }
        }
        Command::Tree { topic, description } => {
            let tree = build_mind_map(&topic, description.as_deref());
            println!("{}", tree.to_json()?);
        }
        Command::Render { topic, description, out, format } => {
            let format = match format {
                Some(f) => f,
                None => OutputFormat::from_path(&out)?,
            };
            let tree = build_mind_map(&topic, description.as_deref());
            export_map(&tree, &settings, &out, format)
                .with_context(|| format!("writing {}", out.display()))?;
        }
        Command::Batch { dir, out, format } => {
            let report = render_directory(&dir, &out, format, &settings)?;
            println!(
                "rendered {} map(s) into {}, skipped {}",
                report.rendered.len(),
                out.display(),
                report.skipped.len()
            );
            for (path, reason) in &report.skipped {
                println!("  skipped {}: {}", path.display(), reason);
            }
        }
        Command::View => run_viewer(settings)?,
    }

    Ok(())
}

fn prompt(label: &str) -> io::Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

/// Argument of a slash command: `cmd` must be followed by whitespace or
/// nothing, so `/saveas` is not `/save`.
fn command_arg<'a>(input: &'a str, cmd: &str) -> Option<&'a str> {
    let rest = input.strip_prefix(cmd)?;
    (rest.is_empty() || rest.starts_with(char::is_whitespace)).then(|| rest.trim())
}

fn run_viewer(settings: Settings) -> anyhow::Result<()> {
    let state = Arc::new(Mutex::new(ViewerState::default()));
    let window = spawn_viewer(Arc::clone(&state), settings.clone());

    println!("\n╭──────────────────────────────────────────╮");
    println!("│            offline mind map              │");
    println!("│                                          │");
    println!("│ type a topic to draw it                  │");
    println!("│                                          │");
    println!("│ /describe <text>  - add a description    │");
    println!("│ /keywords         - list branch words    │");
    println!("│ /json             - print the tree       │");
    println!("│ /save <file>      - write png or svg     │");
    println!("│ /quit             - close                │");
    println!("╰──────────────────────────────────────────╯\n");

    loop {
        let Some(input) = prompt("topic: ")? else { break };
        if lock_state(&state).closed {
            break;
        }
        if input.is_empty() {
            continue;
        }

        match input.as_str() {
            "/quit" => {
                lock_state(&state).closed = true;
                break;
            }
            "/json" => {
                match lock_state(&state).current_tree() {
                    Some(tree) => println!("{}\n", tree.to_json()?),
                    None => println!("no topic yet\n"),
                }
                continue;
            }
            "/keywords" => {
                match lock_state(&state).current_tree() {
                    Some(tree) => {
                        let words: Vec<&str> = tree.children.iter().map(|c| c.label.as_str()).collect();
                        println!("{}\n", if words.is_empty() { "(none)".to_string() } else { words.join(", ") });
                    }
                    None => println!("no topic yet\n"),
                }
                continue;
            }
            _ => {}
        }

        if let Some(text) = command_arg(&input, "/describe") {
            let mut guard = lock_state(&state);
            if guard.topic.is_none() {
                println!("set a topic first\n");
                continue;
            }
            guard.set_description(text);
            println!("redrawn with description\n");
            continue;
        }

        if let Some(path) = command_arg(&input, "/save") {
            if path.is_empty() {
                println!("usage: /save <file.png|file.svg>\n");
                continue;
            }
            let Some(tree) = lock_state(&state).current_tree() else {
                println!("no topic yet\n");
                continue;
            };
            let path = Path::new(path);
            let saved = OutputFormat::from_path(path)
                .and_then(|format| export_map(&tree, &settings, path, format));
            match saved {
                Ok(()) => println!("saved {}\n", path.display()),
                Err(e) => println!("save error: {}\n", e),
            }
            continue;
        }

        if input.starts_with('/') {
            println!("unknown command: {}\n", input);
            continue;
        }

        lock_state(&state).set_topic(&input);
    }

    // stdin closed without /quit: stop the window too
    lock_state(&state).closed = true;
    match window.join() {
        Ok(result) => result?,
        Err(_) => anyhow::bail!("viewer thread panicked"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_arg() {
        assert_eq!(command_arg("/save out.png", "/save"), Some("out.png"));
        assert_eq!(command_arg("/save", "/save"), Some(""));
        assert_eq!(
            command_arg("/describe  plants make food ", "/describe"),
            Some("plants make food")
        );
    }

    #[test]
    fn test_command_arg_needs_word_boundary() {
        assert_eq!(command_arg("/saveas out.png", "/save"), None);
        assert_eq!(command_arg("/describex text", "/describe"), None);
        assert_eq!(command_arg("/json", "/save"), None);
    }
}
