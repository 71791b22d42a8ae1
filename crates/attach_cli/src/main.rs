use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use attachments::{
    AttachmentKind, AttachmentUrlResolver, AttachmentView, FileAttachment,
    MessageAttachments, NoopResolver, TemplateUrlResolver, append_references, classify_all,
    extract_references, remove_references,
};
use clap::{Parser, Subcommand};
use config::{AppConfig, ConfigStore};
use serde::Serialize;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "attach")]
#[command(version, about = "Classify and extract file references in chat messages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding config.json (default: platform config dir)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Print JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify file paths into image, document or other
    Classify {
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// List the file paths referenced by a message
    Extract {
        /// Message file (default: stdin)
        file: Option<PathBuf>,
    },

    /// Print a message with its file references removed
    Strip {
        /// Message file (default: stdin)
        file: Option<PathBuf>,
    },

    /// Split a message into text and grouped, resolved attachments
    Grid {
        /// Message file (default: stdin)
        file: Option<PathBuf>,
    },

    /// Append file references to a message
    Embed {
        text: String,
        paths: Vec<String>,
    },
}

#[derive(Serialize)]
struct GridOutput<'a> {
    text: &'a str,
    attachments: Vec<AttachmentView>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let store = match &cli.config_dir {
        Some(dir) => ConfigStore::from_dir(dir),
        None => ConfigStore::from_default_location()?,
    };
    let loaded = store.load_or_init();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    let _log_guard = init_logger(&config);
    if let Err(err) = &loaded {
        error!("failed to load config: {err:#}");
    }
    debug!(path = %store.path().display(), "config ready");

    match cli.command {
        Commands::Classify { paths } => {
            let attachments = classify_all(&paths);
            if cli.json {
                print_json(&attachments)?;
            } else {
                for attachment in &attachments {
                    println!("{}", classify_line(attachment));
                }
            }
        }
        Commands::Extract { file } => {
            let content = read_message(file.as_deref())?;
            let paths = extract_references(&content);
            if cli.json {
                print_json(&paths)?;
            } else {
                for path in &paths {
                    println!("{path}");
                }
            }
        }
        Commands::Strip { file } => {
            let content = read_message(file.as_deref())?;
            let text = remove_references(&content);
            if cli.json {
                print_json(&text)?;
            } else {
                println!("{text}");
            }
        }
        Commands::Grid { file } => {
            let content = read_message(file.as_deref())?;
            let message = MessageAttachments::parse(&content);
            let resolver = build_resolver(&config)?;
            let grid = message.grid();
            let views = grid.resolve(resolver.as_ref());
            if cli.json {
                print_json(&GridOutput {
                    text: &message.text,
                    attachments: views,
                })?;
            } else {
                print!("{}", render_grid(&message.text, &views));
            }
        }
        Commands::Embed { text, paths } => {
            let content = append_references(&text, &paths);
            if cli.json {
                print_json(&content)?;
            } else {
                println!("{content}");
            }
        }
    }

    Ok(())
}

fn build_resolver(config: &AppConfig) -> Result<Box<dyn AttachmentUrlResolver>> {
    match &config.attachments.download_url_template {
        Some(template) => {
            let resolver =
                TemplateUrlResolver::new(template.clone(), config.attachments.resolve_kinds.clone())
                    .context("invalid attachments.download_url_template")?;
            Ok(Box::new(resolver))
        }
        None => Ok(Box::new(NoopResolver)),
    }
}

fn read_message(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .context("failed to read message from stdin")?;
            Ok(content)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{text}");
    Ok(())
}

fn classify_line(attachment: &FileAttachment) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        attachment.kind,
        attachment.name,
        attachment.extension.as_deref().unwrap_or("-"),
        attachment.path
    )
}

fn render_grid(text: &str, views: &[AttachmentView]) -> String {
    let mut out = format!("{text}\n");
    for kind in [
        AttachmentKind::Image,
        AttachmentKind::Document,
        AttachmentKind::Other,
    ] {
        let section: Vec<&AttachmentView> =
            views.iter().filter(|v| v.attachment.kind == kind).collect();
        if section.is_empty() {
            continue;
        }
        out.push_str(&format!("\n{kind}s:\n"));
        for view in section {
            match &view.url {
                Some(url) => out.push_str(&format!("  {} <{url}>\n", view.attachment.name)),
                None => out.push_str(&format!("  {}\n", view.attachment.name)),
            }
        }
    }
    out
}

fn init_logger(config: &AppConfig) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));

    if !config.logging.file {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(io::stderr)
            .init();
        return None;
    }

    let mut log_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    log_dir.push("chatfile");
    log_dir.push("logs");
    if let Err(err) = fs::create_dir_all(&log_dir) {
        eprintln!("failed to create log dir `{}`: {err}", log_dir.display());
    }
    let file_appender = tracing_appender::rolling::daily(&log_dir, "attach.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .with_writer(writer)
        .init();

    Some(guard)
}
