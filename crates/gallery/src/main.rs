//! Card Gallery - masonry layout of image cards.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use gallery::image_loader::with_sniffed_type;
use gallery::{Gallery, GalleryConfig, LogNotifier};

/// Lay out image cards in a masonry grid and print the result as JSON.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Image files to upload
    files: Vec<PathBuf>,

    /// Viewport width
    #[arg(long, default_value = "1280")]
    width: f32,

    /// Viewport height
    #[arg(long, default_value = "720")]
    height: f32,

    /// Viewport widths to resize to, in order, after the upload
    #[arg(long, value_delimiter = ',')]
    resize: Vec<f32>,

    /// JSON file with masonry options (camelCase keys)
    #[arg(long)]
    options: Option<PathBuf>,

    /// Selector of the layout container
    #[arg(long, default_value = gallery::config::CARDS_SELECTOR)]
    container: String,

    /// Deliver the files by drag and drop instead of the file input
    #[arg(long)]
    drop: bool,

    /// Print compact JSON
    #[arg(long)]
    compact: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
    let filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Card Gallery v{}", gallery::VERSION);

    let mut config = GalleryConfig::new()
        .with_viewport(args.width, args.height)
        .with_container(&args.container);
    if let Some(path) = &args.options {
        config = config
            .with_options_file(path)
            .with_context(|| format!("loading options from {}", path.display()))?;
    }

    let files = args
        .files
        .iter()
        .map(|path| {
            dom::File::read(path)
                .map(with_sniffed_type)
                .with_context(|| format!("reading {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let gallery = Gallery::new(&config, Arc::new(LogNotifier))?;

    if !files.is_empty() {
        if args.drop {
            gallery.drop_files(Some(files));
        } else {
            gallery.select_files(files);
        }
        let loaded = gallery.complete_loads();
        info!(loaded, "images loaded");
    }

    for width in &args.resize {
        gallery.resize(*width, args.height);
    }

    let snapshot = gallery.snapshot();
    let json = if args.compact {
        serde_json::to_string(&snapshot)?
    } else {
        serde_json::to_string_pretty(&snapshot)?
    };
    println!("{json}");

    gallery.destroy();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_default() {
        let args = Args::parse_from(["card-gallery"]);
        assert!(args.files.is_empty());
        assert_eq!(args.width, 1280.0);
        assert_eq!(args.container, ".cards");
        assert!(!args.drop);
    }

    #[test]
    fn test_args_with_files_and_resizes() {
        let args = Args::parse_from([
            "card-gallery",
            "a.png",
            "b.jpg",
            "--resize",
            "800,400,100",
            "--options",
            "opts.json",
            "--drop",
        ]);
        assert_eq!(args.files, vec![PathBuf::from("a.png"), PathBuf::from("b.jpg")]);
        assert_eq!(args.resize, vec![800.0, 400.0, 100.0]);
        assert_eq!(args.options, Some(PathBuf::from("opts.json")));
        assert!(args.drop);
    }

    #[test]
    fn test_args_verbose() {
        let args = Args::parse_from(["card-gallery", "-v", "--compact"]);
        assert!(args.verbose);
        assert!(args.compact);
    }
}
