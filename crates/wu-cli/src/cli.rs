use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wu_core::BuildMode;

#[derive(Parser, Debug)]
#[command(name = "wu", author, version, about = "Build and package the WebHaru utility snippet", long_about = None)]
pub struct Args {
    /// JSON configuration file. Missing keys use built-in defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Minify the utility script and write the minified and readable artifacts.
    Build {
        /// Source script.
        #[arg(long)]
        src: PathBuf,

        /// Minified artifact path.
        #[arg(short, long)]
        out: PathBuf,

        /// Readable artifact path. Defaults to `<out stem>.readable.js` next to `--out`.
        #[arg(long)]
        readable: Option<PathBuf>,

        /// `release` fails above the hard limit, `dev` only warns.
        #[arg(long)]
        mode: Option<BuildMode>,

        /// Override the license banner.
        #[arg(long)]
        banner: Option<String>,
    },

    /// Store files in a ZIP archive under a directory prefix.
    #[command(alias = "p")]
    Pack {
        /// Files to add, in archive order.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output archive.
        #[arg(short, long)]
        output: PathBuf,

        /// Directory prefix inside the archive (defaults to the configured prefix).
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Assemble the snippet download from generated files.
    Bundle {
        #[arg(long)]
        script: PathBuf,
        #[arg(long)]
        footer: PathBuf,
        #[arg(long)]
        attributes_table: PathBuf,
        #[arg(long)]
        attributes: PathBuf,
        #[arg(long)]
        llms: PathBuf,
        /// Documentation to excerpt. A fallback note is used when absent or unreadable.
        #[arg(long)]
        readme: Option<PathBuf>,

        /// Output archive (defaults to the configured download name).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the entries of an archive written by this tool.
    #[command(alias = "l")]
    List {
        #[arg(required = true)]
        archive: PathBuf,
    },
}

/// Default readable path: `dist/x.v1.js` becomes `dist/x.v1.readable.js`.
pub fn readable_path_for(out: &std::path::Path) -> PathBuf {
    let stem = out.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let ext = out.extension().map(|e| e.to_string_lossy().into_owned()).unwrap_or_else(|| "js".into());
    out.with_file_name(format!("{stem}.readable.{ext}"))
}
