use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use wu_archive::bundle::prefixed_name;
use wu_archive::{encode_archive, list_entries, SnippetBundle};
use wu_core::{BuildMode, FileEntry, WuConfig};
use wu_minify::{ArtifactPaths, BuildPipeline};

use crate::cli::readable_path_for;

pub fn build(
    config: &WuConfig,
    src: &Path,
    out: &Path,
    readable: Option<&Path>,
    mode: Option<BuildMode>,
    banner: Option<&str>,
) -> Result<()> {
    let mode = mode.unwrap_or(config.build.mode);
    let mut pipeline = BuildPipeline::from_config(&config.build, mode);
    if let Some(banner) = banner {
        pipeline = pipeline.with_banner(banner);
    }
    let paths = ArtifactPaths {
        minified: out.to_path_buf(),
        readable: readable.map(Path::to_path_buf).unwrap_or_else(|| readable_path_for(out)),
    };

    let result = pipeline.run(src, &paths)?;
    println!("✓ Built minified: {} {} bytes", paths.minified.display(), result.size());
    println!("✓ Built readable: {}", paths.readable.display());
    Ok(())
}

pub fn pack(config: &WuConfig, inputs: &[PathBuf], output: &Path, prefix: Option<&str>) -> Result<()> {
    let prefix = prefix.unwrap_or(&config.archive.prefix);
    let mut entries = Vec::with_capacity(inputs.len());
    for input in inputs {
        let file_name = input
            .file_name()
            .with_context(|| format!("{} has no file name", input.display()))?
            .to_string_lossy();
        let content = std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;
        entries.push(FileEntry::new(prefixed_name(prefix, &file_name), content));
    }
    let archive = encode_archive(&entries)?;
    write_atomically(output, &archive)?;
    println!("✓ Packed {} entries: {} {} bytes", entries.len(), output.display(), archive.len());
    Ok(())
}

pub struct BundleInputs<'a> {
    pub script: &'a Path,
    pub footer: &'a Path,
    pub attributes_table: &'a Path,
    pub attributes: &'a Path,
    pub llms: &'a Path,
    pub readme: Option<&'a Path>,
}

pub fn bundle(config: &WuConfig, inputs: &BundleInputs<'_>, output: Option<&Path>) -> Result<()> {
    let readme = inputs.readme.and_then(|path| match std::fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "readme unavailable, using fallback");
            None
        }
    });
    let bundle = SnippetBundle {
        script: read_text(inputs.script)?,
        footer_html: read_text(inputs.footer)?,
        attributes_table_html: read_text(inputs.attributes_table)?,
        attributes_text: read_text(inputs.attributes)?,
        llms_text: read_text(inputs.llms)?,
        readme,
    };
    let archive = bundle.to_zip(&config.archive)?;
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.archive.download_name));
    write_atomically(&output, &archive)?;
    println!("✓ Bundled snippet: {} {} bytes", output.display(), archive.len());
    Ok(())
}

pub fn list(archive: &Path) -> Result<()> {
    let bytes = std::fs::read(archive).with_context(|| format!("reading {}", archive.display()))?;
    for entry in list_entries(&bytes)? {
        println!(
            "{:>10}  {:08x}  {}",
            entry.size,
            entry.crc32,
            String::from_utf8_lossy(&entry.name)
        );
    }
    Ok(())
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Write through a temp file in the target directory, then rename over `path`.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.persist(path).with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote archive");
    Ok(())
}
