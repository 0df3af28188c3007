use std::path::{Path, PathBuf};

use clap::Parser;
use clap::error::ErrorKind;

use crate::error::{Error, Result};

/// First-person raycaster over a `.cub` scene file.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Args {
    /// Scene file: texture paths, colors and the map.
    pub map: PathBuf,

    /// Allow `D` cells and load the door animation frames.
    #[arg(long)]
    pub doors: bool,

    /// Directory holding door_1.png .. door_4.png.
    #[arg(long, value_name = "DIR", default_value = "textures")]
    pub door_textures: PathBuf,

    /// Draw the overhead minimap.
    #[arg(long)]
    pub minimap: bool,

    /// Turn with horizontal pointer motion.
    #[arg(long)]
    pub mouse: bool,

    /// Log filter, e.g. `debug` or `grid_raycaster=trace`. Overrides RUST_LOG.
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,
}

impl Args {
    /// Checks what clap cannot: the scene file extension.
    pub fn validate(&self) -> Result<()> {
        check_extension(&self.map)
    }

    pub fn door_dir(&self) -> Option<&Path> {
        self.doors.then_some(self.door_textures.as_path())
    }
}

/// Folds a clap failure into a one-line `Error::Args`.
///
/// Returns `None` for `--help` and `--version`, which clap should print and
/// exit on by itself.
pub fn usage_error(err: &clap::Error) -> Option<Error> {
    if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return None;
    }
    let rendered = err.to_string();
    let message = rendered
        .lines()
        .take_while(|line| !line.starts_with("Usage:"))
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("tip:"))
        .collect::<Vec<_>>()
        .join(" ");
    let message = message.strip_prefix("error: ").unwrap_or(&message);
    Some(Error::Args(message.to_string()))
}

fn check_extension(path: &Path) -> Result<()> {
    let stem_ok = path.file_stem().is_some_and(|s| !s.is_empty());
    match path.extension() {
        Some(ext) if ext == "cub" && stem_ok => Ok(()),
        _ => Err(Error::Args(format!(
            "expected a .cub scene file, got {}",
            path.display()
        ))),
    }
}
