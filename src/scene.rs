use std::path::Path;

use tracing::info;

use crate::config::{SceneConfig, split_scene};
use crate::error::Result;
use crate::map::{MapModel, Spawn};
use crate::validate::check_enclosure;

/// A parsed and validated scene file.
#[derive(Debug, Clone)]
pub struct Scene {
    pub config: SceneConfig,
    pub map: MapModel,
    pub spawn: Spawn,
}

impl Scene {
    /// Header, body, start marker and enclosure, in that order.
    pub fn parse(text: &str, doors: bool) -> Result<Self> {
        let (config, body) = split_scene(text)?;
        let (map, spawn) = MapModel::parse(&body, doors)?;
        let visited = check_enclosure(&map, &spawn)?;
        info!(
            width = map.width(),
            height = map.height(),
            reachable = visited.len(),
            "map validated"
        );
        Ok(Self { config, map, spawn })
    }

    pub fn load(path: &Path, doors: bool) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        info!(path = %path.display(), bytes = text.len(), "scene file read");
        Self::parse(&text, doors)
    }
}
