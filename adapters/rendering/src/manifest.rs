//! Sprite dimensions loaded from a TOML manifest.

use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{bail, Context, Result};
use nrogue_core::{AssetResolver, SpriteHandle, SpriteKey, StandardSprites};
use serde::Deserialize;
use tracing::warn;

const SUPPORTED_MANIFEST_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
struct Manifest {
    version: u32,
    #[serde(default)]
    sprites: BTreeMap<String, SpriteEntry>,
}

#[derive(Debug, Deserialize)]
struct SpriteEntry {
    width: f32,
    height: f32,
    #[serde(default)]
    id: Option<u32>,
}

/// Asset resolver overriding the stock sprite dimensions.
///
/// Keys missing from the manifest resolve to [`StandardSprites`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpriteManifest {
    overrides: BTreeMap<SpriteKey, SpriteHandle>,
}

impl SpriteManifest {
    /// Loads the manifest located at the provided path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read sprite manifest at {}", path.display()))?;
        Self::parse(&contents)
    }

    /// Parses manifest contents.
    ///
    /// ```toml
    /// version = 1
    ///
    /// [sprites."pickup.cube"]
    /// width = 32
    /// height = 32
    /// ```
    pub fn parse(contents: &str) -> Result<Self> {
        let manifest: Manifest =
            toml::from_str(contents).context("failed to parse sprite manifest toml contents")?;
        if manifest.version != SUPPORTED_MANIFEST_VERSION {
            bail!(
                "unsupported sprite manifest version {}; expected {}",
                manifest.version,
                SUPPORTED_MANIFEST_VERSION
            );
        }

        let mut overrides = BTreeMap::new();
        for (name, entry) in manifest.sprites {
            let Some(key) = SpriteKey::from_tag(&name) else {
                warn!(key = %name, "ignoring unknown sprite key in manifest");
                continue;
            };
            if !(entry.width > 0.0 && entry.height > 0.0) {
                bail!(
                    "sprite `{name}` has non-positive dimensions {}x{}",
                    entry.width,
                    entry.height
                );
            }
            let id = entry.id.unwrap_or(key as u32);
            let _ = overrides.insert(key, SpriteHandle::new(id, entry.width, entry.height));
        }
        Ok(Self { overrides })
    }

    /// Number of keys the manifest overrides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    /// Reports whether the manifest overrides nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

impl AssetResolver for SpriteManifest {
    fn resolve(&self, key: SpriteKey) -> SpriteHandle {
        self.overrides
            .get(&key)
            .copied()
            .unwrap_or_else(|| StandardSprites.resolve(key))
    }
}
