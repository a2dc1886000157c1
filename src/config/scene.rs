use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    cloud::config::CloudConfig,
    foundation::error::{FxError, FxResult},
    mask::bite::BitePlan,
    particles::profile::ParticleProfile,
    session::shake::ShakeConfig,
    shot::plan::ShotPlan,
};

/// Which of the two scene styles drives the spray.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneVariant {
    /// Sprite-textured dust spray.
    #[default]
    Photographic,
    /// Flat-colour circle bursts.
    Flat,
}

/// Image files the scene preloads, relative to `root`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AssetManifest {
    pub root: PathBuf,
    pub spray_sprites: Vec<String>,
    pub gujiya: String,
    /// Candidate names for the squirter's suspension part; the first that
    /// decodes is used.
    pub suspension: Vec<String>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            spray_sprites: vec![
                "assets/yellow dust.png".to_owned(),
                "assets/pink dust.png".to_owned(),
                "assets/blue dust.png".to_owned(),
            ],
            gujiya: "assets/gujiya.png".to_owned(),
            suspension: vec![
                "assets/pichkari-suspension.png".to_owned(),
                "assets/pitchkari-suspension.png".to_owned(),
                "assets/pichkari_suspension.png".to_owned(),
            ],
        }
    }
}

/// Every tuning table of the scene. Missing JSON fields keep their defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub variant: SceneVariant,
    /// Seed for every random draw; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub spray: ParticleProfile,
    pub burst: ParticleProfile,
    pub bites: BitePlan,
    pub cloud: CloudConfig,
    pub shots: ShotPlan,
    pub shake: ShakeConfig,
    pub assets: AssetManifest,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            variant: SceneVariant::default(),
            seed: None,
            spray: ParticleProfile::spray(),
            burst: ParticleProfile::burst(),
            bites: BitePlan::default(),
            cloud: CloudConfig::default(),
            shots: ShotPlan::default(),
            shake: ShakeConfig::default(),
            assets: AssetManifest::default(),
        }
    }
}

impl SceneConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> FxResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| FxError::serde(format!("parse scene config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> FxResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read scene config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> FxResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| FxError::serde(format!("serialize scene config: {e}")))
    }

    /// Profile the spray simulator runs with for the configured variant.
    pub fn particle_profile(&self) -> &ParticleProfile {
        match self.variant {
            SceneVariant::Photographic => &self.spray,
            SceneVariant::Flat => &self.burst,
        }
    }

    pub fn validate(&self) -> FxResult<()> {
        self.spray.validate().map_err(|e| scoped("spray", e))?;
        self.burst.validate().map_err(|e| scoped("burst", e))?;
        self.bites.validate()?;
        self.cloud.validate()?;
        self.shots.validate()?;
        self.shake.validate()?;
        if self.assets.gujiya.is_empty() {
            return Err(FxError::validation("assets.gujiya must not be empty"));
        }
        Ok(())
    }
}

fn scoped(section: &str, err: FxError) -> FxError {
    match err {
        FxError::Validation(msg) => FxError::Validation(format!("{section}: {msg}")),
        other => other,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/scene.rs"]
mod tests;
