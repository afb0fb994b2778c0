//! JSON configuration for the command-line host.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{
    assets::color::ColorPair,
    foundation::error::{GameNightError, GameNightResult},
    scene::state::RenderState,
    time::format::{DEFAULT_ROSTER, Roster},
};

/// Host configuration; every field has a default so partial files are fine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameNightConfig {
    /// Template name; selects `media/<template-lowercased>.png`.
    pub template: String,
    /// Text fill color, `#RRGGBB`.
    pub text_color: String,
    /// Text outline color, `#RRGGBB`.
    pub outline_color: String,
    /// Event date, `YYYY-MM-DD`.
    pub date: String,
    /// Event time, `HH:MM`, read as UTC.
    pub time: String,
    /// Optional backdrop photo.
    pub backdrop: Option<PathBuf>,
    /// Directory the `media/` paths are resolved under.
    pub media_root: PathBuf,
    /// Serve assets under the secure-transport mount prefix.
    pub secure: bool,
    /// Explicit font file; system bold sans-serif when unset.
    pub font: Option<PathBuf>,
    /// IANA zones shown on the date card, in configured order.
    pub roster: Vec<String>,
    /// Output directory for the exported PNG.
    pub out_dir: PathBuf,
}

impl Default for GameNightConfig {
    fn default() -> Self {
        Self {
            template: "Blitz".to_string(),
            text_color: "#FFFFFF".to_string(),
            outline_color: "#000000".to_string(),
            date: String::new(),
            time: String::new(),
            backdrop: None,
            media_root: PathBuf::from("."),
            secure: false,
            font: None,
            roster: DEFAULT_ROSTER.iter().map(|s| s.to_string()).collect(),
            out_dir: PathBuf::from("."),
        }
    }
}

impl GameNightConfig {
    /// Read a config file.
    pub fn from_path(path: &Path) -> GameNightResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| GameNightError::config(format!("{}: {e}", path.display())))?;
        Ok(cfg)
    }

    /// Check fields that would otherwise fail late.
    pub fn validate(&self) -> GameNightResult<()> {
        if self.template.trim().is_empty() {
            return Err(GameNightError::config("template must be non-empty"));
        }
        if self.template.contains(['/', '\\']) || self.template.contains("..") {
            return Err(GameNightError::config(
                "template must be a plain name, not a path",
            ));
        }
        if self.roster.is_empty() {
            return Err(GameNightError::config("roster must list at least one zone"));
        }
        self.roster()?;
        Ok(())
    }

    /// Parsed roster.
    pub fn roster(&self) -> GameNightResult<Roster> {
        Roster::from_names(&self.roster).map_err(|e| GameNightError::config(e.to_string()))
    }

    /// Initial render state for these inputs (no layers loaded).
    pub fn to_state(&self) -> GameNightResult<RenderState> {
        Ok(RenderState::new(
            self.template.clone(),
            ColorPair::new(self.text_color.clone(), self.outline_color.clone()),
            self.date.clone(),
            self.time.clone(),
        )
        .with_roster(self.roster()?))
    }
}

/// Mount prefix for assets served over secure transport.
pub const SECURE_MOUNT: &str = "/game_night_generator";

/// URL path of a media asset, e.g. `/game_night_generator/media/blitz.png`.
pub fn media_url(secure: bool, file_name: &str) -> String {
    let base = if secure { SECURE_MOUNT } else { "" };
    format!("{base}/media/{file_name}")
}

/// Local path for a media URL path, rooted at `media_root`.
pub fn media_path(media_root: &Path, secure: bool, file_name: &str) -> PathBuf {
    let url = media_url(secure, file_name);
    media_root.join(url.trim_start_matches('/'))
}

impl GameNightConfig {
    /// Template image location.
    pub fn template_path(&self) -> PathBuf {
        let name = format!("{}.png", self.template.to_lowercase());
        media_path(&self.media_root, self.secure, &name)
    }

    /// Discord badge location.
    pub fn badge_path(&self) -> PathBuf {
        media_path(&self.media_root, self.secure, "discord.png")
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
