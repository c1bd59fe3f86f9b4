//! Configuration for the whisper pipeline
//!
//! Every field has a default, so a missing file or an empty JSON object
//! both give the stock behaviour. Configuration is looked up in this order:
//!
//! 1. An explicit path (`--config FILE`)
//! 2. `.drift_config.json` in the working directory
//! 3. `drift/config.json` under the user's config directory
//! 4. Built-in defaults

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{DriftError, Result, ResultExt};
use super::techniques::Technique;

/// File name looked up in a working directory
pub const CONFIG_FILE_NAME: &str = ".drift_config.json";

/// Voices a speech collaborator may read a whisper in
pub const SPECTRAL_VOICES: &[&str] = &["Charon", "Kore", "Fenrir", "Puck", "Zephyr"];

/// Tunables for selection, generation and emission pacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    /// Half-width of the forward cone in degrees (60 = 120° cone)
    pub cone_half_angle_deg: f64,
    /// Maximum number of words visited by the Markov walk
    pub markov_steps: usize,
    /// Minimum number of chunks a cut-up aims for
    pub cutup_target_min: usize,
    /// Maximum number of chunks a cut-up aims for
    pub cutup_target_max: usize,
    /// Token stride of the skip-gram sampler
    pub skipgram_stride: usize,
    /// Probability that a visited token is kept by the skip-gram sampler
    pub skipgram_probability: f64,
    /// Maximum number of tokens a skip-gram keeps
    pub skipgram_cap: usize,
    /// Lower bound of the delay between emitted characters
    pub emit_delay_min_ms: u64,
    /// Upper bound of the delay between emitted characters
    pub emit_delay_max_ms: u64,
    /// Radius around the user that counts as "nearby"
    pub drift_radius_m: f64,
    /// Movement in degrees of latitude or longitude that triggers a new drift
    pub drift_threshold_deg: f64,
    /// Techniques eligible for random selection
    pub techniques: Vec<Technique>,
    /// Voice names attached to drift log entries
    pub voices: Vec<String>,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            cone_half_angle_deg: 60.0,
            markov_steps: 8,
            cutup_target_min: 4,
            cutup_target_max: 6,
            skipgram_stride: 2,
            skipgram_probability: 0.7,
            skipgram_cap: 8,
            emit_delay_min_ms: 20,
            emit_delay_max_ms: 70,
            drift_radius_m: 2000.0,
            drift_threshold_deg: 0.00015,
            techniques: Technique::ALL.to_vec(),
            voices: SPECTRAL_VOICES.iter().map(|v| v.to_string()).collect(),
        }
    }
}

impl DriftConfig {
    /// Load configuration for a working directory.
    ///
    /// Falls back to the user-level file and then to defaults. A file that
    /// exists but cannot be parsed is an error, not a silent default.
    pub fn load(dir: &Path) -> Result<Self> {
        let local = dir.join(CONFIG_FILE_NAME);
        if local.exists() {
            return Self::load_from_file(&local);
        }
        if let Some(user) = Self::user_config_path() {
            if user.exists() {
                return Self::load_from_file(&user);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DriftError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents).context(format!("loading {}", path.display()))
    }

    /// Parse and validate configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| DriftError::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// `drift/config.json` under the platform config directory.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("drift").join("config.json"))
    }

    /// Save configuration as pretty JSON.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Reject settings the generator cannot honour.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=180.0).contains(&self.cone_half_angle_deg) {
            return Err(DriftError::invalid_config(format!(
                "cone_half_angle_deg must be within [0, 180], got {}",
                self.cone_half_angle_deg
            )));
        }
        if self.markov_steps == 0 {
            return Err(DriftError::invalid_config("markov_steps must be at least 1"));
        }
        if self.cutup_target_min == 0 || self.cutup_target_min > self.cutup_target_max {
            return Err(DriftError::invalid_config(format!(
                "cut-up target range {}..={} is empty",
                self.cutup_target_min, self.cutup_target_max
            )));
        }
        if self.skipgram_stride == 0 || self.skipgram_cap == 0 {
            return Err(DriftError::invalid_config(
                "skipgram_stride and skipgram_cap must be at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.skipgram_probability) {
            return Err(DriftError::invalid_config(format!(
                "skipgram_probability must be within [0, 1], got {}",
                self.skipgram_probability
            )));
        }
        if self.emit_delay_min_ms > self.emit_delay_max_ms {
            return Err(DriftError::invalid_config(format!(
                "emit delay range {}..={} ms is empty",
                self.emit_delay_min_ms, self.emit_delay_max_ms
            )));
        }
        if self.drift_radius_m < 0.0 || self.drift_threshold_deg < 0.0 {
            return Err(DriftError::invalid_config(
                "drift_radius_m and drift_threshold_deg must not be negative",
            ));
        }
        if self.techniques.is_empty() {
            return Err(DriftError::invalid_config("at least one technique must be enabled"));
        }
        Ok(())
    }
}
