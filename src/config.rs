use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub camera: CameraSettings,
    pub detector: DetectorSettings,
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub width: u32,
    pub height: u32,
    pub frames_per_second: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DetectorSettings {
    pub model_base_path: String,
    pub min_confidence: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub tick_interval_ms: u64,
    pub countdown_seconds: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            camera: CameraSettings::default(),
            detector: DetectorSettings::default(),
            session: SessionSettings::default(),
        }
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            frames_per_second: 30,
        }
    }
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            model_base_path: "models".to_string(),
            min_confidence: 0.5,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            countdown_seconds: 5,
        }
    }
}

impl Settings {
    // Layering: defaults, then an optional agelens.toml, then AGELENS_* env vars.
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("agelens").required(false))
            .add_source(config::Environment::with_prefix("AGELENS").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_a_five_second_session() {
        let settings = Settings::default();
        assert_eq!(settings.session.tick_interval_ms, 1000);
        assert_eq!(settings.session.countdown_seconds, 5);
        assert!(settings.detector.min_confidence > 0.0);
    }

    #[test]
    fn load_without_file_falls_back_to_defaults() {
        let settings = Settings::load().expect("Failed to load settings");
        assert_eq!(settings.session.countdown_seconds, 5);
    }
}
