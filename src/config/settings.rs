use std::env;
use std::path::PathBuf;

pub const DATA_DIR_ENV: &str = "TFC_DATA_DIR";

pub struct RatingSettings {
    pub mu: f64,
    pub sigma: f64,
    pub beta: f64,
    pub tau: f64,
    pub draw_probability: f64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        let sigma = 25.0 / 3.0;
        Self {
            mu: 25.0,
            sigma,
            beta: sigma / 2.0,
            tau: sigma / 100.0,
            draw_probability: 0.10,
        }
    }
}

pub struct HistorySettings {
    /// Root holding one folder per event
    pub data_dir: PathBuf,
    /// Events that define the streak window and who counts as active
    pub recent_events: Vec<String>,
    /// Only these events are rated; empty means all of them
    pub rated_events: Vec<String>,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("Data/Stats/TFC"),
            recent_events: Vec::new(),
            rated_events: Vec::new(),
        }
    }
}

pub struct AppConfig {
    pub rating: RatingSettings,
    pub history: HistorySettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        let mut history = HistorySettings::default();
        if let Ok(dir) = env::var(DATA_DIR_ENV) {
            history.data_dir = PathBuf::from(dir);
        }

        Self {
            rating: RatingSettings::default(),
            history,
        }
    }

    /// Apply command-line overrides on top of defaults and environment
    pub fn with_data_dir(mut self, data_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = data_dir {
            self.history.data_dir = dir;
        }
        self
    }

    pub fn with_recent_events(mut self, recent_events: Vec<String>) -> Self {
        self.history.recent_events = recent_events;
        self
    }

    pub fn with_rated_events(mut self, rated_events: Vec<String>) -> Self {
        self.history.rated_events = rated_events;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_defaults() {
        let rating = RatingSettings::default();
        assert_eq!(rating.mu, 25.0);
        assert!((rating.sigma - 8.333333).abs() < 1e-6);
        assert!((rating.beta - rating.sigma / 2.0).abs() < 1e-12);
        assert!((rating.tau - rating.sigma / 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_cli_override_wins() {
        let config = AppConfig::new().with_data_dir(Some(PathBuf::from("/tmp/tfc")));
        assert_eq!(config.history.data_dir, PathBuf::from("/tmp/tfc"));

        let config = config.with_data_dir(None);
        assert_eq!(config.history.data_dir, PathBuf::from("/tmp/tfc"));
    }
}
