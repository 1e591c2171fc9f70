use thiserror::Error;

/// Problems with an [`crate::EngineConfig`] detected at engine construction.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Latitude {0} is outside -90..=90")]
    InvalidLatitude(f64),

    #[error("Longitude {0} is outside -180..=180")]
    InvalidLongitude(f64),

    #[error("Panel {panel} references inverter group {inverter}, but only {groups} group(s) are configured")]
    UnknownInverter {
        panel: usize,
        inverter: usize,
        groups: usize,
    },

    #[error("Panel {panel} efficiency {efficiency}% is outside 0..=100")]
    InvalidEfficiency { panel: usize, efficiency: f64 },

    #[error("Panel {panel} tilt {tilt}° is outside 0..=90")]
    InvalidTilt { panel: usize, tilt: f64 },

    #[error("Panel {panel} area {area} m² must not be negative")]
    InvalidArea { panel: usize, area: f64 },

    #[error("Possible-rain window {min}..={max}% is not a valid percentage range")]
    InvalidRainWindow { min: f64, max: f64 },

    #[error("Application id must not be empty")]
    EmptyAppId,
}

#[derive(Debug, Error)]
pub enum DigestError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to parse JSON payload")]
    JsonParse(#[from] serde_json::Error),

    #[error("Payload is missing the '{0}' array")]
    MissingArray(&'static str),
}
