//! Defines the `Condition` enum, mapping the categorical `condition` strings of
//! hourly records to the variants the icon classifier reasons about.

/// Represents the categorical weather condition reported for an hour.
///
/// Records carry the condition as a lowercase string (`"rain"`, `"fog"`, ...).
/// Unknown strings map to `None` and never count towards any condition.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Condition {
    /// No precipitation.
    Dry,
    /// Fog is reducing visibility.
    Fog,
    /// Smoke or haze is reducing visibility.
    Smoke,
    /// Rain of any intensity.
    Rain,
    /// Mix of rain and snow.
    Sleet,
    /// Snowfall.
    Snow,
    /// Hail observed.
    Hail,
    /// Thunderstorm observed.
    Thunderstorm,
}

impl Condition {
    /// Attempts to convert a condition string into a `Condition` variant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weather_digest::Condition;
    ///
    /// assert_eq!(Condition::parse("thunderstorm"), Some(Condition::Thunderstorm));
    /// assert_eq!(Condition::parse("Fog"), Some(Condition::Fog));
    /// assert_eq!(Condition::parse("volcanic-ash"), None);
    /// ```
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dry" => Some(Condition::Dry),
            "fog" => Some(Condition::Fog),
            "smoke" | "haze" => Some(Condition::Smoke),
            "rain" => Some(Condition::Rain),
            "sleet" => Some(Condition::Sleet),
            "snow" => Some(Condition::Snow),
            "hail" => Some(Condition::Hail),
            "thunderstorm" => Some(Condition::Thunderstorm),
            _ => None,
        }
    }

    /// Whether the condition implies falling precipitation.
    pub fn is_precipitation(self) -> bool {
        matches!(
            self,
            Condition::Rain
                | Condition::Sleet
                | Condition::Snow
                | Condition::Hail
                | Condition::Thunderstorm
        )
    }

    pub fn obscures_visibility(self) -> bool {
        matches!(self, Condition::Fog | Condition::Smoke)
    }
}
