use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayPart {
    Day,
    Night,
}

impl DayPart {
    pub fn from_is_day(is_day: bool) -> Self {
        if is_day {
            DayPart::Day
        } else {
            DayPart::Night
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            DayPart::Day => "day",
            DayPart::Night => "night",
        }
    }
}

/// General icon key (`icon_special`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    /// Hurricane-force wind.
    Storm,
    Thunderstorm,
    ScatteredThunderstorm,
    Hail,
    Snow,
    Sleet,
    Rain,
    Wind,
    Fog,
    LightRain,
    Cloudy,
    PartlyCloudy(DayPart),
    ClearNight,
    Sunny,
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Icon::Storm => write!(f, "storm"),
            Icon::Thunderstorm => write!(f, "thunderstorm"),
            Icon::ScatteredThunderstorm => write!(f, "scattered-thunderstorm"),
            Icon::Hail => write!(f, "hail"),
            Icon::Snow => write!(f, "snow"),
            Icon::Sleet => write!(f, "sleet"),
            Icon::Rain => write!(f, "rain"),
            Icon::Wind => write!(f, "wind"),
            Icon::Fog => write!(f, "fog"),
            Icon::LightRain => write!(f, "light-rain"),
            Icon::Cloudy => write!(f, "cloudy"),
            Icon::PartlyCloudy(part) => write!(f, "partly-cloudy-{}", part.suffix()),
            Icon::ClearNight => write!(f, "clear-night"),
            Icon::Sunny => write!(f, "sunny"),
        }
    }
}

/// Alternate icon key, naming an asset file (`iconUrl`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlternateIcon {
    Thunderstorm,
    PossiblyThunderstorm(DayPart),
    Snow,
    PossiblySnow(DayPart),
    Sleet,
    PossiblySleet(DayPart),
    Rainy,
    PossiblyRainy(DayPart),
    Windy,
    Foggy,
    Cloudy,
    PartlyCloudy(DayPart),
    Clear(DayPart),
}

impl fmt::Display for AlternateIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlternateIcon::Thunderstorm => write!(f, "thunderstorm"),
            AlternateIcon::PossiblyThunderstorm(part) => {
                write!(f, "possibly-thunderstorm-{}", part.suffix())
            }
            AlternateIcon::Snow => write!(f, "snow"),
            AlternateIcon::PossiblySnow(part) => write!(f, "possibly-snow-{}", part.suffix()),
            AlternateIcon::Sleet => write!(f, "sleet"),
            AlternateIcon::PossiblySleet(part) => write!(f, "possibly-sleet-{}", part.suffix()),
            AlternateIcon::Rainy => write!(f, "rainy"),
            AlternateIcon::PossiblyRainy(part) => write!(f, "possibly-rainy-{}", part.suffix()),
            AlternateIcon::Windy => write!(f, "windy"),
            AlternateIcon::Foggy => write!(f, "foggy"),
            AlternateIcon::Cloudy => write!(f, "cloudy"),
            AlternateIcon::PartlyCloudy(part) => write!(f, "partly-cloudy-{}", part.suffix()),
            AlternateIcon::Clear(part) => write!(f, "clear-{}", part.suffix()),
        }
    }
}

/// Both icon outputs of a classifier run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub icon: Icon,
    pub alternate: AlternateIcon,
}

impl Classification {
    /// Asset path of the alternate icon for the application `app_id`.
    ///
    /// ```
    /// use weather_digest::{AlternateIcon, Classification, DayPart, Icon};
    ///
    /// let c = Classification { icon: Icon::Sunny, alternate: AlternateIcon::Clear(DayPart::Day) };
    /// assert_eq!(c.asset_path("brightsky"), "/brightsky/icons/clear-day.svg");
    /// ```
    pub fn asset_path(&self, app_id: &str) -> String {
        format!("/{app_id}/icons/{}.svg", self.alternate)
    }
}
