//! Icon classification for one reading (current weather or a single forecast hour).

use crate::icons::keys::{AlternateIcon, Classification, DayPart, Icon};
use crate::icons::thresholds::*;
use crate::types::condition::Condition;

/// Scalar inputs of the single-observation classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Reading<'a> {
    pub condition: Option<&'a str>,
    pub wind_speed: Option<f64>,
    pub cloud_cover: Option<f64>,
    pub precipitation_probability: Option<f64>,
    pub is_day: bool,
}

impl Reading<'_> {
    fn possible_rain(&self, condition: Option<Condition>, window: PossibleRainWindow) -> bool {
        let precipitating = condition.is_some_and(Condition::is_precipitation);
        !precipitating
            && self
                .precipitation_probability
                .is_some_and(|p| window.contains(p))
    }
}

pub fn classify_reading(reading: &Reading<'_>, rain_window: PossibleRainWindow) -> Classification {
    let condition = reading.condition.and_then(Condition::parse);
    let part = DayPart::from_is_day(reading.is_day);
    let wind = reading.wind_speed.unwrap_or(0.0);
    let cloud = reading.cloud_cover;
    let possible_rain = reading.possible_rain(condition, rain_window);

    let icon = match condition {
        _ if wind >= WIND_DANGEROUS => Icon::Storm,
        Some(Condition::Thunderstorm) => Icon::Thunderstorm,
        Some(Condition::Hail) => Icon::Hail,
        Some(Condition::Snow) => Icon::Snow,
        Some(Condition::Sleet) => Icon::Sleet,
        Some(Condition::Rain) => Icon::Rain,
        _ if wind >= WIND_STRONG => Icon::Wind,
        Some(c) if c.obscures_visibility() => Icon::Fog,
        _ if possible_rain => Icon::LightRain,
        _ if cloud.is_some_and(|c| c >= CLOUD_CLOUDY) => Icon::Cloudy,
        _ if cloud.is_some_and(|c| c >= CLOUD_PARTLY) => Icon::PartlyCloudy(part),
        _ if part == DayPart::Night => Icon::ClearNight,
        _ => Icon::Sunny,
    };

    let alternate = match condition {
        Some(Condition::Thunderstorm) => AlternateIcon::Thunderstorm,
        Some(Condition::Snow) => AlternateIcon::Snow,
        Some(Condition::Sleet | Condition::Hail) => AlternateIcon::Sleet,
        Some(Condition::Rain) => AlternateIcon::Rainy,
        _ if possible_rain => AlternateIcon::PossiblyRainy(part),
        _ if wind >= WIND_BREEZY => AlternateIcon::Windy,
        Some(c) if c.obscures_visibility() => AlternateIcon::Foggy,
        _ if cloud.is_some_and(|c| c >= CLOUD_CLOUDY) => AlternateIcon::Cloudy,
        _ if cloud.is_some_and(|c| c >= CLOUD_PARTLY) => AlternateIcon::PartlyCloudy(part),
        _ => AlternateIcon::Clear(part),
    };

    Classification { icon, alternate }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(reading: Reading<'_>) -> Classification {
        classify_reading(&reading, PossibleRainWindow::default())
    }

    #[test]
    fn test_dangerous_wind_outranks_thunderstorm() {
        let result = classify(Reading {
            condition: Some("thunderstorm"),
            wind_speed: Some(120.0),
            is_day: true,
            ..Reading::default()
        });
        assert_eq!(result.icon, Icon::Storm);
        assert_eq!(result.alternate, AlternateIcon::Thunderstorm);
    }

    #[test]
    fn test_possible_rain_only_without_precipitation_condition() {
        let dry = classify(Reading {
            condition: Some("dry"),
            precipitation_probability: Some(45.0),
            cloud_cover: Some(95.0),
            is_day: false,
            ..Reading::default()
        });
        assert_eq!(dry.icon, Icon::LightRain);
        assert_eq!(dry.alternate, AlternateIcon::PossiblyRainy(DayPart::Night));

        let snowing = classify(Reading {
            condition: Some("snow"),
            precipitation_probability: Some(45.0),
            is_day: true,
            ..Reading::default()
        });
        assert_eq!(snowing.icon, Icon::Snow);
        assert_eq!(snowing.alternate, AlternateIcon::Snow);
    }

    #[test]
    fn test_probability_outside_window_is_not_possible_rain() {
        for probability in [10.0, 85.0] {
            let result = classify(Reading {
                condition: Some("dry"),
                precipitation_probability: Some(probability),
                cloud_cover: Some(50.0),
                is_day: true,
                ..Reading::default()
            });
            assert_eq!(result.icon, Icon::PartlyCloudy(DayPart::Day));
            assert_eq!(result.alternate, AlternateIcon::PartlyCloudy(DayPart::Day));
        }
    }

    #[test]
    fn test_custom_rain_window() {
        let reading = Reading {
            precipitation_probability: Some(15.0),
            is_day: true,
            ..Reading::default()
        };
        let window = PossibleRainWindow {
            min: 10.0,
            max: 20.0,
        };
        assert_eq!(classify_reading(&reading, window).icon, Icon::LightRain);
    }

    #[test]
    fn test_fog_and_wind() {
        let foggy = classify(Reading {
            condition: Some("fog"),
            wind_speed: Some(5.0),
            is_day: true,
            ..Reading::default()
        });
        assert_eq!(foggy.icon, Icon::Fog);
        assert_eq!(foggy.alternate, AlternateIcon::Foggy);

        let breezy_fog = classify(Reading {
            condition: Some("fog"),
            wind_speed: Some(45.0),
            is_day: true,
            ..Reading::default()
        });
        assert_eq!(breezy_fog.icon, Icon::Fog);
        assert_eq!(breezy_fog.alternate, AlternateIcon::Windy);

        let gale = classify(Reading {
            condition: Some("dry"),
            wind_speed: Some(70.0),
            is_day: true,
            ..Reading::default()
        });
        assert_eq!(gale.icon, Icon::Wind);
    }

    #[test]
    fn test_clear_fallbacks() {
        let night = classify(Reading::default());
        assert_eq!(night.icon, Icon::ClearNight);
        assert_eq!(night.alternate, AlternateIcon::Clear(DayPart::Night));

        let day = classify(Reading {
            is_day: true,
            cloud_cover: Some(10.0),
            ..Reading::default()
        });
        assert_eq!(day.icon, Icon::Sunny);
        assert_eq!(day.alternate, AlternateIcon::Clear(DayPart::Day));
    }
}
