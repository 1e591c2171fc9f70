use chrono::{TimeDelta, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;
use weather_digest::{
    EngineConfig, HourlyObservation, LatLon, PvSystem, RadarRecord, RadarWindow, SolarPanel,
    WeatherEngine,
};

fn week_of_hours() -> Vec<HourlyObservation> {
    let start = Utc.with_ymd_and_hms(2024, 6, 3, 0, 0, 0).unwrap();
    let conditions = ["dry", "dry", "rain", "fog", "dry", "thunderstorm"];
    (0..24 * 7)
        .map(|h| HourlyObservation {
            timestamp: start + TimeDelta::hours(h),
            temperature: Some(12.0 + (h % 24) as f64 * 0.5),
            wind_speed: Some((h % 13) as f64 * 3.0),
            cloud_cover: Some((h * 7 % 100) as f64),
            relative_humidity: Some(60.0 + (h % 30) as f64),
            precipitation: Some((h % 5) as f64 * 0.1),
            solar: Some(((h % 24) as f64 - 4.0).max(0.0) * 0.04),
            condition: Some(conditions[h as usize % conditions.len()].to_string()),
            ..HourlyObservation::default()
        })
        .collect()
}

fn radar_records() -> Vec<RadarRecord> {
    let now = Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap();
    (0..24)
        .map(|i| {
            let grid: Vec<Vec<i64>> = (0..100)
                .map(|r| (0..100).map(|c| (r * c + i) % 250).collect())
                .collect();
            RadarRecord {
                timestamp: now + TimeDelta::minutes(5 * i),
                source: Some("RADOLAN::RV".into()),
                precipitation_5: json!(grid),
            }
        })
        .collect()
}

fn bench_weather_digest(c: &mut Criterion) {
    let panel = SolarPanel {
        azimuth: 180.0,
        tilt: 30.0,
        area: 1.7,
        efficiency: 21.0,
        inverter: 0,
    };
    let config = EngineConfig::builder()
        .location(LatLon(52.52, 13.40))
        .timezone(chrono_tz::Europe::Berlin)
        .pv(PvSystem::from_panels(&[panel; 10], &[3000.0]).unwrap())
        .build();
    let engine = WeatherEngine::new(config).unwrap();
    let hours = week_of_hours();
    let now = Utc.with_ymd_and_hms(2024, 6, 3, 3, 0, 0).unwrap();

    c.bench_function("daily_summaries", |b| {
        b.iter(|| {
            engine
                .daily_summaries()
                .observations(black_box(&hours))
                .now(now)
                .call()
        })
    });

    let records = radar_records();
    let radar_now = Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap();
    c.bench_function("radar_ingest_and_forecast", |b| {
        b.iter(|| {
            let mut window = RadarWindow::new();
            window.ingest(black_box(&records), radar_now);
            window.forecast()
        })
    });
}

criterion_group!(benches, bench_weather_digest);
criterion_main!(benches);
