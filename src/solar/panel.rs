//! Panel geometry and inverter grouping of a PV installation.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// A single fixed panel (or string of identical panels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarPanel {
    /// Facing direction in degrees, clockwise from north (180 = south).
    pub azimuth: f64,
    /// Tilt from horizontal in degrees (0 = flat, 90 = vertical).
    pub tilt: f64,
    /// Area in square metres.
    pub area: f64,
    /// Efficiency in percent.
    pub efficiency: f64,
    /// Index of the inverter group the panel feeds.
    #[serde(default)]
    pub inverter: usize,
}

/// Panels sharing one inverter, whose combined hourly output is capped at `capacity` Wh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InverterGroup {
    /// Maximum Wh per hour; `<= 0` means uncapped.
    pub capacity: f64,
    pub panels: Vec<SolarPanel>,
}

impl InverterGroup {
    /// Applies the group's clipping limit to an output value.
    pub fn clip(&self, output: f64) -> f64 {
        if self.capacity > 0.0 {
            output.min(self.capacity)
        } else {
            output
        }
    }
}

/// A complete PV installation: ordered inverter groups and their panels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PvSystem {
    groups: Vec<InverterGroup>,
}

impl PvSystem {
    /// Builds the installation from a flat panel list plus per-group capacities.
    ///
    /// Panels keep their relative order inside each group.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownInverter`] when a panel references a group index
    /// beyond `capacities`, or a geometry error for out-of-range panel values.
    pub fn from_panels(panels: &[SolarPanel], capacities: &[f64]) -> Result<Self, ConfigError> {
        let mut groups: Vec<InverterGroup> = capacities
            .iter()
            .map(|&capacity| InverterGroup {
                capacity,
                panels: Vec::new(),
            })
            .collect();
        let group_count = groups.len();

        for (index, panel) in panels.iter().enumerate() {
            validate_panel(index, panel)?;
            let group = groups
                .get_mut(panel.inverter)
                .ok_or(ConfigError::UnknownInverter {
                    panel: index,
                    inverter: panel.inverter,
                    groups: group_count,
                })?;
            group.panels.push(*panel);
        }
        Ok(Self { groups })
    }

    pub fn groups(&self) -> &[InverterGroup] {
        &self.groups
    }

    pub fn panel_count(&self) -> usize {
        self.groups.iter().map(|g| g.panels.len()).sum()
    }

    pub fn has_panels(&self) -> bool {
        self.panel_count() > 0
    }

    /// Re-checks panel geometry, e.g. after deserializing a `PvSystem` directly.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.groups
            .iter()
            .flat_map(|g| g.panels.iter())
            .enumerate()
            .try_for_each(|(index, panel)| validate_panel(index, panel))
    }
}

fn validate_panel(index: usize, panel: &SolarPanel) -> Result<(), ConfigError> {
    if !(0.0..=100.0).contains(&panel.efficiency) {
        return Err(ConfigError::InvalidEfficiency {
            panel: index,
            efficiency: panel.efficiency,
        });
    }
    if !(0.0..=90.0).contains(&panel.tilt) {
        return Err(ConfigError::InvalidTilt {
            panel: index,
            tilt: panel.tilt,
        });
    }
    if panel.area < 0.0 || panel.area.is_nan() {
        return Err(ConfigError::InvalidArea {
            panel: index,
            area: panel.area,
        });
    }
    Ok(())
}
