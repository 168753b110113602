use std::fs::File;
use std::io::BufReader;
use std::path::{
    Path,
    PathBuf
};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::math::curve::axisrange::AxisRange;
use crate::vehicle::vehicleparams::VehicleParams;


#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("cannot read configuration: {0}")]
    IOError(#[from] std::io::Error),

    #[error("invalid configuration json: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    InvalidRange(String)
}


#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CurveConfiguration {
    /// ms
    pub time_range: AxisRange,
    /// km/h
    pub value_range: AxisRange
}

impl Default for CurveConfiguration {
    fn default() -> Self {
        CurveConfiguration {
            time_range: AxisRange::new(0.0, 10000.0),
            value_range: AxisRange::new(0.0, 120.0)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SchedulerConfiguration {
    pub tick_interval_ms: u64
}

impl Default for SchedulerConfiguration {
    fn default() -> Self {
        SchedulerConfiguration { tick_interval_ms: 10 }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ConfigurationJsonProp {
    vehicle: VehicleParams,
    curve: CurveConfiguration,
    scheduler: SchedulerConfiguration,
    preset_dir: PathBuf
}

impl Default for ConfigurationJsonProp {
    fn default() -> Self {
        ConfigurationJsonProp {
            vehicle: VehicleParams::default(),
            curve: CurveConfiguration::default(),
            scheduler: SchedulerConfiguration::default(),
            preset_dir: PathBuf::from(".")
        }
    }
}

/// Emulator settings. Every section of the json file is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    vehicle: VehicleParams,
    curve: CurveConfiguration,
    scheduler: SchedulerConfiguration,
    preset_dir: PathBuf
}


impl Configuration {
    pub fn vehicle(&self) -> &VehicleParams {
        &self.vehicle
    }

    pub fn curve(&self) -> &CurveConfiguration {
        &self.curve
    }

    pub fn scheduler(&self) -> &SchedulerConfiguration {
        &self.scheduler
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.scheduler.tick_interval_ms)
    }

    pub fn preset_dir(&self) -> &Path {
        &self.preset_dir
    }

    pub fn from_reader(file_path: impl AsRef<Path>) -> Result<Configuration, ConfigurationError> {
        let file = File::open(file_path.as_ref())?;
        let reader = BufReader::new(file);
        let json_prop: ConfigurationJsonProp = serde_json::from_reader(reader)?;
        let config = Configuration::from_json_prop(json_prop)?;
        info!(path = %file_path.as_ref().display(), "configuration loaded");
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Configuration, ConfigurationError> {
        let json_prop: ConfigurationJsonProp = serde_json::from_str(json)?;
        Configuration::from_json_prop(json_prop)
    }

    fn from_json_prop(json_prop: ConfigurationJsonProp) -> Result<Configuration, ConfigurationError> {
        let config = Configuration {
            vehicle: json_prop.vehicle,
            curve: json_prop.curve,
            scheduler: json_prop.scheduler,
            preset_dir: json_prop.preset_dir
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        let spans = [
            ("curve.time_range", self.curve.time_range),
            ("curve.value_range", self.curve.value_range),
            ("vehicle.rpm_range", self.vehicle.rpm_range),
            ("vehicle.speed_range", self.vehicle.speed_range)
        ];
        if let Some((name, _)) = spans.iter().find(|(_, range)| !(range.span() > 0.0)) {
            return Err(ConfigurationError::InvalidRange(format!("{name} must not be empty")));
        }
        if self.vehicle.gear_ratios.is_empty() || self.vehicle.gear_ratios.iter().any(|&r| !(r > 0.0)) {
            return Err(ConfigurationError::InvalidRange("vehicle.gear_ratios must be positive and non-empty".to_owned()));
        }
        if !(self.vehicle.mass > 0.0) {
            return Err(ConfigurationError::InvalidRange("vehicle.mass must be positive".to_owned()));
        }
        Ok(())
    }
}

impl Default for Configuration {
    fn default() -> Self {
        let json_prop = ConfigurationJsonProp::default();
        Configuration {
            vehicle: json_prop.vehicle,
            curve: json_prop.curve,
            scheduler: json_prop.scheduler,
            preset_dir: json_prop.preset_dir
        }
    }
}
