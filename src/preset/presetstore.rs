use std::fs::{
    self,
    File
};
use std::io::{
    BufReader,
    BufWriter,
    Write
};
use std::path::{
    Path,
    PathBuf
};

use tracing::info;

use crate::math::curve::axisrange::AxisRange;
use crate::math::curve::keyframe::animationcurve::AnimationCurve;
use crate::math::curve::keyframe::curverecord::CurveRecord;
use crate::preset::preseterror::PresetError;

const PRESET_EXTENSION: &str = ".json";

/// Curve presets kept as flat json files in a single directory.
#[derive(Debug, Clone)]
pub struct PresetStore {
    dir: PathBuf,
    names: Vec<String>
}

impl PresetStore {
    /// Scans `dir` for `*.json` files.
    pub fn open(dir: impl Into<PathBuf>) -> Result<PresetStore, PresetError> {
        let mut store = PresetStore { dir: dir.into(), names: Vec::new() };
        store.refresh()?;
        Ok(store)
    }

    pub fn refresh(&mut self) -> Result<(), PresetError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with(PRESET_EXTENSION) {
                    names.push(name.to_owned());
                }
            }
        }
        names.sort();
        self.names = names;
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn load(&self,
                name: &str,
                time_range: AxisRange,
                value_range: AxisRange) -> Result<AnimationCurve, PresetError> {
        if !self.contains(name) {
            return Err(PresetError::NameNotFoundError(name.to_owned()));
        }
        let curve = PresetStore::load_file(self.dir.join(name), time_range, value_range)?;
        info!(name, points = curve.len(), "preset loaded");
        Ok(curve)
    }

    pub fn load_file(file_path: impl AsRef<Path>,
                     time_range: AxisRange,
                     value_range: AxisRange) -> Result<AnimationCurve, PresetError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let record: CurveRecord = serde_json::from_reader(reader)?;
        Ok(AnimationCurve::from_record(&record, time_range, value_range)?)
    }

    /// Writes `curve` as `name`, appending `.json` when missing, and returns
    /// the file name used.
    pub fn save(&mut self, name: &str, curve: &AnimationCurve) -> Result<String, PresetError> {
        let file_name = if name.ends_with(PRESET_EXTENSION) {
            name.to_owned()
        } else {
            format!("{name}{PRESET_EXTENSION}")
        };
        let file = File::create(self.dir.join(&file_name))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &curve.to_record())?;
        writer.flush()?;
        if !self.contains(&file_name) {
            self.names.push(file_name.clone());
        }
        info!(name = %file_name, points = curve.len(), "preset saved");
        Ok(file_name)
    }
}
