//! Loaded experiments and the insertion-ordered registry that holds them.

use std::collections::HashMap;
use std::path::Path;

use crate::data::dta::{self, CvData};
use crate::error::{ValidationError, ViewerError};

/// Smallest electrode area accepted by the upload form, in cm².
pub const MIN_AREA: f64 = 1e-6;

/// One loaded CV run with its user-supplied metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Experiment {
    pub data: CvData,
    /// Electrode area in cm².
    area: f64,
    /// Potential of the reference electrode versus S.H.E., in V.
    pub vref: f64,
    /// Name of the file the data was read from.
    pub filename: String,
}

impl Experiment {
    pub fn new(
        data: CvData,
        area: f64,
        vref: f64,
        filename: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if !area.is_finite() || area <= 0.0 {
            return Err(ValidationError::InvalidArea(area));
        }
        Ok(Self {
            data,
            area,
            vref,
            filename: filename.into(),
        })
    }

    /// Load and parse a `.dta` file.
    pub fn from_file(path: &Path, area: f64, vref: f64) -> Result<Self, ViewerError> {
        let filename = path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();
        let data = dta::parse_path(path)?;
        log::info!(
            "read {filename}: {} cycles ({} valid)",
            data.cycles.len(),
            data.valid_cycle_count()
        );
        Ok(Self::new(data, area, vref, filename)?)
    }

    /// Parse an in-memory `.dta` file, e.g. one dropped onto the window.
    pub fn from_bytes(filename: &str, bytes: &[u8], area: f64, vref: f64) -> Result<Self, ViewerError> {
        let data = dta::parse_bytes(bytes)?;
        Ok(Self::new(data, area, vref, filename)?)
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn valid_cycle_count(&self) -> usize {
        self.data.valid_cycle_count()
    }
}

/// Experiments keyed by name, iterated in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExperimentRegistry {
    experiments: HashMap<String, Experiment>,
    order: Vec<String>,
}

impl ExperimentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.experiments.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Experiment> {
        self.experiments.get(name)
    }

    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Experiment)> {
        self.order
            .iter()
            .filter_map(|n| self.experiments.get(n).map(|e| (n.as_str(), e)))
    }

    /// Check a candidate name without inserting anything.
    pub fn check_name(&self, name: &str) -> Result<(), ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.contains(name) {
            return Err(ValidationError::DuplicateExperiment(name.to_string()));
        }
        Ok(())
    }

    pub fn insert(&mut self, name: &str, experiment: Experiment) -> Result<(), ValidationError> {
        self.check_name(name)?;
        self.order.push(name.to_string());
        self.experiments.insert(name.to_string(), experiment);
        Ok(())
    }

    /// Name proposed by the upload form for the next experiment.
    pub fn default_name(&self) -> String {
        format!("experiment_{}", self.len())
    }

    pub fn clear(&mut self) {
        self.experiments.clear();
        self.order.clear();
    }
}
