//! Session persistence: save and load the whole analysis to/from JSON.
//!
//! The file starts with a format tag and a schema version. Files with another
//! tag or version are rejected before anything else is read, and a file that
//! decodes but breaks a model invariant is rejected as a whole, so a failed
//! import never leaves a half-loaded session behind.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::colors;
use crate::data::dta::{Cycle, CvData, DtaHeader};
use crate::data::experiment::{Experiment, ExperimentRegistry};
use crate::data::plot::{Plot, PlotCollection, PlotSettings};
use crate::data::session::{Session, SessionContents};
use crate::data::trace::{LineStyle, Trace, TraceSource};
use crate::error::{SessionError, ValidationError};

pub const SESSION_FORMAT: &str = "cvviewer-session";
pub const SESSION_VERSION: u32 = 1;

// ---------- Serializable mirror types ----------

/// Serializable version of DtaHeader.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DtaHeaderSerde {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub scan_rate: Option<f64>,
    pub declared_cycles: Option<usize>,
}

impl From<&DtaHeader> for DtaHeaderSerde {
    fn from(h: &DtaHeader) -> Self {
        Self {
            title: h.title.clone(),
            date: h.date.clone(),
            time: h.time.clone(),
            scan_rate: h.scan_rate,
            declared_cycles: h.declared_cycles,
        }
    }
}

impl DtaHeaderSerde {
    pub fn into_header(self) -> DtaHeader {
        DtaHeader {
            title: self.title,
            date: self.date,
            time: self.time,
            scan_rate: self.scan_rate,
            declared_cycles: self.declared_cycles,
        }
    }
}

/// One cycle; `None` in the file marks an empty cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleSerde {
    pub voltage: Vec<f64>,
    pub current: Vec<f64>,
}

/// Serializable experiment entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentSerde {
    pub name: String,
    pub filename: String,
    pub area: f64,
    pub vref: f64,
    #[serde(default)]
    pub header: DtaHeaderSerde,
    pub cycles: Vec<Option<CycleSerde>>,
}

impl ExperimentSerde {
    pub fn from_experiment(name: &str, e: &Experiment) -> Self {
        Self {
            name: name.to_string(),
            filename: e.filename.clone(),
            area: e.area(),
            vref: e.vref,
            header: DtaHeaderSerde::from(&e.data.header),
            cycles: e
                .data
                .cycles
                .iter()
                .map(|c| {
                    c.series().map(|(v, i)| CycleSerde {
                        voltage: v.to_vec(),
                        current: i.to_vec(),
                    })
                })
                .collect(),
        }
    }

    pub fn into_experiment(self) -> Result<(String, Experiment), SessionError> {
        let cycles = self
            .cycles
            .into_iter()
            .map(|c| match c {
                Some(CycleSerde { voltage, current }) => Cycle::Data { voltage, current },
                None => Cycle::Empty,
            })
            .collect();
        let data = CvData {
            header: self.header.into_header(),
            cycles,
        };
        let exp = Experiment::new(data, self.area, self.vref, self.filename)?;
        Ok((self.name, exp))
    }
}

/// Serializable trace; the color is stored as `#rrggbb`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceSerde {
    pub name: String,
    pub voltage: Vec<f64>,
    pub current: Vec<f64>,
    pub color: String,
    pub style: LineStyle,
    pub experiment: String,
    pub cycle: usize,
}

impl From<&Trace> for TraceSerde {
    fn from(t: &Trace) -> Self {
        Self {
            name: t.name.clone(),
            voltage: t.voltage.clone(),
            current: t.current.clone(),
            color: colors::to_hex(t.color),
            style: t.style,
            experiment: t.source.experiment.clone(),
            cycle: t.source.cycle,
        }
    }
}

impl TraceSerde {
    pub fn into_trace(self) -> Result<Trace, SessionError> {
        let color = colors::from_hex(&self.color).ok_or(SessionError::BadColor(self.color))?;
        Ok(Trace {
            name: self.name,
            voltage: self.voltage,
            current: self.current,
            color,
            style: self.style,
            source: TraceSource::new(self.experiment, self.cycle),
        })
    }
}

/// Serializable plot entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotSerde {
    pub name: String,
    pub traces: Vec<TraceSerde>,
    pub settings: PlotSettings,
}

/// Whole session document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionFile {
    pub format: String,
    pub version: u32,
    #[serde(default)]
    pub exported_at: Option<String>,
    pub experiments: Vec<ExperimentSerde>,
    pub plots: Vec<PlotSerde>,
}

/// Just the leading fields, read before committing to the full schema.
#[derive(Debug, Deserialize)]
struct SessionHeader {
    format: String,
    version: u32,
}

impl SessionFile {
    pub fn from_session(session: &Session) -> Self {
        Self {
            format: SESSION_FORMAT.to_string(),
            version: SESSION_VERSION,
            exported_at: Some(chrono::Local::now().to_rfc3339()),
            experiments: session
                .experiments
                .iter()
                .map(|(name, e)| ExperimentSerde::from_experiment(name, e))
                .collect(),
            plots: session
                .plots
                .iter()
                .map(|p| PlotSerde {
                    name: p.name.clone(),
                    traces: p.traces.iter().map(TraceSerde::from).collect(),
                    settings: p.settings.clone(),
                })
                .collect(),
        }
    }

    /// Rebuild the model, enforcing the same invariants as interactive edits.
    pub fn into_contents(self) -> Result<SessionContents, SessionError> {
        let mut experiments = ExperimentRegistry::new();
        for e in self.experiments {
            let (name, exp) = e.into_experiment()?;
            experiments.insert(&name, exp)?;
        }

        let mut plots = PlotCollection::default();
        for p in self.plots {
            p.settings.validate()?;
            let mut plot = Plot::new(p.name);
            plot.settings = p.settings;
            for t in p.traces {
                let trace = t.into_trace()?;
                if !experiments.contains(&trace.source.experiment) {
                    return Err(ValidationError::UnknownExperiment(trace.source.experiment).into());
                }
                if plot.traces.iter().any(|o| o.name == trace.name) {
                    return Err(ValidationError::DuplicateLabel(trace.name).into());
                }
                let available = experiments
                    .get(&trace.source.experiment)
                    .map_or(0, Experiment::valid_cycle_count);
                if trace.source.cycle >= available {
                    return Err(ValidationError::CycleOutOfRange {
                        cycle: trace.source.cycle,
                        available,
                    }
                    .into());
                }
                if plot.position_of(&trace.source.experiment, trace.source.cycle).is_some() {
                    return Err(ValidationError::DuplicateCycle {
                        experiment: trace.source.experiment,
                        cycle: trace.source.cycle,
                    }
                    .into());
                }
                plot.traces.push(trace);
            }
            plots.insert(plot)?;
        }

        Ok(SessionContents { experiments, plots })
    }
}

// ---------- Public API ----------

/// Serialize the session as pretty JSON.
pub fn session_to_json(session: &Session) -> Result<String, SessionError> {
    Ok(serde_json::to_string_pretty(&SessionFile::from_session(session))?)
}

/// Parse and validate a session document.
pub fn session_from_json(json: &str) -> Result<SessionContents, SessionError> {
    let header: SessionHeader = serde_json::from_str(json)?;
    if header.format != SESSION_FORMAT {
        return Err(SessionError::WrongFormat(header.format));
    }
    if header.version != SESSION_VERSION {
        return Err(SessionError::UnsupportedVersion {
            found: header.version,
            expected: SESSION_VERSION,
        });
    }
    let file: SessionFile = serde_json::from_str(json)?;
    file.into_contents()
}

/// Save the session to a JSON file at the given path.
pub fn save_session_to_path(session: &Session, path: &Path) -> Result<(), SessionError> {
    let txt = session_to_json(session)?;
    std::fs::write(path, txt)?;
    log::info!("session saved to {:?}", path);
    Ok(())
}

/// Load a session document from the given path.
pub fn load_session_from_path(path: &Path) -> Result<SessionContents, SessionError> {
    let txt = std::fs::read_to_string(path)?;
    let contents = session_from_json(&txt)?;
    log::info!("session loaded from {:?}", path);
    Ok(contents)
}

/// Load a session document held in memory, e.g. a file dropped without a path.
pub fn load_session_from_bytes(bytes: &[u8]) -> Result<SessionContents, SessionError> {
    session_from_json(&String::from_utf8_lossy(bytes))
}
