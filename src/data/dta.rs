//! Reader for Gamry `.dta` cyclic-voltammetry files.
//!
//! Only what the viewer needs is extracted: a handful of header fields and the
//! `Vf`/`Im` columns of every `CURVEn TABLE` block. Each curve becomes one
//! [`Cycle`]; curves with fewer than two points are kept as [`Cycle::Empty`]
//! so that cycle numbering in the file is preserved.

use std::path::Path;

use crate::error::DtaError;

const VOLTAGE_COLUMN: &str = "Vf";
const CURRENT_COLUMN: &str = "Im";

/// Header fields read from the top of a `.dta` file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DtaHeader {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    /// Scan rate in mV/s.
    pub scan_rate: Option<f64>,
    /// Number of cycles the instrument was programmed for.
    pub declared_cycles: Option<usize>,
}

/// One voltammetric cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Cycle {
    Data { voltage: Vec<f64>, current: Vec<f64> },
    Empty,
}

impl Cycle {
    pub fn is_valid(&self) -> bool {
        matches!(self, Cycle::Data { .. })
    }

    pub fn series(&self) -> Option<(&[f64], &[f64])> {
        match self {
            Cycle::Data { voltage, current } => Some((voltage, current)),
            Cycle::Empty => None,
        }
    }
}

/// Parsed content of a CV data file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CvData {
    pub header: DtaHeader,
    pub cycles: Vec<Cycle>,
}

impl CvData {
    /// Iterate the non-empty cycles in file order.
    pub fn valid_cycles(&self) -> impl Iterator<Item = (&[f64], &[f64])> {
        self.cycles.iter().filter_map(Cycle::series)
    }

    pub fn valid_cycle_count(&self) -> usize {
        self.cycles.iter().filter(|c| c.is_valid()).count()
    }

    /// The `index`-th non-empty cycle.
    pub fn valid_cycle(&self, index: usize) -> Option<(&[f64], &[f64])> {
        self.valid_cycles().nth(index)
    }
}

/// Read and parse a `.dta` file from disk.
pub fn parse_path(path: &Path) -> Result<CvData, DtaError> {
    let bytes = std::fs::read(path)?;
    parse_bytes(&bytes)
}

/// Parse the raw bytes of a `.dta` file.
///
/// Instrument software writes these files in the Windows code page; invalid
/// UTF-8 is replaced rather than rejected since only ASCII fields are used.
pub fn parse_bytes(bytes: &[u8]) -> Result<CvData, DtaError> {
    parse_str(&String::from_utf8_lossy(bytes))
}

pub fn parse_str(text: &str) -> Result<CvData, DtaError> {
    let lines: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
    let mut header = DtaHeader::default();
    let mut cycles = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let fields: Vec<&str> = lines[i].split('\t').collect();
        if is_curve_start(&fields) {
            let (cycle, next) = read_curve(&lines, i + 1, cycles.len())?;
            cycles.push(cycle);
            i = next;
            continue;
        }
        read_header_field(&mut header, &fields);
        i += 1;
    }

    if cycles.is_empty() {
        return Err(DtaError::NoCurves);
    }
    Ok(CvData { header, cycles })
}

fn is_curve_start(fields: &[&str]) -> bool {
    fields.len() >= 2 && fields[0].starts_with("CURVE") && fields[1].trim() == "TABLE"
}

fn read_header_field(header: &mut DtaHeader, fields: &[&str]) {
    if fields.len() < 3 {
        return;
    }
    let value = fields[2].trim();
    match fields[0].trim() {
        "TITLE" => header.title = Some(value.to_string()),
        "DATE" => header.date = Some(value.to_string()),
        "TIME" => header.time = Some(value.to_string()),
        "SCANRATE" => header.scan_rate = parse_number(value),
        "CYCLES" => header.declared_cycles = value.parse().ok(),
        _ => {}
    }
}

/// Read one curve table starting at the column-name line. Returns the cycle
/// and the index of the first line after the table.
fn read_curve(lines: &[&str], start: usize, curve: usize) -> Result<(Cycle, usize), DtaError> {
    let columns: Vec<&str> = lines
        .get(start)
        .map(|l| l.split('\t').map(str::trim).collect())
        .unwrap_or_default();
    let vf = column_index(&columns, VOLTAGE_COLUMN, curve)?;
    let im = column_index(&columns, CURRENT_COLUMN, curve)?;

    // column names, then units
    let mut i = start + 2;
    let mut voltage = Vec::new();
    let mut current = Vec::new();
    while i < lines.len() && lines[i].starts_with('\t') {
        let fields: Vec<&str> = lines[i].split('\t').collect();
        voltage.push(number_at(&fields, vf, curve, i)?);
        current.push(number_at(&fields, im, curve, i)?);
        i += 1;
    }

    let cycle = if voltage.len() < 2 {
        Cycle::Empty
    } else {
        Cycle::Data { voltage, current }
    };
    Ok((cycle, i))
}

fn column_index(columns: &[&str], name: &'static str, curve: usize) -> Result<usize, DtaError> {
    columns
        .iter()
        .position(|c| *c == name)
        .ok_or(DtaError::MissingColumn {
            curve,
            column: name,
        })
}

fn number_at(fields: &[&str], idx: usize, curve: usize, line: usize) -> Result<f64, DtaError> {
    let raw = fields.get(idx).copied().unwrap_or("").trim();
    parse_number(raw).ok_or_else(|| DtaError::BadNumber {
        curve,
        line: line + 1,
        value: raw.to_string(),
    })
}

/// Parse a finite number written with either a decimal point or a decimal comma.
/// `NaN` and infinities are refused.
fn parse_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>()
        .ok()
        .or_else(|| raw.replace(',', ".").parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "EXPLAIN\r\nTAG\tCV\r\nTITLE\tLABEL\tCyclic Voltammetry\tTest &Identifier\r\nDATE\tLABEL\t3/3/2022\tDate\r\nSCANRATE\tQUANT\t1.00000E+002\tScan Rate (mV/s)\r\nCYCLES\tIQUANT\t2\tCycles (#)\r\nCURVE1\tTABLE\r\n\tPt\tT\tVf\tIm\tVu\r\n\t#\ts\tV vs. Ref.\tA\tV\r\n\t0\t0,01\t-0,5\t1E-6\t0\r\n\t1\t0,02\t-0,4\t2E-6\t0\r\nCURVE2\tTABLE\r\n\tPt\tT\tVf\tIm\tVu\r\n\t#\ts\tV vs. Ref.\tA\tV\r\n";

    #[test]
    fn reads_header_and_curves() {
        let data = parse_str(SAMPLE).unwrap();
        assert_eq!(data.header.title.as_deref(), Some("Cyclic Voltammetry"));
        assert_eq!(data.header.scan_rate, Some(100.0));
        assert_eq!(data.header.declared_cycles, Some(2));
        assert_eq!(data.cycles.len(), 2);
        assert_eq!(data.valid_cycle_count(), 1);
        let (v, i) = data.valid_cycle(0).unwrap();
        assert_eq!(v, &[-0.5, -0.4]);
        assert_eq!(i, &[1e-6, 2e-6]);
        assert_eq!(data.cycles[1], Cycle::Empty);
    }

    #[test]
    fn decimal_comma_is_accepted() {
        assert_eq!(parse_number("1,5"), Some(1.5));
        assert_eq!(parse_number("-2.5E-3"), Some(-0.0025));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("-infinity"), None);
    }
}
