use crate::core::models::atom::Hybridization;
use crate::core::models::element;
use phf::{Map, phf_map};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Orbital electronegativity coefficients: `chi(q) = a + b*q + c*q^2`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GasteigerParams {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl GasteigerParams {
    pub fn electronegativity(&self, q: f64) -> f64 {
        self.a + self.b * q + self.c * q * q
    }

    /// Electronegativity of the cation (`chi(+1)`), the normalizer of each charge shift.
    pub fn cation_electronegativity(&self) -> f64 {
        self.a + self.b + self.c
    }
}

/// Hybridization classes distinguished by the parameter table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HybridClass {
    Sp3,
    Sp2,
    Sp,
}

impl From<Hybridization> for HybridClass {
    fn from(h: Hybridization) -> Self {
        match h {
            Hybridization::SP => Self::Sp,
            Hybridization::SP2 => Self::Sp2,
            _ => Self::Sp3,
        }
    }
}

impl FromStr for HybridClass {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sp3" => Ok(Self::Sp3),
            "sp2" => Ok(Self::Sp2),
            "sp" => Ok(Self::Sp),
            _ => Err(()),
        }
    }
}

impl fmt::Display for HybridClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sp3 => "sp3",
            Self::Sp2 => "sp2",
            Self::Sp => "sp",
        })
    }
}

// Gasteiger & Marsili, Tetrahedron 36, 3219 (1980), plus the usual extensions
// for B, Si, P and the heavier halogens.
static BUILTIN_PARAMS: Map<&'static str, [f64; 3]> = phf_map! {
    "H.sp3" => [7.17, 6.24, -0.56],
    "B.sp3" => [6.42, 6.24, -0.56],
    "B.sp2" => [5.98, 6.82, 1.605],
    "C.sp3" => [7.98, 9.18, 1.88],
    "C.sp2" => [8.79, 9.32, 1.51],
    "C.sp" => [10.39, 9.45, 0.73],
    "N.sp3" => [11.54, 10.82, 1.36],
    "N.sp2" => [12.87, 11.15, 0.85],
    "N.sp" => [15.68, 11.70, -0.27],
    "O.sp3" => [14.18, 12.92, 1.39],
    "O.sp2" => [17.07, 13.79, 0.47],
    "F.sp3" => [14.66, 13.85, 2.31],
    "Si.sp3" => [7.30, 6.567, 0.657],
    "P.sp3" => [8.90, 8.24, 0.96],
    "S.sp3" => [10.14, 9.13, 1.38],
    "S.sp2" => [10.88, 9.485, 1.325],
    "Cl.sp3" => [11.00, 9.69, 1.35],
    "Br.sp3" => [10.08, 8.47, 1.16],
    "I.sp3" => [9.90, 7.96, 0.96],
};

#[derive(Debug, Error)]
pub enum ParamLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid parameter key '{0}' (expected ELEMENT or ELEMENT.HYBRIDIZATION)")]
    InvalidKey(String),
    #[error("Unsupported parameter file extension for '{0}' (expected .toml or .csv)")]
    UnsupportedFormat(String),
}

#[derive(Debug, Deserialize)]
struct TomlParamFile {
    params: HashMap<String, GasteigerParams>,
}

#[derive(Debug, Deserialize)]
struct CsvParamRecord {
    element: String,
    hybridization: String,
    a: f64,
    b: f64,
    c: f64,
}

/// Gasteiger parameters keyed by atomic number and hybridization class.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamTable {
    entries: HashMap<(u8, HybridClass), GasteigerParams>,
}

impl Default for ParamTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ParamTable {
    pub fn builtin() -> Self {
        let entries = BUILTIN_PARAMS
            .entries()
            .filter_map(|(key, &[a, b, c])| {
                parse_key(key)
                    .ok()
                    .map(|k| (k, GasteigerParams { a, b, c }))
            })
            .collect();
        Self { entries }
    }

    /// Loads the built-in table and overlays the entries from a `.toml` or `.csv` file.
    ///
    /// TOML files hold a `[params]` table keyed by `"C.sp2"`-style keys (a bare
    /// element symbol means sp3). CSV files carry `element,hybridization,a,b,c` columns.
    pub fn with_overrides(path: &Path) -> Result<Self, ParamLoadError> {
        let mut table = Self::builtin();
        let path_str = path.to_string_lossy().to_string();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("toml") => {
                let content = std::fs::read_to_string(path).map_err(|e| ParamLoadError::Io {
                    path: path_str.clone(),
                    source: e,
                })?;
                let file: TomlParamFile =
                    toml::from_str(&content).map_err(|e| ParamLoadError::Toml {
                        path: path_str.clone(),
                        source: e,
                    })?;
                for (key, params) in file.params {
                    table.entries.insert(parse_key(&key)?, params);
                }
            }
            Some("csv") => {
                let mut reader =
                    csv::Reader::from_path(path).map_err(|e| ParamLoadError::Csv {
                        path: path_str.clone(),
                        source: e,
                    })?;
                for result in reader.deserialize::<CsvParamRecord>() {
                    let record = result.map_err(|e| ParamLoadError::Csv {
                        path: path_str.clone(),
                        source: e,
                    })?;
                    let key = format!("{}.{}", record.element, record.hybridization);
                    table.entries.insert(
                        parse_key(&key)?,
                        GasteigerParams {
                            a: record.a,
                            b: record.b,
                            c: record.c,
                        },
                    );
                }
            }
            _ => return Err(ParamLoadError::UnsupportedFormat(path_str)),
        }
        Ok(table)
    }

    /// Parameters for an atom, falling back to any class of the same element
    /// (sp3 first) when the exact class is not tabulated.
    pub fn lookup(&self, atomic_number: u8, hybridization: Hybridization) -> Option<GasteigerParams> {
        let wanted = HybridClass::from(hybridization);
        std::iter::once(wanted)
            .chain([HybridClass::Sp3, HybridClass::Sp2, HybridClass::Sp])
            .find_map(|class| self.entries.get(&(atomic_number, class)).copied())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_key(key: &str) -> Result<(u8, HybridClass), ParamLoadError> {
    let invalid = || ParamLoadError::InvalidKey(key.to_string());
    let (symbol, class) = match key.split_once('.') {
        Some((symbol, class)) => (symbol, class.parse().map_err(|_| invalid())?),
        None => (key, HybridClass::Sp3),
    };
    let element = element::by_symbol(symbol).ok_or_else(invalid)?;
    Ok((element.atomic_number, class))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn builtin_table_covers_common_elements() {
        let table = ParamTable::builtin();
        assert_eq!(table.len(), BUILTIN_PARAMS.len());
        for z in [1, 5, 6, 7, 8, 9, 14, 15, 16, 17, 35, 53] {
            assert!(table.lookup(z, Hybridization::SP3).is_some(), "Z={z}");
        }
        assert!(table.lookup(26, Hybridization::SP3).is_none());
    }

    #[test]
    fn lookup_prefers_exact_class_then_falls_back() {
        let table = ParamTable::builtin();
        assert_eq!(table.lookup(6, Hybridization::SP2).unwrap().a, 8.79);
        assert_eq!(table.lookup(6, Hybridization::SP).unwrap().a, 10.39);
        // No sp2 fluorine entry: falls back to sp3.
        assert_eq!(table.lookup(9, Hybridization::SP2).unwrap().a, 14.66);
        assert_eq!(table.lookup(6, Hybridization::Unspecified).unwrap().a, 7.98);
    }

    #[test]
    fn electronegativity_polynomial() {
        let p = GasteigerParams { a: 1.0, b: 2.0, c: 3.0 };
        assert_eq!(p.electronegativity(0.0), 1.0);
        assert_eq!(p.electronegativity(1.0), 6.0);
        assert_eq!(p.cation_electronegativity(), 6.0);
    }

    #[test]
    fn toml_overrides_replace_and_extend_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("params.toml");
        let mut file = File::create(&path).unwrap();
        writeln!(
            file,
            r#"
            [params."C.sp3"]
            a = 1.0
            b = 2.0
            c = 3.0

            [params.Se]
            a = 10.0
            b = 8.8
            c = 1.2
            "#
        )
        .unwrap();

        let table = ParamTable::with_overrides(&path).unwrap();
        assert_eq!(table.lookup(6, Hybridization::SP3).unwrap().a, 1.0);
        assert_eq!(table.lookup(34, Hybridization::SP3).unwrap().b, 8.8);
        assert_eq!(table.lookup(8, Hybridization::SP3).unwrap().a, 14.18);
    }

    #[test]
    fn csv_overrides_are_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("params.csv");
        std::fs::write(&path, "element,hybridization,a,b,c\nN,sp2,1.5,2.5,3.5\n").unwrap();
        let table = ParamTable::with_overrides(&path).unwrap();
        assert_eq!(
            table.lookup(7, Hybridization::SP2),
            Some(GasteigerParams { a: 1.5, b: 2.5, c: 3.5 })
        );
    }

    #[test]
    fn invalid_keys_and_formats_are_rejected() {
        let dir = tempdir().unwrap();
        let bad_key = dir.path().join("bad.toml");
        std::fs::write(&bad_key, "[params.\"Xx.sp3\"]\na = 1.0\nb = 1.0\nc = 1.0\n").unwrap();
        assert!(matches!(
            ParamTable::with_overrides(&bad_key),
            Err(ParamLoadError::InvalidKey(_))
        ));

        let bad_ext = dir.path().join("params.json");
        std::fs::write(&bad_ext, "{}").unwrap();
        assert!(matches!(
            ParamTable::with_overrides(&bad_ext),
            Err(ParamLoadError::UnsupportedFormat(_))
        ));

        assert!(matches!(
            ParamTable::with_overrides(&dir.path().join("missing.toml")),
            Err(ParamLoadError::Io { .. })
        ));
    }

    #[test]
    fn malformed_toml_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[params.C\na = ").unwrap();
        assert!(matches!(
            ParamTable::with_overrides(&path),
            Err(ParamLoadError::Toml { .. })
        ));
    }
}
