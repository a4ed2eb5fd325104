use crate::core::io::traits::MolecularFile;
use crate::core::models::builder::{BuildError, MoleculeBuilder};
use crate::core::models::molecule::Molecule;
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

use crate::core::models::topology::BondOrder;

const RECORD_SEPARATOR: &str = "$$$$";
const DEFAULT_PROGRAM_LINE: &str = "  reactsite      3D";
const CHARGES_PER_CHG_LINE: usize = 8;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SdfMetadata {
    pub title: String,
    pub program_line: String,
    pub comment: String,
    /// SD data items (`> <NAME>` blocks) in file order.
    pub data_items: Vec<(String, String)>,
}

#[derive(Debug, Error)]
pub enum SdfError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: SdfParseErrorKind,
    },
    #[error("Inconsistent structure: {0}")]
    Structure(#[from] BuildError),
    #[error("Missing required record: {0}")]
    MissingRecord(String),
    #[error("Unsupported format: {0}")]
    Unsupported(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SdfParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: String },
    #[error("Unknown element symbol '{0}'")]
    UnknownElement(String),
    #[error("Unsupported bond type {0}")]
    InvalidBondType(u8),
    #[error("Atom number {0} is outside the declared atom block")]
    AtomOutOfRange(usize),
    #[error("Block ended before {atoms} atoms and {bonds} bonds were read")]
    TruncatedBlock { atoms: usize, bonds: usize },
    #[error("Malformed charge property line")]
    InvalidChargeLine,
}

pub struct SdfFile;

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    if start >= end {
        return "";
    }
    line.get(start..end).unwrap_or("").trim()
}

fn parse_int<T: std::str::FromStr>(
    line: &str,
    line_no: usize,
    start: usize,
    end: usize,
) -> Result<T, SdfError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| SdfError::Parse {
        line: line_no,
        kind: SdfParseErrorKind::InvalidInt {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

fn parse_float(line: &str, line_no: usize, start: usize, end: usize) -> Result<f64, SdfError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| SdfError::Parse {
        line: line_no,
        kind: SdfParseErrorKind::InvalidFloat {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

fn charge_from_code(code: u8) -> i8 {
    match code {
        1 => 3,
        2 => 2,
        3 => 1,
        5 => -1,
        6 => -2,
        7 => -3,
        _ => 0, // 0 = uncharged, 4 = doublet radical
    }
}

fn code_from_charge(charge: i8) -> u8 {
    match charge {
        3 => 1,
        2 => 2,
        1 => 3,
        -1 => 5,
        -2 => 6,
        -3 => 7,
        _ => 0,
    }
}

/// Splits a multi-record SD file into the text of each record.
///
/// Blank records (for example trailing whitespace after the last `$$$$`) are dropped.
pub fn split_records(content: &str) -> Vec<String> {
    let mut records = Vec::new();
    let mut current = String::new();
    for line in content.lines() {
        if line.trim() == RECORD_SEPARATOR {
            if !current.trim().is_empty() {
                records.push(std::mem::take(&mut current));
            }
            current.clear();
            continue;
        }
        current.push_str(line);
        current.push('\n');
    }
    if !current.trim().is_empty() {
        records.push(current);
    }
    records
}

fn collect_first_record(reader: &mut impl BufRead) -> Result<Vec<(usize, String)>, SdfError> {
    let mut lines = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let content = line?;
        if content.trim() == RECORD_SEPARATOR && !lines.is_empty() {
            break;
        }
        lines.push((i + 1, content));
    }
    Ok(lines)
}

fn parse_record(lines: &[(usize, String)]) -> Result<(Molecule, SdfMetadata), SdfError> {
    if lines.iter().all(|(_, l)| l.trim().is_empty()) {
        return Err(SdfError::MissingRecord("molecule block".into()));
    }
    if lines.len() < 4 {
        return Err(SdfError::MissingRecord("header block and counts line".into()));
    }

    let mut metadata = SdfMetadata {
        title: lines[0].1.trim_end().to_string(),
        program_line: lines[1].1.trim_end().to_string(),
        comment: lines[2].1.trim_end().to_string(),
        data_items: Vec::new(),
    };

    let (counts_no, counts) = (&lines[3].0, &lines[3].1);
    if counts.contains("V3000") {
        return Err(SdfError::Unsupported(
            "V3000 connection tables are not supported".into(),
        ));
    }
    let atom_count: usize = parse_int(counts, *counts_no, 0, 3)?;
    let bond_count: usize = parse_int(counts, *counts_no, 3, 6)?;

    let atom_start = 4;
    let bond_start = atom_start + atom_count;
    let props_start = bond_start + bond_count;
    if lines.len() < props_start {
        return Err(SdfError::Parse {
            line: lines.last().map_or(*counts_no, |(ln, _)| *ln),
            kind: SdfParseErrorKind::TruncatedBlock {
                atoms: atom_count,
                bonds: bond_count,
            },
        });
    }

    let mut builder = MoleculeBuilder::new(&metadata.title);
    for (ln, raw) in &lines[atom_start..bond_start] {
        let x = parse_float(raw, *ln, 0, 10)?;
        let y = parse_float(raw, *ln, 10, 20)?;
        let z = parse_float(raw, *ln, 20, 30)?;
        let symbol = slice_and_trim(raw, 31, 34);
        if symbol.is_empty() {
            return Err(SdfError::Parse {
                line: *ln,
                kind: SdfParseErrorKind::MissingRequiredField {
                    columns: "32-34".into(),
                },
            });
        }
        let charge_code = if slice_and_trim(raw, 36, 39).is_empty() {
            0
        } else {
            parse_int::<u8>(raw, *ln, 36, 39)?
        };
        builder
            .add_atom(symbol, Point3::new(x, y, z), charge_from_code(charge_code))
            .map_err(|_| SdfError::Parse {
                line: *ln,
                kind: SdfParseErrorKind::UnknownElement(symbol.into()),
            })?;
    }

    for (ln, raw) in &lines[bond_start..props_start] {
        let a1: usize = parse_int(raw, *ln, 0, 3)?;
        let a2: usize = parse_int(raw, *ln, 3, 6)?;
        let code: u8 = parse_int(raw, *ln, 6, 9)?;
        let order = BondOrder::from_ctfile(code).ok_or(SdfError::Parse {
            line: *ln,
            kind: SdfParseErrorKind::InvalidBondType(code),
        })?;
        for atom in [a1, a2] {
            if atom == 0 || atom > atom_count {
                return Err(SdfError::Parse {
                    line: *ln,
                    kind: SdfParseErrorKind::AtomOutOfRange(atom),
                });
            }
        }
        builder.add_bond(a1 - 1, a2 - 1, order);
    }

    let mut cursor = props_start;
    let mut charges_reset = false;
    while cursor < lines.len() {
        let (ln, raw) = (&lines[cursor].0, &lines[cursor].1);
        if raw.starts_with("M  END") {
            cursor += 1;
            break;
        }
        if raw.starts_with('>') {
            break;
        }
        if raw.starts_with("M  CHG") {
            // Charge properties supersede the atom-block charge codes.
            if !charges_reset {
                for idx in 0..atom_count {
                    builder.set_formal_charge(idx, 0);
                }
                charges_reset = true;
            }
            for (atom, charge) in parse_charge_line(raw, *ln)? {
                if atom == 0 || atom > atom_count {
                    return Err(SdfError::Parse {
                        line: *ln,
                        kind: SdfParseErrorKind::AtomOutOfRange(atom),
                    });
                }
                builder.set_formal_charge(atom - 1, charge);
            }
        }
        cursor += 1;
    }

    metadata.data_items = parse_data_items(&lines[cursor..]);
    Ok((builder.build()?, metadata))
}

fn parse_charge_line(raw: &str, line_no: usize) -> Result<Vec<(usize, i8)>, SdfError> {
    let invalid = || SdfError::Parse {
        line: line_no,
        kind: SdfParseErrorKind::InvalidChargeLine,
    };
    let tokens: Vec<&str> = raw.split_whitespace().skip(2).collect();
    let count: usize = tokens.first().and_then(|t| t.parse().ok()).ok_or_else(invalid)?;
    if tokens.len() < 1 + 2 * count {
        return Err(invalid());
    }
    (0..count)
        .map(|i| {
            let atom = tokens[1 + 2 * i].parse().map_err(|_| invalid())?;
            let charge = tokens[2 + 2 * i].parse().map_err(|_| invalid())?;
            Ok((atom, charge))
        })
        .collect()
}

fn parse_data_items(lines: &[(usize, String)]) -> Vec<(String, String)> {
    let mut items = Vec::new();
    let mut iter = lines.iter().peekable();
    while let Some((_, raw)) = iter.next() {
        if !raw.starts_with('>') {
            continue;
        }
        let name = match (raw.find('<'), raw.rfind('>')) {
            (Some(open), Some(close)) if close > open => raw[open + 1..close].to_string(),
            _ => continue,
        };
        let mut value_lines = Vec::new();
        while let Some((_, next)) = iter.peek() {
            if next.trim().is_empty() || next.starts_with('>') {
                break;
            }
            value_lines.push(next.trim_end().to_string());
            iter.next();
        }
        items.push((name, value_lines.join("\n")));
    }
    items
}

impl MolecularFile for SdfFile {
    type Metadata = SdfMetadata;
    type Error = SdfError;

    fn read_from(reader: &mut impl BufRead) -> Result<(Molecule, Self::Metadata), Self::Error> {
        let lines = collect_first_record(reader)?;
        parse_record(&lines)
    }

    fn write_to(
        molecule: &Molecule,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        writeln!(writer, "{}", metadata.title)?;
        writeln!(writer, "{}", metadata.program_line)?;
        writeln!(writer, "{}", metadata.comment)?;
        writeln!(
            writer,
            "{:>3}{:>3}  0  0  0  0  0  0  0  0999 V2000",
            molecule.atom_count(),
            molecule.bond_count()
        )?;

        for atom in molecule.atoms() {
            writeln!(
                writer,
                "{:>10.4}{:>10.4}{:>10.4} {:<3} 0{:>3}  0  0  0  0  0  0  0  0  0  0",
                atom.position.x,
                atom.position.y,
                atom.position.z,
                atom.symbol(),
                code_from_charge(atom.formal_charge)
            )?;
        }
        for bond in molecule.bonds() {
            writeln!(
                writer,
                "{:>3}{:>3}{:>3}  0",
                bond.atom1_idx + 1,
                bond.atom2_idx + 1,
                bond.order as u8
            )?;
        }

        let charged: Vec<_> = molecule
            .atoms()
            .iter()
            .filter(|a| a.formal_charge != 0)
            .collect();
        for chunk in charged.chunks(CHARGES_PER_CHG_LINE) {
            write!(writer, "M  CHG{:>3}", chunk.len())?;
            for atom in chunk {
                write!(writer, " {:>3} {:>3}", atom.index + 1, atom.formal_charge)?;
            }
            writeln!(writer)?;
        }
        writeln!(writer, "M  END")?;

        for (name, value) in &metadata.data_items {
            writeln!(writer, "> <{}>", name)?;
            writeln!(writer, "{}", value)?;
            writeln!(writer)?;
        }
        writeln!(writer, "{}", RECORD_SEPARATOR)?;
        Ok(())
    }

    fn write_molecule_to(molecule: &Molecule, writer: &mut impl Write) -> Result<(), Self::Error> {
        let metadata = SdfMetadata {
            title: molecule.name().to_string(),
            program_line: DEFAULT_PROGRAM_LINE.to_string(),
            ..Default::default()
        };
        Self::write_to(molecule, &metadata, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::topology::BondOrder;

    const METHANOL: &str = "methanol
  reactsite      3D

  2  1  0  0  0  0  0  0  0  0999 V2000
   -0.3600    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
    1.0600    0.0000    0.0000 O   0  0  0  0  0  0  0  0  0  0  0  0
  1  2  1  0
M  END
> <SOURCE>
unit-test

$$$$
";

    const ACETATE: &str = "acetate
  reactsite      3D

  4  3  0  0  0  0  0  0  0  0999 V2000
    0.0000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
    1.5200    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
    2.1500    1.0800    0.0000 O   0  0  0  0  0  0  0  0  0  0  0  0
    2.1500   -1.0800    0.0000 O   0  3  0  0  0  0  0  0  0  0  0  0
  1  2  1  0
  2  3  2  0
  2  4  1  0
M  CHG  1   4  -1
M  END
";

    #[test]
    fn reads_atoms_bonds_and_header() {
        let (mol, meta) = SdfFile::read_str(METHANOL).unwrap();
        assert_eq!(mol.atom_count(), 2);
        assert_eq!(mol.bond_count(), 1);
        assert_eq!(mol.name(), "methanol");
        assert_eq!(meta.title, "methanol");
        assert_eq!(meta.program_line, "  reactsite      3D");
        assert_eq!(mol.atoms()[0].symbol(), "C");
        assert_eq!(mol.atoms()[1].symbol(), "O");
        assert_eq!(mol.atoms()[1].position, Point3::new(1.06, 0.0, 0.0));
        assert_eq!(mol.bonds()[0].order, BondOrder::Single);
    }

    #[test]
    fn reads_data_items_after_m_end() {
        let (_, meta) = SdfFile::read_str(METHANOL).unwrap();
        assert_eq!(
            meta.data_items,
            vec![("SOURCE".to_string(), "unit-test".to_string())]
        );
    }

    #[test]
    fn charge_property_supersedes_atom_block_codes() {
        let (mol, _) = SdfFile::read_str(ACETATE).unwrap();
        // Atom 4 carries legacy code 3 (+1) but M  CHG sets it to -1.
        assert_eq!(mol.atoms()[3].formal_charge, -1);
        assert_eq!(mol.atoms()[2].formal_charge, 0);
        assert_eq!(mol.bond_between(1, 2).unwrap().order, BondOrder::Double);
    }

    #[test]
    fn legacy_charge_codes_are_used_without_charge_property() {
        let text = METHANOL.replace(
            "    1.0600    0.0000    0.0000 O   0  0",
            "    1.0600    0.0000    0.0000 O   0  5",
        );
        let (mol, _) = SdfFile::read_str(&text).unwrap();
        assert_eq!(mol.atoms()[1].formal_charge, -1);
    }

    #[test]
    fn v3000_is_rejected() {
        let text = METHANOL.replace("0999 V2000", "0999 V3000");
        assert!(matches!(
            SdfFile::read_str(&text),
            Err(SdfError::Unsupported(_))
        ));
    }

    #[test]
    fn unknown_element_reports_line_number() {
        let text = METHANOL.replace(" O   0", " Xx  0");
        match SdfFile::read_str(&text) {
            Err(SdfError::Parse { line, kind }) => {
                assert_eq!(line, 6);
                assert_eq!(kind, SdfParseErrorKind::UnknownElement("Xx".into()));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn truncated_atom_block_is_rejected() {
        let text = "trunc\n\n\n  3  0  0  0  0  0  0  0  0  0999 V2000\n    0.0000    0.0000    0.0000 C   0  0\n";
        assert!(matches!(
            SdfFile::read_str(text),
            Err(SdfError::Parse {
                kind: SdfParseErrorKind::TruncatedBlock { atoms: 3, bonds: 0 },
                ..
            })
        ));
    }

    #[test]
    fn bond_to_missing_atom_is_rejected() {
        let text = METHANOL.replace("  1  2  1  0", "  1  3  1  0");
        assert!(matches!(
            SdfFile::read_str(&text),
            Err(SdfError::Parse {
                kind: SdfParseErrorKind::AtomOutOfRange(3),
                ..
            })
        ));
    }

    #[test]
    fn invalid_coordinate_is_rejected() {
        let text = METHANOL.replace("   -0.3600", "   -0.3a00");
        assert!(matches!(
            SdfFile::read_str(&text),
            Err(SdfError::Parse {
                line: 5,
                kind: SdfParseErrorKind::InvalidFloat { .. }
            })
        ));
    }

    #[test]
    fn empty_input_is_missing_record() {
        assert!(matches!(
            SdfFile::read_str("   \n\n"),
            Err(SdfError::MissingRecord(_))
        ));
        assert!(matches!(
            SdfFile::read_str("only\ntwo\n"),
            Err(SdfError::MissingRecord(_))
        ));
    }

    #[test]
    fn written_record_reads_back_with_charges_and_items() {
        let (mol, meta) = SdfFile::read_str(ACETATE).unwrap();
        let mut meta = meta;
        meta.data_items.push(("ID".into(), "42".into()));

        let mut buffer = Vec::new();
        SdfFile::write_to(&mol, &meta, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("M  CHG  1   4  -1"));
        assert!(text.trim_end().ends_with("$$$$"));

        let (again, meta_again) = SdfFile::read_str(&text).unwrap();
        assert_eq!(again.atom_count(), mol.atom_count());
        assert_eq!(again.bonds(), mol.bonds());
        assert_eq!(again.atoms()[3].formal_charge, -1);
        assert_eq!(meta_again.data_items, meta.data_items);
    }

    #[test]
    fn write_molecule_uses_default_header() {
        let (mol, _) = SdfFile::read_str(METHANOL).unwrap();
        let mut buffer = Vec::new();
        SdfFile::write_molecule_to(&mol, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("methanol"));
        assert_eq!(lines.next(), Some(DEFAULT_PROGRAM_LINE));
    }

    #[test]
    fn split_records_drops_blank_trailers() {
        let content = format!("{}{}\n\n", METHANOL, ACETATE.to_string() + "$$$$\n");
        let records = split_records(&content);
        assert_eq!(records.len(), 2);
        assert!(records[0].starts_with("methanol"));
        assert!(records[1].starts_with("acetate"));
        assert!(!records[0].contains("$$$$"));
    }

    #[test]
    fn read_from_path_reads_first_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("two.sdf");
        std::fs::write(&path, format!("{}{}", METHANOL, ACETATE)).unwrap();
        let (mol, _) = SdfFile::read_from_path(&path).unwrap();
        assert_eq!(mol.name(), "methanol");
    }
}
