use crate::calc;
use crate::roster::{Roster, Subject};
use serde::Serialize;

/// A sample row exactly as it ships, derived columns included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedRecord {
    pub subject_name: &'static str,
    pub units: f64,
    pub midterms: f64,
    pub finals: f64,
    pub average: f64,
    pub grade: f64,
    pub weight: f64,
}

const fn rec(
    subject_name: &'static str,
    units: f64,
    midterms: f64,
    finals: f64,
    average: f64,
    grade: f64,
    weight: f64,
) -> SeedRecord {
    SeedRecord {
        subject_name,
        units,
        midterms,
        finals,
        average,
        grade,
        weight,
    }
}

// Literal values; CT's weight is not units * grade and is kept as-is.
pub const SAMPLE: [SeedRecord; 8] = [
    rec("CT", 5.0, 96.5, 94.0, 95.25, 1.25, 2.5),
    rec("STATS", 3.0, 95.65, 95.65, 95.65, 1.25, 3.75),
    rec("FINMAN", 3.0, 96.66, 94.0, 95.33, 1.25, 3.75),
    rec("BPM", 3.0, 97.96, 98.04, 98.0, 1.0, 3.0),
    rec("RIZAL", 3.0, 95.38, 90.0, 92.69, 1.5, 4.5),
    rec("ISPM", 3.0, 95.55, 95.0, 95.28, 1.25, 3.75),
    rec("GENSOC", 2.0, 88.38, 96.0, 92.19, 1.5, 3.0),
    rec("APPDEV", 3.0, 99.5, 98.0, 98.75, 1.0, 3.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedMode {
    Sample,
    Empty,
}

impl SeedMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sample" => Some(Self::Sample),
            "empty" => Some(Self::Empty),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sample => "sample",
            Self::Empty => "empty",
        }
    }

    /// Input columns only; callers derive through `Roster`.
    pub fn subjects(self) -> Vec<Subject> {
        match self {
            Self::Sample => SAMPLE
                .iter()
                .map(|r| Subject::with_inputs(r.subject_name, r.units, r.midterms, r.finals))
                .collect(),
            Self::Empty => Vec::new(),
        }
    }
}

/// The roster as first shown: its keys and inputs, with the literal seeded
/// average/grade/weight in place of the derived ones. `None` once anything has
/// been committed (revision > 0) or when the roster did not come from the sample.
pub fn initial_display(mode: SeedMode, roster: &Roster) -> Option<Vec<Subject>> {
    if mode != SeedMode::Sample || roster.revision() != 0 || roster.len() != SAMPLE.len() {
        return None;
    }
    let rows = roster
        .subjects()
        .iter()
        .zip(SAMPLE.iter())
        .map(|(s, lit)| Subject {
            average: lit.average,
            grade: lit.grade,
            weight: lit.weight,
            ..s.clone()
        })
        .collect();
    Some(rows)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedDiscrepancy {
    pub index: usize,
    pub subject_name: String,
    pub field: &'static str,
    pub seeded: f64,
    pub derived: f64,
}

/// Every derived column whose literal value disagrees with the formula.
pub fn audit(records: &[SeedRecord]) -> Vec<SeedDiscrepancy> {
    let mut out = Vec::new();
    for (index, r) in records.iter().enumerate() {
        let d = calc::derive(r.units, r.midterms, r.finals);
        for (field, seeded, derived) in [
            ("average", r.average, d.average),
            ("grade", r.grade, d.grade),
            ("weight", r.weight, d.weight),
        ] {
            if (seeded - derived).abs() > 1e-9 {
                out.push(SeedDiscrepancy {
                    index,
                    subject_name: r.subject_name.to_string(),
                    field,
                    seeded,
                    derived,
                });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{summarize_subjects, RawValue, SubjectField};

    #[test]
    fn sample_seed_only_disagrees_on_ct_weight() {
        let found = audit(&SAMPLE);
        assert_eq!(
            found,
            vec![SeedDiscrepancy {
                index: 0,
                subject_name: "CT".to_string(),
                field: "weight",
                seeded: 2.5,
                derived: 6.25,
            }]
        );
    }

    #[test]
    fn derived_sample_matches_literal_averages_and_grades() {
        let r = Roster::new(SeedMode::Sample.subjects());
        assert_eq!(r.len(), SAMPLE.len());
        for (s, lit) in r.subjects().iter().zip(SAMPLE.iter()) {
            assert_eq!(s.subject_name, lit.subject_name);
            assert_eq!(s.average, lit.average, "{}", lit.subject_name);
            assert_eq!(s.grade, lit.grade, "{}", lit.subject_name);
        }
        assert_eq!(r.subjects()[0].weight, 6.25);
    }

    #[test]
    fn initial_display_keeps_literal_columns_until_first_commit() {
        let r = Roster::new(SeedMode::Sample.subjects());
        let shown = initial_display(SeedMode::Sample, &r).expect("revision 0");
        assert_eq!(shown.len(), 8);
        assert_eq!(shown[0].weight, 2.5);
        assert_eq!(shown[0].key, r.subjects()[0].key);
        assert_eq!(shown[0].units, 5.0);
        assert_eq!(r.subjects()[0].weight, 6.25);

        let s = summarize_subjects(&shown);
        assert_eq!(s.total_weight, 27.25);
        assert_eq!(s.gwa, 1.24);

        let r1 = r
            .edit_field(1, SubjectField::Units, RawValue::Text("3"))
            .expect("edit");
        assert_eq!(initial_display(SeedMode::Sample, &r1), None);
        assert_eq!(initial_display(SeedMode::Empty, &Roster::default()), None);
    }

    #[test]
    fn seed_mode_parse() {
        assert_eq!(SeedMode::parse("sample"), Some(SeedMode::Sample));
        assert_eq!(SeedMode::parse(" EMPTY "), Some(SeedMode::Empty));
        assert_eq!(SeedMode::parse("demo"), None);
        assert!(SeedMode::Empty.subjects().is_empty());
    }
}
