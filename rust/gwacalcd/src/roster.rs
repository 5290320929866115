use crate::calc::{self, Summary, WeightedGrade};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub key: String,
    pub subject_name: String,
    pub units: f64,
    pub midterms: f64,
    pub finals: f64,
    pub average: f64,
    pub grade: f64,
    pub weight: f64,
}

impl Subject {
    /// Empty name, zeroed inputs. Derived fields are filled in by the next derive pass.
    pub fn blank() -> Self {
        Self::with_inputs("", 0.0, 0.0, 0.0)
    }

    pub fn with_inputs(name: &str, units: f64, midterms: f64, finals: f64) -> Self {
        Self {
            key: Uuid::new_v4().to_string(),
            subject_name: name.to_string(),
            units,
            midterms,
            finals,
            average: 0.0,
            grade: 0.0,
            weight: 0.0,
        }
    }

    pub fn rederive(&mut self) {
        let d = calc::derive(self.units, self.midterms, self.finals);
        self.average = d.average;
        self.grade = d.grade;
        self.weight = d.weight;
    }

    pub fn weighted_grade(&self) -> WeightedGrade {
        WeightedGrade {
            units: self.units,
            grade: self.grade,
            weight: self.weight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectField {
    SubjectName,
    Units,
    Midterms,
    Finals,
}

impl SubjectField {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "subjectName" => Some(Self::SubjectName),
            "units" => Some(Self::Units),
            "midterms" => Some(Self::Midterms),
            "finals" => Some(Self::Finals),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SubjectName => "subjectName",
            Self::Units => "units",
            Self::Midterms => "midterms",
            Self::Finals => "finals",
        }
    }
}

/// What the input control handed us: the raw text of the field, or a number
/// when the caller already has one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue<'a> {
    Text(&'a str),
    Number(f64),
}

/// Longest leading decimal-number prefix, 0 when there is none.
/// `"12abc"` -> 12, `" .5"` -> 0.5, `"1e2x"` -> 100, `"abc"` -> 0.
pub fn coerce_number(raw: &str) -> f64 {
    let s = raw.trim_start();
    let b = s.as_bytes();
    let mut i = 0;

    if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
        i += 1;
    }
    let int_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;
    if i < b.len() && b[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        digits += j - frac_start;
        if digits > 0 {
            i = j;
        }
    }
    if digits == 0 {
        return 0.0;
    }

    // Exponent only counts when at least one digit follows it.
    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        let mut j = i + 1;
        if j < b.len() && (b[j] == b'+' || b[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    finite_or_zero(s[..i].parse::<f64>().unwrap_or(0.0))
}

fn finite_or_zero(v: f64) -> f64 {
    // -0.0 collapses to 0 as well.
    if v.is_finite() && v != 0.0 {
        v
    } else {
        0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RosterError {
    pub code: &'static str,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl RosterError {
    fn index_out_of_range(index: usize, len: usize) -> Self {
        Self {
            code: "not_found",
            message: "subject not found".to_string(),
            details: Some(serde_json::json!({ "index": index, "len": len })),
        }
    }
}

/// An immutable roster snapshot. Every operation returns a new snapshot with all
/// derived fields recomputed and the revision bumped; `self` is never touched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    revision: u64,
    subjects: Vec<Subject>,
}

impl Roster {
    pub fn new(subjects: Vec<Subject>) -> Self {
        Self::derived(0, subjects)
    }

    fn derived(revision: u64, mut subjects: Vec<Subject>) -> Self {
        for s in subjects.iter_mut() {
            s.rederive();
        }
        Self { revision, subjects }
    }

    fn next(&self, subjects: Vec<Subject>) -> Self {
        Self::derived(self.revision + 1, subjects)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn summary(&self) -> Summary {
        summarize_subjects(&self.subjects)
    }

    pub fn edit_field(
        &self,
        index: usize,
        field: SubjectField,
        value: RawValue<'_>,
    ) -> Result<Roster, RosterError> {
        self.edit_row(index, &[(field, value)])
    }

    /// Applies every edit to the one row, then derives once.
    pub fn edit_row(
        &self,
        index: usize,
        edits: &[(SubjectField, RawValue<'_>)],
    ) -> Result<Roster, RosterError> {
        if index >= self.subjects.len() {
            return Err(RosterError::index_out_of_range(index, self.subjects.len()));
        }
        let mut subjects = self.subjects.clone();
        let row = &mut subjects[index];
        for (field, value) in edits {
            apply_edit(row, *field, *value);
        }
        Ok(self.next(subjects))
    }

    pub fn add_subject(&self) -> Roster {
        let mut subjects = self.subjects.clone();
        subjects.push(Subject::blank());
        self.next(subjects)
    }

    pub fn delete_subject(&self, index: usize) -> Result<Roster, RosterError> {
        if index >= self.subjects.len() {
            return Err(RosterError::index_out_of_range(index, self.subjects.len()));
        }
        let mut subjects = self.subjects.clone();
        subjects.remove(index);
        Ok(self.next(subjects))
    }

    pub fn replace_all(&self, subjects: Vec<Subject>) -> Roster {
        self.next(subjects)
    }
}

pub fn summarize_subjects(subjects: &[Subject]) -> Summary {
    calc::summarize(subjects.iter().map(Subject::weighted_grade))
}

fn apply_edit(row: &mut Subject, field: SubjectField, value: RawValue<'_>) {
    if field == SubjectField::SubjectName {
        row.subject_name = match value {
            RawValue::Text(t) => t.to_string(),
            RawValue::Number(n) => n.to_string(),
        };
        return;
    }
    let n = match value {
        RawValue::Text(t) => coerce_number(t),
        RawValue::Number(n) => finite_or_zero(n),
    };
    match field {
        SubjectField::Units => row.units = n,
        SubjectField::Midterms => row.midterms = n,
        SubjectField::Finals => row.finals = n,
        SubjectField::SubjectName => {}
    }
}
