//! Display model for the subject table: editable inputs per row, read-only
//! derived cells, and the footer. Everything here is already formatted so a
//! renderer only has to place strings.

use crate::calc::Summary;
use crate::roster::{summarize_subjects, Roster, Subject};
use serde::Serialize;

pub const COLUMNS: [&str; 8] = [
    "Subject", "Units", "Midterms", "Finals", "Average", "Grade", "Weight", "Action",
];

pub const ADD_LABEL: &str = "Add Subject";
pub const DELETE_LABEL: &str = "Delete";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowInputs {
    pub subject_name: String,
    pub units: String,
    pub midterms: String,
    pub finals: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowView {
    pub key: String,
    pub index: usize,
    pub inputs: RowInputs,
    pub average: String,
    pub grade: String,
    pub weight: String,
    pub delete_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterView {
    pub total_units: String,
    pub total_weight: String,
    pub gwa: String,
    pub add_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub revision: u64,
    pub columns: Vec<&'static str>,
    pub rows: Vec<RowView>,
    pub footer: FooterView,
}

/// Shortest form: `1`, `1.25`, `2.5`.
pub fn format_number(x: f64) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    format!("{x}")
}

pub fn format_fixed_2(x: f64) -> String {
    if x == 0.0 {
        return "0.00".to_string();
    }
    format!("{x:.2}")
}

/// GWA reads as a bare `0` when there are no units to weigh.
pub fn format_gwa(summary: &Summary) -> String {
    if summary.total_units == 0.0 {
        "0".to_string()
    } else {
        format_fixed_2(summary.gwa)
    }
}

fn row_view(index: usize, s: &Subject) -> RowView {
    RowView {
        key: s.key.clone(),
        index,
        inputs: RowInputs {
            subject_name: s.subject_name.clone(),
            units: format_number(s.units),
            midterms: format_number(s.midterms),
            finals: format_number(s.finals),
        },
        average: format_fixed_2(s.average),
        grade: format_number(s.grade),
        weight: format_fixed_2(s.weight),
        delete_label: DELETE_LABEL,
    }
}

pub fn table_view(roster: &Roster) -> TableView {
    rows_view(roster.revision(), roster.subjects())
}

/// Same layout for an arbitrary row set, e.g. the seed as first shown.
pub fn rows_view(revision: u64, subjects: &[Subject]) -> TableView {
    let summary = summarize_subjects(subjects);
    TableView {
        revision,
        columns: COLUMNS.to_vec(),
        rows: subjects
            .iter()
            .enumerate()
            .map(|(i, s)| row_view(i, s))
            .collect(),
        footer: FooterView {
            total_units: format_number(summary.total_units),
            total_weight: format_fixed_2(summary.total_weight),
            gwa: format_gwa(&summary),
            add_label: ADD_LABEL,
        },
    }
}

/// Fixed-width plain-text rendering of `table_view`, for terminals and logs.
pub fn render_text(view: &TableView) -> String {
    let header: Vec<String> = view.columns[..7].iter().map(|c| c.to_string()).collect();
    let mut lines: Vec<Vec<String>> = vec![header];
    for r in &view.rows {
        lines.push(vec![
            r.inputs.subject_name.clone(),
            r.inputs.units.clone(),
            r.inputs.midterms.clone(),
            r.inputs.finals.clone(),
            r.average.clone(),
            r.grade.clone(),
            r.weight.clone(),
        ]);
    }

    let mut widths = vec![0usize; 7];
    for line in &lines {
        for (w, cell) in widths.iter_mut().zip(line.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for (n, line) in lines.iter().enumerate() {
        let cells: Vec<String> = line
            .iter()
            .zip(widths.iter())
            .enumerate()
            .map(|(col, (cell, &w))| {
                if col == 0 {
                    format!("{cell:<w$}")
                } else {
                    format!("{cell:>w$}")
                }
            })
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
        if n == 0 {
            let rule: usize = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
            out.push_str(&"-".repeat(rule));
            out.push('\n');
        }
    }
    out.push_str(&format!(
        "Total Units: {}  General Weighted Average: {}\n",
        view.footer.total_units, view.footer.gwa
    ));
    out
}
