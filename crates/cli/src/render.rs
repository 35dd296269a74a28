//! Plain-text views of templates and records.

use casebook_core::{CasebookStats, Record, RecordRow, Template};

const TABLE_HEADERS: [&str; 10] = [
    "#",
    "Patient",
    "Identity id",
    "Age",
    "Category",
    "Care type",
    "Physician",
    "Diagnosis",
    "Medications",
    "Allergies",
];

pub fn templates(templates: &[(String, Template)]) -> String {
    let mut out = String::new();
    for (key, template) in templates {
        out.push_str(&format!(
            "{key}: {} / {}\n  exams: {}\n",
            template.patient_category(),
            template.care_type(),
            template.baseline_exams().join(", ")
        ));
    }
    out
}

/// Renders rows as a left-aligned table, one line per record.
pub fn table(rows: &[RecordRow]) -> String {
    let cells: Vec<[String; 10]> = rows
        .iter()
        .map(|row| {
            [
                row.index.to_string(),
                row.patient_name.clone(),
                row.identity_id.clone(),
                row.age.clone(),
                row.patient_category.clone(),
                row.care_type.clone(),
                row.physician.clone(),
                row.diagnosis.clone(),
                row.medications.clone(),
                row.allergies.clone(),
            ]
        })
        .collect();

    let mut widths = TABLE_HEADERS.map(|h| h.chars().count());
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = render_line(&TABLE_HEADERS.map(String::from), &widths);
    for line in &cells {
        out.push_str(&render_line(line, &widths));
    }
    out
}

fn render_line(cells: &[String; 10], widths: &[usize; 10]) -> String {
    let line = cells
        .iter()
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    format!("{}\n", line.trim_end())
}

pub fn detail(record: &Record) -> String {
    let lines = record.detail_lines();
    let label_width = lines.iter().map(|(label, _)| label.len()).max().unwrap_or(0) + 1;

    let mut out = format!("Record: {}\n", record.patient_name());
    for (label, value) in lines {
        let label = format!("{label}:");
        out.push_str(&format!("  {label:<label_width$} {value}\n"));
    }
    out
}

pub fn stats(stats: &CasebookStats) -> String {
    format!(
        "records: {}  templates: {}  care types: {}\n",
        stats.records, stats.templates, stats.care_types
    )
}
