//! Output formatting for extracted signatures.
//!
//! Supports two output formats:
//! - Text: one `func Name(params) (results)` line per exported function
//! - JSON: structured output for glue code generators

use colored::*;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

use crate::extract::{Binding, CanonicalType, FunctionRecord};
use crate::runner::FileReport;

/// JSON report structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    pub functions: Vec<FunctionRecord>,
}

impl JsonReport {
    pub fn from_report(report: &FileReport) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            file: report.path.clone(),
            package: report.package.clone(),
            functions: report.records().to_vec(),
        }
    }
}

/// Write results in JSON format.
pub fn write_json<W: Write>(out: &mut W, report: &FileReport) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&JsonReport::from_report(report))?;
    writeln!(out, "{}", json)?;
    Ok(())
}

/// Write results as one signature line per function.
///
/// With `color` off the lines are exactly the `Display` form of each record.
pub fn write_text<W: Write>(out: &mut W, report: &FileReport, color: bool) -> io::Result<()> {
    for record in report.records() {
        if color {
            writeln!(out, "{}", colored_signature(record))?;
        } else {
            writeln!(out, "{}", record)?;
        }
    }
    Ok(())
}

/// One-line summary for stderr.
pub fn summary(report: &FileReport) -> String {
    let unknown = report
        .records()
        .iter()
        .filter(|r| !r.is_fully_known())
        .count();

    let mut line = format!(
        "{}: {} exported of {} functions",
        report.path,
        report.records().len(),
        report.extraction.visited
    );
    if unknown > 0 {
        line.push_str(&format!(", {} with unsupported types", unknown));
    }
    line
}

pub fn write_summary<W: Write>(out: &mut W, report: &FileReport) -> io::Result<()> {
    writeln!(out, "{}", summary(report).dimmed())
}

fn colored_signature(record: &FunctionRecord) -> String {
    format!(
        "{} {}({}) ({})",
        "func".blue(),
        record.name.bold(),
        colored_bindings(&record.params),
        colored_bindings(&record.returns)
    )
}

fn colored_bindings(bindings: &[Binding]) -> String {
    bindings
        .iter()
        .map(|b| {
            let ty = match b.ty {
                CanonicalType::Unknown => b.ty.as_str().yellow(),
                _ => b.ty.as_str().green(),
            };
            format!("{} {}", b.name, ty)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Extraction;

    fn sample_report() -> FileReport {
        FileReport {
            path: "library.go".to_string(),
            package: Some("main".to_string()),
            extraction: Extraction {
                records: vec![
                    FunctionRecord {
                        name: "Add".to_string(),
                        param_count: 1,
                        params: vec![
                            Binding::new("a", CanonicalType::CInt),
                            Binding::new("b", CanonicalType::CInt),
                        ],
                        returns_count: 1,
                        returns: vec![Binding::new("", CanonicalType::CInt)],
                    },
                    FunctionRecord {
                        name: "Scale".to_string(),
                        param_count: 1,
                        params: vec![Binding::new("f", CanonicalType::Unknown)],
                        returns_count: 0,
                        returns: vec![],
                    },
                ],
                visited: 3,
            },
        }
    }

    #[test]
    fn test_write_text_plain() {
        let mut buf = Vec::new();
        write_text(&mut buf, &sample_report(), false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "func Add(a C.int, b C.int) ( C.int)\nfunc Scale(f N/A) ()\n"
        );
    }

    #[test]
    fn test_write_json() {
        let mut buf = Vec::new();
        write_json(&mut buf, &sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["file"], "library.go");
        assert_eq!(value["package"], "main");
        let add = &value["functions"][0];
        assert_eq!(add["name"], "Add");
        assert_eq!(add["param_count"], 1);
        assert_eq!(add["params"].as_array().unwrap().len(), 2);
        assert_eq!(add["params"][1]["name"], "b");
        assert_eq!(add["returns"][0]["name"], "");
        assert_eq!(add["returns"][0]["type"], "C.int");
        assert_eq!(value["functions"][1]["params"][0]["type"], "N/A");
    }

    #[test]
    fn test_summary() {
        assert_eq!(
            summary(&sample_report()),
            "library.go: 2 exported of 3 functions, 1 with unsupported types"
        );
    }
}
