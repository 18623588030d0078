use crate::model::ScanReport;
use std::collections::BTreeMap;
use std::fmt::Write;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct FindingRow {
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Package")]
    package: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "File")]
    file: String,
}

pub fn render_cli_table(report: &ScanReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Scan completed at: {}",
        report.scan_time.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(out);

    if report.findings.is_empty() {
        let _ = writeln!(out, "\x1b[32mNo compromised packages found.\x1b[0m");
    } else {
        let _ = writeln!(
            out,
            "\x1b[31mFound {} compromised package declaration(s):\x1b[0m",
            report.findings.len()
        );
        let _ = writeln!(out);

        let rows: Vec<FindingRow> = report
            .findings
            .iter()
            .map(|f| FindingRow {
                source: f.source_kind().to_string(),
                package: truncate(&f.package_name, 40),
                version: f.raw_version.clone(),
                file: truncate(&f.file_path.display().to_string(), 60),
            })
            .collect();

        let table = Table::new(rows).with(Style::rounded()).to_string();
        let _ = writeln!(out, "{}", table);
    }

    let _ = writeln!(out);
    render_summary(&mut out, report);
    out
}

fn render_summary(out: &mut String, report: &ScanReport) {
    let mut by_package: BTreeMap<&str, usize> = BTreeMap::new();
    for finding in &report.findings {
        *by_package.entry(finding.package_name.as_str()).or_default() += 1;
    }

    let _ = writeln!(out, "Summary:");
    let _ = writeln!(out, "  Projects scanned: {}", report.projects.len());
    let _ = writeln!(out, "  Findings: {}", report.findings.len());
    if !by_package.is_empty() {
        let packages: Vec<String> = by_package
            .iter()
            .map(|(name, count)| format!("{} ({})", name, count))
            .collect();
        let _ = writeln!(out, "  Affected packages: {}", packages.join(", "));
    }
    if report.suppressed > 0 {
        let _ = writeln!(out, "  Suppressed: {}", report.suppressed);
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
