use crate::model::ScanReport;
use std::fmt::Write;

pub fn render_text(report: &ScanReport) -> String {
    let mut out = String::new();

    if report.findings.is_empty() {
        out.push_str("\n✔ No compromised packages found.\n");
    } else {
        out.push_str("\n⚠️ COMPROMISED PACKAGES FOUND:\n\n");
        for finding in &report.findings {
            let _ = writeln!(out, "{}", finding);
        }
    }

    if report.suppressed > 0 {
        let _ = writeln!(
            out,
            "\n({} finding(s) suppressed by ignore list)",
            report.suppressed
        );
    }

    out
}

pub fn render_inventory_text(names: &[String]) -> String {
    names.iter().fold(String::new(), |mut out, name| {
        out.push_str(name);
        out.push('\n');
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DependencySource, Finding};
    use std::path::PathBuf;

    #[test]
    fn test_render_clean_report() {
        let report = ScanReport::new(".");
        assert_eq!(render_text(&report), "\n✔ No compromised packages found.\n");
    }

    #[test]
    fn test_render_findings() {
        let mut report = ScanReport::new(".");
        report.findings.push(Finding {
            source: DependencySource::LockV1,
            file_path: PathBuf::from("app/package-lock.json"),
            package_name: "a".to_string(),
            raw_version: "1.0.0".to_string(),
        });
        report.suppressed = 2;

        let text = render_text(&report);
        assert!(text.contains("COMPROMISED PACKAGES FOUND"));
        assert!(text.contains("package-lock.json (v1) | app/package-lock.json | a@1.0.0\n"));
        assert!(text.contains("2 finding(s) suppressed"));
    }

    #[test]
    fn test_render_inventory_one_per_line() {
        let names = vec!["a".to_string(), "b".to_string()];
        assert_eq!(render_inventory_text(&names), "a\nb\n");
        assert_eq!(render_inventory_text(&[]), "");
    }
}
