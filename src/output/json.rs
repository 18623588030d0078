use crate::model::ScanReport;
use anyhow::Result;

pub fn render_json(report: &ScanReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn render_inventory_json(names: &[String]) -> Result<String> {
    Ok(serde_json::to_string_pretty(names)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_json_fields() {
        let report = ScanReport::new("root");
        let value: serde_json::Value = serde_json::from_str(&render_json(&report).unwrap()).unwrap();
        assert_eq!(value["root"], "root");
        assert_eq!(value["findings"], serde_json::json!([]));
        assert_eq!(value["suppressed"], 0);
        assert!(value["scan_time"].is_string());
    }

    #[test]
    fn test_render_inventory_json() {
        let names = vec!["a".to_string(), "b".to_string()];
        let value: Vec<String> = serde_json::from_str(&render_inventory_json(&names).unwrap()).unwrap();
        assert_eq!(value, names);
    }
}
