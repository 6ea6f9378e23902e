pub mod builtin;
pub mod schema;

use crate::error::BalanzaError;
use crate::model::labels;
use schema::{SectionDef, SectionKind, SheetLayout};
use std::collections::HashSet;
use std::path::Path;

/// Load a layout from a JSON file.
pub fn load_layout(path: &Path) -> Result<SheetLayout, BalanzaError> {
    let content = std::fs::read_to_string(path).map_err(|e| BalanzaError::LayoutLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_layout(&content, path)
}

/// Parse a layout from a JSON string.
pub fn parse_layout(json: &str, source: &Path) -> Result<SheetLayout, BalanzaError> {
    let layout: SheetLayout = serde_json::from_str(json).map_err(|e| BalanzaError::LayoutLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_layout(&layout)?;
    Ok(layout)
}

/// Parse a layout from a JSON string (no file path context).
pub fn parse_layout_str(json: &str) -> Result<SheetLayout, BalanzaError> {
    let layout: SheetLayout = serde_json::from_str(json).map_err(BalanzaError::Json)?;
    validate_layout(&layout)?;
    Ok(layout)
}

/// Validate that a layout is well-formed.
pub fn validate_layout(layout: &SheetLayout) -> Result<(), BalanzaError> {
    if layout.header_rows == 0 {
        return Err(BalanzaError::LayoutInvalid(
            "header_rows must be at least 1 (the title line)".into(),
        ));
    }

    let single = [
        ("assets", &layout.assets),
        ("liabilities", &layout.liabilities),
        ("equity", &layout.equity),
        ("exercise", &layout.exercise),
    ];
    for (name, section) in single {
        if matches!(section.region, SectionKind::MergedPair { .. }) {
            return Err(BalanzaError::LayoutInvalid(format!(
                "section '{}' cannot use kind merged_pair",
                name
            )));
        }
        validate_section(name, section)?;
    }

    if layout.exercise.fields.len() != 2 {
        return Err(BalanzaError::LayoutInvalid(format!(
            "section 'exercise' needs exactly 2 fields (before taxes, tax), found {}",
            layout.exercise.fields.len()
        )));
    }

    if !matches!(layout.profit_and_loss.region, SectionKind::MergedPair { .. }) {
        return Err(BalanzaError::LayoutInvalid(
            "section 'profit_and_loss' must use kind merged_pair".into(),
        ));
    }
    validate_section("profit_and_loss", &layout.profit_and_loss)?;

    // liabilities, equity and exercise end up in one record
    let mut combined = HashSet::new();
    for (name, section) in [
        ("liabilities", &layout.liabilities),
        ("equity", &layout.equity),
        ("exercise", &layout.exercise),
    ] {
        for label in &section.fields {
            if !combined.insert(label.as_str()) {
                return Err(BalanzaError::LayoutInvalid(format!(
                    "section '{}' reuses field '{}' from an earlier section of the liabilities record",
                    name, label
                )));
            }
        }
    }

    Ok(())
}

fn validate_section(name: &str, section: &SectionDef) -> Result<(), BalanzaError> {
    if section.region.anchors().iter().any(|a| a.trim().is_empty()) {
        return Err(BalanzaError::LayoutInvalid(format!(
            "section '{}' has an empty anchor",
            name
        )));
    }

    if section.fields.is_empty() {
        return Err(BalanzaError::LayoutInvalid(format!(
            "section '{}' has no fields",
            name
        )));
    }

    let merged = matches!(section.region, SectionKind::MergedPair { .. });
    if merged && section.paired_fields.is_empty() {
        return Err(BalanzaError::LayoutInvalid(format!(
            "section '{}' is merged_pair but has no paired_fields",
            name
        )));
    }
    if !merged && !section.paired_fields.is_empty() {
        return Err(BalanzaError::LayoutInvalid(format!(
            "section '{}' has paired_fields but is not merged_pair",
            name
        )));
    }

    for labels in [&section.fields, &section.paired_fields] {
        let mut seen = HashSet::new();
        for label in labels {
            if label.trim().is_empty() {
                return Err(BalanzaError::LayoutInvalid(format!(
                    "section '{}' has an empty field label",
                    name
                )));
            }
            if labels::COMPUTED.contains(&label.as_str()) {
                return Err(BalanzaError::LayoutInvalid(format!(
                    "section '{}' uses the computed label '{}'",
                    name, label
                )));
            }
            if !seen.insert(label.as_str()) {
                return Err(BalanzaError::LayoutInvalid(format!(
                    "section '{}' repeats field '{}'",
                    name, label
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal(profit_and_loss: &str) -> String {
        format!(
            r#"{{
            "name": "Test",
            "assets": {{ "region": {{ "kind": "single_column", "to": "CARGOS" }}, "fields": ["A"] }},
            "liabilities": {{ "region": {{ "kind": "single_column", "to": "PREVISIONES" }}, "fields": ["L"] }},
            "equity": {{
                "region": {{
                    "kind": "dual_column",
                    "col_0": {{ "from": "AJUSTES", "to": "RESULTADOS" }},
                    "col_1": {{ "from": "CAPITAL", "to": "APORTES" }}
                }},
                "fields": ["C", "AP", "AJ", "R"]
            }},
            "exercise": {{ "region": {{ "kind": "ranged", "from": "antes", "to": "Menos" }}, "fields": ["B", "T"] }},
            "profit_and_loss": {}
        }}"#,
            profit_and_loss
        )
    }

    #[test]
    fn test_parse_valid_layout() {
        let json = minimal(
            r#"{ "region": { "kind": "merged_pair", "from": "PERDIDAS", "to": "AJUSTES DE" }, "fields": ["P"], "paired_fields": ["G"] }"#,
        );
        let layout = parse_layout_str(&json).unwrap();
        assert_eq!(layout.name, "Test");
        assert_eq!(layout.header_rows, 2);
        assert_eq!(layout.footer_rows, 1);
        assert_eq!(layout.language, schema::MonthLanguage::Spanish);
        assert!(matches!(
            layout.equity.region,
            SectionKind::DualColumn { .. }
        ));
    }

    #[test]
    fn test_merged_pair_requires_paired_fields() {
        let json = minimal(
            r#"{ "region": { "kind": "merged_pair", "from": "PERDIDAS", "to": "AJUSTES DE" }, "fields": ["P"] }"#,
        );
        assert!(matches!(
            parse_layout_str(&json),
            Err(BalanzaError::LayoutInvalid(_))
        ));
    }

    #[test]
    fn test_profit_and_loss_must_be_merged() {
        let json = minimal(
            r#"{ "region": { "kind": "ranged", "from": "PERDIDAS", "to": "AJUSTES DE" }, "fields": ["P"] }"#,
        );
        assert!(parse_layout_str(&json).is_err());
    }

    #[test]
    fn test_empty_anchor_rejected() {
        let json = minimal(
            r#"{ "region": { "kind": "merged_pair", "from": " ", "to": "AJUSTES DE" }, "fields": ["P"], "paired_fields": ["G"] }"#,
        );
        assert!(parse_layout_str(&json).is_err());
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let json = minimal(
            r#"{ "region": { "kind": "merged_pair", "from": "PERDIDAS", "to": "AJUSTES DE" }, "fields": ["P", "P"], "paired_fields": ["G"] }"#,
        );
        assert!(parse_layout_str(&json).is_err());
    }

    #[test]
    fn test_computed_label_rejected() {
        let mut layout = builtin::load_preset("continental").unwrap();
        layout.profit_and_loss.paired_fields[9] = labels::TOTAL.to_string();
        match validate_layout(&layout) {
            Err(BalanzaError::LayoutInvalid(msg)) => assert!(msg.contains("'Total'"), "{msg}"),
            other => panic!("unexpected result: {other:?}"),
        }

        let mut layout = builtin::load_preset("continental").unwrap();
        layout.equity.fields[0] = labels::NET_WORTH.to_string();
        assert!(matches!(
            validate_layout(&layout),
            Err(BalanzaError::LayoutInvalid(_))
        ));
    }

    #[test]
    fn test_label_shared_across_liabilities_record_rejected() {
        let mut layout = builtin::load_preset("continental").unwrap();
        layout.equity.fields[4] = layout.liabilities.fields[2].clone();
        match validate_layout(&layout) {
            Err(BalanzaError::LayoutInvalid(msg)) => assert!(msg.contains("'Diversas'"), "{msg}"),
            other => panic!("unexpected result: {other:?}"),
        }

        let mut layout = builtin::load_preset("continental").unwrap();
        layout.exercise.fields[1] = layout.equity.fields[0].clone();
        assert!(validate_layout(&layout).is_err());
    }

    #[test]
    fn test_profit_and_loss_may_repeat_labels_across_columns() {
        // loss and profit are separate records
        let layout = builtin::load_preset("continental").unwrap();
        assert!(layout
            .profit_and_loss
            .fields
            .iter()
            .any(|f| layout.profit_and_loss.paired_fields.contains(f)));
        validate_layout(&layout).unwrap();
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = load_layout(Path::new("/nonexistent/layout.json")).unwrap_err();
        assert!(matches!(err, BalanzaError::LayoutLoad { .. }));
    }
}
