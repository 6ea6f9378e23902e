use crate::error::BalanzaError;
use crate::layout::schema::SheetLayout;
use crate::layout::validate_layout;

const CONTINENTAL_JSON: &str = include_str!("../../../../layouts/continental.json");

/// Available built-in layouts.
pub const PRESETS: &[&str] = &["continental"];

/// Load a built-in layout by name.
pub fn load_preset(name: &str) -> Result<SheetLayout, BalanzaError> {
    let json = match name {
        "continental" => CONTINENTAL_JSON,
        _ => {
            return Err(BalanzaError::LayoutInvalid(format!(
                "unknown preset '{}'. Available: {}",
                name,
                PRESETS.join(", ")
            )))
        }
    };
    let layout: SheetLayout = serde_json::from_str(json)?;
    validate_layout(&layout)?;
    Ok(layout)
}

/// Raw JSON of a built-in layout, for `layout show`.
pub fn preset_json(name: &str) -> Option<&'static str> {
    match name {
        "continental" => Some(CONTINENTAL_JSON),
        _ => None,
    }
}
