use balanza_core::error::BalanzaError;
use balanza_core::layout::builtin;
use balanza_core::layout::schema::SectionDef;
use std::path::Path;

pub fn show(preset: &str) -> Result<(), BalanzaError> {
    let json = builtin::preset_json(preset).ok_or_else(|| {
        BalanzaError::LayoutInvalid(format!(
            "unknown preset '{}'. Available: {}",
            preset,
            builtin::PRESETS.join(", ")
        ))
    })?;
    print!("{json}");
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), BalanzaError> {
    let layout = balanza_core::layout::load_layout(file)?;

    println!("Layout '{}' is valid.", layout.name);
    println!(
        "  Header rows: {}, footer rows: {}",
        layout.header_rows, layout.footer_rows
    );
    let sections = [
        ("assets", &layout.assets),
        ("liabilities", &layout.liabilities),
        ("equity", &layout.equity),
        ("exercise", &layout.exercise),
        ("profit_and_loss", &layout.profit_and_loss),
    ];
    for (name, section) in sections {
        println!("  {:<16} {}", name, describe(section));
    }
    Ok(())
}

fn describe(section: &SectionDef) -> String {
    let anchors = section.region.anchors().join(" / ");
    if section.paired_fields.is_empty() {
        format!("{} fields  [{}]", section.fields.len(), anchors)
    } else {
        format!(
            "{} + {} fields  [{}]",
            section.fields.len(),
            section.paired_fields.len(),
            anchors
        )
    }
}
