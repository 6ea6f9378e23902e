//! Page orientation pre-filter.
//!
//! Balance sheets are printed landscape. Some scans were stored portrait,
//! which scrambles the text layout; those documents are replaced by a copy
//! of their first page rotated 90° clockwise before any text is extracted.

use crate::error::BalanzaError;
use lopdf::{Document, Object, ObjectId};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Suffix appended to the file stem of rotated copies.
pub const FIXED_SUFFIX: &str = "_fixed";

/// Parent chain depth after which a page tree is considered malformed.
const MAX_PAGE_TREE_DEPTH: usize = 32;

/// The MediaBox of a page, in PDF user-space units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl PageGeometry {
    pub fn width(&self) -> f64 {
        (self.x_max - self.x_min).abs()
    }

    pub fn height(&self) -> f64 {
        (self.y_max - self.y_min).abs()
    }

    /// Strictly wider than tall. A square page counts as portrait.
    pub fn is_landscape(&self) -> bool {
        self.width() > self.height()
    }
}

/// Path of the rotated copy of `file` inside `target_dir`.
pub fn fixed_path(file: &Path, target_dir: &Path) -> PathBuf {
    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match file.extension() {
        Some(ext) => format!("{}{}.{}", stem, FIXED_SUFFIX, ext.to_string_lossy()),
        None => format!("{}{}", stem, FIXED_SUFFIX),
    };
    target_dir.join(name)
}

/// Return a path to a landscape version of `file`.
///
/// Landscape documents are returned unchanged. Otherwise the first page is
/// rotated clockwise and written, alone, to [`fixed_path`] in `target_dir`.
pub fn normalize_orientation(file: &Path, target_dir: &Path) -> Result<PathBuf, BalanzaError> {
    let doc = Document::load(file)?;
    let (page_id, geometry) = first_page_geometry(&doc)?;

    if geometry.is_landscape() {
        return Ok(file.to_path_buf());
    }

    let output = fixed_path(file, target_dir);
    tracing::info!(
        "{} is portrait ({}x{}), writing rotated copy {}",
        file.display(),
        geometry.width(),
        geometry.height(),
        output.display()
    );

    write_rotated(doc, page_id, &output).map_err(|e| BalanzaError::OrientationFixFailed {
        path: output.clone(),
        reason: e.to_string(),
    })?;

    Ok(output)
}

/// Object id and MediaBox of page 1.
pub fn first_page_geometry(doc: &Document) -> Result<(ObjectId, PageGeometry), BalanzaError> {
    let page_id = doc
        .get_pages()
        .get(&1)
        .copied()
        .ok_or_else(|| BalanzaError::Extraction("document has no pages".into()))?;
    let geometry = media_box(doc, page_id)?;
    Ok((page_id, geometry))
}

/// MediaBox is inheritable, so walk up the page tree until one is found.
fn media_box(doc: &Document, page_id: ObjectId) -> Result<PageGeometry, BalanzaError> {
    let mut current = page_id;
    for _ in 0..MAX_PAGE_TREE_DEPTH {
        let dict = doc.get_dictionary(current)?;
        if let Ok(obj) = dict.get(b"MediaBox") {
            let obj = match obj {
                Object::Reference(id) => doc.get_object(*id)?,
                other => other,
            };
            return geometry_from_array(obj.as_array()?);
        }
        current = match dict.get(b"Parent") {
            Ok(parent) => parent.as_reference()?,
            Err(_) => break,
        };
    }
    Err(BalanzaError::Extraction("page has no MediaBox".into()))
}

fn geometry_from_array(values: &[Object]) -> Result<PageGeometry, BalanzaError> {
    let numbers: Vec<f64> = values.iter().filter_map(number).collect();
    if numbers.len() != 4 || values.len() != 4 {
        return Err(BalanzaError::Extraction(format!(
            "MediaBox must hold four numbers, found {:?}",
            values
        )));
    }
    Ok(PageGeometry {
        x_min: numbers[0],
        y_min: numbers[1],
        x_max: numbers[2],
        y_max: numbers[3],
    })
}

fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}

fn write_rotated(mut doc: Document, page_id: ObjectId, output: &Path) -> Result<(), BalanzaError> {
    let current = doc
        .get_dictionary(page_id)?
        .get(b"Rotate")
        .ok()
        .and_then(|o| o.as_i64().ok())
        .unwrap_or(0);

    let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
    page.set("Rotate", Object::Integer((current + 90).rem_euclid(360)));

    let others: Vec<u32> = doc.get_pages().keys().copied().filter(|n| *n != 1).collect();
    if !others.is_empty() {
        doc.delete_pages(&others);
    }

    doc.save(output)
        .map_err(|e| BalanzaError::Extraction(e.to_string()))?;
    Ok(())
}
