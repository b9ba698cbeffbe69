//! PDF parsing: text layer via pdf-extract, AcroForm values via lopdf.
//!
//! Page texts come back in page order and are joined with a blank line.
//! Form reading is best-effort: a PDF without a form, or with a malformed
//! one, simply yields no form fields rather than failing the parse.

use lopdf::{Document, Object};

use super::FormFields;
use crate::pipeline::PipelineError;

/// Extract per-page text, concatenated in page order with a blank-line
/// separator. Returns the joined text and the page count.
pub fn extract_page_text(pdf_bytes: &[u8]) -> Result<(String, usize), PipelineError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
        .map_err(|e| PipelineError::Parse(e.to_string()))?;
    let page_count = pages.len();
    Ok((pages.join("\n\n"), page_count))
}

/// Read interactive form-field values from the document's AcroForm.
///
/// Text fields yield their value, checkboxes/radio groups yield the selected
/// state name (`Off` normalized to absent), choice fields join selected
/// options with `", "`. Returns `None` when the document has no named
/// fields.
pub fn extract_form_fields(pdf_bytes: &[u8]) -> Option<FormFields> {
    let doc = Document::load_mem(pdf_bytes).ok()?;
    let catalog = doc.catalog().ok()?;
    let acro_form = resolve(&doc, catalog.get(b"AcroForm").ok()?).as_dict().ok()?;
    let field_refs = resolve(&doc, acro_form.get(b"Fields").ok()?).as_array().ok()?;

    let mut out = FormFields::new();
    for field in field_refs {
        walk_field(&doc, field, None, &mut out);
    }
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

/// Follow a reference to its object; non-references pass through.
fn resolve<'a>(doc: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(object),
        _ => object,
    }
}

/// Depth-first walk over the field tree. Hierarchical names join with `.`;
/// kids that carry their own partial name are child fields, otherwise the
/// kids are presentation widgets and the node itself is terminal.
fn walk_field(doc: &Document, object: &Object, parent: Option<&str>, out: &mut FormFields) {
    let Ok(dict) = resolve(doc, object).as_dict() else {
        return;
    };

    let own_name = dict
        .get(b"T")
        .ok()
        .and_then(|t| match resolve(doc, t) {
            Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
            _ => None,
        })
        .filter(|n| !n.trim().is_empty());

    let full_name = match (parent, own_name) {
        (Some(p), Some(t)) => format!("{p}.{t}"),
        (None, Some(t)) => t,
        (Some(p), None) => p.to_string(),
        (None, None) => return,
    };

    if let Ok(kids) = dict.get(b"Kids").map(|k| resolve(doc, k)) {
        if let Ok(kids) = kids.as_array() {
            let has_named_kids = kids.iter().any(|kid| {
                resolve(doc, kid)
                    .as_dict()
                    .map(|d| d.has(b"T"))
                    .unwrap_or(false)
            });
            if has_named_kids {
                for kid in kids {
                    walk_field(doc, kid, Some(&full_name), out);
                }
                return;
            }
        }
    }

    out.insert(full_name, field_value(doc, dict));
}

/// Current value of a terminal field, normalized: empty and `Off` become
/// absent.
fn field_value(doc: &Document, dict: &lopdf::Dictionary) -> Option<String> {
    let value = resolve(doc, dict.get(b"V").ok()?);
    match value {
        Object::String(bytes, _) => non_blank(decode_pdf_string(bytes)),
        Object::Name(name) => match name.as_slice() {
            b"Off" => None,
            _ => non_blank(String::from_utf8_lossy(name).into_owned()),
        },
        Object::Array(items) => {
            let selected: Vec<String> = items
                .iter()
                .filter_map(|item| match resolve(doc, item) {
                    Object::String(bytes, _) => non_blank(decode_pdf_string(bytes)),
                    Object::Name(name) => non_blank(String::from_utf8_lossy(name).into_owned()),
                    _ => None,
                })
                .collect();
            if selected.is_empty() {
                None
            } else {
                Some(selected.join(", "))
            }
        }
        Object::Integer(n) => Some(n.to_string()),
        Object::Real(n) => Some(n.to_string()),
        _ => None,
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// PDF text strings are UTF-16BE when BOM-prefixed, PDFDocEncoding
/// (Latin-1 compatible for our purposes) otherwise.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let code_units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&code_units)
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}
