//! Single-page PDF emission with `lopdf`

use lopdf::{dictionary, Document, Object, Stream};

use super::format_number;
use crate::render::{Color, PathCommand, VectorShape};
use crate::Result;

/// Render `shape` onto a `width x width` point page.
///
/// The page is painted white first unless `transparent`. Module space has
/// its origin top-left, so the content is flipped before the shape's own
/// translate+scale is applied; squares are filled once with the nonzero rule.
pub fn export_pdf(shape: &VectorShape, foreground: Color, transparent: bool, width: u32) -> Result<Vec<u8>> {
    let side = i64::from(width);
    let content = page_content(shape, foreground, transparent, width);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => Object::Array(vec![0i64.into(), 0i64.into(), side.into(), side.into()]),
        "Resources" => dictionary! {},
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => Object::Array(vec![page_id.into()]),
            "Count" => 1i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    tracing::debug!("wrote {}x{} PDF page: {} bytes", width, width, bytes.len());
    Ok(bytes)
}

/// Content stream text, one operator per line.
///
/// Operands are written from `f64` rather than through `Object::Real`, which
/// holds an `f32` and would pull the scaled extent off the page edge.
fn page_content(shape: &VectorShape, foreground: Color, transparent: bool, width: u32) -> String {
    let mut content = String::with_capacity(shape.len() * 40 + 128);

    if !transparent {
        content.push_str(&format!("1 1 1 rg\n0 0 {0} {0} re\nf\n", width));
    }

    if shape.is_empty() {
        return content;
    }

    let transform = shape.transform_to_width(width);
    let [r, g, b] = foreground.to_unit_rgb();
    content.push_str("q\n");
    content.push_str(&format!("1 0 0 -1 0 {} cm\n", width));
    content.push_str(&format!(
        "{} 0 0 {} {} {} cm\n",
        format_number(transform.scale_x),
        format_number(transform.scale_y),
        format_number(transform.translate_x),
        format_number(transform.translate_y),
    ));
    content.push_str(&format!("{} {} {} rg\n", format_number(r), format_number(g), format_number(b)));

    for command in shape.commands() {
        match command {
            PathCommand::MoveTo(x, y) => content.push_str(&format!("{} {} m\n", x, y)),
            PathCommand::LineTo(x, y) => content.push_str(&format!("{} {} l\n", x, y)),
            PathCommand::Close => content.push_str("h\n"),
        }
    }
    content.push_str("f\nQ\n");
    content
}
