//! SVG symbol sprite assembly.
//!
//! Combines individual icon files into one `<svg>` document of `<symbol>`
//! elements, referenced as `sprite.svg#icon-id`. XML prologs, comments and
//! doctypes are stripped; the root `<svg>` of each icon becomes a
//! `<symbol>` carrying the icon's viewBox.

use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};

/// One icon to embed in the sprite.
pub struct SpriteIcon {
    /// Symbol id, derived from the source file stem.
    pub id: String,
    /// Raw SVG file content.
    pub content: String,
}

/// Assemble the sprite document from icons (callers pass them sorted so
/// output is deterministic).
pub fn build_sprite(icons: &[SpriteIcon]) -> Result<String, String> {
    let mut writer = Writer::new(Vec::new());

    let mut root = BytesStart::new("svg");
    root.push_attribute(("xmlns", "http://www.w3.org/2000/svg"));
    root.push_attribute(("aria-hidden", "true"));
    root.push_attribute(("style", "display:none"));
    writer
        .write_event(Event::Start(root))
        .map_err(|e| e.to_string())?;

    for icon in icons {
        append_symbol(&mut writer, icon).map_err(|e| format!("{}: {}", icon.id, e))?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("svg")))
        .map_err(|e| e.to_string())?;

    String::from_utf8(writer.into_inner()).map_err(|e| e.to_string())
}

/// Copy one icon into the writer as a `<symbol>`.
fn append_symbol(writer: &mut Writer<Vec<u8>>, icon: &SpriteIcon) -> Result<(), String> {
    let mut reader = Reader::from_str(&icon.content);

    // Depth inside the icon's root <svg>; 0 = not yet entered.
    let mut depth = 0usize;
    let mut seen_root = false;

    loop {
        let event = reader.read_event().map_err(|e| e.to_string())?;
        match event {
            Event::Start(e) if depth == 0 => {
                if e.local_name().as_ref() != b"svg" {
                    return Err(format!(
                        "expected <svg> root, found <{}>",
                        String::from_utf8_lossy(e.local_name().as_ref())
                    ));
                }
                write(writer, Event::Start(open_symbol(icon, &e)))?;
                depth = 1;
                seen_root = true;
            }
            Event::Empty(e) if depth == 0 => {
                // Degenerate but valid: <svg .../> with no children
                if e.local_name().as_ref() != b"svg" {
                    return Err("expected <svg> root".to_string());
                }
                write(writer, Event::Start(open_symbol(icon, &e)))?;
                write(writer, Event::End(BytesEnd::new("symbol")))?;
                seen_root = true;
            }
            Event::Start(e) => {
                depth += 1;
                write(writer, Event::Start(e))?;
            }
            Event::End(_) if depth == 1 => {
                write(writer, Event::End(BytesEnd::new("symbol")))?;
                depth = 0;
            }
            Event::End(e) if depth > 1 => {
                depth -= 1;
                write(writer, Event::End(e))?;
            }
            Event::Empty(e) if depth > 0 => write(writer, Event::Empty(e))?,
            Event::Text(e) if depth > 0 => {
                // Inter-element indentation is layout noise
                if !e.iter().all(|b| b.is_ascii_whitespace()) {
                    write(writer, Event::Text(e))?;
                }
            }
            Event::CData(e) if depth > 0 => write(writer, Event::CData(e))?,
            Event::Eof => break,
            // prolog, comments, doctype, PIs are dropped
            _ => {}
        }
    }

    if depth != 0 {
        return Err("unclosed <svg> element".to_string());
    }
    if !seen_root {
        return Err("no <svg> root element".to_string());
    }
    Ok(())
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), String> {
    writer.write_event(event).map_err(|e| e.to_string())
}

/// Build the `<symbol>` open tag: id plus the icon's viewBox (falling back
/// to `0 0 width height` when only dimensions are given).
fn open_symbol(icon: &SpriteIcon, svg: &BytesStart<'_>) -> BytesStart<'static> {
    let mut symbol = BytesStart::new("symbol");
    symbol.push_attribute(("id", icon.id.as_str()));

    let mut width = None;
    let mut height = None;
    for attr in svg.attributes().flatten() {
        let value = attr.unescape_value().ok().map(|v| v.into_owned());
        match attr.key.as_ref() {
            b"viewBox" => {
                if let Some(value) = value {
                    symbol.push_attribute(("viewBox", value.as_str()));
                    return symbol;
                }
            }
            b"width" => width = value,
            b"height" => height = value,
            _ => {}
        }
    }

    if let (Some(w), Some(h)) = (width, height) {
        let view_box = format!("0 0 {} {}", w.trim_end_matches("px"), h.trim_end_matches("px"));
        symbol.push_attribute(("viewBox", view_box.as_str()));
    }
    symbol
}
