//! Small XML helpers shared by the part readers and writers

use quick_xml::events::BytesStart;

/// Escape special XML characters in text and attribute values
///
/// Characters outside the XML 1.0 `Char` production (C0 controls other than
/// tab, LF and CR, plus U+FFFE and U+FFFF) are dropped.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if is_xml_char(c) => out.push(c),
            _ => {}
        }
    }
    out
}

/// Whether `c` is in the XML 1.0 `Char` production
fn is_xml_char(c: char) -> bool {
    match c {
        '\t' | '\n' | '\r' => true,
        '\u{0}'..='\u{1F}' => false,
        '\u{FFFE}' | '\u{FFFF}' => false,
        _ => true,
    }
}

/// Get an attribute by local name, ignoring whichever prefix the producer chose
pub(crate) fn get_attr_local(e: &BytesStart, local: &[u8]) -> Option<String> {
    e.attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.local_name().as_ref() == local)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// Whether an on/off property (`<w:b/>`, `<w:i w:val="0"/>`) is switched on
pub(crate) fn is_toggle_on(e: &BytesStart) -> bool {
    get_attr_local(e, b"val")
        .map(|v| !matches!(v.as_str(), "0" | "false" | "off"))
        .unwrap_or(true)
}
