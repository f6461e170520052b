//! Core document properties (`docProps/core.xml`)

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{OoxmlError, Result};
use crate::model::CoreProperties;
use crate::xml::escape_xml;

const CORE_PROPERTIES_NS: &str =
    "http://schemas.openxmlformats.org/package/2006/metadata/core-properties";

#[derive(Clone, Copy)]
enum Field {
    Title,
    Creator,
}

impl CoreProperties {
    /// Parse a core properties part
    ///
    /// Blank elements are reported as absent.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut props = CoreProperties::default();
        let mut current: Option<Field> = None;
        let mut text = String::new();
        let mut saw_root = false;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                    b"coreProperties" => saw_root = true,
                    b"title" => {
                        current = Some(Field::Title);
                        text.clear();
                    }
                    b"creator" => {
                        current = Some(Field::Creator);
                        text.clear();
                    }
                    _ => {}
                },
                Ok(Event::Empty(ref e)) if e.local_name().as_ref() == b"coreProperties" => {
                    saw_root = true;
                }
                Ok(Event::Text(ref t)) if current.is_some() => {
                    text.push_str(&t.unescape().unwrap_or_default());
                }
                Ok(Event::CData(ref t)) if current.is_some() => {
                    text.push_str(&String::from_utf8_lossy(t.as_ref()));
                }
                Ok(Event::End(ref e)) => {
                    let local = e.local_name();
                    if let Some(field) = current {
                        let closes = matches!(
                            (field, local.as_ref()),
                            (Field::Title, b"title") | (Field::Creator, b"creator")
                        );
                        if closes {
                            let value = std::mem::take(&mut text);
                            let value = value.trim();
                            let value = (!value.is_empty()).then(|| value.to_string());
                            match field {
                                Field::Title => props.title = value,
                                Field::Creator => props.creator = value,
                            }
                            current = None;
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        if !saw_root {
            return Err(OoxmlError::InvalidStructure(
                "core properties part has no coreProperties element".to_string(),
            ));
        }

        Ok(props)
    }

    /// Serialize as a core properties part
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(
            r#"<cp:coreProperties xmlns:cp="{}" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
            CORE_PROPERTIES_NS
        ));
        if let Some(title) = &self.title {
            xml.push_str(&format!("<dc:title>{}</dc:title>", escape_xml(title)));
        }
        if let Some(creator) = &self.creator {
            xml.push_str(&format!("<dc:creator>{}</dc:creator>", escape_xml(creator)));
        }
        xml.push_str("</cp:coreProperties>");
        xml
    }
}
