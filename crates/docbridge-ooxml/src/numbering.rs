//! Numbering definitions parsing (word/numbering.xml)
//!
//! A paragraph references a numbering instance (`w:num`), which points at an
//! abstract definition whose levels carry the number format.

use std::collections::HashMap;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{OoxmlError, Result};
use crate::xml::get_attr_local;

/// Parsed numbering definitions
#[derive(Debug, Clone, Default)]
pub struct Numbering {
    /// Level formats per abstract numbering ID
    abstract_formats: HashMap<String, HashMap<u32, String>>,
    /// Numbering instance ID to abstract numbering ID
    instances: HashMap<String, String>,
}

impl Numbering {
    /// Parse numbering definitions from XML bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut numbering = Numbering::default();
        let mut current_abstract: Option<String> = None;
        let mut current_level: Option<u32> = None;
        let mut current_num: Option<String> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    match e.local_name().as_ref() {
                        b"abstractNum" => {
                            current_abstract = get_attr_local(e, b"abstractNumId");
                        }
                        b"lvl" => {
                            current_level =
                                get_attr_local(e, b"ilvl").and_then(|v| v.parse().ok());
                        }
                        b"numFmt" => {
                            if let (Some(abstract_id), Some(level), Some(format)) = (
                                current_abstract.as_ref(),
                                current_level,
                                get_attr_local(e, b"val"),
                            ) {
                                numbering
                                    .abstract_formats
                                    .entry(abstract_id.clone())
                                    .or_default()
                                    .insert(level, format);
                            }
                        }
                        b"num" => {
                            current_num = get_attr_local(e, b"numId");
                        }
                        b"abstractNumId" => {
                            if let (Some(num_id), Some(abstract_id)) =
                                (current_num.as_ref(), get_attr_local(e, b"val"))
                            {
                                numbering.instances.insert(num_id.clone(), abstract_id);
                            }
                        }
                        _ => {}
                    }
                }
                Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                    b"abstractNum" => current_abstract = None,
                    b"lvl" => current_level = None,
                    b"num" => current_num = None,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(numbering)
    }

    /// Number format (`bullet`, `decimal`, ...) of a numbering instance level
    pub fn format(&self, num_id: &str, level: u32) -> Option<&str> {
        let abstract_id = self.instances.get(num_id)?;
        let levels = self.abstract_formats.get(abstract_id)?;
        levels
            .get(&level)
            .or_else(|| levels.get(&0))
            .map(String::as_str)
    }

    /// Whether a numbering instance level produces numbers rather than bullets
    ///
    /// Unknown instances count as ordered.
    pub fn is_ordered(&self, num_id: &str, level: u32) -> bool {
        self.format(num_id, level)
            .map(|f| f != "bullet")
            .unwrap_or(true)
    }
}
