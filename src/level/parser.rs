use crate::level::error::ConvertError;
use crate::level::path::to_coord;
use crate::level::types::Circle;
use quick_xml::Reader;
use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;
use tracing::debug;

/// The parts of an SVG document that describe a level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SvgDocument {
    /// `d` attributes of every `<path>`, in document order
    pub paths: Vec<String>,
    /// Every `<circle>`, in document order
    pub circles: Vec<Circle>,
}

/// Collect an element's unescaped attributes keyed by their qualified name.
///
/// Malformed attributes (duplicates, missing quotes, bad entities) are fatal.
fn collect_attributes(
    e: &BytesStart,
    decoder: Decoder,
) -> Result<HashMap<String, String>, ConvertError> {
    let mut attrs = HashMap::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| ConvertError::Xml(e.to_string()))?;
        let key = std::str::from_utf8(attr.key.as_ref()).unwrap_or("");
        let value = attr
            .decode_and_unescape_value(decoder)
            .map_err(|e| ConvertError::Xml(e.to_string()))?;
        attrs.insert(key.to_string(), value.into_owned());
    }
    Ok(attrs)
}

fn required<'a>(
    attrs: &'a HashMap<String, String>,
    element: &'static str,
    attribute: &str,
) -> Result<&'a str, ConvertError> {
    attrs
        .get(attribute)
        .map(String::as_str)
        .ok_or_else(|| ConvertError::MissingAttribute {
            element,
            attribute: attribute.to_string(),
        })
}

/// Parse a coordinate attribute, truncating toward zero
fn parse_coord(attrs: &HashMap<String, String>, attribute: &str) -> Result<i64, ConvertError> {
    let value = required(attrs, "circle", attribute)?;
    value
        .trim()
        .parse::<f64>()
        .ok()
        .and_then(to_coord)
        .ok_or_else(|| ConvertError::InvalidNumber {
            attribute: attribute.to_string(),
            value: value.to_string(),
        })
}

fn parse_circle(
    attrs: &HashMap<String, String>,
    label_attributes: &[String],
) -> Result<Circle, ConvertError> {
    let label = label_attributes
        .iter()
        .find_map(|key| attrs.get(key))
        .ok_or_else(|| ConvertError::MissingAttribute {
            element: "circle",
            attribute: label_attributes.join(" or "),
        })?;

    Ok(Circle {
        label: label.clone(),
        cx: parse_coord(attrs, "cx")?,
        cy: parse_coord(attrs, "cy")?,
    })
}

fn handle_element(
    e: &BytesStart,
    decoder: Decoder,
    label_attributes: &[String],
    doc: &mut SvgDocument,
) -> Result<(), ConvertError> {
    let local = e.local_name();
    match local.as_ref() {
        b"path" => {
            let attrs = collect_attributes(e, decoder)?;
            let d = required(&attrs, "path", "d")?;
            doc.paths.push(d.to_string());
        }
        b"circle" => {
            let attrs = collect_attributes(e, decoder)?;
            doc.circles.push(parse_circle(&attrs, label_attributes)?);
        }
        _ => {}
    }
    Ok(())
}

/// Parse an SVG document, extracting path data and labelled circles.
///
/// The circle label is read from the first of `label_attributes` that the
/// element carries, e.g. `inkscape:label` and then `id`.
pub fn parse_svg(xml: &str, label_attributes: &[String]) -> Result<SvgDocument, ConvertError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let decoder = reader.decoder();
    let mut doc = SvgDocument::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                handle_element(e, decoder, label_attributes, &mut doc)?;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ConvertError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    debug!(
        "Parsed SVG: {} paths, {} circles",
        doc.paths.len(),
        doc.circles.len()
    );
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_labels() -> Vec<String> {
        vec!["inkscape:label".to_string(), "id".to_string()]
    }

    #[test]
    fn test_parse_paths_and_circles() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg"
     xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape">
  <g inkscape:label="Layer 1">
    <path d="M 0,0 L 10,0" id="path1"/>
    <circle id="circle7" inkscape:label="start" cx="3.7" cy="4.2" r="2"/>
    <path id="path2" d="M 5,5 H 15"></path>
    <circle id="fuel" cx="100" cy="-20.9" r="2"/>
  </g>
</svg>"#;

        let doc = parse_svg(xml, &default_labels()).unwrap();
        assert_eq!(doc.paths, vec!["M 0,0 L 10,0", "M 5,5 H 15"]);
        assert_eq!(
            doc.circles,
            vec![
                Circle {
                    label: "start".to_string(),
                    cx: 3,
                    cy: 4
                },
                Circle {
                    label: "fuel".to_string(),
                    cx: 100,
                    cy: -20
                },
            ]
        );
    }

    #[test]
    fn test_namespaced_elements() {
        let xml = r#"<svg:svg xmlns:svg="http://www.w3.org/2000/svg">
<svg:path d="M 1,1 V 4"/><svg:circle id="exit" cx="1" cy="2"/></svg:svg>"#;
        let doc = parse_svg(xml, &default_labels()).unwrap();
        assert_eq!(doc.paths.len(), 1);
        assert_eq!(doc.circles[0].label, "exit");
    }

    #[test]
    fn test_missing_attributes() {
        let err = parse_svg(r#"<svg><path id="p"/></svg>"#, &default_labels()).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::MissingAttribute {
                element: "path",
                ..
            }
        ));

        let err = parse_svg(r#"<svg><circle id="fuel" cx="1"/></svg>"#, &default_labels())
            .unwrap_err();
        assert!(matches!(err, ConvertError::MissingAttribute { ref attribute, .. } if attribute == "cy"));

        let err = parse_svg(r#"<svg><circle cx="1" cy="2"/></svg>"#, &default_labels())
            .unwrap_err();
        assert!(matches!(err, ConvertError::MissingAttribute { element: "circle", .. }));
    }

    #[test]
    fn test_invalid_coordinate() {
        let err = parse_svg(
            r#"<svg><circle id="fuel" cx="abc" cy="2"/></svg>"#,
            &default_labels(),
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::InvalidNumber { ref value, .. } if value == "abc"));
    }

    #[test]
    fn test_attribute_values_are_unescaped() {
        let xml = r#"<svg xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape">
<path d="M&#10;0,0&#10;L&#10;5,0"/>
<circle inkscape:label="st&#97;rt" cx="1" cy="2"/>
<circle id="f&amp;uel" cx="3" cy="4"/>
</svg>"#;
        let doc = parse_svg(xml, &default_labels()).unwrap();
        assert_eq!(doc.paths, vec!["M\n0,0\nL\n5,0"]);
        assert_eq!(doc.circles[0].label, "start");
        assert_eq!(doc.circles[1].label, "f&uel");
    }

    #[test]
    fn test_malformed_attributes_are_fatal() {
        let err = parse_svg(r#"<svg><path d="M 0,0" d="M 1,1"/></svg>"#, &default_labels())
            .unwrap_err();
        assert!(matches!(err, ConvertError::Xml(_)));

        let err = parse_svg(r#"<svg><path d="M &bogus; 0,0"/></svg>"#, &default_labels())
            .unwrap_err();
        assert!(matches!(err, ConvertError::Xml(_)));
    }

    #[test]
    fn test_out_of_range_coordinate() {
        let err = parse_svg(
            r#"<svg><circle id="fuel" cx="1e300" cy="2"/></svg>"#,
            &default_labels(),
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::InvalidNumber { ref value, .. } if value == "1e300"));
    }

    #[test]
    fn test_malformed_xml() {
        let err = parse_svg(r#"<svg><path d="M 0,0"></svg>"#, &default_labels()).unwrap_err();
        assert!(matches!(err, ConvertError::Xml(_)));
    }
}
