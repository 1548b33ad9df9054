//! SVG to level conversion module
//!
//! This module reads an Inkscape SVG drawing and converts it to the game's
//! level file format: `<path>` elements become maze walls and labelled
//! `<circle>` elements become the start position and other markers.

pub mod error;
pub mod format;
pub mod markers;
pub mod parser;
pub mod path;
pub mod types;

use std::fs;
use std::path::Path;
use tracing::debug;

pub use error::{ConvertError, PathError};
pub use format::format_level;
pub use markers::classify;
pub use parser::{SvgDocument, parse_svg};
pub use path::{Interpreter, PathMode, interpret, interpret_paths, tokenize};
pub use types::*;

/// Options for SVG to level conversion
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Color written on every wall record (default: 255,0,0,0)
    pub wall_color: Rgba,
    /// Attributes holding a circle's label, in lookup order
    pub label_attributes: Vec<String>,
    /// How `<path>` boundaries are treated (default: independent)
    pub path_mode: PathMode,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            wall_color: Rgba::default(),
            label_attributes: vec!["inkscape:label".to_string(), "id".to_string()],
            path_mode: PathMode::default(),
        }
    }
}

/// Build a level from an already parsed document
pub fn build_level(doc: &SvgDocument, options: &ConvertOptions) -> Result<Level, ConvertError> {
    let events = interpret_paths(&doc.paths, options.wall_color, options.path_mode)?;
    let (start, markers) = classify(&doc.circles)?;
    let level = Level {
        start,
        events,
        markers,
    };

    debug!(
        "Built level: {} figures, {} walls, {} markers",
        level.figure_count(),
        level.walls().count(),
        level.markers.len()
    );
    Ok(level)
}

/// Convert SVG text to level file text
pub fn convert_svg(xml: &str, options: &ConvertOptions) -> Result<String, ConvertError> {
    let doc = parse_svg(xml, &options.label_attributes)?;
    let level = build_level(&doc, options)?;
    Ok(format_level(&level))
}

/// Convert an SVG file to level file text
pub fn convert_svg_file(
    path: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<String, ConvertError> {
    let path = path.as_ref();
    let xml = fs::read_to_string(path).map_err(|source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    convert_svg(&xml, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = ConvertOptions::default();
        assert_eq!(opts.wall_color, Rgba::new(255, 0, 0, 0));
        assert_eq!(opts.label_attributes[0], "inkscape:label");
        assert_eq!(opts.path_mode, PathMode::Independent);
    }

    #[test]
    fn test_custom_wall_color() {
        let opts = ConvertOptions {
            wall_color: Rgba::new(0, 255, 0, 3),
            ..Default::default()
        };
        let out = convert_svg(r#"<svg><path d="M 0,0 H 4"/></svg>"#, &opts).unwrap();
        assert_eq!(out, "N~OBSTRUCTION\nL~0~0~4~0~0~255~0~3\n");
    }

    #[test]
    fn test_entity_encoded_path_and_label() {
        let xml = r#"<svg><path d="M&#10;0,0&#10;L&#10;5,0"/><circle id="st&#97;rt" cx="1" cy="2"/></svg>"#;
        let out = convert_svg(xml, &ConvertOptions::default()).unwrap();
        assert_eq!(out, "!~0~0~1~2\nN~OBSTRUCTION\nL~0~0~5~0~255~0~0~0\n");
    }

    #[test]
    fn test_path_error_carries_index() {
        let xml = r#"<svg><path d="M 0,0 H 4"/><path d="M 0,0 Q 1,1 2,2"/></svg>"#;
        let err = convert_svg(xml, &ConvertOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::Path {
                index: 1,
                source: PathError::UnsupportedCommand('Q')
            }
        ));
    }
}
