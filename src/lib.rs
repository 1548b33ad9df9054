//! # svg-to-level
//!
//! Converts mazes drawn in Inkscape into the game's level file format.
//!
//! Walls are drawn as `<path>` elements using only the absolute `M`, `H`,
//! `V`, `L` and `Z` commands. The start position, fuel and exit are
//! `<circle>` elements labelled `start`, `fuel` and `exit`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use svg_to_level::{ConvertOptions, convert_svg_file};
//!
//! let level = convert_svg_file("maze.svg", &ConvertOptions::default()).unwrap();
//! std::fs::write("level1.cfg", level).unwrap();
//! ```

pub mod level;

// Re-export commonly used items
pub use level::{
    ConvertError, ConvertOptions, Level, PathError, PathMode, build_level, convert_svg,
    convert_svg_file, parse_svg,
};
