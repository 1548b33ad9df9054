use crate::level::types::{Level, Marker, PathEvent, Point, Segment};

/// Object class the loader uses for wall figures
pub const OBSTRUCTION: &str = "OBSTRUCTION";

/// Start record: placeholder time limit and fuel, then the ship position
pub fn format_start(p: &Point) -> String {
    format!("!~0~0~{}~{}", p.x, p.y)
}

pub fn format_figure() -> String {
    format!("N~{}", OBSTRUCTION)
}

pub fn format_segment(s: &Segment) -> String {
    let c = &s.color;
    format!(
        "L~{}~{}~{}~{}~{}~{}~{}~{}",
        s.start.x, s.start.y, s.end.x, s.end.y, c.r, c.g, c.b, c.a
    )
}

/// A marker is an object header followed by its position; the start marker
/// is the single `!` record
pub fn format_marker(m: &Marker) -> Vec<String> {
    match m.kind.object_class() {
        Some(class) => vec![
            format!("N~{}", class),
            format!("P~{}~{}", m.position.x, m.position.y),
        ],
        None => vec![format_start(&m.position)],
    }
}

/// Serialize a level, one record per line.
///
/// The start record always comes first, then the path records in order,
/// then the markers.
pub fn format_level(level: &Level) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(start) = &level.start {
        lines.push(format_start(start));
    }

    for event in &level.events {
        lines.push(match event {
            PathEvent::Figure => format_figure(),
            PathEvent::Wall(segment) => format_segment(segment),
        });
    }

    for marker in &level.markers {
        lines.extend(format_marker(marker));
    }

    let mut out = lines.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}
