/// Integer pixel coordinate in the source drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Wall rendering color, written out as four `~`-separated bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::new(255, 0, 0, 0)
    }
}

/// One maze wall edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    pub color: Rgba,
}

impl Segment {
    pub fn new(start: Point, end: Point, color: Rgba) -> Self {
        Self { start, end, color }
    }
}

/// Semantic meaning of a labelled circle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerKind {
    Start,
    Fuel,
    Exit,
    /// Unrecognized label, passed through to the level file as-is
    Other(String),
}

impl MarkerKind {
    /// Labels are matched case-insensitively, surrounding whitespace ignored
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("start") {
            MarkerKind::Start
        } else if label.eq_ignore_ascii_case("fuel") {
            MarkerKind::Fuel
        } else if label.eq_ignore_ascii_case("exit") {
            MarkerKind::Exit
        } else {
            MarkerKind::Other(label.to_string())
        }
    }

    /// Object class name understood by the level loader.
    ///
    /// The start position is not an object; it is written as the `!` record.
    pub fn object_class(&self) -> Option<String> {
        match self {
            MarkerKind::Start => None,
            MarkerKind::Fuel => Some("FUEL".to_string()),
            MarkerKind::Exit => Some("EXIT".to_string()),
            MarkerKind::Other(label) => Some(label.to_uppercase()),
        }
    }
}

/// A labelled point of interest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub position: Point,
}

/// A `<circle>` as read from the document, before classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Circle {
    pub label: String,
    pub cx: i64,
    pub cy: i64,
}

/// Supported path commands. Anything else is rejected by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move,
    Horizontal,
    Vertical,
    Line,
    Close,
}

impl Command {
    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'M' => Some(Command::Move),
            'H' => Some(Command::Horizontal),
            'V' => Some(Command::Vertical),
            'L' => Some(Command::Line),
            'Z' => Some(Command::Close),
            _ => None,
        }
    }
}

/// A single whitespace-separated piece of path data
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'a> {
    Command(Command),
    /// `x,y` operand
    Pair(f64, f64),
    /// Single numeric operand
    Scalar(f64),
    /// A command letter outside the supported subset (curves, relative moves)
    Unsupported(char),
    /// Non-numeric text that is ignored
    Stray(&'a str),
}

/// Output of the path interpreter, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathEvent {
    /// A new figure was started by `M`
    Figure,
    Wall(Segment),
}

/// Everything needed to write a level file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Level {
    pub start: Option<Point>,
    pub events: Vec<PathEvent>,
    /// Non-start markers in document order
    pub markers: Vec<Marker>,
}

impl Level {
    pub fn walls(&self) -> impl Iterator<Item = &Segment> {
        self.events.iter().filter_map(|e| match e {
            PathEvent::Wall(s) => Some(s),
            PathEvent::Figure => None,
        })
    }

    pub fn figure_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, PathEvent::Figure))
            .count()
    }
}
