use crate::level::error::{ConvertError, PathError};
use crate::level::types::{Command, PathEvent, Point, Rgba, Segment, Token};
use tracing::debug;

/// How `<path>` boundaries are treated by the interpreter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathMode {
    /// Every `<path>` starts from a fresh interpreter state
    #[default]
    Independent,
    /// All path strings are concatenated into one token stream, so the
    /// current command and points carry over from one `<path>` to the next
    SharedStream,
}

/// Truncate toward zero, the same way the drawing coordinates are stored.
///
/// Returns `None` for values that do not fit an `i64` (including NaN and
/// infinities).
pub(crate) fn to_coord(v: f64) -> Option<i64> {
    let t = v.trunc();
    (t >= i64::MIN as f64 && t < i64::MAX as f64).then_some(t as i64)
}

fn parse_number(s: &str, token: &str) -> Result<f64, PathError> {
    s.parse::<f64>()
        .ok()
        .filter(|v| to_coord(*v).is_some())
        .ok_or_else(|| PathError::InvalidNumber(token.to_string()))
}

/// A digit, optionally preceded by a sign and/or a decimal point
fn looks_numeric(s: &str) -> bool {
    let s = s.strip_prefix(['-', '+']).unwrap_or(s);
    let s = s.strip_prefix('.').unwrap_or(s);
    s.starts_with(|c: char| c.is_ascii_digit())
}

/// Classify one whitespace-separated piece of path data
pub fn parse_token(s: &str) -> Result<Token<'_>, PathError> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next())
        && c.is_ascii_alphabetic()
    {
        return Ok(match Command::from_letter(c) {
            Some(cmd) => Token::Command(cmd),
            None => Token::Unsupported(c),
        });
    }

    if !looks_numeric(s) {
        return Ok(Token::Stray(s));
    }

    match s.split_once(',') {
        Some((x, y)) => Ok(Token::Pair(parse_number(x, s)?, parse_number(y, s)?)),
        None => Ok(Token::Scalar(parse_number(s, s)?)),
    }
}

/// Split a path `d` string on whitespace into tokens
pub fn tokenize(d: &str) -> Result<Vec<Token<'_>>, PathError> {
    d.split_whitespace().map(parse_token).collect()
}

fn operand_text(x: f64, y: Option<f64>) -> String {
    match y {
        Some(y) => format!("{},{}", x, y),
        None => x.to_string(),
    }
}

/// Replays path tokens as wall segments.
///
/// State is scoped to one interpreter; feed it tokens in order and call
/// [`Interpreter::finish`] to collect the events.
#[derive(Debug, Clone)]
pub struct Interpreter {
    color: Rgba,
    command: Option<Command>,
    first: Option<Point>,
    last: Point,
    events: Vec<PathEvent>,
}

impl Interpreter {
    pub fn new(color: Rgba) -> Self {
        Self {
            color,
            command: None,
            first: None,
            last: Point::default(),
            events: Vec::new(),
        }
    }

    fn wall_to(&mut self, end: Point) {
        self.events
            .push(PathEvent::Wall(Segment::new(self.last, end, self.color)));
        self.last = end;
    }

    pub fn feed(&mut self, token: Token) -> Result<(), PathError> {
        match token {
            Token::Command(Command::Close) => {
                let first = self.first.ok_or(PathError::CloseWithoutFigure)?;
                // The first point becomes the continuation point
                self.wall_to(first);
            }
            Token::Command(cmd) => {
                if cmd == Command::Move {
                    self.events.push(PathEvent::Figure);
                }
                self.command = Some(cmd);
            }
            Token::Unsupported(c) => return Err(PathError::UnsupportedCommand(c)),
            Token::Stray(s) => debug!("Skipping stray path token '{}'", s),
            Token::Pair(x, y) => self.operand(x, Some(y))?,
            Token::Scalar(v) => self.operand(v, None)?,
        }
        Ok(())
    }

    /// Operand values were range-checked by the tokenizer
    fn operand(&mut self, x: f64, y: Option<f64>) -> Result<(), PathError> {
        let truncate = |v: f64| v.trunc() as i64;

        // Z never becomes the current command
        match (self.command, y) {
            (None | Some(Command::Close), _) => {
                return Err(PathError::OperandBeforeCommand(operand_text(x, y)));
            }
            (Some(Command::Move), Some(y)) => {
                let p = Point::new(truncate(x), truncate(y));
                self.first = Some(p);
                self.last = p;
            }
            (Some(Command::Line), Some(y)) => self.wall_to(Point::new(truncate(x), truncate(y))),
            (Some(Command::Move | Command::Line), None) => {
                return Err(PathError::ExpectedPair(operand_text(x, y)));
            }
            (Some(Command::Horizontal), _) => {
                self.wall_to(Point::new(truncate(x), self.last.y));
            }
            (Some(Command::Vertical), y) => {
                // A stray pair moves to its y component, a scalar is the y itself
                let amt = truncate(y.unwrap_or(x));
                self.wall_to(Point::new(self.last.x, amt));
            }
        }
        Ok(())
    }

    pub fn finish(self) -> Vec<PathEvent> {
        self.events
    }
}

/// Interpret a single path `d` string
pub fn interpret(d: &str, color: Rgba) -> Result<Vec<PathEvent>, PathError> {
    let mut interp = Interpreter::new(color);
    for token in tokenize(d)? {
        interp.feed(token)?;
    }
    Ok(interp.finish())
}

/// Interpret every path of a document, honoring `mode` at path boundaries
pub fn interpret_paths<S: AsRef<str>>(
    paths: &[S],
    color: Rgba,
    mode: PathMode,
) -> Result<Vec<PathEvent>, ConvertError> {
    let wrap = |index: usize| move |source: PathError| ConvertError::Path { index, source };

    match mode {
        PathMode::Independent => {
            let mut events = Vec::new();
            for (index, d) in paths.iter().enumerate() {
                let path_events = interpret(d.as_ref(), color).map_err(wrap(index))?;
                debug!("Path #{} produced {} events", index, path_events.len());
                events.extend(path_events);
            }
            Ok(events)
        }
        PathMode::SharedStream => {
            let mut interp = Interpreter::new(color);
            for (index, d) in paths.iter().enumerate() {
                for token in tokenize(d.as_ref()).map_err(wrap(index))? {
                    interp.feed(token).map_err(wrap(index))?;
                }
            }
            Ok(interp.finish())
        }
    }
}
