//! SVG path data parsing and normalization.
//!
//! SVG path syntax: https://www.w3.org/TR/SVG/paths.html

use std::fmt;

use crate::error::FitError;
use crate::number::shortest;
use crate::scan::Scanner;

/// A parsed SVG path.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub commands: Vec<Command>,
}

/// A path command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// M/m - Move to
    MoveTo { rel: bool, x: f64, y: f64 },
    /// L/l - Line to
    LineTo { rel: bool, x: f64, y: f64 },
    /// H/h - Horizontal line to
    HorizontalTo { rel: bool, x: f64 },
    /// V/v - Vertical line to
    VerticalTo { rel: bool, y: f64 },
    /// C/c - Cubic bezier
    CurveTo {
        rel: bool,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    },
    /// S/s - Smooth cubic bezier
    SmoothCurveTo {
        rel: bool,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    },
    /// Q/q - Quadratic bezier
    QuadTo {
        rel: bool,
        x1: f64,
        y1: f64,
        x: f64,
        y: f64,
    },
    /// T/t - Smooth quadratic bezier
    SmoothQuadTo { rel: bool, x: f64, y: f64 },
    /// A/a - Arc
    Arc {
        rel: bool,
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    },
    /// Z/z - Close path
    ClosePath,
}

impl Command {
    fn is_relative(&self) -> bool {
        match self {
            Command::MoveTo { rel, .. }
            | Command::LineTo { rel, .. }
            | Command::HorizontalTo { rel, .. }
            | Command::VerticalTo { rel, .. }
            | Command::CurveTo { rel, .. }
            | Command::SmoothCurveTo { rel, .. }
            | Command::QuadTo { rel, .. }
            | Command::SmoothQuadTo { rel, .. }
            | Command::Arc { rel, .. } => *rel,
            Command::ClosePath => false,
        }
    }

    /// Whether every number in the command is finite.
    pub fn is_finite(&self) -> bool {
        self.letter_and_args().1.iter().all(|n| n.is_finite())
    }

    /// Command letter and its arguments in path-data order.
    fn letter_and_args(&self) -> (char, Vec<f64>) {
        match *self {
            Command::MoveTo { rel, x, y } => (pick(rel, 'M'), vec![x, y]),
            Command::LineTo { rel, x, y } => (pick(rel, 'L'), vec![x, y]),
            Command::HorizontalTo { rel, x } => (pick(rel, 'H'), vec![x]),
            Command::VerticalTo { rel, y } => (pick(rel, 'V'), vec![y]),
            Command::CurveTo {
                rel,
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => (pick(rel, 'C'), vec![x1, y1, x2, y2, x, y]),
            Command::SmoothCurveTo { rel, x2, y2, x, y } => (pick(rel, 'S'), vec![x2, y2, x, y]),
            Command::QuadTo { rel, x1, y1, x, y } => (pick(rel, 'Q'), vec![x1, y1, x, y]),
            Command::SmoothQuadTo { rel, x, y } => (pick(rel, 'T'), vec![x, y]),
            Command::Arc {
                rel,
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                x,
                y,
            } => (
                pick(rel, 'A'),
                vec![
                    rx,
                    ry,
                    x_axis_rotation,
                    f64::from(u8::from(large_arc)),
                    f64::from(u8::from(sweep)),
                    x,
                    y,
                ],
            ),
            Command::ClosePath => ('Z', Vec::new()),
        }
    }
}

/// Parse SVG path data.
pub fn parse_path(d: &str) -> Result<Path, FitError> {
    let mut parser = PathParser::new(d);
    parser.parse()
}

impl Path {
    pub fn is_absolute(&self) -> bool {
        !self.commands.iter().any(Command::is_relative)
    }

    /// Rewrite every relative command as its absolute equivalent.
    ///
    /// Command kinds are kept: `h` becomes `H`, `s` becomes `S`, and so on.
    pub fn to_absolute(&self) -> Path {
        let mut commands = Vec::with_capacity(self.commands.len());
        let (mut cx, mut cy) = (0.0, 0.0);
        let (mut sx, mut sy) = (0.0, 0.0);

        for cmd in &self.commands {
            let abs = match *cmd {
                Command::MoveTo { rel, x, y } => {
                    let (ox, oy) = origin(rel, cx, cy);
                    let (x, y) = (x + ox, y + oy);
                    (sx, sy) = (x, y);
                    Command::MoveTo { rel: false, x, y }
                }
                Command::LineTo { rel, x, y } => {
                    let (ox, oy) = origin(rel, cx, cy);
                    Command::LineTo {
                        rel: false,
                        x: x + ox,
                        y: y + oy,
                    }
                }
                Command::HorizontalTo { rel, x } => {
                    let (ox, _) = origin(rel, cx, cy);
                    Command::HorizontalTo { rel: false, x: x + ox }
                }
                Command::VerticalTo { rel, y } => {
                    let (_, oy) = origin(rel, cx, cy);
                    Command::VerticalTo { rel: false, y: y + oy }
                }
                Command::CurveTo {
                    rel,
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => {
                    let (ox, oy) = origin(rel, cx, cy);
                    Command::CurveTo {
                        rel: false,
                        x1: x1 + ox,
                        y1: y1 + oy,
                        x2: x2 + ox,
                        y2: y2 + oy,
                        x: x + ox,
                        y: y + oy,
                    }
                }
                Command::SmoothCurveTo { rel, x2, y2, x, y } => {
                    let (ox, oy) = origin(rel, cx, cy);
                    Command::SmoothCurveTo {
                        rel: false,
                        x2: x2 + ox,
                        y2: y2 + oy,
                        x: x + ox,
                        y: y + oy,
                    }
                }
                Command::QuadTo { rel, x1, y1, x, y } => {
                    let (ox, oy) = origin(rel, cx, cy);
                    Command::QuadTo {
                        rel: false,
                        x1: x1 + ox,
                        y1: y1 + oy,
                        x: x + ox,
                        y: y + oy,
                    }
                }
                Command::SmoothQuadTo { rel, x, y } => {
                    let (ox, oy) = origin(rel, cx, cy);
                    Command::SmoothQuadTo {
                        rel: false,
                        x: x + ox,
                        y: y + oy,
                    }
                }
                Command::Arc {
                    rel,
                    rx,
                    ry,
                    x_axis_rotation,
                    large_arc,
                    sweep,
                    x,
                    y,
                } => {
                    let (ox, oy) = origin(rel, cx, cy);
                    Command::Arc {
                        rel: false,
                        rx,
                        ry,
                        x_axis_rotation,
                        large_arc,
                        sweep,
                        x: x + ox,
                        y: y + oy,
                    }
                }
                Command::ClosePath => Command::ClosePath,
            };

            (cx, cy) = end_point(&abs, (cx, cy), (sx, sy));
            commands.push(abs);
        }

        Path { commands }
    }
}

/// Offset for a command's coordinates: the current point when relative.
fn origin(rel: bool, cx: f64, cy: f64) -> (f64, f64) {
    if rel { (cx, cy) } else { (0.0, 0.0) }
}

/// Current point after an absolute command.
pub(crate) fn end_point(cmd: &Command, current: (f64, f64), start: (f64, f64)) -> (f64, f64) {
    match *cmd {
        Command::MoveTo { x, y, .. }
        | Command::LineTo { x, y, .. }
        | Command::CurveTo { x, y, .. }
        | Command::SmoothCurveTo { x, y, .. }
        | Command::QuadTo { x, y, .. }
        | Command::SmoothQuadTo { x, y, .. }
        | Command::Arc { x, y, .. } => (x, y),
        Command::HorizontalTo { x, .. } => (x, current.1),
        Command::VerticalTo { y, .. } => (current.0, y),
        Command::ClosePath => start,
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            let (letter, args) = cmd.letter_and_args();
            write!(f, "{}", letter)?;
            for (j, arg) in args.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                f.write_str(&shortest(*arg))?;
            }
        }
        Ok(())
    }
}

fn pick(rel: bool, upper: char) -> char {
    if rel { upper.to_ascii_lowercase() } else { upper }
}

struct PathParser<'a> {
    scanner: Scanner<'a>,
}

impl<'a> PathParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            scanner: Scanner::new(input),
        }
    }

    fn parse(&mut self) -> Result<Path, FitError> {
        let mut commands = Vec::new();
        let mut last_cmd: Option<char> = None;

        self.scanner.skip_whitespace();

        while !self.scanner.is_eof() {
            let cmd = if self.scanner.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
                let c = self.scanner.next().unwrap_or_default();
                if last_cmd.is_none() && !matches!(c, 'M' | 'm') {
                    return Err(FitError::InvalidPath(format!(
                        "Path must start with a moveto, found: {}",
                        c
                    )));
                }
                last_cmd = Some(c);
                c
            } else {
                // Implicit command - repeat last command
                // After M, implicit command is L; after m, it's l
                match last_cmd {
                    Some('M') => 'L',
                    Some('m') => 'l',
                    Some('Z' | 'z') => {
                        return Err(FitError::InvalidPath(format!(
                            "Unexpected data after closepath: {}",
                            self.scanner.rest_token()
                        )));
                    }
                    Some(c) => c,
                    None => {
                        return Err(FitError::InvalidPath(
                            "Expected command letter".into(),
                        ));
                    }
                }
            };

            let parsed = self.parse_command(cmd)?;
            commands.push(parsed);
            self.scanner.skip_whitespace_and_comma();
        }

        Ok(Path { commands })
    }

    fn parse_command(&mut self, cmd: char) -> Result<Command, FitError> {
        let rel = cmd.is_ascii_lowercase();

        match cmd.to_ascii_lowercase() {
            'm' => {
                let x = self.parse_number()?;
                let y = self.parse_number()?;
                Ok(Command::MoveTo { rel, x, y })
            }
            'l' => {
                let x = self.parse_number()?;
                let y = self.parse_number()?;
                Ok(Command::LineTo { rel, x, y })
            }
            'h' => {
                let x = self.parse_number()?;
                Ok(Command::HorizontalTo { rel, x })
            }
            'v' => {
                let y = self.parse_number()?;
                Ok(Command::VerticalTo { rel, y })
            }
            'c' => {
                let x1 = self.parse_number()?;
                let y1 = self.parse_number()?;
                let x2 = self.parse_number()?;
                let y2 = self.parse_number()?;
                let x = self.parse_number()?;
                let y = self.parse_number()?;
                Ok(Command::CurveTo {
                    rel,
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                })
            }
            's' => {
                let x2 = self.parse_number()?;
                let y2 = self.parse_number()?;
                let x = self.parse_number()?;
                let y = self.parse_number()?;
                Ok(Command::SmoothCurveTo { rel, x2, y2, x, y })
            }
            'q' => {
                let x1 = self.parse_number()?;
                let y1 = self.parse_number()?;
                let x = self.parse_number()?;
                let y = self.parse_number()?;
                Ok(Command::QuadTo { rel, x1, y1, x, y })
            }
            't' => {
                let x = self.parse_number()?;
                let y = self.parse_number()?;
                Ok(Command::SmoothQuadTo { rel, x, y })
            }
            'a' => {
                let rx = self.parse_number()?;
                let ry = self.parse_number()?;
                let x_axis_rotation = self.parse_number()?;
                let large_arc = self.parse_flag()?;
                let sweep = self.parse_flag()?;
                let x = self.parse_number()?;
                let y = self.parse_number()?;
                Ok(Command::Arc {
                    rel,
                    rx,
                    ry,
                    x_axis_rotation,
                    large_arc,
                    sweep,
                    x,
                    y,
                })
            }
            'z' => Ok(Command::ClosePath),
            _ => Err(FitError::InvalidPath(format!("Unknown command: {}", cmd))),
        }
    }

    fn parse_number(&mut self) -> Result<f64, FitError> {
        self.scanner.number().ok_or_else(|| {
            FitError::InvalidPath(format!(
                "Expected number, found: `{}`",
                self.scanner.rest_token()
            ))
        })
    }

    fn parse_flag(&mut self) -> Result<bool, FitError> {
        self.scanner.skip_whitespace_and_comma();
        match self.scanner.next() {
            Some('0') => Ok(false),
            Some('1') => Ok(true),
            Some(c) => Err(FitError::InvalidPath(format!(
                "Expected flag (0 or 1), got: {}",
                c
            ))),
            None => Err(FitError::InvalidPath("Expected flag".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_path() {
        let path = parse_path("M10 20 L30 40").unwrap();
        assert_eq!(path.commands.len(), 2);
    }

    #[test]
    fn test_parse_relative_path() {
        let path = parse_path("m10,20 l30,40").unwrap();
        assert_eq!(path.commands.len(), 2);
        assert!(matches!(path.commands[0], Command::MoveTo { rel: true, .. }));
    }

    #[test]
    fn test_parse_implicit_lineto() {
        let path = parse_path("M10 20 30 40").unwrap();
        assert_eq!(path.commands.len(), 2);
        assert!(matches!(path.commands[1], Command::LineTo { .. }));
    }

    #[test]
    fn test_parse_compact_arc_flags() {
        let path = parse_path("M0 0 a10 10 0 1010 10").unwrap();
        if let Command::Arc {
            large_arc,
            sweep,
            x,
            y,
            ..
        } = path.commands[1]
        {
            assert!(large_arc);
            assert!(!sweep);
            assert_eq!((x, y), (10.0, 10.0));
        } else {
            panic!("Expected Arc command");
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_path("L10 10").is_err());
        assert!(parse_path("M10").is_err());
        assert!(parse_path("M10 10 X5").is_err());
        assert!(parse_path("M0 0 A1 1 0 2 0 5 5").is_err());
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_path("").unwrap().commands.is_empty());
        assert!(parse_path("  \n ").unwrap().commands.is_empty());
    }

    #[test]
    fn test_to_absolute() {
        let path = parse_path("m10 10 h5 v5 l-5 0 z m1 1 c1 1 2 2 3 3 s1 1 2 2 q1 1 2 2 t1 1 a1 1 0 0 1 1 1").unwrap();
        let abs = path.to_absolute();
        assert!(abs.is_absolute());
        assert_eq!(
            abs.to_string(),
            "M10 10 H15 V15 L10 15 Z M11 11 C12 12 13 13 14 14 S15 15 16 16 Q17 17 18 18 T19 19 A1 1 0 0 1 20 20"
        );
    }

    #[test]
    fn test_to_absolute_keeps_absolute() {
        let path = parse_path("M1 2 L3 4 Z").unwrap();
        assert_eq!(path.to_absolute(), path);
    }

    #[test]
    fn test_is_finite() {
        let path = parse_path("M0 0 L1e400 0").unwrap();
        assert!(path.commands[0].is_finite());
        assert!(!path.commands[1].is_finite());
        assert!(Command::ClosePath.is_finite());
    }
}
