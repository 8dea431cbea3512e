use crate::gfx::Color;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};
use std::fmt::{Display, Formatter, Result};
use std::time::Duration;

#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
/// A single step of a drawing program.
///
/// In JSON, each command is an object tagged by `op`, for example
/// `{"op": "line", "x0": 0, "y0": 0, "x1": 10, "y1": 5}`.
pub enum Command {
    // Paint the whole screen black.
    Clear,
    // Select a palette color or `#rrggbb`; anything else selects black.
    Color { name: String },
    // Select a color by its channels.
    Rgb(Color),
    Pixel { x: i32, y: i32 },
    Line { x0: i32, y0: i32, x1: i32, y1: i32 },
    Rect { x: i32, y: i32, width: i32, height: i32 },
    Circle { x: i32, y: i32, radius: i32 },
    // Pause between frames.
    Wait {
        #[serde_as(as = "DurationMilliSeconds<u64>")]
        ms: Duration,
    },
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Command::Clear => write!(f, "clear"),
            Command::Color { name } => write!(f, "color {name}"),
            Command::Rgb(color) => write!(f, "color {color}"),
            Command::Pixel { x, y } => write!(f, "pixel ({x}, {y})"),
            Command::Line { x0, y0, x1, y1 } => write!(f, "line ({x0}, {y0}) -> ({x1}, {y1})"),
            Command::Rect {
                x,
                y,
                width,
                height,
            } => write!(f, "rect ({x}, {y}) {width}x{height}"),
            Command::Circle { x, y, radius } => write!(f, "circle ({x}, {y}) r={radius}"),
            Command::Wait { ms } => write!(f, "wait {}ms", ms.as_millis()),
        }
    }
}
