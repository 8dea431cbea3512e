use super::command::Command;
use super::pacer::Pacer;
use crate::error::Result;
use crate::gfx::{Color, PixelBuffer, Surface};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

#[cfg(test)]
mod tests;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
/// An ordered list of drawing commands, stored as a JSON array.
pub struct Program {
    pub commands: Vec<Command>,
}

impl Program {
    pub fn new(commands: Vec<Command>) -> Program {
        Program { commands }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Program> {
        let path = path.as_ref();
        let program = Program::from_json(&fs::read_to_string(path)?)?;
        debug!(
            "loaded {} commands from {}",
            program.commands.len(),
            path.display()
        );
        Ok(program)
    }

    pub fn from_json(json: &str) -> Result<Program> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Run every command in order. Returns when the last one is done.
    pub fn run<B: PixelBuffer, P: Pacer>(&self, surface: &mut Surface<B>, pacer: &mut P) {
        for command in &self.commands {
            execute(command, surface, pacer);
        }
    }
}

fn execute<B: PixelBuffer, P: Pacer>(command: &Command, surface: &mut Surface<B>, pacer: &mut P) {
    debug!("executing {command}");

    match command {
        Command::Clear => surface.clear(),
        Command::Color { name } => match name.parse::<Color>() {
            Ok(color) => surface.set_active_color(color),
            Err(_) => {
                warn!("unknown color {name:?}, using black");
                surface.set_active_color_by_name(name);
            }
        },
        Command::Rgb(color) => surface.set_active_color(*color),
        Command::Pixel { x, y } => surface.plot(*x, *y),
        Command::Line { x0, y0, x1, y1 } => surface.draw_line(*x0, *y0, *x1, *y1),
        Command::Rect {
            x,
            y,
            width,
            height,
        } => surface.fill_rect(*x, *y, *width, *height),
        Command::Circle { x, y, radius } => surface.fill_circle(*x, *y, *radius),
        Command::Wait { ms } => pacer.wait(*ms),
    }
}
