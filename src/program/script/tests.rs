use super::*;
use crate::gfx::{Geometry, MemoryBuffer, PackedColor};
use crate::Error;
use std::time::Duration;

#[derive(Default)]
// Records waits instead of sleeping.
struct RecordingPacer {
    waits: Vec<Duration>,
}

impl Pacer for RecordingPacer {
    fn wait(&mut self, duration: Duration) {
        self.waits.push(duration);
    }
}

fn run(json: &str) -> (Surface<MemoryBuffer>, RecordingPacer) {
    let program = Program::from_json(json).unwrap();
    let mut surface = Surface::in_memory(Geometry::xrgb8888(16, 16)).unwrap();
    let mut pacer = RecordingPacer::default();
    program.run(&mut surface, &mut pacer);
    (surface, pacer)
}

#[test]
fn parse() {
    let program = Program::from_json(
        r#"[
            {"op": "clear"},
            {"op": "color", "name": "rojo"},
            {"op": "rgb", "r": 1, "g": 2, "b": 3},
            {"op": "pixel", "x": 1, "y": 2},
            {"op": "line", "x0": 0, "y0": 0, "x1": 5, "y1": 5},
            {"op": "rect", "x": 1, "y": 1, "width": 3, "height": 2},
            {"op": "circle", "x": 8, "y": 8, "radius": 4},
            {"op": "wait", "ms": 250}
        ]"#,
    )
    .unwrap();

    assert_eq!(
        program.commands,
        vec![
            Command::Clear,
            Command::Color {
                name: "rojo".to_string()
            },
            Command::Rgb(Color::new(1, 2, 3)),
            Command::Pixel { x: 1, y: 2 },
            Command::Line {
                x0: 0,
                y0: 0,
                x1: 5,
                y1: 5
            },
            Command::Rect {
                x: 1,
                y: 1,
                width: 3,
                height: 2
            },
            Command::Circle {
                x: 8,
                y: 8,
                radius: 4
            },
            Command::Wait {
                ms: Duration::from_millis(250)
            },
        ]
    );

    // Serializing gives back the same program.
    assert_eq!(Program::from_json(&program.to_json().unwrap()).unwrap(), program);
}

#[test]
fn bad_programs() {
    for json in [
        "",
        "{}",
        r#"[{"op": "triangle"}]"#,
        r#"[{"op": "pixel", "x": 1}]"#,
        r#"[{"op": "rgb", "r": 256, "g": 0, "b": 0}]"#,
    ] {
        assert!(
            matches!(Program::from_json(json), Err(Error::Program(_))),
            "accepted {json:?}"
        );
    }

    assert!(matches!(
        Program::load("/this/program/does/not/exist.json"),
        Err(Error::Io(_))
    ));
}

#[test]
fn draws() {
    let (surface, pacer) = run(r##"[
        {"op": "color", "name": "azul"},
        {"op": "pixel", "x": 2, "y": 3},
        {"op": "color", "name": "#ff0000"},
        {"op": "rect", "x": 10, "y": 10, "width": 2, "height": 2},
        {"op": "rgb", "r": 0, "g": 255, "b": 0},
        {"op": "line", "x0": 0, "y0": 15, "x1": 3, "y1": 15}
    ]"##);

    assert_eq!(surface.pixel(2, 3), Some(PackedColor(0x0000FF)));
    assert_eq!(surface.pixel(11, 11), Some(PackedColor(0xFF0000)));
    assert_eq!(surface.pixel(12, 12), Some(PackedColor(0)));
    for x in 0..=3 {
        assert_eq!(surface.pixel(x, 15), Some(PackedColor(0x00FF00)));
    }
    assert_eq!(surface.pixel(4, 15), Some(PackedColor(0)));
    assert!(pacer.waits.is_empty());
}

#[test]
fn unknown_color_draws_black() {
    let (surface, _) = run(r#"[
        {"op": "color", "name": "blanco"},
        {"op": "rect", "x": 0, "y": 0, "width": 16, "height": 16},
        {"op": "color", "name": "Blanco"},
        {"op": "pixel", "x": 5, "y": 5}
    ]"#);

    assert_eq!(surface.pixel(5, 5), Some(PackedColor(0)));
    assert_eq!(surface.pixel(5, 6), Some(PackedColor(0xFFFFFF)));
    assert_eq!(surface.active_color(), PackedColor(0));
}

#[test]
fn clear_keeps_the_selected_color() {
    let (surface, _) = run(r#"[
        {"op": "color", "name": "amarillo"},
        {"op": "circle", "x": 8, "y": 8, "radius": 5},
        {"op": "clear"},
        {"op": "pixel", "x": 0, "y": 0}
    ]"#);

    assert_eq!(surface.pixel(8, 8), Some(PackedColor(0)));
    assert_eq!(surface.pixel(0, 0), Some(PackedColor(0xFFFF00)));
}

#[test]
fn waits_go_through_the_pacer() {
    let (surface, pacer) = run(r#"[
        {"op": "color", "name": "blanco"},
        {"op": "pixel", "x": -4, "y": 1},
        {"op": "wait", "ms": 16},
        {"op": "pixel", "x": 1, "y": 1},
        {"op": "wait", "ms": 1000}
    ]"#);

    assert_eq!(
        pacer.waits,
        vec![Duration::from_millis(16), Duration::from_secs(1)]
    );
    assert_eq!(surface.pixel(1, 1), Some(PackedColor(0xFFFFFF)));
}

#[test]
fn built_from_commands() {
    let program = Program::new(vec![
        Command::Color {
            name: "#00ff00".to_string(),
        },
        Command::Circle {
            x: 3,
            y: 3,
            radius: 1,
        },
        Command::Wait {
            ms: Duration::from_millis(40),
        },
    ]);

    let mut surface = Surface::in_memory(Geometry::xrgb8888(8, 8)).unwrap();
    let mut pacer = RecordingPacer::default();
    program.run(&mut surface, &mut pacer);

    assert_eq!(surface.pixel(3, 2), Some(PackedColor(0x00FF00)));
    assert_eq!(surface.pixel(2, 2), Some(PackedColor(0)));
    assert_eq!(pacer.waits, vec![Duration::from_millis(40)]);

    // The JSON form runs the same way.
    let json = program.to_json().unwrap();
    assert!(json.contains("\"op\": \"circle\""), "unexpected JSON: {json}");
    assert_eq!(Program::from_json(&json).unwrap(), program);
}
