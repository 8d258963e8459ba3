//! Lorenz convection analogy and the Lorenz system
//!
//! A heated cell with two counter-rotating convection loops, then a 3D
//! coordinate frame locating one state `(x_1, y_1, z_1)` before the three
//! Lorenz equations are written beside it.

use super::{add_equations, add_shape, frame, SceneContext, DOWN, RIGHT, UNIT, UP, UP_LEFT, UP_RIGHT};
use crate::error::Result;
use crate::shapes::{Point3, Shape};
use crate::timeline::{Animation, ObjectId, SceneObject, SlideHost};
use equation_layout::{Color, Point, Rect, Size};

const LORENZ: [&str; 3] = [
    r"\frac{dx}{dt} = \sigma(y_1-x_1)",
    r"\frac{dy}{dt} = x_1(\rho-z_1)-y_1",
    r"\frac{dz}{dt} = x_1y_1 - \beta z_1",
];

/// Number of convection loops shown before the equations
const CONVECTION_CYCLES: usize = 5;
const CELL_SIDE: f32 = 6.0;
const CELL_OPACITY: f32 = 0.4;
const CAPTION_FONT_SIZE: f32 = 48.0;
/// Loop size and corner radius, in frame units
const LOOP_SIZE: (f32, f32) = (2.0, 5.0);
const LOOP_CORNER: f32 = 1.0;
const LOOP_OFFSET: f32 = 1.5;
const AXES_EXTENT: f32 = 5.0;
const STATE_RADIUS: f32 = 0.08;

/// `(x, y, z)` in frame units
fn frame3(x: f32, y: f32, z: f32) -> Point3 {
    Point3::new(x * UNIT, y * UNIT, z * UNIT)
}

fn convection_loop(center_x: f32) -> Shape {
    Shape::Rectangle {
        rect: Rect::centered_at(
            frame(center_x, 0.0),
            Size::new(LOOP_SIZE.0 * UNIT, LOOP_SIZE.1 * UNIT),
        ),
        corner_radius: LOOP_CORNER * UNIT,
        fill: None,
        stroke: Some(Color::WHITE),
    }
}

pub fn lorenz_system<H: SlideHost>(host: &mut H, ctx: &SceneContext) -> Result<()> {
    let run_time = ctx.settings.write_run_time;

    // Heated from below, cooled from above
    let side = CELL_SIDE * UNIT;
    let cell = add_shape(
        host,
        Shape::Rectangle {
            rect: Rect::centered_at(Point::origin(), Size::new(side, side)),
            corner_radius: 0.0,
            fill: Some(Color::DARK_BLUE.with_opacity(CELL_OPACITY)),
            stroke: None,
        },
    );
    let heater = ctx.next_to("Heater", frame(0.0, -CELL_SIDE / 2.0), DOWN, CAPTION_FONT_SIZE)?;
    let cooler = ctx.next_to("Cooler", frame(0.0, CELL_SIDE / 2.0), UP, CAPTION_FONT_SIZE)?;
    let heater = host.add(SceneObject::Text(heater));
    let cooler = host.add(SceneObject::Text(cooler));
    host.play(vec![Animation::GrowFromCenter { object: cell }], run_time);
    host.play(vec![Animation::Write { object: heater }], run_time);
    host.play(vec![Animation::Write { object: cooler }], run_time);
    host.end_slide();

    let loops = [
        add_shape(host, convection_loop(LOOP_OFFSET)),
        add_shape(host, convection_loop(-LOOP_OFFSET)),
    ];
    for _ in 0..CONVECTION_CYCLES {
        host.play(
            loops.iter().map(|&object| Animation::Create { object }).collect(),
            run_time,
        );
        host.play(
            loops.iter().map(|&object| Animation::FadeOut { object }).collect(),
            0.5,
        );
    }
    ctx.end_slide(host);

    // One state of the system in 3D
    let axes = add_shape(
        host,
        Shape::Axes3D {
            origin: Point3::default(),
            extent: AXES_EXTENT * UNIT,
        },
    );
    let axis_labels = [
        ctx.text_next_to(host, "z", frame(AXES_EXTENT, 0.0), UP)?,
        ctx.text_next_to(host, "x", frame(0.0, AXES_EXTENT), RIGHT)?,
        ctx.text_next_to(host, "y", Point::origin(), UP_LEFT)?,
    ];
    host.play(
        vec![Animation::OrientCamera {
            phi: 0.0,
            theta: -90.0,
            zoom: 0.5,
        }],
        0.0,
    );
    let mut fade_in = vec![Animation::FadeIn { object: axes }];
    fade_in.extend(axis_labels.iter().map(|&object| Animation::FadeIn { object }));
    host.play(fade_in, run_time);
    host.wait(0.5);
    host.play(
        vec![Animation::OrientCamera {
            phi: 75.0,
            theta: 30.0,
            zoom: 1.0,
        }],
        1.5,
    );
    ctx.end_slide(host);

    let projections: [ObjectId; 3] = [
        add_shape(host, Shape::dashed_line(frame3(1.0, 0.0, 0.0), frame3(1.0, 1.0, 0.0))),
        add_shape(host, Shape::dashed_line(frame3(0.0, 1.0, 0.0), frame3(1.0, 1.0, 0.0))),
        add_shape(host, Shape::dashed_line(frame3(1.0, 1.0, 0.0), frame3(1.0, 1.0, 1.0))),
    ];
    host.play(
        projections[..2]
            .iter()
            .map(|&object| Animation::Create { object })
            .collect(),
        run_time,
    );
    host.play(vec![Animation::Create { object: projections[2] }], run_time);
    ctx.end_slide(host);

    let state = add_shape(
        host,
        Shape::dot(frame3(1.1, 1.1, 1.1), STATE_RADIUS * UNIT, Color::BLUE),
    );
    host.play(vec![Animation::Create { object: state }], run_time);
    let mut coord = ctx.next_to("(x_1, y_1, z_1)", frame(1.0, 1.0), UP_RIGHT, ctx.font_size())?;
    coord.bounds = coord.bounds.translated(-0.5 * UNIT, -0.3 * UNIT);
    let coord = host.add(SceneObject::Text(coord));
    host.play(vec![Animation::Create { object: coord }], run_time);
    ctx.end_slide(host);

    let rows = ctx.batch(&LORENZ, frame(3.5, 2.5), None, None)?;
    for equation in add_equations(host, &rows) {
        host.play(vec![Animation::Write { object: equation }], run_time);
        host.wait(ctx.settings.wait_duration * 2.0);
        host.end_slide();
    }
    Ok(())
}
