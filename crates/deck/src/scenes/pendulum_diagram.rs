//! Double pendulum diagram
//!
//! Both scenes draw the same diagram: axes with the pivot at the origin, the
//! first bob at (1, -2) and the second at (2, -3), in frame units. The
//! derivation scene labels coordinates, lengths and angles, then turns the
//! position equations into accelerations one batch at a time. The forces
//! scene zooms on each bob in turn and draws its tensions and weight.

use super::pendulum::KINEMATICS;
use super::{
    add_equations, add_shape, frame, SceneContext, DOWN, DOWN_RIGHT, LEFT, RIGHT, UNIT, UP,
    UP_LEFT, UP_RIGHT,
};
use crate::error::Result;
use crate::shapes::Shape;
use crate::timeline::{Animation, ObjectId, SceneObject, SlideHost};
use equation_layout::{Color, Point, PositionedEquation, TextBlock};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

const AXES_X_EXTENT: f32 = 7.0;
const AXES_Y_EXTENT: f32 = 4.0;
const PIVOT_RADIUS: f32 = 0.1;
const BOB_RADIUS: f32 = 0.2;
const ARC_RADIUS: f32 = 0.5;
/// Length of the weight arrows, in frame units
const WEIGHT_LENGTH: f32 = 1.4;
/// Zoomed camera width, in bob diameters
const ZOOM_BOB_WIDTHS: f32 = 20.0;
/// First rod's angle from the downward vertical, atan(1/2)
const THETA_1: f32 = 0.463_647_6;
const FORCE_FONT_SIZE: f32 = 20.0;

const POSITIONS: [&str; 4] = [
    r"x_1 = l_1sin(\theta_1)",
    r"y_1 = -l_1cos(\theta_1)",
    r"x_2 = x_1 + l_2sin(\theta_2)",
    r"y_2 = y_1 - l_2cos(\theta_2)",
];

const VELOCITIES: [&str; 4] = [
    r"x_1' = l_1cos(\theta_1) * \theta_1'",
    r"y_1' = l_1sin(\theta_1) * \theta_1'",
    r"x_2' = x_1' + l_2cos(\theta_2) * \theta_2'",
    r"y_2' = y_1' + l_2sin(\theta_2) * \theta_2'",
];

const VELOCITIES_REORDERED: [&str; 4] = [
    r"x_1' = l_1\theta_1'cos(\theta_1)",
    r"y_1' = l_1\theta_1'sin(\theta_1)",
    r"x_2' = x_1' + l_2\theta_2'cos(\theta_2)",
    r"y_2' = y_1' + l_2\theta_2'sin(\theta_2)",
];

const ACCELERATIONS: [&str; 4] = [
    r"x_1'' = l_1(cos(\theta_1)\theta_1'' - sin(\theta_1)\theta_1' * \theta_1')",
    r"y_1'' = l_1(sin(\theta_1)\theta_1'' + cos(\theta_1)\theta_1' * \theta_1')",
    r"x_2'' = x_1'' + l_2(cos(\theta_2)\theta_2'' - sin(\theta_2)\theta_2' * \theta_2')",
    r"y_2'' = y_1'' + l_2(sin(\theta_2)\theta_2'' + cos(\theta_2)\theta_2' * \theta_2')",
];

const ACCELERATIONS_SQUARED: [&str; 4] = [
    r"x_1'' = l_1(\theta_1''cos(\theta_1) - \theta_1'^2sin(\theta_1))",
    r"y_1'' = l_1(\theta_1''sin(\theta_1) + \theta_1'^2cos(\theta_1))",
    r"x_2'' = x_1'' + l_2(\theta_2''cos(\theta_2) - \theta_2'^2sin(\theta_2))",
    r"y_2'' = y_1'' + l_2(\theta_2''sin(\theta_2) + \theta_2'^2cos(\theta_2))",
];

/// Newton's second law for each bob, horizontal then vertical
const NEWTON: [[&str; 2]; 2] = [
    [
        r"N2(\rightarrow): -T_1sin(\theta_1) + T_2sin(\theta_2) &= m_1a_x \\ &= m_1x_1''",
        r"N2(\uparrow): T_1cos(\theta_1) - T_2cos(\theta_2) - m_1g &= m_1a_y \\ &= m_1y_1''",
    ],
    [
        r"N2(\rightarrow): -T_2sin(\theta_2) &= m_2a_x \\ &= m_2x_2''",
        r"N2(\uparrow): T_2cos(\theta_2) - m_2g &= m_2a_y \\ &= m_2y_2''",
    ],
];

fn pivot() -> Point {
    frame(0.0, 0.0)
}

fn first_bob() -> Point {
    frame(1.0, -2.0)
}

fn second_bob() -> Point {
    frame(2.0, -3.0)
}

fn derivation_start() -> Point {
    frame(4.0, 3.5)
}

fn zoom_width() -> f32 {
    2.0 * BOB_RADIUS * ZOOM_BOB_WIDTHS * UNIT
}

/// `p` moved by `(dx, dy)` frame units
fn shifted(p: Point, dx: f32, dy: f32) -> Point {
    Point::new(p.x + dx * UNIT, p.y + dy * UNIT)
}

fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

fn arc(center: Point, start_angle: f32, angle: f32, tip: bool) -> Shape {
    Shape::Arc {
        center,
        radius: ARC_RADIUS * UNIT,
        start_angle,
        angle,
        tip,
    }
}

/// Point halfway along an arc drawn by [`arc`]
fn arc_middle(center: Point, start_angle: f32, angle: f32) -> Point {
    let t = start_angle + angle / 2.0;
    let r = ARC_RADIUS * UNIT;
    Point::new(center.x + r * t.cos(), center.y + r * t.sin())
}

fn bob(center: Point) -> Shape {
    Shape::dot(center, BOB_RADIUS * UNIT, Color::BLUE)
}

fn pivot_dot() -> Shape {
    Shape::dot(pivot(), PIVOT_RADIUS * UNIT, Color::YELLOW)
}

/// Every batch of the derivation, from positions to collected accelerations.
///
/// All batches share the anchor column of the first acceleration row so each
/// one can morph row by row into the next.
pub(crate) fn derivation_batches(ctx: &SceneContext) -> Result<Vec<Vec<PositionedEquation>>> {
    let start = derivation_start();
    let column = ctx.batch(&ACCELERATIONS, start, None, None)?;
    let reference = column.first();
    let chain: [&[&str]; 6] = [
        &POSITIONS,
        &VELOCITIES,
        &VELOCITIES_REORDERED,
        &ACCELERATIONS,
        &ACCELERATIONS_SQUARED,
        &KINEMATICS,
    ];
    chain
        .iter()
        .map(|specs| ctx.batch(*specs, start, None, reference))
        .collect()
}

/// Axes plus their `x`/`y` labels
struct AxesIds {
    axes: ObjectId,
    x_label: ObjectId,
    y_label: ObjectId,
}

fn add_axes<H: SlideHost>(host: &mut H, ctx: &SceneContext) -> Result<AxesIds> {
    let axes = add_shape(
        host,
        Shape::Axes {
            origin: pivot(),
            x_extent: AXES_X_EXTENT * UNIT,
            y_extent: AXES_Y_EXTENT * UNIT,
        },
    );
    let x_label = ctx.text_next_to(host, "x", frame(AXES_X_EXTENT, 0.0), UP)?;
    let y_label = ctx.text_next_to(host, "y", frame(0.0, AXES_Y_EXTENT), RIGHT)?;
    Ok(AxesIds {
        axes,
        x_label,
        y_label,
    })
}

/// A text object whose block is kept for later moves
struct Labelled {
    id: ObjectId,
    block: TextBlock,
}

fn label<H: SlideHost>(
    host: &mut H,
    ctx: &SceneContext,
    text: &str,
    anchor: Point,
    direction: (f32, f32),
) -> Result<Labelled> {
    let block = ctx.next_to(text, anchor, direction, ctx.font_size())?;
    let id = host.add(SceneObject::Text(block.clone()));
    Ok(Labelled { id, block })
}

/// Diagram annotations of one bob
struct BobAnnotations {
    x: Labelled,
    y: Labelled,
    coord: ObjectId,
    x_projection: ObjectId,
    y_projection: ObjectId,
    length: ObjectId,
    angle: ObjectId,
    arc: ObjectId,
}

fn unwrite_all(ids: &[ObjectId]) -> Vec<Animation> {
    ids.iter().map(|&object| Animation::Unwrite { object }).collect()
}

fn create_all(ids: &[ObjectId]) -> Vec<Animation> {
    ids.iter().map(|&object| Animation::Create { object }).collect()
}

/// Axes, pivot, both bobs with their coordinates, then the position,
/// velocity and acceleration batches
pub fn pendulum_derivation<H: SlideHost>(host: &mut H, ctx: &SceneContext) -> Result<()> {
    let run_time = ctx.settings.write_run_time;

    let axes = add_axes(host, ctx)?;
    host.play(vec![Animation::Create { object: axes.axes }], run_time);
    host.play(create_all(&[axes.x_label, axes.y_label]), run_time);
    ctx.end_slide(host);

    let pivot_id = add_shape(host, pivot_dot());
    let pivot_label = ctx.text_next_to(host, "Pivot", pivot(), UP_LEFT)?;
    host.play(vec![Animation::Create { object: pivot_id }], run_time);
    host.play(vec![Animation::Write { object: pivot_label }], run_time);
    ctx.end_slide(host);

    // First bob, measured from the pivot
    let (p, b1, b2) = (pivot(), first_bob(), second_bob());
    let first = add_shape(host, bob(b1));
    let rod1 = add_shape(host, Shape::line(p, b1));
    let arc1_start = -(FRAC_PI_2 - THETA_1);
    let first_notes = BobAnnotations {
        coord: ctx.text_next_to(host, "(x_1, y_1)", b1, UP_RIGHT)?,
        x_projection: add_shape(host, Shape::dashed_line(Point::new(b1.x, 0.0), b1)),
        y_projection: add_shape(host, Shape::dashed_line(Point::new(0.0, b1.y), b1)),
        x: label(host, ctx, "x_1", Point::new(b1.x, 0.0), UP)?,
        y: label(host, ctx, "y_1", Point::new(0.0, b1.y), LEFT)?,
        length: ctx.text_next_to(host, "l_1", midpoint(p, b1), RIGHT)?,
        arc: add_shape(host, arc(p, arc1_start, -THETA_1, false)),
        angle: ctx.text_next_to(
            host,
            r"\theta_1",
            arc_middle(p, arc1_start, -THETA_1),
            DOWN_RIGHT,
        )?,
    };

    // Second bob, measured from the first
    let second = add_shape(host, bob(b2));
    let rod2 = add_shape(host, Shape::line(b1, b2));
    let vertical = add_shape(host, Shape::dashed_line(b1, shifted(b1, 0.0, -1.0)));
    let second_notes = BobAnnotations {
        coord: ctx.text_next_to(host, "(x_2, y_2)", b2, UP_RIGHT)?,
        x_projection: add_shape(host, Shape::dashed_line(Point::new(b2.x, 0.0), b2)),
        y_projection: add_shape(host, Shape::dashed_line(Point::new(0.0, b2.y), b2)),
        x: label(host, ctx, "x_2", Point::new(b2.x, 0.0), UP)?,
        y: label(host, ctx, "y_2", Point::new(0.0, b2.y), LEFT)?,
        length: ctx.text_next_to(host, "l_2", midpoint(b1, b2), RIGHT)?,
        arc: add_shape(host, arc(b1, -FRAC_PI_2, FRAC_PI_4, false)),
        angle: ctx.text_next_to(
            host,
            r"\theta_2",
            arc_middle(b1, -FRAC_PI_2, FRAC_PI_4),
            DOWN,
        )?,
    };

    for (bob_id, rod, notes, extra) in [
        (first, rod1, &first_notes, None),
        (second, rod2, &second_notes, Some(vertical)),
    ] {
        host.play(
            vec![
                Animation::Create { object: bob_id },
                Animation::Write { object: notes.coord },
            ],
            run_time,
        );
        host.play(
            vec![
                Animation::Create {
                    object: notes.x_projection,
                },
                Animation::Write { object: notes.x.id },
                Animation::Create {
                    object: notes.y_projection,
                },
                Animation::Write { object: notes.y.id },
            ],
            run_time,
        );
        let mut rod_step = vec![
            Animation::Create { object: rod },
            Animation::Write {
                object: notes.length,
            },
        ];
        rod_step.extend(extra.map(|object| Animation::Create { object }));
        host.play(rod_step, run_time);
        host.play(
            vec![
                Animation::Create { object: notes.arc },
                Animation::Write {
                    object: notes.angle,
                },
            ],
            run_time,
        );
        ctx.end_slide(host);
    }

    // Each coordinate label flies into the left-hand side of its equation
    let batches = derivation_batches(ctx)?;
    let mut rows = add_equations(host, &batches[0]);
    let coordinates = [&first_notes.x, &first_notes.y, &second_notes.x, &second_notes.y];
    let mut copies = Vec::with_capacity(coordinates.len());
    for ((coordinate, &row_id), row) in coordinates.iter().zip(&rows).zip(&batches[0]) {
        let copy = host.add(SceneObject::Text(coordinate.block.clone()));
        host.play(
            vec![Animation::MoveTo {
                object: copy,
                target: row.lhs().bounds.center(),
            }],
            run_time,
        );
        host.play(vec![Animation::Write { object: row_id }], run_time);
        copies.push(Animation::FadeOut { object: copy });
    }
    host.play(copies, 0.0);
    ctx.end_slide(host);

    for batch in &batches[1..] {
        let next = add_equations(host, batch);
        for (&from, &to) in rows.iter().zip(&next) {
            host.play(vec![Animation::TransformInPlace { from, to }], run_time);
        }
        ctx.end_slide(host);
        rows = next;
    }

    let mut clear = unwrite_all(&rows);
    clear.extend(unwrite_all(&[
        first_notes.x.id,
        second_notes.x.id,
        first_notes.y.id,
        second_notes.y.id,
        first_notes.angle,
        second_notes.angle,
        first_notes.length,
        second_notes.length,
        first_notes.coord,
        second_notes.coord,
    ]));
    clear.extend(
        [
            first_notes.x_projection,
            second_notes.x_projection,
            first_notes.y_projection,
            second_notes.y_projection,
            first_notes.arc,
            second_notes.arc,
            vertical,
        ]
        .map(|object| Animation::Uncreate { object }),
    );
    host.play(clear, run_time);

    // The forces scene redraws the bare diagram itself
    host.play(
        [
            axes.axes,
            axes.x_label,
            axes.y_label,
            pivot_id,
            pivot_label,
            first,
            second,
            rod1,
            rod2,
        ]
        .map(|object| Animation::FadeOut { object })
        .to_vec(),
        0.0,
    );
    ctx.end_slide(host);
    Ok(())
}

/// Two lines of Newton's second law, the first starting right of `anchor`,
/// the second left-aligned beneath it
fn newton_pair<H: SlideHost>(
    host: &mut H,
    ctx: &SceneContext,
    lines: [&str; 2],
    anchor: Point,
) -> Result<[Labelled; 2]> {
    let first = ctx.next_to(lines[0], anchor, RIGHT, FORCE_FONT_SIZE)?;
    let below = Point::new(first.bounds.center_x(), first.bounds.bottom());
    let mut second = ctx.next_to(lines[1], below, DOWN, FORCE_FONT_SIZE)?;
    second.bounds = second
        .bounds
        .translated(first.bounds.left() - second.bounds.left(), 0.0);
    Ok([first, second].map(|block| Labelled {
        id: host.add(SceneObject::Text(block.clone())),
        block,
    }))
}

/// Zoom on each bob and balance the forces acting on it
pub fn pendulum_forces<H: SlideHost>(host: &mut H, ctx: &SceneContext) -> Result<()> {
    let run_time = ctx.settings.write_run_time;
    let (p, b1, b2) = (pivot(), first_bob(), second_bob());

    let axes = add_axes(host, ctx)?;
    let pivot_id = add_shape(host, pivot_dot());
    let pivot_label = ctx.text_next_to(host, "Pivot", p, UP_LEFT)?;
    let first = add_shape(host, bob(b1));
    let rod1 = add_shape(host, Shape::line(b1, p));
    let second = add_shape(host, bob(b2));
    let rod2 = add_shape(host, Shape::line(b1, b2));
    host.play(
        [
            axes.axes,
            axes.x_label,
            axes.y_label,
            pivot_id,
            pivot_label,
            first,
            rod1,
            second,
            rod2,
        ]
        .map(|object| Animation::FadeIn { object })
        .to_vec(),
        0.0,
    );
    ctx.end_slide(host);

    // First bob: angles, both tensions and its weight
    host.play(
        vec![Animation::MoveCamera {
            center: b1,
            width: zoom_width(),
        }],
        run_time,
    );
    let arc1 = add_shape(host, arc(p, -FRAC_PI_2, THETA_1, true));
    let angle1 = ctx.text_next_to(
        host,
        r"\theta_1",
        arc_middle(p, -FRAC_PI_2, THETA_1),
        DOWN_RIGHT,
    )?;
    host.play(
        vec![
            Animation::Create { object: arc1 },
            Animation::Write { object: angle1 },
        ],
        run_time,
    );

    let arc2 = add_shape(host, arc(b1, -FRAC_PI_2, FRAC_PI_4, true));
    let below_first = add_shape(host, Shape::dashed_line(b1, shifted(b1, 0.0, -1.0)));
    let angle2 = ctx.text_next_to(
        host,
        r"\theta_2",
        arc_middle(b1, -FRAC_PI_2, FRAC_PI_4),
        DOWN,
    )?;
    host.play(
        vec![
            Animation::Create { object: arc2 },
            Animation::Create {
                object: below_first,
            },
            Animation::Write { object: angle2 },
        ],
        run_time,
    );

    let arc1_upper = add_shape(host, arc(b1, FRAC_PI_2, THETA_1, true));
    let above_first = add_shape(host, Shape::dashed_line(b1, shifted(b1, 0.0, 1.0)));
    let angle1_upper = ctx.text_next_to(
        host,
        r"\theta_1",
        arc_middle(b1, FRAC_PI_2, THETA_1),
        UP_LEFT,
    )?;
    host.play(
        vec![
            Animation::Create { object: arc1_upper },
            Animation::Create {
                object: above_first,
            },
            Animation::Write {
                object: angle1_upper,
            },
        ],
        run_time,
    );

    host.play(
        [second, pivot_id, pivot_label, arc1, angle1]
            .map(|object| Animation::Uncreate { object })
            .to_vec(),
        run_time,
    );

    let tension1 = add_shape(host, Shape::arrow(b1, p));
    let tension1_label = ctx.text_next_to(host, "T_1", p, UP)?;
    host.play(
        vec![
            Animation::TransformInPlace {
                from: rod1,
                to: tension1,
            },
            Animation::Write {
                object: tension1_label,
            },
        ],
        run_time,
    );
    let tension2 = add_shape(host, Shape::arrow(b1, b2));
    let tension2_label = ctx.text_next_to(host, "T_2", b2, DOWN)?;
    host.play(
        vec![
            Animation::TransformInPlace {
                from: rod2,
                to: tension2,
            },
            Animation::Write {
                object: tension2_label,
            },
        ],
        run_time,
    );
    let weight1_tip = shifted(b1, 0.0, -WEIGHT_LENGTH);
    let weight1 = add_shape(host, Shape::arrow(b1, weight1_tip));
    let mass1 = ctx.text_next_to(host, "m_1", weight1_tip, DOWN)?;
    host.play(
        vec![
            Animation::Create { object: weight1 },
            Animation::Write { object: mass1 },
        ],
        run_time,
    );
    ctx.end_slide(host);

    let first_law = newton_pair(host, ctx, NEWTON[0], frame(1.0, -1.0))?;
    for line in &first_law {
        host.play(vec![Animation::Write { object: line.id }], run_time);
    }
    ctx.end_slide(host);

    // Push the first bob's equations out of frame
    host.play(
        first_law
            .iter()
            .map(|line| Animation::MoveTo {
                object: line.id,
                target: shifted(line.block.center(), 0.0, 10.0),
            })
            .collect(),
        run_time,
    );
    ctx.end_slide(host);

    // Back to the whole pendulum, rods without arrow heads
    host.play(vec![Animation::RestoreCamera], run_time);
    let rod2_back = add_shape(host, Shape::line(b2, b1));
    let rod1_back = add_shape(host, Shape::line(b1, p));
    host.play(
        vec![
            Animation::TransformInPlace {
                from: tension2,
                to: rod2_back,
            },
            Animation::Unwrite {
                object: tension2_label,
            },
            Animation::Uncreate {
                object: tension1_label,
            },
            Animation::Create { object: second },
            Animation::TransformInPlace {
                from: tension1,
                to: rod1_back,
            },
            Animation::Uncreate { object: weight1 },
            Animation::Unwrite { object: mass1 },
            Animation::Uncreate { object: arc1_upper },
            Animation::Uncreate {
                object: above_first,
            },
            Animation::Unwrite {
                object: angle1_upper,
            },
        ],
        run_time,
    );
    ctx.end_slide(host);

    // Second bob: one tension and its weight
    host.play(
        vec![Animation::MoveCamera {
            center: b2,
            width: zoom_width(),
        }],
        run_time,
    );
    host.play(
        vec![
            Animation::Uncreate { object: rod1_back },
            Animation::Uncreate { object: first },
        ],
        run_time,
    );
    let tension_tip = Point::new(b1.x + (b1.x - b2.x) / 2.0, b1.y + (b1.y - b2.y) / 2.0);
    let tension = add_shape(host, Shape::arrow(b2, tension_tip));
    let tension_label = ctx.text_next_to(host, "T_2", tension_tip, UP)?;
    host.play(
        vec![
            Animation::TransformInPlace {
                from: rod2_back,
                to: tension,
            },
            Animation::Write {
                object: tension_label,
            },
        ],
        run_time,
    );
    let above_second = shifted(b2, 0.0, 1.0);
    let vertical = add_shape(host, Shape::dashed_line(b2, above_second));
    let arc2_upper = add_shape(host, arc(b2, FRAC_PI_2, FRAC_PI_4, true));
    let angle2_upper = ctx.text(
        host,
        r"\theta_2",
        shifted(midpoint(b2, above_second), -0.2, 0.2),
    )?;
    host.play(
        create_all(&[vertical, arc2_upper, angle2_upper]),
        run_time,
    );
    let weight2_tip = shifted(b2, 0.0, -WEIGHT_LENGTH);
    let weight2 = add_shape(host, Shape::arrow(b2, weight2_tip));
    let mass2 = ctx.text_next_to(host, "m_2", weight2_tip, DOWN)?;
    host.play(
        vec![
            Animation::Create { object: weight2 },
            Animation::Write { object: mass2 },
        ],
        run_time,
    );
    ctx.end_slide(host);

    let second_law = newton_pair(host, ctx, NEWTON[1], frame(3.0, -1.0))?;
    for line in &second_law {
        host.play(vec![Animation::Write { object: line.id }], run_time);
    }
    ctx.end_slide(host);
    ctx.end_slide(host);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::DeckSettings;
    use crate::timeline::{Deck, Step, Timeline};

    fn context() -> SceneContext {
        SceneContext::new(DeckSettings::default()).unwrap()
    }

    fn record(scene: fn(&mut Timeline, &SceneContext) -> Result<()>) -> Deck {
        let mut timeline = Timeline::new();
        scene(&mut timeline, &context()).unwrap();
        timeline.finish()
    }

    fn animations(deck: &Deck) -> impl Iterator<Item = &Animation> {
        deck.slides
            .iter()
            .flat_map(|s| &s.steps)
            .filter_map(|step| match step {
                Step::Play { animations, .. } => Some(animations),
                Step::Wait { .. } => None,
            })
            .flatten()
    }

    #[test]
    fn test_every_batch_shares_the_acceleration_column() {
        let batches = derivation_batches(&context()).unwrap();
        assert_eq!(batches.len(), 6);
        let column_x = batches[3][0].anchor_x();
        assert_eq!(column_x, derivation_start().x);
        for batch in &batches {
            assert_eq!(batch.len(), 4);
            for row in batch {
                assert_eq!(row.anchor_x(), column_x, "{}", row.source());
            }
        }
    }

    #[test]
    fn test_batches_morph_row_by_row() {
        let deck = record(pendulum_derivation);
        // axes, pivot, two bobs, positions, five morphs, clear
        assert_eq!(deck.slide_count(), 11);

        let column_x = derivation_start().x;
        let mut morphs = 0;
        for animation in animations(&deck) {
            if let Animation::TransformInPlace { from, to } = animation {
                for id in [from, to] {
                    let Some(SceneObject::Equation(eq)) = deck.object(*id) else {
                        panic!("morph between non-equations");
                    };
                    assert_eq!(eq.anchor_x(), column_x);
                }
                morphs += 1;
            }
        }
        assert_eq!(morphs, 5 * 4);
    }

    #[test]
    fn test_coordinate_labels_fly_to_left_hand_sides() {
        let deck = record(pendulum_derivation);
        let batches = derivation_batches(&context()).unwrap();
        let targets: Vec<Point> = animations(&deck)
            .filter_map(|a| match a {
                Animation::MoveTo { target, .. } => Some(*target),
                _ => None,
            })
            .collect();
        let expected: Vec<Point> = batches[0]
            .iter()
            .map(|row| row.lhs().bounds.center())
            .collect();
        assert_eq!(targets, expected);
    }

    #[test]
    fn test_diagram_shapes_recorded() {
        let deck = record(pendulum_derivation);
        let shapes: Vec<&Shape> = deck
            .objects
            .iter()
            .filter_map(|o| match o {
                SceneObject::Shape(shape) => Some(shape),
                _ => None,
            })
            .collect();
        assert!(shapes.iter().any(|s| matches!(s, Shape::Axes { .. })));
        let bobs = shapes
            .iter()
            .filter(|s| matches!(s, Shape::Dot { color, .. } if *color == Color::BLUE))
            .count();
        assert_eq!(bobs, 2);
        let arcs = shapes.iter().filter(|s| matches!(s, Shape::Arc { .. })).count();
        assert_eq!(arcs, 2);
    }

    #[test]
    fn test_forces_zoom_on_each_bob() {
        let deck = record(pendulum_forces);
        assert_eq!(deck.slide_count(), 8);

        let centers: Vec<Point> = animations(&deck)
            .filter_map(|a| match a {
                Animation::MoveCamera { center, width } => {
                    assert_eq!(*width, 8.0 * UNIT);
                    Some(*center)
                }
                _ => None,
            })
            .collect();
        assert_eq!(centers, vec![first_bob(), second_bob()]);
        assert_eq!(
            animations(&deck)
                .filter(|a| matches!(a, Animation::RestoreCamera))
                .count(),
            1
        );
    }

    #[test]
    fn test_newton_lines_left_aligned() {
        let ctx = context();
        let mut timeline = Timeline::new();
        let [first, second] = newton_pair(&mut timeline, &ctx, NEWTON[0], frame(1.0, -1.0)).unwrap();
        assert!((first.block.bounds.left() - frame(1.25, 0.0).x).abs() < 1e-3);
        assert!((second.block.bounds.left() - first.block.bounds.left()).abs() < 1e-3);
        assert!(second.block.bounds.top() < first.block.bounds.bottom());
        assert_eq!(first.block.font_size, FORCE_FONT_SIZE);
    }
}
