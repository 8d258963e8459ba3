//! Double pendulum derivation
//!
//! The kinematic and Newton's-second-law equations are laid out as one
//! anchor-aligned batch. The rewrite scene then derives rows 4..13 from
//! earlier rows: a copy of the source row slides onto the target row's anchor
//! and morphs through a chain of rewrites, each replaced onto that anchor. It
//! closes on a summary of the kinematics above the two coupled equations.

use super::{add_equations, add_labels, anchor_point, frame, write_numbered, SceneContext};
use crate::error::Result;
use crate::timeline::{Animation, ObjectId, SceneObject, SlideHost};
use equation_layout::{NumberLabel, PositionedEquation};

/// Extra drop between rows, in frame units; every pair of rows is a group
const ROW_DROPS: [f32; 13] = [0.0, 0.0, 0.0, 0.2, 0.0, 0.2, 0.0, 0.2, 0.0, 0.2, 0.0, 0.2, 0.0];

pub(super) const KINEMATICS: [&str; 4] = [
    r"x_1'' = -\theta_1'^2l_1sin(\theta_1) + \theta_1''l_1cos(\theta_1)",
    r"y_1'' = \theta_1'^2l_1cos(\theta_1) + \theta_1''l_1sin(\theta_1)",
    r"x_2'' = x_1'' - \theta_2'^2l_2sin(\theta_2) + \theta_2''l_2cos(\theta_2)",
    r"y_2'' = y_1'' + \theta_2'^2l_2cos(\theta_2) + \theta_2''l_2sin(\theta_2)",
];

const FORCES: [&str; 4] = [
    r"m_1x_1'' = -T_1sin(\theta_1) ||+ T_2sin(\theta_2)",
    r"m_1y_1'' = T_1cos(\theta_1) - ||T_2cos(\theta_2)||- m_1g",
    r"m_2x_2'' = -T_2sin(\theta_2)",
    r"m_2y_2'' = T_2cos(\theta_2) - m_2g",
];

/// Every row the rewrite scene ends up showing, in final form
const DERIVATION: [&str; 14] = [
    r"m_1x_1'' = -T_1sin(\theta_1) ||+ T_2sin(\theta_2)",
    r"m_1y_1'' = T_1cos(\theta_1) - ||T_2cos(\theta_2)||- m_1g",
    r"m_2x_2'' = -T_2sin(\theta_2)",
    r"m_2y_2'' = T_2cos(\theta_2) - m_2g",
    r"m_1x_1'' = -T_1sin(\theta_1) ||+ T_2sin(\theta_2)",
    r"m_1y_1'' = T_1cos(\theta_1) - ||T_2cos(\theta_2)||- m_1g",
    r"T_1sin(\theta_1)cos(\theta_1) = -m_1x_1''cos(\theta_1) || - m_2x_2''cos(\theta_1)",
    r"-T_1cos(\theta_1)sin(\theta_1) = -m_1y_1''sin(\theta_1) - sin(\theta_1)(m_2y_2'' - m_2g - m_1g)",
    r"m_2x_2'' = -T_2sin(\theta_2)",
    r"m_2y_2'' = T_2cos(\theta_2) - m_2g",
    r"T_2sin(\theta_2)cos(\theta_2) = -m_2x_2''cos(\theta_2)",
    r"T_2cos(\theta_2)sin(\theta_2) = m_2y_2''sin(\theta_2) + m_2gsin(\theta_2)",
    r"sin(\theta_1)(m_1y_1'' + m_2y_2'' - m_2g - m_1g) = -cos(\theta_1)||(m_1x_1'' + m_2x_2'')",
    r"sin(\theta_2)(m_2y_2'' + m_2g) = -cos(\theta_2)(m_2x_2'')",
];

/// Kinematics above the two coupled equations, shown once the rewrites are done
const SUMMARY: [&str; 6] = [
    KINEMATICS[0],
    KINEMATICS[1],
    KINEMATICS[2],
    KINEMATICS[3],
    DERIVATION[12],
    DERIVATION[13],
];

/// The two closed-form angular accelerations
const EQUATIONS_OF_MOTION: [&str; 2] = [
    r"\theta_1'' = \frac{-g(2m_1 + m_2)sin \theta_1 - m_2gsin(\theta_1 - 2\theta_2) - 2sin(\theta_1-\theta_2)m_2(\theta_2'^2L_2+\theta_1'^2L_1cos(\theta_1-\theta_2))}{L_1(2m_1+m_2-m_2cos(2\theta_1-2\theta_2))}",
    r"\theta_2'' = \frac{2sin(\theta_1-\theta_2)(\theta_1'^2L_1(m_1+m_2)+g(m_1+m_2)cos\theta_1 + \theta_2'^2L_2m_2cos(\theta_1-\theta_2))}{L_2(2m_1+m_2-m_2cos(2\theta_1-2\theta_2))}",
];

/// A copy of `from` slides onto `onto` and morphs through `steps`
struct Rewrite {
    from: usize,
    onto: usize,
    steps: &'static [&'static str],
}

const REWRITES: [Rewrite; 10] = [
    Rewrite {
        from: 0,
        onto: 4,
        steps: &[
            r"m_1x_1'' = -T_1sin(\theta_1) || -[-T_2sin(\theta_2)]",
            r"m_1x_1'' = -T_1sin(\theta_1) || -[m_2x_2'']",
            r"m_1x_1'' = -T_1sin(\theta_1) || -m_2x_2''",
        ],
    },
    Rewrite {
        from: 1,
        onto: 5,
        steps: &[
            r"m_1y_1'' = T_1cos(\theta_1) - ||(T_2cos(\theta_2) - m_2g + m_2g)|| - m_1g",
            r"m_1y_1'' = T_1cos(\theta_1) - ||(T_2cos(\theta_2) - m_2g) - m_2g|| - m_1g",
            r"m_1y_1'' = T_1cos(\theta_1) - ||m_2y_2''|| - m_2g - m_1g",
        ],
    },
    Rewrite {
        from: 4,
        onto: 6,
        steps: &[
            r"T_1sin(\theta_1)cos(\theta_1) = -m_1x_1''cos(\theta_1) || -m_2x_2''cos(\theta_1)",
            r"T_1sin(\theta_1)cos(\theta_1) = -cos(\theta_1)||(m_1x_1'' + m_2x_2'')",
        ],
    },
    Rewrite {
        from: 5,
        onto: 7,
        steps: &[
            r"-T_1cos(\theta_1)sin(\theta_1) = -m_1y_1''sin(\theta_1) ||- sin(\theta_1)(m_2y_2'' - m_2g - m_1g)",
            r"T_1cos(\theta_1)sin(\theta_1) = m_1y_1''sin(\theta_1) ||+ sin(\theta_1)(m_2y_2'' - m_2g - m_1g)",
            r"T_1cos(\theta_1)sin(\theta_1) = sin(\theta_1)(m_1y_1'' + m_2y_2'' - m_2g - m_1g)",
        ],
    },
    Rewrite {
        from: 2,
        onto: 8,
        steps: &[r"m_2x_2''cos(\theta_2) = -T_2sin(\theta_2)cos(\theta_2)"],
    },
    Rewrite {
        from: 3,
        onto: 9,
        steps: &[r"m_2y_2''sin(\theta_2) = T_2cos(\theta_2)sin(\theta_2) ||- m_2gsin(\theta_2)"],
    },
    Rewrite {
        from: 8,
        onto: 10,
        steps: &[r"T_2sin(\theta_2)cos(\theta_2) = -m_2x_2''cos(\theta_2)"],
    },
    Rewrite {
        from: 9,
        onto: 11,
        steps: &[
            r"-T_2cos(\theta_2)sin(\theta_2) = -m_2y_2''sin(\theta_2) ||- m_2gsin(\theta_2)",
            r"T_2cos(\theta_2)sin(\theta_2) = m_2y_2''sin(\theta_2) ||+ m_2gsin(\theta_2)",
            r"T_2cos(\theta_2)sin(\theta_2) = sin(\theta_2)(m_2y_2'' + m_2g)",
        ],
    },
    Rewrite {
        from: 7,
        onto: 12,
        steps: &[r"sin(\theta_1)(m_1y_1'' + m_2y_2'' - m_2g - m_1g) = -cos(\theta_1)||(m_1x_1'' + m_2x_2'')"],
    },
    Rewrite {
        from: 11,
        onto: 13,
        steps: &[r"sin(\theta_2)(m_2y_2'' + m_2g) = -cos(\theta_2)(m_2x_2'')"],
    },
];

fn top_of_frame() -> equation_layout::Point {
    frame(0.0, 3.6)
}

/// Kinematics and forces, written in three numbered groups
pub fn pendulum_kinematics<H: SlideHost>(host: &mut H, ctx: &SceneContext) -> Result<()> {
    let specs: Vec<&str> = KINEMATICS.iter().chain(FORCES.iter()).copied().collect();
    let rows = ctx.batch(&specs, top_of_frame(), Some(&ROW_DROPS), None)?;
    let labels = ctx.numbers(&rows, 0, None)?;

    let equations = add_equations(host, &rows);
    let numbers = add_labels(host, &labels);
    let run_time = ctx.settings.write_run_time;

    for group in [0..4, 4..6, 6..8] {
        write_numbered(host, &equations[group.clone()], &numbers[group], run_time);
        ctx.end_slide(host);
    }
    Ok(())
}

/// Derive the coupled equations by rewriting rows in place
pub fn pendulum_rewrites<H: SlideHost>(host: &mut H, ctx: &SceneContext) -> Result<()> {
    let rows = ctx.batch(&DERIVATION, top_of_frame(), Some(&ROW_DROPS), None)?;
    // Numbering continues after the four kinematic equations
    let labels = ctx.numbers(&rows, KINEMATICS.len(), None)?;
    let numbers = add_labels(host, &labels);
    let (summary, summary_labels) = summary_batch(ctx, &rows)?;
    let run_time = ctx.settings.write_run_time;

    // Rows 0..4 are given; the rest appear through rewrites
    let mut shown: Vec<Option<(ObjectId, PositionedEquation)>> = vec![None; rows.len()];
    for (i, row) in rows.iter().enumerate().take(FORCES.len()) {
        let id = host.add(SceneObject::Equation(row.clone()));
        host.play(vec![Animation::Write { object: id }], run_time);
        host.play(vec![Animation::Write { object: numbers[i] }], run_time);
        shown[i] = Some((id, row.clone()));
    }
    ctx.end_slide(host);

    for rewrite in &REWRITES {
        let Some((_, source)) = shown[rewrite.from].clone() else {
            continue;
        };
        let target = &rows[rewrite.onto];

        let copy = host.add(SceneObject::Equation(source));
        host.play(
            vec![
                Animation::MoveTo {
                    object: copy,
                    target: anchor_point(target),
                },
                Animation::Write {
                    object: numbers[rewrite.onto],
                },
            ],
            run_time,
        );

        let mut current = copy;
        let mut last = None;
        for equation in ctx.engine.replace_chain(target, rewrite.steps)? {
            let next = host.add(SceneObject::Equation(equation.clone()));
            host.play(
                vec![Animation::TransformInPlace {
                    from: current,
                    to: next,
                }],
                run_time,
            );
            current = next;
            last = Some(equation);
        }
        if let Some(equation) = last {
            shown[rewrite.onto] = Some((current, equation));
        }
        ctx.end_slide(host);
    }

    // Clear everything but the two coupled equations
    let keep = [DERIVATION.len() - 2, DERIVATION.len() - 1];
    let clear: Vec<Animation> = shown
        .iter()
        .enumerate()
        .filter(|(i, _)| !keep.contains(i))
        .filter_map(|(_, entry)| entry.as_ref())
        .map(|(id, _)| Animation::Unwrite { object: *id })
        .chain(
            numbers[..keep[0]]
                .iter()
                .map(|&id| Animation::Unwrite { object: id }),
        )
        .collect();
    host.play(clear, run_time);

    // The coupled equations drop into the summary under the kinematics
    let mut settle = Vec::new();
    for (offset, &row) in keep.iter().enumerate() {
        let index = KINEMATICS.len() + offset;
        if let Some((id, _)) = &shown[row] {
            settle.push(Animation::MoveTo {
                object: *id,
                target: anchor_point(&summary[index]),
            });
        }
        let label = host.add(SceneObject::Label(summary_labels[index].clone()));
        settle.push(Animation::TransformInPlace {
            from: numbers[row],
            to: label,
        });
    }
    host.play(settle, run_time);

    let kinematics = add_equations(host, &summary[..KINEMATICS.len()]);
    let kinematics_numbers = add_labels(host, &summary_labels[..KINEMATICS.len()]);
    write_numbered(host, &kinematics, &kinematics_numbers, run_time);
    ctx.end_slide(host);
    Ok(())
}

/// The closing summary, on the force rows' anchor column and numbered beside
/// the first force row
fn summary_batch(
    ctx: &SceneContext,
    rows: &[PositionedEquation],
) -> Result<(Vec<PositionedEquation>, Vec<NumberLabel>)> {
    let summary = ctx.batch(&SUMMARY, top_of_frame(), Some(&ROW_DROPS), rows.first())?;
    let labels = ctx.numbers(&summary, 0, rows.first())?;
    Ok((summary, labels))
}

/// The closed-form result, aligned on the force equations' column
pub fn equations_of_motion<H: SlideHost>(host: &mut H, ctx: &SceneContext) -> Result<()> {
    let forces = ctx.batch(&FORCES, top_of_frame(), None, None)?;
    let start = frame(0.0, -1.5);
    let rows = ctx.batch(&EQUATIONS_OF_MOTION, start, Some(&[0.2]), forces.first())?;

    for row in rows {
        let id = host.add(SceneObject::Equation(row));
        host.play(vec![Animation::Write { object: id }], ctx.settings.write_run_time);
        ctx.end_slide(host);
    }
    Ok(())
}
