//! Opening slides: the title and the definition of a chaotic system

use super::{add_shape, frame, SceneContext, RIGHT, UNIT};
use crate::error::Result;
use crate::shapes::Shape;
use crate::timeline::{Animation, SceneObject, SlideHost};
use equation_layout::{Color, Point, TextBlock};

const TITLE_FONT_SIZE: f32 = 48.0;

/// Radius of the badge each condition number grows out of, in frame units
const BADGE_RADIUS: f32 = 0.25;

const CONDITIONS: [&str; 3] = [
    "Sensitive to Initial Conditions",
    "Topologically Mix",
    "Dense Period Orbits",
];

pub fn title<H: SlideHost>(host: &mut H, ctx: &SceneContext) -> Result<()> {
    let block = ctx
        .engine
        .text_block("Chaos Theory", frame(0.0, 0.0), TITLE_FONT_SIZE)?;
    let id = host.add(SceneObject::Text(block));
    host.play(vec![Animation::Create { object: id }], 1.0);
    ctx.end_slide(host);
    host.play(vec![Animation::FadeOut { object: id }], 0.0);
    Ok(())
}

/// One numbered condition: badge, number and text
struct Condition {
    badge: Shape,
    number: TextBlock,
    text: TextBlock,
}

impl Condition {
    fn center_x(&self) -> f32 {
        let left = self.badge.bounds().left().min(self.number.bounds.left());
        let right = self.text.bounds.right().max(self.badge.bounds().right());
        (left + right) / 2.0
    }

    fn shift_left(&mut self, dx: f32) {
        if let Shape::Dot { center, .. } = &mut self.badge {
            center.x -= dx;
        }
        self.number.bounds = self.number.bounds.translated(-dx, 0.0);
        self.text.bounds = self.text.bounds.translated(-dx, 0.0);
    }
}

/// Heading, then the three defining properties, each behind its number
pub fn chaotic_systems<H: SlideHost>(host: &mut H, ctx: &SceneContext) -> Result<()> {
    let heading = ctx
        .engine
        .text_block("Chaotic Systems", frame(0.0, 3.5), TITLE_FONT_SIZE)?;
    let heading = host.add(SceneObject::Text(heading));
    host.play(vec![Animation::Create { object: heading }], 1.0);
    ctx.end_slide(host);

    let mut conditions = CONDITIONS
        .iter()
        .enumerate()
        .map(|(i, condition)| -> Result<Condition> {
            let center = frame(-2.0, 1.0 - i as f32);
            let number = ctx
                .engine
                .text_block(&(i + 1).to_string(), center, ctx.font_size())?;
            let text = ctx.next_to(
                condition,
                Point::new(number.bounds.right(), center.y),
                RIGHT,
                ctx.font_size(),
            )?;
            Ok(Condition {
                badge: Shape::dot(center, BADGE_RADIUS * UNIT, Color::WHITE),
                number,
                text,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // Shift every row by the same amount so the texts stay left-aligned
    let shift = conditions
        .iter()
        .map(|c| c.center_x().abs())
        .fold(0.0, f32::max);
    for condition in &mut conditions {
        condition.shift_left(shift);
    }

    for Condition { badge, number, text } in conditions {
        let badge = add_shape(host, badge);
        let number = host.add(SceneObject::Text(number));
        let text = host.add(SceneObject::Text(text));

        host.play(vec![Animation::Create { object: badge }], 0.5);
        host.play(
            vec![
                Animation::TransformInPlace {
                    from: badge,
                    to: number,
                },
                Animation::Write { object: text },
            ],
            1.0,
        );
        host.end_slide();
    }
    Ok(())
}
