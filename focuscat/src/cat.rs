//! The clickable cat in the top bar.
//!
//! Drawn with plain shapes so no image asset is needed. A click makes it hop
//! once with its mouth open.

use egui::{pos2, vec2, Color32, Pos2, Response, Sense, Shape, Stroke, Ui};
use std::f32::consts::PI;

/// Seconds a hop lasts.
pub const HOP_DURATION: f32 = 0.45;
/// Peak hop height as a fraction of the cat's size.
const HOP_HEIGHT: f32 = 0.18;

const FUR: Color32 = Color32::from_rgb(0xF4, 0xA2, 0x61);
const FUR_DARK: Color32 = Color32::from_rgb(0xC9, 0x7B, 0x3F);
const EAR_INNER: Color32 = Color32::from_rgb(0xFF, 0xC7, 0xC7);
const FACE: Color32 = Color32::from_rgb(0x2B, 0x2B, 0x2B);

#[derive(Debug, Clone, Default)]
pub struct CatAnimation {
    /// Seconds since the hop began, `None` when resting.
    elapsed: Option<f32>,
}

impl CatAnimation {
    pub fn trigger(&mut self) {
        self.elapsed = Some(0.0);
    }

    pub fn is_active(&self) -> bool {
        self.elapsed.is_some()
    }

    pub fn advance(&mut self, dt: f32) {
        if let Some(t) = self.elapsed {
            let t = t + dt.max(0.0);
            self.elapsed = (t < HOP_DURATION).then_some(t);
        }
    }

    /// Hop progress in 0..=1, zero while resting.
    pub fn progress(&self) -> f32 {
        self.elapsed.map_or(0.0, |t| (t / HOP_DURATION).clamp(0.0, 1.0))
    }

    /// Upward offset as a fraction of the cat's size.
    pub fn lift(&self) -> f32 {
        (self.progress() * PI).sin() * HOP_HEIGHT
    }
}

/// Paint the cat at `size` points and return its click response.
pub fn cat_button(ui: &mut Ui, anim: &CatAnimation, size: f32) -> Response {
    let (rect, response) = ui.allocate_exact_size(vec2(size, size), Sense::click());
    let response = response.on_hover_text("meow!");

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        let lift = anim.lift() * size;
        let center = rect.center() + vec2(0.0, size * 0.08 - lift);
        let r = size * 0.36;
        let hovered = response.hovered();
        let fur = if hovered { FUR_DARK } else { FUR };

        for side in [-1.0, 1.0] {
            let ear = vec![
                center + vec2(side * r * 0.95, -r * 0.25),
                center + vec2(side * r * 0.75, -r * 1.35),
                center + vec2(side * r * 0.2, -r * 0.8),
            ];
            let inner = scaled_towards(ear.clone(), center, 0.7);
            painter.add(Shape::convex_polygon(ear, fur, Stroke::NONE));
            painter.add(Shape::convex_polygon(inner, EAR_INNER, Stroke::NONE));
        }

        painter.circle_filled(center, r, fur);

        let eye_y = center.y - r * 0.15;
        let mouth_open = anim.is_active();
        for side in [-1.0, 1.0] {
            let eye = pos2(center.x + side * r * 0.38, eye_y);
            if mouth_open {
                // happy squint ^ ^
                painter.line_segment([eye + vec2(-r * 0.12, r * 0.06), eye + vec2(0.0, -r * 0.06)], Stroke::new(1.5, FACE));
                painter.line_segment([eye + vec2(0.0, -r * 0.06), eye + vec2(r * 0.12, r * 0.06)], Stroke::new(1.5, FACE));
            } else {
                painter.circle_filled(eye, r * 0.09, FACE);
            }

            for tilt in [-0.12, 0.06] {
                let start = pos2(center.x + side * r * 0.3, center.y + r * 0.2);
                let end = start + vec2(side * r * 0.75, r * tilt);
                painter.line_segment([start, end], Stroke::new(1.0, FACE));
            }
        }

        let nose = pos2(center.x, center.y + r * 0.12);
        painter.circle_filled(nose, r * 0.06, EAR_INNER);
        if mouth_open {
            painter.circle_filled(nose + vec2(0.0, r * 0.22), r * 0.13, FACE);
        } else {
            painter.line_segment([nose, nose + vec2(-r * 0.12, r * 0.14)], Stroke::new(1.0, FACE));
            painter.line_segment([nose, nose + vec2(r * 0.12, r * 0.14)], Stroke::new(1.0, FACE));
        }
    }

    response
}

fn scaled_towards(points: Vec<Pos2>, anchor: Pos2, factor: f32) -> Vec<Pos2> {
    let centroid = points.iter().fold(vec2(0.0, 0.0), |acc, p| acc + p.to_vec2()) / points.len() as f32;
    let centroid = centroid.to_pos2();
    let pull = (anchor - centroid) * 0.1;
    points.into_iter().map(|p| centroid + (p - centroid) * factor + pull).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resting_cat_does_not_lift() {
        let anim = CatAnimation::default();
        assert!(!anim.is_active());
        assert_eq!(anim.lift(), 0.0);
    }

    #[test]
    fn test_hop_rises_then_lands() {
        let mut anim = CatAnimation::default();
        anim.trigger();
        anim.advance(HOP_DURATION / 2.0);
        assert!((anim.lift() - HOP_HEIGHT).abs() < 1e-4);
        anim.advance(HOP_DURATION);
        assert!(!anim.is_active());
        assert_eq!(anim.lift(), 0.0);
    }

    #[test]
    fn test_retrigger_restarts_hop() {
        let mut anim = CatAnimation::default();
        anim.trigger();
        anim.advance(HOP_DURATION * 0.9);
        anim.trigger();
        assert_eq!(anim.progress(), 0.0);
        assert!(anim.is_active());
    }
}
