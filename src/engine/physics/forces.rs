use eframe::egui::{Vec2, vec2};

pub(super) const MIN_SEPARATION: f32 = 8.0;

fn separation_direction(delta: Vec2, distance: f32, i: usize, j: usize) -> Vec2 {
    if distance > 0.0001 {
        delta / distance
    } else {
        let angle = ((i as f32) * 0.618_034 + (j as f32) * 0.414_214) * std::f32::consts::TAU;
        vec2(angle.cos(), angle.sin())
    }
}

/// Push on `a` away from `b`, `strength / d²` with `d` clamped to `MIN_SEPARATION`.
pub(super) fn repulsion_between(a: Vec2, b: Vec2, strength: f32, i: usize, j: usize) -> Vec2 {
    let delta = a - b;
    let distance = delta.length();
    let direction = separation_direction(delta, distance, i, j);
    let clamped = distance.max(MIN_SEPARATION);
    direction * (strength / (clamped * clamped))
}

pub(super) fn attraction_toward(from: Vec2, to: Vec2, coefficient: f32) -> Vec2 {
    (to - from) * coefficient
}

pub(super) fn centering(position: Vec2, center: Vec2, strength: f32) -> Vec2 {
    (center - position) * strength
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repulsion_follows_inverse_square() {
        let near = repulsion_between(vec2(10.0, 0.0), Vec2::ZERO, 100.0, 0, 1);
        let far = repulsion_between(vec2(20.0, 0.0), Vec2::ZERO, 100.0, 0, 1);
        assert!((near.x - 1.0).abs() < 1e-5);
        assert!((far.x - 0.25).abs() < 1e-5);
        assert_eq!(near.y, 0.0);
    }

    #[test]
    fn coincident_points_get_a_finite_push() {
        let force = repulsion_between(Vec2::ZERO, Vec2::ZERO, 100.0, 2, 5);
        assert!(force.x.is_finite() && force.y.is_finite());
        let expected = 100.0 / (MIN_SEPARATION * MIN_SEPARATION);
        assert!((force.length() - expected).abs() < 1e-4);
    }

    #[test]
    fn attraction_is_linear_in_displacement() {
        let force = attraction_toward(Vec2::ZERO, vec2(50.0, -20.0), 0.1);
        assert_eq!(force, vec2(5.0, -2.0));
        assert_eq!(centering(vec2(10.0, 10.0), Vec2::ZERO, 0.5), vec2(-5.0, -5.0));
    }
}
