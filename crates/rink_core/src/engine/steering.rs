//! Steering helpers
//!
//! Velocity-vector outputs consumed by the per-tick motion integration;
//! none of these mutate positions directly.

use super::types::vec2;

/// Seek: move toward a target at the given speed.
pub fn seek(current: (f32, f32), target: (f32, f32), speed: f32) -> (f32, f32) {
    if speed <= 0.0 {
        return (0.0, 0.0);
    }
    vec2::scale(vec2::normalize(vec2::sub(target, current)), speed)
}

/// Arrive: full speed far out, decelerating inside `slowing_distance`.
pub fn arrive(
    current: (f32, f32),
    target: (f32, f32),
    max_speed: f32,
    slowing_distance: f32,
) -> (f32, f32) {
    if max_speed <= 0.0 {
        return (0.0, 0.0);
    }
    let to_target = vec2::sub(target, current);
    let distance = vec2::length(to_target);
    if distance < 1e-4 {
        return (0.0, 0.0);
    }
    let speed = if slowing_distance > 0.0 {
        max_speed * (distance / slowing_distance).clamp(0.0, 1.0)
    } else {
        max_speed
    };
    vec2::scale((to_target.0 / distance, to_target.1 / distance), speed)
}

/// Pursuit: chase a moving target by leading toward its predicted position.
pub fn pursuit(
    current: (f32, f32),
    target_pos: (f32, f32),
    target_vel: (f32, f32),
    speed: f32,
    max_lookahead_s: f32,
) -> (f32, f32) {
    if speed <= 0.0 {
        return (0.0, 0.0);
    }
    let distance = vec2::distance(current, target_pos);
    let lookahead = (distance / speed).min(max_lookahead_s.max(0.0));
    seek(current, vec2::add(target_pos, vec2::scale(target_vel, lookahead)), speed)
}

/// Point on the segment from `threat` to `goal`, offset from the goal end
/// toward the threat by `bias` of the segment length. DefendGoal skates to
/// this point to put its body on the shooting line.
pub fn intercept_point(threat: (f32, f32), goal: (f32, f32), bias: f32) -> (f32, f32) {
    let bias = bias.clamp(0.0, 1.0);
    vec2::add(goal, vec2::scale(vec2::sub(threat, goal), bias))
}
