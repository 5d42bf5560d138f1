// Math utilities and helper functions

/// Clamp a value between min and max.
///
/// Unlike `f32::clamp` this never panics: when the range is inverted
/// (a play area narrower than the hitbox) `min` wins.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

/// Collapse an analog axis value to -1, 0 or +1
pub fn axis_sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}
