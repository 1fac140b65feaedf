/// Wraps an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Clamps without panicking when the bounds are inverted or NaN.
pub fn saturate(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}
