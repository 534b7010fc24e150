/// Number of whole steps of size `dt` that fit in `span`, truncated toward
/// zero. Non-positive or non-finite inputs give no steps.
pub fn step_count(span: f64, dt: f64) -> usize {
    if !(span.is_finite() && dt.is_finite()) || span <= 0.0 || dt <= 0.0 {
        return 0;
    }
    (span / dt).floor() as usize
}
