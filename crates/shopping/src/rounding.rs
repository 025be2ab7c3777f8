/// Quantities closer than this to a rounding step are treated as sitting on it.
const SNAP_EPSILON: f64 = 1e-9;

/// Rounds a quantity up to a shopping-friendly value, never below the
/// requirement:
/// - below 1: next 0.1
/// - 1 to 10: next 0.5
/// - above 10: next whole number
pub fn round_up(quantity: f64) -> f64 {
    if !quantity.is_finite() || quantity <= 0.0 {
        return quantity;
    }

    let steps_per_unit = if quantity < 1.0 {
        10.0
    } else if quantity <= 10.0 {
        2.0
    } else {
        1.0
    };

    let scaled = quantity * steps_per_unit;
    let nearest = scaled.round();

    if (scaled - nearest).abs() <= SNAP_EPSILON * steps_per_unit {
        return nearest / steps_per_unit;
    }

    scaled.ceil() / steps_per_unit
}
