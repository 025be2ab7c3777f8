use crate::unit::UnitRow;

const MIN_DISPLAY: f64 = 0.1;
const MAX_DISPLAY: f64 = 100.0;

/// Picks the unit that shows `base_quantity` closest to 1.0 among the
/// `units` whose converted value lands in `[0.1, 100)`.
///
/// `units` must be in catalog order; the first one wins a tie. Falls back to
/// `fallback` (the unit of the largest contribution) when nothing is in range.
pub fn select_unit<'a, I>(base_quantity: f64, units: I, fallback: &'a UnitRow) -> (&'a UnitRow, f64)
where
    I: IntoIterator<Item = &'a UnitRow>,
{
    let mut best: Option<(&UnitRow, f64)> = None;

    for unit in units {
        let Some(factor) = unit.factor_to_base() else {
            continue;
        };

        let value = base_quantity / factor;
        if !(MIN_DISPLAY..MAX_DISPLAY).contains(&value) {
            continue;
        }

        let closer = match best {
            Some((_, current)) => (value - 1.0).abs() < (current - 1.0).abs(),
            None => true,
        };

        if closer {
            best = Some((unit, value));
        }
    }

    match best {
        Some(found) => found,
        None => {
            let factor = fallback.factor_to_base().unwrap_or(1.0);
            (fallback, base_quantity / factor)
        }
    }
}
