use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::{
    display::select_unit,
    reader::IngredientLine,
    unit::{ConversionError, UnitCatalog, UnitRow},
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display, AsRefStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Consolidation {
    /// Every contribution was merged into this line.
    #[default]
    Consolidated,
    /// A contribution could not be converted and was kept on its own line.
    UnconsolidatedFallback,
}

/// Total requirement for one ingredient in one display unit.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedIngredient {
    pub ingredient_id: String,
    pub name: String,
    pub category: String,
    pub quantity: f64,
    pub unit: Option<UnitRow>,
    pub recipes: Vec<String>,
    pub consolidation: Consolidation,
}

/// Lines of one ingredient within one unit category.
#[derive(Default)]
struct Group<'a> {
    lines: Vec<&'a IngredientLine>,
}

/// Merges scaled ingredient lines into one requirement per ingredient and
/// unit category.
///
/// Lines sharing a unit are summed as is. Lines with different units of the
/// same category are converted to their base unit, summed and shown in the
/// most readable unit sharing that base. A line that cannot be converted keeps its own unit
/// on a separate requirement flagged [`Consolidation::UnconsolidatedFallback`].
/// Optional lines are skipped.
pub fn aggregate(lines: &[IngredientLine], units: &UnitCatalog) -> Vec<AggregatedIngredient> {
    let mut order: Vec<(String, String)> = Vec::new();
    let mut groups: HashMap<(String, String), Group> = HashMap::new();

    for line in lines.iter().filter(|l| !l.optional) {
        let key = (
            line.unit_category.to_owned().unwrap_or_default(),
            line.ingredient_id.to_owned(),
        );

        if !groups.contains_key(&key) {
            order.push(key.clone());
        }

        groups.entry(key).or_default().lines.push(line);
    }

    let mut aggregated = Vec::new();

    for key in order {
        let Some(group) = groups.remove(&key) else {
            continue;
        };

        aggregated.extend(aggregate_group(&group.lines, units));
    }

    aggregated.retain(|item| {
        if item.quantity > 0.0 && item.quantity.is_finite() {
            return true;
        }

        tracing::warn!(
            ingredient_id = %item.ingredient_id,
            quantity = item.quantity,
            "dropping non-positive requirement"
        );

        false
    });

    aggregated
}

fn aggregate_group(lines: &[&IngredientLine], units: &UnitCatalog) -> Vec<AggregatedIngredient> {
    let Some(first) = lines.first() else {
        return vec![];
    };

    if lines.iter().all(|l| l.unit_id == first.unit_id) {
        return vec![sum_as_is(lines, units, Consolidation::Consolidated)];
    }

    // Lines merge on the base unit of the first convertible line. A category
    // may hold several bases (tenant units); lines on another one fall back.
    let mut converted: Vec<(&IngredientLine, f64)> = Vec::new();
    let mut failed: Vec<&IngredientLine> = Vec::new();
    let mut base: Option<&UnitRow> = None;

    for &line in lines {
        let Some(unit_id) = &line.unit_id else {
            tracing::warn!(
                ingredient_id = %line.ingredient_id,
                "line without unit cannot be merged, keeping a separate line"
            );
            failed.push(line);
            continue;
        };

        let result = units.to_base(line.quantity, unit_id).and_then(|(quantity, unit)| {
            match base {
                Some(current) if current.id != unit.id => Err(ConversionError::NoSharedBase {
                    from: unit_id.to_owned(),
                    to: current.id.to_owned(),
                }),
                _ => Ok((quantity, unit)),
            }
        });

        match result {
            Ok((quantity, unit)) => {
                base = Some(unit);
                converted.push((line, quantity));
            }
            Err(err) => {
                tracing::warn!(
                    ingredient_id = %line.ingredient_id,
                    unit_id = ?line.unit_id,
                    "unit conversion failed, keeping a separate line: {err}"
                );
                failed.push(line);
            }
        }
    }

    let mut result = Vec::new();

    if let (Some(first), Some(base)) = (converted.first(), base) {
        let first = first.0;

        if converted.iter().all(|(l, _)| l.unit_id == first.unit_id) {
            let lines: Vec<_> = converted.iter().map(|(l, _)| *l).collect();
            result.push(sum_as_is(&lines, units, Consolidation::Consolidated));
        } else {
            let total: f64 = converted.iter().map(|(_, q)| q).sum();
            let largest = converted
                .iter()
                .fold(None::<(&IngredientLine, f64)>, |acc, (line, q)| match acc {
                    Some((_, best)) if best >= *q => acc,
                    _ => Some((*line, *q)),
                })
                .and_then(|(line, _)| line.unit_id.as_deref())
                .and_then(|id| units.get(id))
                .unwrap_or(base);

            let (unit, quantity) = select_unit(total, units.on_base(base), largest);

            result.push(AggregatedIngredient {
                ingredient_id: first.ingredient_id.to_owned(),
                name: first.name.to_owned(),
                category: first.category.to_owned(),
                quantity,
                unit: Some(unit.clone()),
                recipes: recipe_titles(converted.iter().map(|(l, _)| *l)),
                consolidation: Consolidation::Consolidated,
            });
        }
    }

    let mut fallbacks: Vec<(Option<String>, Vec<&IngredientLine>)> = Vec::new();
    for line in failed {
        match fallbacks.iter_mut().find(|(unit_id, _)| *unit_id == line.unit_id) {
            Some((_, lines)) => lines.push(line),
            None => fallbacks.push((line.unit_id.to_owned(), vec![line])),
        }
    }

    for (_, lines) in fallbacks {
        result.push(sum_as_is(
            &lines,
            units,
            Consolidation::UnconsolidatedFallback,
        ));
    }

    result
}

/// Sums lines that all share one unit, keeping that unit.
fn sum_as_is(
    lines: &[&IngredientLine],
    units: &UnitCatalog,
    consolidation: Consolidation,
) -> AggregatedIngredient {
    let first = lines[0];

    AggregatedIngredient {
        ingredient_id: first.ingredient_id.to_owned(),
        name: first.name.to_owned(),
        category: first.category.to_owned(),
        quantity: lines.iter().map(|l| l.quantity).sum(),
        unit: first
            .unit_id
            .as_deref()
            .and_then(|id| units.get(id))
            .cloned(),
        recipes: recipe_titles(lines.iter().copied()),
        consolidation,
    }
}

fn recipe_titles<'a>(lines: impl Iterator<Item = &'a IngredientLine>) -> Vec<String> {
    let mut titles: Vec<String> = Vec::new();

    for line in lines {
        if !titles.contains(&line.recipe_title) {
            titles.push(line.recipe_title.to_owned());
        }
    }

    titles
}
