use std::collections::HashMap;

use homeplan_recipe::RecipeIngredientRow;
use homeplan_shared::State;

/// One recipe ingredient scaled to the servings planned for a meal.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientLine {
    pub ingredient_id: String,
    pub name: String,
    pub category: String,
    pub quantity: f64,
    pub unit_id: Option<String>,
    pub unit_category: Option<String>,
    pub optional: bool,
    pub recipe_title: String,
}

#[derive(Debug, Clone)]
pub struct PlanIngredients {
    pub meal_plan_id: String,
    pub household_id: String,
    pub lines: Vec<IngredientLine>,
}

/// Reads every ingredient needed by a meal plan, scaled by
/// `planned servings / recipe servings`. Never writes.
#[tracing::instrument(skip(state))]
pub async fn read(
    state: &State,
    meal_plan_id: &str,
    tenant_id: &str,
) -> homeplan_shared::Result<PlanIngredients> {
    let plans = homeplan_mealplan::Query(state.clone());
    let Some(plan) = plans.find(meal_plan_id, tenant_id).await? else {
        homeplan_shared::not_found!("meal plan {meal_plan_id}");
    };

    tracing::debug!(source = ?plan.metadata.0.source, "reading meal plan");

    let items = plans.items(meal_plan_id, tenant_id).await?;
    if items.is_empty() {
        homeplan_shared::not_found!("items of meal plan {meal_plan_id}");
    }

    let recipes = homeplan_recipe::Query(state.clone());
    let mut cache: HashMap<String, Vec<RecipeIngredientRow>> = HashMap::new();
    let mut lines = Vec::new();

    for item in items {
        let base_servings = if item.recipe_servings == 0 {
            tracing::warn!(recipe_id = %item.recipe_id, "recipe has no base servings, assuming 1");
            1
        } else {
            item.recipe_servings
        };
        let ratio = f64::from(item.servings) / f64::from(base_servings);

        if !cache.contains_key(&item.recipe_id) {
            let rows = recipes.ingredients(&item.recipe_id, tenant_id).await?;
            cache.insert(item.recipe_id.to_owned(), rows);
        }

        let rows = cache.get(&item.recipe_id).map(Vec::as_slice).unwrap_or_default();
        for row in rows {
            lines.push(IngredientLine {
                ingredient_id: row.ingredient_id.to_owned(),
                name: row.name.to_owned(),
                category: row.category.to_owned(),
                quantity: row.quantity * ratio,
                unit_id: row.unit_id.to_owned(),
                unit_category: row.unit_category.to_owned(),
                optional: row.optional,
                recipe_title: item.recipe_title.to_owned(),
            });
        }
    }

    Ok(PlanIngredients {
        meal_plan_id: plan.id,
        household_id: plan.household_id,
        lines,
    })
}
