#![allow(dead_code)]

use homeplan_mealplan::{CreateInput as PlanInput, ItemInput, MealPlanMetadata, MealSlot};
use homeplan_recipe::{CreateIngredientInput, CreateInput as RecipeInput, IngredientInput};
use homeplan_shared::State;
use sqlx_migrator::{Migrate, Plan};
use std::path::PathBuf;

pub const TENANT: &str = "tenant-a";
pub const HOUSEHOLD: &str = "house-1";

/// Migrated database with the same pool layout as `serve`: one write
/// connection and a read-only pool.
pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<State> {
    let url = format!("sqlite:{}", path.to_str().unwrap());
    let write_db = homeplan::db::create_pool(&url, 1).await?;
    let mut conn = write_db.acquire().await?;
    homeplan_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;
    drop(conn);

    let read_db = homeplan::db::create_read_pool(&url, 2).await?;

    Ok(State { read_db, write_db })
}

/// Plans one "Pancakes" dinner for 4 (recipe serves 2): 2 cups of flour
/// and 300 ml of milk per recipe. Returns the meal plan id.
pub async fn pancake_plan(state: &State) -> anyhow::Result<String> {
    let recipes = homeplan_recipe::Command::new(state.clone());
    let flour = recipes
        .create_ingredient(
            CreateIngredientInput {
                name: "Flour".to_owned(),
                category: "Pantry".to_owned(),
            },
            TENANT,
        )
        .await?;
    let milk = recipes
        .create_ingredient(
            CreateIngredientInput {
                name: "Milk".to_owned(),
                category: "Dairy".to_owned(),
            },
            TENANT,
        )
        .await?;

    let ingredient = |ingredient_id: &str, quantity: f64, unit_id: &str| IngredientInput {
        ingredient_id: ingredient_id.to_owned(),
        quantity,
        unit_id: Some(unit_id.to_owned()),
        optional: false,
        preparation: String::new(),
    };

    let pancakes = recipes
        .create(
            RecipeInput {
                household_id: HOUSEHOLD.to_owned(),
                title: "Pancakes".to_owned(),
                servings: 2,
                ingredients: vec![ingredient(&flour, 2.0, "cup"), ingredient(&milk, 300.0, "ml")],
            },
            TENANT,
        )
        .await?;

    Ok(homeplan_mealplan::Command::new(state.clone())
        .create(
            PlanInput {
                household_id: HOUSEHOLD.to_owned(),
                start_date: 0,
                end_date: 7 * 86_400,
                metadata: MealPlanMetadata::default(),
                items: vec![ItemInput {
                    recipe_id: pancakes,
                    planned_on: 86_400,
                    slot: MealSlot::Dinner,
                    servings: 4,
                }],
            },
            TENANT,
        )
        .await?)
}
