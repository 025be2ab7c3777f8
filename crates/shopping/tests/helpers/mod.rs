#![allow(dead_code)]

use homeplan_mealplan::{CreateInput as PlanInput, ItemInput, MealPlanMetadata, MealSlot};
use homeplan_recipe::{CreateIngredientInput, CreateInput as RecipeInput, IngredientInput};
use homeplan_shared::State;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};
use sqlx_migrator::{Migrate, Plan};
use std::{path::PathBuf, str::FromStr};

pub const TENANT: &str = "tenant-a";
pub const HOUSEHOLD: &str = "house-1";

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);

    let write_db = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(opts.clone())
        .await?;
    let mut conn = write_db.acquire().await?;
    homeplan_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;
    drop(conn);

    let read_db = SqlitePool::connect_with(opts).await?;

    Ok(State { read_db, write_db })
}

pub struct Fixture {
    pub state: State,
    recipes: homeplan_recipe::Command,
    plans: homeplan_mealplan::Command,
}

pub struct Line<'a> {
    pub ingredient_id: &'a str,
    pub quantity: f64,
    pub unit_id: Option<&'a str>,
    pub optional: bool,
}

pub fn line<'a>(ingredient_id: &'a str, quantity: f64, unit_id: &'a str) -> Line<'a> {
    Line {
        ingredient_id,
        quantity,
        unit_id: Some(unit_id),
        optional: false,
    }
}

impl Fixture {
    pub fn new(state: State) -> Self {
        Self {
            recipes: homeplan_recipe::Command::new(state.clone()),
            plans: homeplan_mealplan::Command::new(state.clone()),
            state,
        }
    }

    pub fn shopping(&self) -> homeplan_shopping::Command {
        homeplan_shopping::Command::new(self.state.clone())
    }

    pub fn query(&self) -> homeplan_shopping::Query {
        homeplan_shopping::Query(self.state.clone())
    }

    pub async fn ingredient(&self, name: &str, category: &str) -> anyhow::Result<String> {
        Ok(self
            .recipes
            .create_ingredient(
                CreateIngredientInput {
                    name: name.to_owned(),
                    category: category.to_owned(),
                },
                TENANT,
            )
            .await?)
    }

    pub async fn recipe(
        &self,
        title: &str,
        servings: u16,
        lines: Vec<Line<'_>>,
    ) -> anyhow::Result<String> {
        Ok(self
            .recipes
            .create(
                RecipeInput {
                    household_id: HOUSEHOLD.to_owned(),
                    title: title.to_owned(),
                    servings,
                    ingredients: lines
                        .into_iter()
                        .map(|l| IngredientInput {
                            ingredient_id: l.ingredient_id.to_owned(),
                            quantity: l.quantity,
                            unit_id: l.unit_id.map(|u| u.to_owned()),
                            optional: l.optional,
                            preparation: String::new(),
                        })
                        .collect(),
                },
                TENANT,
            )
            .await?)
    }

    /// Plans each `(recipe, servings)` on consecutive days.
    pub async fn plan(&self, meals: &[(&str, u16)]) -> anyhow::Result<String> {
        let items = meals
            .iter()
            .enumerate()
            .map(|(day, (recipe_id, servings))| ItemInput {
                recipe_id: recipe_id.to_string(),
                planned_on: day as u64 * 86_400,
                slot: MealSlot::Dinner,
                servings: *servings,
            })
            .collect();

        Ok(self
            .plans
            .create(
                PlanInput {
                    household_id: HOUSEHOLD.to_owned(),
                    start_date: 0,
                    end_date: 7 * 86_400,
                    metadata: MealPlanMetadata::default(),
                    items,
                },
                TENANT,
            )
            .await?)
    }

    pub async fn count(&self, table: &str) -> anyhow::Result<i64> {
        let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.state.write_db)
            .await?;

        Ok(count)
    }
}
