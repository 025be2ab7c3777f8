use homeplan_db::table::{Ingredient, Recipe, RecipeIngredient, Unit};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqliteConnection;
use validator::Validate;

#[derive(Validate, Clone)]
pub struct IngredientInput {
    pub ingredient_id: String,
    #[validate(range(exclusive_min = 0.0))]
    pub quantity: f64,
    pub unit_id: Option<String>,
    pub optional: bool,
    #[validate(length(max = 255))]
    pub preparation: String,
}

#[derive(Validate, Clone)]
pub struct CreateInput {
    pub household_id: String,
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    /// Number of servings the ingredient quantities are written for.
    #[validate(range(min = 1))]
    pub servings: u16,
    #[validate(nested)]
    pub ingredients: Vec<IngredientInput>,
}

impl super::Command {
    #[tracing::instrument(skip_all, fields(household_id = %input.household_id))]
    pub async fn create(
        &self,
        input: CreateInput,
        tenant_id: impl Into<String>,
    ) -> homeplan_shared::Result<String> {
        input.validate()?;

        let tenant_id = tenant_id.into();
        let id = homeplan_shared::new_id();
        let mut tx = self.write_db.begin().await?;

        let statement = Query::insert()
            .into_table(Recipe::Table)
            .columns([
                Recipe::Id,
                Recipe::TenantId,
                Recipe::HouseholdId,
                Recipe::Title,
                Recipe::Servings,
                Recipe::CreatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                tenant_id.to_owned().into(),
                input.household_id.into(),
                input.title.trim().to_owned().into(),
                input.servings.into(),
                homeplan_shared::now().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        for (position, ingredient) in input.ingredients.into_iter().enumerate() {
            if !ingredient_exists(&mut tx, &ingredient.ingredient_id, &tenant_id).await? {
                homeplan_shared::not_found!("ingredient {}", ingredient.ingredient_id);
            }

            if let Some(unit_id) = &ingredient.unit_id {
                if !unit_exists(&mut tx, unit_id, &tenant_id).await? {
                    homeplan_shared::not_found!("unit {unit_id}");
                }
            }

            let statement = Query::insert()
                .into_table(RecipeIngredient::Table)
                .columns([
                    RecipeIngredient::Id,
                    RecipeIngredient::TenantId,
                    RecipeIngredient::RecipeId,
                    RecipeIngredient::IngredientId,
                    RecipeIngredient::Quantity,
                    RecipeIngredient::UnitId,
                    RecipeIngredient::Optional,
                    RecipeIngredient::Preparation,
                    RecipeIngredient::Position,
                ])
                .values_panic([
                    homeplan_shared::new_id().into(),
                    tenant_id.to_owned().into(),
                    id.to_owned().into(),
                    ingredient.ingredient_id.into(),
                    ingredient.quantity.into(),
                    ingredient.unit_id.into(),
                    ingredient.optional.into(),
                    ingredient.preparation.into(),
                    (position as i32).into(),
                ])
                .to_owned();

            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        }

        tx.commit().await?;

        Ok(id)
    }
}

async fn ingredient_exists(
    conn: &mut SqliteConnection,
    id: &str,
    tenant_id: &str,
) -> homeplan_shared::Result<bool> {
    let statement = Query::select()
        .column(Ingredient::Id)
        .from(Ingredient::Table)
        .and_where(Expr::col(Ingredient::Id).eq(id))
        .and_where(Expr::col(Ingredient::TenantId).eq(tenant_id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let row = sqlx::query_with(&sql, values)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(row.is_some())
}

async fn unit_exists(
    conn: &mut SqliteConnection,
    id: &str,
    tenant_id: &str,
) -> homeplan_shared::Result<bool> {
    let statement = Query::select()
        .column(Unit::Id)
        .from(Unit::Table)
        .and_where(Expr::col(Unit::Id).eq(id))
        .and_where(
            Expr::col(Unit::TenantId)
                .eq(tenant_id)
                .or(Expr::col(Unit::TenantId).is_null()),
        )
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let row = sqlx::query_with(&sql, values)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(row.is_some())
}
