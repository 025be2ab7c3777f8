use homeplan_db::table::{Ingredient, Recipe, RecipeIngredient, Unit};
use sea_query::{Alias, Expr, ExprTrait, JoinType, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;

#[derive(Debug, Default, Clone, FromRow)]
pub struct RecipeRow {
    pub id: String,
    pub household_id: String,
    pub title: String,
    pub servings: u16,
    pub created_at: u64,
    pub updated_at: Option<u64>,
}

/// One ingredient line of a recipe, joined with its ingredient and unit.
#[derive(Debug, Default, Clone, FromRow)]
pub struct RecipeIngredientRow {
    pub ingredient_id: String,
    pub name: String,
    pub category: String,
    pub quantity: f64,
    pub unit_id: Option<String>,
    pub unit_category: Option<String>,
    pub optional: bool,
    pub preparation: String,
}

impl super::Query {
    pub async fn find(
        &self,
        id: impl Into<String>,
        tenant_id: impl Into<String>,
    ) -> anyhow::Result<Option<RecipeRow>> {
        let statement = sea_query::Query::select()
            .columns([
                Recipe::Id,
                Recipe::HouseholdId,
                Recipe::Title,
                Recipe::Servings,
                Recipe::CreatedAt,
                Recipe::UpdatedAt,
            ])
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(id.into()))
            .and_where(Expr::col(Recipe::TenantId).eq(tenant_id.into()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?)
    }

    /// Ingredient lines of a recipe in authoring order.
    pub async fn ingredients(
        &self,
        recipe_id: impl Into<String>,
        tenant_id: impl Into<String>,
    ) -> anyhow::Result<Vec<RecipeIngredientRow>> {
        let statement = sea_query::Query::select()
            .columns([
                (RecipeIngredient::Table, RecipeIngredient::IngredientId),
                (RecipeIngredient::Table, RecipeIngredient::Quantity),
                (RecipeIngredient::Table, RecipeIngredient::UnitId),
                (RecipeIngredient::Table, RecipeIngredient::Optional),
                (RecipeIngredient::Table, RecipeIngredient::Preparation),
            ])
            .columns([
                (Ingredient::Table, Ingredient::Name),
                (Ingredient::Table, Ingredient::Category),
            ])
            .expr_as(
                Expr::col((Unit::Table, Unit::Category)),
                Alias::new("unit_category"),
            )
            .from(RecipeIngredient::Table)
            .join(
                JoinType::InnerJoin,
                Ingredient::Table,
                Expr::col((RecipeIngredient::Table, RecipeIngredient::IngredientId))
                    .equals((Ingredient::Table, Ingredient::Id)),
            )
            .join(
                JoinType::LeftJoin,
                Unit::Table,
                Expr::col((RecipeIngredient::Table, RecipeIngredient::UnitId))
                    .equals((Unit::Table, Unit::Id)),
            )
            .and_where(
                Expr::col((RecipeIngredient::Table, RecipeIngredient::RecipeId))
                    .eq(recipe_id.into()),
            )
            .and_where(
                Expr::col((RecipeIngredient::Table, RecipeIngredient::TenantId))
                    .eq(tenant_id.into()),
            )
            .order_by(
                (RecipeIngredient::Table, RecipeIngredient::Position),
                Order::Asc,
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, RecipeIngredientRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?)
    }
}
