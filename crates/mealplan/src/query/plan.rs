use homeplan_db::table::{MealPlan, MealPlanItem, Recipe};
use sea_query::{Alias, Expr, ExprTrait, JoinType, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;

use crate::{MealPlanMetadata, MealSlot};

#[derive(Debug, Default, FromRow)]
pub struct MealPlanRow {
    pub id: String,
    pub household_id: String,
    pub start_date: u64,
    pub end_date: u64,
    pub metadata: sqlx::types::Json<MealPlanMetadata>,
    pub created_at: u64,
}

/// A planned meal with the serving counts needed to scale its recipe.
#[derive(Debug, Default, Clone, FromRow)]
pub struct MealPlanItemRow {
    pub id: String,
    pub recipe_id: String,
    pub recipe_title: String,
    /// Servings the recipe quantities are written for.
    pub recipe_servings: u16,
    /// Servings wanted for this meal.
    pub servings: u16,
    pub planned_on: u64,
    pub meal_slot: sqlx::types::Text<MealSlot>,
}

impl super::Query {
    pub async fn find(
        &self,
        id: impl Into<String>,
        tenant_id: impl Into<String>,
    ) -> anyhow::Result<Option<MealPlanRow>> {
        let statement = sea_query::Query::select()
            .columns([
                MealPlan::Id,
                MealPlan::HouseholdId,
                MealPlan::StartDate,
                MealPlan::EndDate,
                MealPlan::Metadata,
                MealPlan::CreatedAt,
            ])
            .from(MealPlan::Table)
            .and_where(Expr::col(MealPlan::Id).eq(id.into()))
            .and_where(Expr::col(MealPlan::TenantId).eq(tenant_id.into()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, MealPlanRow, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?)
    }

    pub async fn items(
        &self,
        meal_plan_id: impl Into<String>,
        tenant_id: impl Into<String>,
    ) -> anyhow::Result<Vec<MealPlanItemRow>> {
        let statement = sea_query::Query::select()
            .columns([
                (MealPlanItem::Table, MealPlanItem::Id),
                (MealPlanItem::Table, MealPlanItem::RecipeId),
                (MealPlanItem::Table, MealPlanItem::Servings),
                (MealPlanItem::Table, MealPlanItem::PlannedOn),
                (MealPlanItem::Table, MealPlanItem::MealSlot),
            ])
            .expr_as(
                Expr::col((Recipe::Table, Recipe::Title)),
                Alias::new("recipe_title"),
            )
            .expr_as(
                Expr::col((Recipe::Table, Recipe::Servings)),
                Alias::new("recipe_servings"),
            )
            .from(MealPlanItem::Table)
            .join(
                JoinType::InnerJoin,
                Recipe::Table,
                Expr::col((MealPlanItem::Table, MealPlanItem::RecipeId))
                    .equals((Recipe::Table, Recipe::Id)),
            )
            .and_where(
                Expr::col((MealPlanItem::Table, MealPlanItem::MealPlanId))
                    .eq(meal_plan_id.into()),
            )
            .and_where(
                Expr::col((MealPlanItem::Table, MealPlanItem::TenantId)).eq(tenant_id.into()),
            )
            .order_by((MealPlanItem::Table, MealPlanItem::Position), Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, MealPlanItemRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?)
    }
}
