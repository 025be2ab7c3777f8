use homeplan_db::table::{MealPlan, MealPlanItem, Recipe};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use validator::{Validate, ValidationError};

use crate::{MealPlanMetadata, MealSlot};

#[derive(Validate, Clone)]
pub struct ItemInput {
    pub recipe_id: String,
    pub planned_on: u64,
    pub slot: MealSlot,
    #[validate(range(min = 1))]
    pub servings: u16,
}

#[derive(Validate, Clone)]
#[validate(schema(function = "validate_range"))]
pub struct CreateInput {
    pub household_id: String,
    pub start_date: u64,
    pub end_date: u64,
    pub metadata: MealPlanMetadata,
    #[validate(nested)]
    pub items: Vec<ItemInput>,
}

fn validate_range(input: &CreateInput) -> Result<(), ValidationError> {
    if input.end_date < input.start_date {
        return Err(ValidationError::new("end_before_start"));
    }

    if input
        .items
        .iter()
        .any(|item| item.planned_on < input.start_date || item.planned_on > input.end_date)
    {
        return Err(ValidationError::new("item_out_of_range"));
    }

    Ok(())
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
        let metadata = serde_json::to_string(&input.metadata)?;
        let mut tx = self.write_db.begin().await?;

        let statement = Query::insert()
            .into_table(MealPlan::Table)
            .columns([
                MealPlan::Id,
                MealPlan::TenantId,
                MealPlan::HouseholdId,
                MealPlan::StartDate,
                MealPlan::EndDate,
                MealPlan::Metadata,
                MealPlan::CreatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                tenant_id.to_owned().into(),
                input.household_id.into(),
                input.start_date.into(),
                input.end_date.into(),
                metadata.into(),
                homeplan_shared::now().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        for (position, item) in input.items.into_iter().enumerate() {
            let statement = Query::select()
                .column(Recipe::Id)
                .from(Recipe::Table)
                .and_where(Expr::col(Recipe::Id).eq(&item.recipe_id))
                .and_where(Expr::col(Recipe::TenantId).eq(&tenant_id))
                .limit(1)
                .to_owned();

            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            let recipe = sqlx::query_with(&sql, values)
                .fetch_optional(&mut *tx)
                .await?;

            if recipe.is_none() {
                homeplan_shared::not_found!("recipe {}", item.recipe_id);
            }

            let statement = Query::insert()
                .into_table(MealPlanItem::Table)
                .columns([
                    MealPlanItem::Id,
                    MealPlanItem::TenantId,
                    MealPlanItem::MealPlanId,
                    MealPlanItem::RecipeId,
                    MealPlanItem::PlannedOn,
                    MealPlanItem::MealSlot,
                    MealPlanItem::Servings,
                    MealPlanItem::Position,
                ])
                .values_panic([
                    homeplan_shared::new_id().into(),
                    tenant_id.to_owned().into(),
                    id.to_owned().into(),
                    item.recipe_id.into(),
                    item.planned_on.into(),
                    item.slot.to_string().into(),
                    item.servings.into(),
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
