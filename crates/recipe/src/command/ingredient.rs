use homeplan_db::table::Ingredient;
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use validator::Validate;

#[derive(Validate, Clone)]
pub struct CreateIngredientInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Free-text grouping ("Produce", "dairy", ...) used to pick a store section.
    #[validate(length(max = 50))]
    pub category: String,
}

impl super::Command {
    pub async fn create_ingredient(
        &self,
        input: CreateIngredientInput,
        tenant_id: impl Into<String>,
    ) -> homeplan_shared::Result<String> {
        input.validate()?;

        let id = homeplan_shared::new_id();
        let statement = Query::insert()
            .into_table(Ingredient::Table)
            .columns([
                Ingredient::Id,
                Ingredient::TenantId,
                Ingredient::Name,
                Ingredient::Category,
                Ingredient::CreatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                tenant_id.into().into(),
                input.name.trim().to_owned().into(),
                input.category.trim().to_owned().into(),
                homeplan_shared::now().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(id)
    }
}
