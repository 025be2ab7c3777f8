use homeplan_db::table::Recipe;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use validator::Validate;

/// Fields of a recipe that may change after creation. `None` leaves the
/// column untouched.
#[derive(Validate, Clone, Default)]
pub struct UpdateInput {
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,
    #[validate(range(min = 1))]
    pub servings: Option<u16>,
}

impl super::Command {
    pub async fn update(
        &self,
        id: impl Into<String>,
        input: UpdateInput,
        tenant_id: impl Into<String>,
    ) -> homeplan_shared::Result<()> {
        input.validate()?;

        let id = id.into();
        let tenant_id = tenant_id.into();
        let mut statement = Query::update()
            .table(Recipe::Table)
            .value(Recipe::UpdatedAt, homeplan_shared::now())
            .and_where(Expr::col(Recipe::Id).eq(&id))
            .and_where(Expr::col(Recipe::TenantId).eq(&tenant_id))
            .to_owned();

        let mut has_data = false;

        if let Some(title) = input.title {
            has_data = true;
            statement.value(Recipe::Title, title.trim().to_owned());
        }

        if let Some(servings) = input.servings {
            has_data = true;
            statement.value(Recipe::Servings, servings);
        }

        if !has_data {
            let statement = Query::select()
                .column(Recipe::Id)
                .from(Recipe::Table)
                .and_where(Expr::col(Recipe::Id).eq(&id))
                .and_where(Expr::col(Recipe::TenantId).eq(&tenant_id))
                .to_owned();

            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            let found = sqlx::query_with(&sql, values)
                .fetch_optional(&self.read_db)
                .await?;

            if found.is_none() {
                homeplan_shared::not_found!("recipe {id}");
            }

            return Ok(());
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            homeplan_shared::not_found!("recipe {id}");
        }

        Ok(())
    }
}
