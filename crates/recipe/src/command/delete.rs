use homeplan_db::table::Recipe;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

impl super::Command {
    pub async fn delete(
        &self,
        id: impl Into<String>,
        tenant_id: impl Into<String>,
    ) -> homeplan_shared::Result<()> {
        let id = id.into();
        let statement = Query::delete()
            .from_table(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(&id))
            .and_where(Expr::col(Recipe::TenantId).eq(tenant_id.into()))
            .to_owned();

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
