use homeplan_db::table::ShoppingList as ShoppingListTable;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::{ShoppingList, ShoppingListStatus};

impl super::Command {
    /// Closes a list. Completing an already completed list is a no-op.
    #[tracing::instrument(skip(self))]
    pub async fn complete(
        &self,
        list_id: &str,
        tenant_id: &str,
    ) -> homeplan_shared::Result<ShoppingList> {
        let mut tx = self.write_db.begin().await?;
        let status = super::find_status(&mut tx, list_id, tenant_id).await?;

        if status == ShoppingListStatus::Active {
            let statement = Query::update()
                .table(ShoppingListTable::Table)
                .values([
                    (
                        ShoppingListTable::Status,
                        ShoppingListStatus::Completed.to_string().into(),
                    ),
                    (ShoppingListTable::CompletedAt, homeplan_shared::now().into()),
                ])
                .and_where(Expr::col(ShoppingListTable::Id).eq(list_id))
                .and_where(Expr::col(ShoppingListTable::TenantId).eq(tenant_id))
                .to_owned();

            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        }

        let list = super::item::load(&mut tx, list_id, tenant_id).await?;
        tx.commit().await?;

        Ok(list)
    }

    /// Deletes a list and its items.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, list_id: &str, tenant_id: &str) -> homeplan_shared::Result<()> {
        let statement = Query::delete()
            .from_table(ShoppingListTable::Table)
            .and_where(Expr::col(ShoppingListTable::Id).eq(list_id))
            .and_where(Expr::col(ShoppingListTable::TenantId).eq(tenant_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            homeplan_shared::not_found!("shopping list {list_id}");
        }

        Ok(())
    }
}
