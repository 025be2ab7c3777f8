use homeplan_db::table::ShoppingListItem;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use sqlx::SqliteConnection;
use validator::Validate;

use crate::ShoppingList;

/// Editable fields of a list item. `None` leaves the column untouched.
#[derive(Validate, Clone, Debug, Default, Deserialize)]
pub struct UpdateItemInput {
    #[validate(range(exclusive_min = 0.0))]
    pub quantity: Option<f64>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    pub purchased: Option<bool>,
}

impl super::Command {
    /// Flips the purchased flag of an item. Marking the last unpurchased item
    /// completes the list.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_purchased(
        &self,
        list_id: &str,
        item_id: &str,
        tenant_id: &str,
    ) -> homeplan_shared::Result<ShoppingList> {
        let mut tx = self.write_db.begin().await?;
        super::find_status(&mut tx, list_id, tenant_id).await?;

        let statement = Query::update()
            .table(ShoppingListItem::Table)
            .value(
                ShoppingListItem::Purchased,
                Expr::col(ShoppingListItem::Purchased).not(),
            )
            .and_where(Expr::col(ShoppingListItem::Id).eq(item_id))
            .and_where(Expr::col(ShoppingListItem::ShoppingListId).eq(list_id))
            .and_where(Expr::col(ShoppingListItem::TenantId).eq(tenant_id))
            .to_owned();

        execute_item_update(&mut tx, statement, item_id).await?;
        super::complete_if_done(&mut tx, list_id, tenant_id).await?;

        let list = load(&mut tx, list_id, tenant_id).await?;
        tx.commit().await?;

        Ok(list)
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn update_item(
        &self,
        list_id: &str,
        item_id: &str,
        input: UpdateItemInput,
        tenant_id: &str,
    ) -> homeplan_shared::Result<ShoppingList> {
        input.validate()?;

        let mut tx = self.write_db.begin().await?;
        super::find_status(&mut tx, list_id, tenant_id).await?;

        let mut statement = Query::update()
            .table(ShoppingListItem::Table)
            .and_where(Expr::col(ShoppingListItem::Id).eq(item_id))
            .and_where(Expr::col(ShoppingListItem::ShoppingListId).eq(list_id))
            .and_where(Expr::col(ShoppingListItem::TenantId).eq(tenant_id))
            .to_owned();

        let mut has_data = false;

        if let Some(quantity) = input.quantity {
            has_data = true;
            statement.value(ShoppingListItem::Quantity, quantity);
        }

        if let Some(notes) = input.notes {
            has_data = true;
            statement.value(ShoppingListItem::Notes, notes);
        }

        if let Some(purchased) = input.purchased {
            has_data = true;
            statement.value(ShoppingListItem::Purchased, purchased);
        }

        if has_data {
            execute_item_update(&mut tx, statement, item_id).await?;
        }

        if input.purchased == Some(true) {
            super::complete_if_done(&mut tx, list_id, tenant_id).await?;
        }

        let list = load(&mut tx, list_id, tenant_id).await?;
        if list.item(item_id).is_none() {
            homeplan_shared::not_found!("shopping list item {item_id}");
        }

        tx.commit().await?;

        Ok(list)
    }
}

async fn execute_item_update(
    conn: &mut SqliteConnection,
    statement: sea_query::UpdateStatement,
    item_id: &str,
) -> homeplan_shared::Result<()> {
    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    if result.rows_affected() == 0 {
        homeplan_shared::not_found!("shopping list item {item_id}");
    }

    Ok(())
}

pub(super) async fn load(
    conn: &mut SqliteConnection,
    list_id: &str,
    tenant_id: &str,
) -> homeplan_shared::Result<ShoppingList> {
    match crate::query::fetch(conn, list_id, tenant_id).await? {
        Some(list) => Ok(list),
        None => homeplan_shared::not_found!("shopping list {list_id}"),
    }
}
