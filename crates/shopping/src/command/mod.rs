mod generate;
mod item;
mod status;

pub use item::UpdateItemInput;

use std::ops::Deref;

use homeplan_db::table::{ShoppingList, ShoppingListItem};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqliteConnection;

use crate::ShoppingListStatus;

#[derive(Clone)]
pub struct Command {
    state: homeplan_shared::State,
}

impl Deref for Command {
    type Target = homeplan_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl Command {
    pub fn new(state: homeplan_shared::State) -> Self {
        Self { state }
    }
}

async fn find_status(
    conn: &mut SqliteConnection,
    id: &str,
    tenant_id: &str,
) -> homeplan_shared::Result<ShoppingListStatus> {
    let statement = Query::select()
        .column(ShoppingList::Status)
        .from(ShoppingList::Table)
        .and_where(Expr::col(ShoppingList::Id).eq(id))
        .and_where(Expr::col(ShoppingList::TenantId).eq(tenant_id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let status = sqlx::query_scalar_with::<_, sqlx::types::Text<ShoppingListStatus>, _>(
        &sql, values,
    )
    .fetch_optional(&mut *conn)
    .await?;

    match status {
        Some(status) => Ok(status.0),
        None => homeplan_shared::not_found!("shopping list {id}"),
    }
}

/// Moves an active list to completed once nothing is left to buy.
async fn complete_if_done(
    conn: &mut SqliteConnection,
    id: &str,
    tenant_id: &str,
) -> homeplan_shared::Result<bool> {
    let remaining = Query::select()
        .expr(Expr::val(1))
        .from(ShoppingListItem::Table)
        .and_where(Expr::col(ShoppingListItem::ShoppingListId).eq(id))
        .and_where(Expr::col(ShoppingListItem::Purchased).eq(false))
        .to_owned();

    let statement = Query::update()
        .table(ShoppingList::Table)
        .values([
            (
                ShoppingList::Status,
                ShoppingListStatus::Completed.to_string().into(),
            ),
            (ShoppingList::CompletedAt, homeplan_shared::now().into()),
        ])
        .and_where(Expr::col(ShoppingList::Id).eq(id))
        .and_where(Expr::col(ShoppingList::TenantId).eq(tenant_id))
        .and_where(Expr::col(ShoppingList::Status).eq(ShoppingListStatus::Active.to_string()))
        .and_where(Expr::exists(remaining).not())
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    if result.rows_affected() > 0 {
        tracing::info!(shopping_list_id = %id, "every item purchased, list completed");
    }

    Ok(result.rows_affected() > 0)
}
