use homeplan_db::table::{
    Ingredient, ShoppingList as ShoppingListTable, ShoppingListItem as ItemTable, Unit,
};
use sea_query::{Alias, Expr, ExprTrait, Func, JoinType, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, prelude::FromRow};
use strum::{AsRefStr, Display, EnumString};

use crate::Consolidation;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display, AsRefStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ShoppingListStatus {
    #[default]
    Active,
    Completed,
}

#[derive(Debug, Default, FromRow)]
struct ShoppingListRow {
    id: String,
    household_id: String,
    meal_plan_id: Option<String>,
    generated_on: u64,
    status: sqlx::types::Text<ShoppingListStatus>,
    completed_at: Option<u64>,
}

#[derive(Debug, Default, FromRow)]
struct ShoppingListItemRow {
    id: String,
    ingredient_id: Option<String>,
    name: String,
    quantity: f64,
    unit_id: Option<String>,
    unit_symbol: Option<String>,
    unit_name: Option<String>,
    ingredient_category: Option<String>,
    store_section: String,
    store_section_order: i32,
    purchased: bool,
    notes: String,
    consolidation: sqlx::types::Text<Consolidation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShoppingListItem {
    pub id: String,
    pub ingredient_id: Option<String>,
    pub name: String,
    pub quantity: f64,
    pub unit_id: Option<String>,
    pub unit_symbol: Option<String>,
    pub unit_name: Option<String>,
    pub ingredient_category: Option<String>,
    pub store_section: String,
    pub store_section_order: i32,
    pub purchased: bool,
    /// Titles of the recipes that need this item.
    pub notes: String,
    pub consolidation: Consolidation,
}

impl From<ShoppingListItemRow> for ShoppingListItem {
    fn from(row: ShoppingListItemRow) -> Self {
        Self {
            id: row.id,
            ingredient_id: row.ingredient_id,
            name: row.name,
            quantity: row.quantity,
            unit_id: row.unit_id,
            unit_symbol: row.unit_symbol,
            unit_name: row.unit_name,
            ingredient_category: row.ingredient_category,
            store_section: row.store_section,
            store_section_order: row.store_section_order,
            purchased: row.purchased,
            notes: row.notes,
            consolidation: row.consolidation.0,
        }
    }
}

/// A shopping list with its items in shopping order: store section, then
/// unpurchased first, then name.
#[derive(Debug, Clone, Serialize)]
pub struct ShoppingList {
    pub id: String,
    pub household_id: String,
    pub meal_plan_id: Option<String>,
    pub generated_on: u64,
    pub status: ShoppingListStatus,
    pub completed_at: Option<u64>,
    pub items: Vec<ShoppingListItem>,
}

impl ShoppingList {
    pub fn item(&self, id: &str) -> Option<&ShoppingListItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

pub(crate) async fn fetch(
    conn: &mut SqliteConnection,
    id: &str,
    tenant_id: &str,
) -> anyhow::Result<Option<ShoppingList>> {
    let statement = sea_query::Query::select()
        .columns([
            ShoppingListTable::Id,
            ShoppingListTable::HouseholdId,
            ShoppingListTable::MealPlanId,
            ShoppingListTable::GeneratedOn,
            ShoppingListTable::Status,
            ShoppingListTable::CompletedAt,
        ])
        .from(ShoppingListTable::Table)
        .and_where(Expr::col(ShoppingListTable::Id).eq(id))
        .and_where(Expr::col(ShoppingListTable::TenantId).eq(tenant_id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let Some(list) = sqlx::query_as_with::<_, ShoppingListRow, _>(&sql, values)
        .fetch_optional(&mut *conn)
        .await?
    else {
        return Ok(None);
    };

    let statement = sea_query::Query::select()
        .columns([
            (ItemTable::Table, ItemTable::Id),
            (ItemTable::Table, ItemTable::IngredientId),
            (ItemTable::Table, ItemTable::Name),
            (ItemTable::Table, ItemTable::Quantity),
            (ItemTable::Table, ItemTable::UnitId),
            (ItemTable::Table, ItemTable::StoreSection),
            (ItemTable::Table, ItemTable::StoreSectionOrder),
            (ItemTable::Table, ItemTable::Purchased),
            (ItemTable::Table, ItemTable::Notes),
            (ItemTable::Table, ItemTable::Consolidation),
        ])
        .expr_as(
            Expr::col((Unit::Table, Unit::Symbol)),
            Alias::new("unit_symbol"),
        )
        .expr_as(Expr::col((Unit::Table, Unit::Name)), Alias::new("unit_name"))
        .expr_as(
            Expr::col((Ingredient::Table, Ingredient::Category)),
            Alias::new("ingredient_category"),
        )
        .from(ItemTable::Table)
        .join(
            JoinType::LeftJoin,
            Unit::Table,
            Expr::col((ItemTable::Table, ItemTable::UnitId)).equals((Unit::Table, Unit::Id)),
        )
        .join(
            JoinType::LeftJoin,
            Ingredient::Table,
            Expr::col((ItemTable::Table, ItemTable::IngredientId))
                .equals((Ingredient::Table, Ingredient::Id)),
        )
        .and_where(Expr::col((ItemTable::Table, ItemTable::ShoppingListId)).eq(id))
        .and_where(Expr::col((ItemTable::Table, ItemTable::TenantId)).eq(tenant_id))
        .order_by((ItemTable::Table, ItemTable::StoreSectionOrder), Order::Asc)
        .order_by((ItemTable::Table, ItemTable::Purchased), Order::Asc)
        .order_by_expr(
            Func::lower(Expr::col((ItemTable::Table, ItemTable::Name))).into(),
            Order::Asc,
        )
        .order_by((ItemTable::Table, ItemTable::Name), Order::Asc)
        .order_by((ItemTable::Table, ItemTable::Position), Order::Asc)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let items = sqlx::query_as_with::<_, ShoppingListItemRow, _>(&sql, values)
        .fetch_all(&mut *conn)
        .await?;

    Ok(Some(ShoppingList {
        id: list.id,
        household_id: list.household_id,
        meal_plan_id: list.meal_plan_id,
        generated_on: list.generated_on,
        status: list.status.0,
        completed_at: list.completed_at,
        items: items.into_iter().map(Into::into).collect(),
    }))
}

impl super::Query {
    pub async fn find(
        &self,
        id: impl Into<String>,
        tenant_id: impl Into<String>,
    ) -> anyhow::Result<Option<ShoppingList>> {
        let mut conn = self.read_db.acquire().await?;

        fetch(&mut conn, &id.into(), &tenant_id.into()).await
    }

    /// Latest active list of a household.
    pub async fn find_active(
        &self,
        household_id: impl Into<String>,
        tenant_id: impl Into<String>,
    ) -> anyhow::Result<Option<ShoppingList>> {
        let tenant_id = tenant_id.into();
        let statement = sea_query::Query::select()
            .column(ShoppingListTable::Id)
            .from(ShoppingListTable::Table)
            .and_where(Expr::col(ShoppingListTable::HouseholdId).eq(household_id.into()))
            .and_where(Expr::col(ShoppingListTable::TenantId).eq(&tenant_id))
            .and_where(
                Expr::col(ShoppingListTable::Status).eq(ShoppingListStatus::Active.to_string()),
            )
            .order_by(ShoppingListTable::GeneratedOn, Order::Desc)
            .order_by(ShoppingListTable::Id, Order::Desc)
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let mut conn = self.read_db.acquire().await?;
        let id = sqlx::query_scalar_with::<_, String, _>(&sql, values)
            .fetch_optional(&mut *conn)
            .await?;

        match id {
            Some(id) => fetch(&mut conn, &id, &tenant_id).await,
            None => Ok(None),
        }
    }
}
