use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, IndexDropStatement,
    Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{ShoppingList, ShoppingListItem};

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(ShoppingListItem::Table)
        .col(
            ColumnDef::new(ShoppingListItem::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(ShoppingListItem::TenantId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(ShoppingListItem::ShoppingListId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(ShoppingListItem::IngredientId)
                .string()
                .string_len(26)
                .null(),
        )
        .col(
            ColumnDef::new(ShoppingListItem::Name)
                .string()
                .not_null()
                .string_len(100),
        )
        .col(
            ColumnDef::new(ShoppingListItem::Quantity)
                .double()
                .not_null(),
        )
        .col(
            ColumnDef::new(ShoppingListItem::UnitId)
                .string()
                .string_len(26)
                .null(),
        )
        .col(
            ColumnDef::new(ShoppingListItem::StoreSection)
                .string()
                .not_null()
                .string_len(50),
        )
        .col(
            ColumnDef::new(ShoppingListItem::StoreSectionOrder)
                .integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(ShoppingListItem::Purchased)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(
            ColumnDef::new(ShoppingListItem::Notes)
                .string()
                .not_null()
                .string_len(2000)
                .default(""),
        )
        .col(
            ColumnDef::new(ShoppingListItem::Consolidation)
                .string()
                .not_null()
                .string_len(25),
        )
        .col(
            ColumnDef::new(ShoppingListItem::Position)
                .integer()
                .not_null()
                .default(0),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_shopping_list_item_shopping_list")
                .from(ShoppingListItem::Table, ShoppingListItem::ShoppingListId)
                .to(ShoppingList::Table, ShoppingList::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(ShoppingListItem::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}

pub struct CreateIdx1;

fn create_idx_1() -> IndexCreateStatement {
    Index::create()
        .name("idx_shopping_list_item_list")
        .table(ShoppingListItem::Table)
        .col(ShoppingListItem::ShoppingListId)
        .to_owned()
}

fn drop_idx_1() -> IndexDropStatement {
    Index::drop()
        .name("idx_shopping_list_item_list")
        .table(ShoppingListItem::Table)
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateIdx1 {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_idx_1().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_idx_1().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
