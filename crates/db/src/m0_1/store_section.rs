use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::StoreSection;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(StoreSection::Table)
        .col(
            ColumnDef::new(StoreSection::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(StoreSection::TenantId)
                .string()
                .string_len(26)
                .null(),
        )
        .col(
            ColumnDef::new(StoreSection::Name)
                .string()
                .not_null()
                .string_len(50),
        )
        .col(
            ColumnDef::new(StoreSection::DisplayOrder)
                .integer()
                .not_null()
                .default(0),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(StoreSection::Table).to_owned()
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
