use sea_query::{
    ColumnDef, Index, IndexCreateStatement, IndexDropStatement, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::table::Unit;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Unit::Table)
        .col(
            ColumnDef::new(Unit::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(ColumnDef::new(Unit::TenantId).string().string_len(26).null())
        .col(ColumnDef::new(Unit::Name).string().not_null().string_len(50))
        .col(ColumnDef::new(Unit::Symbol).string().not_null().string_len(15))
        .col(
            ColumnDef::new(Unit::Category)
                .string()
                .not_null()
                .string_len(25),
        )
        .col(
            ColumnDef::new(Unit::BaseUnitId)
                .string()
                .string_len(26)
                .null(),
        )
        .col(ColumnDef::new(Unit::Factor).double().null())
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Unit::Table).to_owned()
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
        .name("idx_unit_category_tenant")
        .table(Unit::Table)
        .col(Unit::Category)
        .col(Unit::TenantId)
        .to_owned()
}

fn drop_idx_1() -> IndexDropStatement {
    Index::drop()
        .name("idx_unit_category_tenant")
        .table(Unit::Table)
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
