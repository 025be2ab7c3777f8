use sea_query::{DeleteStatement, Expr, ExprTrait, InsertStatement, Query};

use crate::table::{StoreSection, Unit};

/// Shared units, visible to every tenant. `None` base means the unit is the
/// base of its category.
const UNITS: &[(&str, &str, &str, &str, Option<&str>, Option<f64>)] = &[
    ("ml", "milliliter", "ml", "volume", None, None),
    ("l", "liter", "l", "volume", Some("ml"), Some(1000.0)),
    ("tsp", "teaspoon", "tsp", "volume", Some("ml"), Some(4.928_92)),
    ("tbsp", "tablespoon", "tbsp", "volume", Some("ml"), Some(14.786_8)),
    ("floz", "fluid ounce", "fl oz", "volume", Some("ml"), Some(29.573_5)),
    ("cup", "cup", "cup", "volume", Some("ml"), Some(236.588)),
    ("g", "gram", "g", "mass", None, None),
    ("kg", "kilogram", "kg", "mass", Some("g"), Some(1000.0)),
    ("oz", "ounce", "oz", "mass", Some("g"), Some(28.349_5)),
    ("lb", "pound", "lb", "mass", Some("g"), Some(453.592)),
    ("pc", "piece", "pc", "count", None, None),
    ("dozen", "dozen", "dz", "count", Some("pc"), Some(12.0)),
];

const SECTIONS: &[(&str, &str, i32)] = &[
    ("produce", "Produce", 10),
    ("bakery", "Bakery", 20),
    ("meat", "Meat", 30),
    ("seafood", "Seafood", 40),
    ("dairy", "Dairy", 50),
    ("frozen", "Frozen", 60),
    ("pantry", "Pantry", 70),
    ("spices", "Spices", 80),
    ("beverages", "Beverages", 90),
    ("other", "Other", 1000),
];

pub struct Seed;

fn insert_units() -> InsertStatement {
    let mut statement = Query::insert()
        .into_table(Unit::Table)
        .columns([
            Unit::Id,
            Unit::TenantId,
            Unit::Name,
            Unit::Symbol,
            Unit::Category,
            Unit::BaseUnitId,
            Unit::Factor,
        ])
        .to_owned();

    for (id, name, symbol, category, base, factor) in UNITS {
        statement.values_panic([
            (*id).into(),
            Option::<String>::None.into(),
            (*name).into(),
            (*symbol).into(),
            (*category).into(),
            base.map(|b| b.to_owned()).into(),
            (*factor).into(),
        ]);
    }

    statement
}

fn insert_sections() -> InsertStatement {
    let mut statement = Query::insert()
        .into_table(StoreSection::Table)
        .columns([
            StoreSection::Id,
            StoreSection::TenantId,
            StoreSection::Name,
            StoreSection::DisplayOrder,
        ])
        .to_owned();

    for (id, name, order) in SECTIONS {
        statement.values_panic([
            (*id).into(),
            Option::<String>::None.into(),
            (*name).into(),
            (*order).into(),
        ]);
    }

    statement
}

fn delete_units() -> DeleteStatement {
    Query::delete()
        .from_table(Unit::Table)
        .and_where(Expr::col(Unit::TenantId).is_null())
        .to_owned()
}

fn delete_sections() -> DeleteStatement {
    Query::delete()
        .from_table(StoreSection::Table)
        .and_where(Expr::col(StoreSection::TenantId).is_null())
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for Seed {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = insert_units().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(&mut *connection).await?;

        let statement = insert_sections().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(&mut *connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = delete_sections().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(&mut *connection).await?;

        let statement = delete_units().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(&mut *connection).await?;

        Ok(())
    }
}
