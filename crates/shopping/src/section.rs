use homeplan_db::table::StoreSection;
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqliteConnection, prelude::FromRow};

pub const DEFAULT_SECTION: &str = "Other";

#[derive(Debug, Default, Clone, FromRow)]
pub struct StoreSectionRow {
    pub id: String,
    pub tenant_id: Option<String>,
    pub name: String,
    pub display_order: i32,
}

/// Section name and sort key copied onto a shopping list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSection {
    pub name: String,
    pub display_order: i32,
}

impl From<&StoreSectionRow> for ResolvedSection {
    fn from(value: &StoreSectionRow) -> Self {
        Self {
            name: value.name.to_owned(),
            display_order: value.display_order,
        }
    }
}

/// Sections visible to a tenant, its own before the shared ones.
#[derive(Debug, Default, Clone)]
pub struct SectionCatalog {
    sections: Vec<StoreSectionRow>,
}

impl SectionCatalog {
    pub fn new(sections: Vec<StoreSectionRow>) -> Self {
        Self { sections }
    }

    pub async fn load(conn: &mut SqliteConnection, tenant_id: &str) -> anyhow::Result<Self> {
        let statement = Query::select()
            .columns([
                StoreSection::Id,
                StoreSection::TenantId,
                StoreSection::Name,
                StoreSection::DisplayOrder,
            ])
            .from(StoreSection::Table)
            .and_where(
                Expr::col(StoreSection::TenantId)
                    .eq(tenant_id)
                    .or(Expr::col(StoreSection::TenantId).is_null()),
            )
            .order_by_expr(Expr::col(StoreSection::TenantId).is_null(), Order::Asc)
            .order_by(StoreSection::DisplayOrder, Order::Asc)
            .order_by(StoreSection::Name, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let sections = sqlx::query_as_with::<_, StoreSectionRow, _>(&sql, values)
            .fetch_all(&mut *conn)
            .await?;

        Ok(Self::new(sections))
    }

    pub fn iter(&self) -> impl Iterator<Item = &StoreSectionRow> {
        self.sections.iter()
    }

    /// Case-insensitive exact name lookup.
    pub fn by_name(&self, name: &str) -> Option<&StoreSectionRow> {
        let name = name.trim().to_lowercase();
        self.sections
            .iter()
            .find(|s| s.name.to_lowercase() == name)
    }

    /// The "Other" section, or a synthetic one sorted last if the catalog
    /// lost it.
    pub fn default_section(&self) -> ResolvedSection {
        match self.by_name(DEFAULT_SECTION) {
            Some(section) => section.into(),
            None => {
                tracing::warn!("store section catalog has no {DEFAULT_SECTION} section");

                ResolvedSection {
                    name: DEFAULT_SECTION.to_owned(),
                    display_order: i32::MAX,
                }
            }
        }
    }
}
