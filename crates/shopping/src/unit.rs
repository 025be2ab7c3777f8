use std::collections::HashMap;

use homeplan_db::table::Unit;
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqliteConnection, prelude::FromRow};

#[derive(Debug, Default, Clone, PartialEq, FromRow)]
pub struct UnitRow {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub category: String,
    pub base_unit_id: Option<String>,
    pub factor: Option<f64>,
}

impl UnitRow {
    pub fn is_base(&self) -> bool {
        self.base_unit_id.is_none()
    }

    /// Id of the unit this one is expressed in, itself for a base unit.
    pub fn base_id(&self) -> &str {
        self.base_unit_id.as_deref().unwrap_or(&self.id)
    }

    /// Multiplier from this unit to its base unit.
    pub fn factor_to_base(&self) -> Option<f64> {
        if self.is_base() {
            return Some(1.0);
        }

        self.factor.filter(|f| f.is_finite() && *f > 0.0)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error("unit {0} is not in the catalog")]
    UnknownUnit(String),

    #[error("unit {0} has no conversion factor")]
    MissingFactor(String),

    #[error("cannot convert {from} ({from_category}) to {to} ({to_category})")]
    CategoryMismatch {
        from: String,
        from_category: String,
        to: String,
        to_category: String,
    },

    #[error("units {from} and {to} do not share a base unit")]
    NoSharedBase { from: String, to: String },
}

/// Converts `quantity` expressed in `from` into `to`.
pub fn convert(quantity: f64, from: &UnitRow, to: &UnitRow) -> Result<f64, ConversionError> {
    if from.id == to.id {
        return Ok(quantity);
    }

    if from.category != to.category {
        return Err(ConversionError::CategoryMismatch {
            from: from.id.to_owned(),
            from_category: from.category.to_owned(),
            to: to.id.to_owned(),
            to_category: to.category.to_owned(),
        });
    }

    if from.base_id() != to.base_id() {
        return Err(ConversionError::NoSharedBase {
            from: from.id.to_owned(),
            to: to.id.to_owned(),
        });
    }

    let from_factor = from
        .factor_to_base()
        .ok_or_else(|| ConversionError::MissingFactor(from.id.to_owned()))?;
    let to_factor = to
        .factor_to_base()
        .ok_or_else(|| ConversionError::MissingFactor(to.id.to_owned()))?;

    Ok(quantity * from_factor / to_factor)
}

/// Units visible to a tenant: its own plus the shared ones, in catalog order
/// (name, then id).
#[derive(Debug, Default, Clone)]
pub struct UnitCatalog {
    units: Vec<UnitRow>,
    by_id: HashMap<String, usize>,
}

impl UnitCatalog {
    pub fn new(units: Vec<UnitRow>) -> Self {
        let by_id = units
            .iter()
            .enumerate()
            .map(|(idx, unit)| (unit.id.to_owned(), idx))
            .collect();

        Self { units, by_id }
    }

    pub async fn load(conn: &mut SqliteConnection, tenant_id: &str) -> anyhow::Result<Self> {
        let statement = Query::select()
            .columns([
                Unit::Id,
                Unit::Name,
                Unit::Symbol,
                Unit::Category,
                Unit::BaseUnitId,
                Unit::Factor,
            ])
            .from(Unit::Table)
            .and_where(
                Expr::col(Unit::TenantId)
                    .eq(tenant_id)
                    .or(Expr::col(Unit::TenantId).is_null()),
            )
            .order_by(Unit::Name, Order::Asc)
            .order_by(Unit::Id, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let units = sqlx::query_as_with::<_, UnitRow, _>(&sql, values)
            .fetch_all(&mut *conn)
            .await?;

        Ok(Self::new(units))
    }

    pub fn get(&self, id: &str) -> Option<&UnitRow> {
        self.by_id.get(id).map(|idx| &self.units[*idx])
    }

    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a UnitRow> {
        self.units.iter().filter(move |u| u.category == category)
    }

    /// First base unit of a category in catalog order. A tenant may add more
    /// than one base to a category; conversions use [`UnitCatalog::base_for`].
    pub fn base_of<'a>(&'a self, category: &'a str) -> Option<&'a UnitRow> {
        self.by_category(category).find(|u| u.is_base())
    }

    /// Base unit `unit` is expressed in.
    pub fn base_for(&self, unit: &UnitRow) -> Result<&UnitRow, ConversionError> {
        self.get(unit.base_id())
            .ok_or_else(|| ConversionError::UnknownUnit(unit.base_id().to_owned()))
    }

    /// Units sharing `base`, the base itself included, in catalog order.
    pub fn on_base<'a>(&'a self, base: &'a UnitRow) -> impl Iterator<Item = &'a UnitRow> {
        self.by_category(&base.category)
            .filter(move |u| u.base_id() == base.id)
    }

    /// Converts a quantity to the base unit of its own unit.
    pub fn to_base(&self, quantity: f64, unit_id: &str) -> Result<(f64, &UnitRow), ConversionError> {
        let unit = self
            .get(unit_id)
            .ok_or_else(|| ConversionError::UnknownUnit(unit_id.to_owned()))?;
        let base = self.base_for(unit)?;

        Ok((convert(quantity, unit, base)?, base))
    }
}
