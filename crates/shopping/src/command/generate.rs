use homeplan_db::table::{ShoppingList, ShoppingListItem};
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::{
    AggregatedIngredient, Consolidation, SectionCatalog, SectionResolver, ShoppingListStatus,
    UnitCatalog, aggregate, round_up,
};

/// An aggregated requirement ready to be written as a list item.
#[derive(Debug, Clone, PartialEq)]
struct PlannedItem {
    ingredient_id: String,
    name: String,
    quantity: f64,
    unit_id: Option<String>,
    section: String,
    section_order: i32,
    notes: String,
    consolidation: Consolidation,
}

/// Rounds each requirement, assigns its store section and sorts the result
/// in shopping order.
fn finalize(aggregated: Vec<AggregatedIngredient>, sections: &SectionCatalog) -> Vec<PlannedItem> {
    let resolver = SectionResolver::new(sections);
    let mut items: Vec<PlannedItem> = aggregated
        .into_iter()
        .map(|item| {
            let section = resolver.resolve(&item.category, &item.name);

            PlannedItem {
                quantity: round_up(item.quantity),
                unit_id: item.unit.map(|u| u.id),
                section: section.name,
                section_order: section.display_order,
                notes: item.recipes.join(", "),
                consolidation: item.consolidation,
                ingredient_id: item.ingredient_id,
                name: item.name,
            }
        })
        .collect();

    items.sort_by(|a, b| {
        a.section_order
            .cmp(&b.section_order)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.name.cmp(&b.name))
    });

    items
}

impl super::Command {
    /// Builds a shopping list for a meal plan and stores it with its items in
    /// one transaction.
    ///
    /// Every call creates a new list, even for a plan that already has one.
    #[tracing::instrument(skip(self))]
    pub async fn generate(
        &self,
        meal_plan_id: &str,
        tenant_id: &str,
    ) -> homeplan_shared::Result<crate::ShoppingList> {
        let plan = crate::reader::read(&self.state, meal_plan_id, tenant_id).await?;

        let mut tx = self.write_db.begin().await?;
        let units = UnitCatalog::load(&mut tx, tenant_id).await?;
        let sections = SectionCatalog::load(&mut tx, tenant_id).await?;
        let items = finalize(aggregate(&plan.lines, &units), &sections);

        let id = homeplan_shared::new_id();
        let statement = Query::insert()
            .into_table(ShoppingList::Table)
            .columns([
                ShoppingList::Id,
                ShoppingList::TenantId,
                ShoppingList::HouseholdId,
                ShoppingList::MealPlanId,
                ShoppingList::GeneratedOn,
                ShoppingList::Status,
            ])
            .values_panic([
                id.to_owned().into(),
                tenant_id.into(),
                plan.household_id.into(),
                plan.meal_plan_id.into(),
                homeplan_shared::now().into(),
                ShoppingListStatus::Active.to_string().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        let fallbacks = items
            .iter()
            .filter(|i| i.consolidation == Consolidation::UnconsolidatedFallback)
            .count();

        for (position, item) in items.into_iter().enumerate() {
            let statement = Query::insert()
                .into_table(ShoppingListItem::Table)
                .columns([
                    ShoppingListItem::Id,
                    ShoppingListItem::TenantId,
                    ShoppingListItem::ShoppingListId,
                    ShoppingListItem::IngredientId,
                    ShoppingListItem::Name,
                    ShoppingListItem::Quantity,
                    ShoppingListItem::UnitId,
                    ShoppingListItem::StoreSection,
                    ShoppingListItem::StoreSectionOrder,
                    ShoppingListItem::Purchased,
                    ShoppingListItem::Notes,
                    ShoppingListItem::Consolidation,
                    ShoppingListItem::Position,
                ])
                .values_panic([
                    homeplan_shared::new_id().into(),
                    tenant_id.into(),
                    id.to_owned().into(),
                    item.ingredient_id.into(),
                    item.name.into(),
                    item.quantity.into(),
                    item.unit_id.into(),
                    item.section.into(),
                    item.section_order.into(),
                    false.into(),
                    item.notes.into(),
                    item.consolidation.to_string().into(),
                    (position as i32).into(),
                ])
                .to_owned();

            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        }

        let Some(list) = crate::query::fetch(&mut tx, &id, tenant_id).await? else {
            homeplan_shared::bail!("shopping list {id} missing after insert");
        };

        tx.commit().await?;

        tracing::info!(
            shopping_list_id = %list.id,
            items = list.items.len(),
            fallbacks,
            "shopping list generated"
        );

        Ok(list)
    }
}
