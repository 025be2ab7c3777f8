use futures::future::join_all;
use homeplan_shopping::{Consolidation, ShoppingListStatus};
use temp_dir::TempDir;

mod helpers;

use helpers::{Fixture, Line, TENANT, line};

#[tokio::test]
async fn test_scenario_same_unit_across_recipes() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let fixture = Fixture::new(helpers::setup_test_state(dir.child("db.sqlite3")).await?);

    let rice = fixture.ingredient("Rice", "Pantry").await?;
    let stir_fry = fixture
        .recipe("Stir Fry", 4, vec![line(&rice, 2.0, "cup")])
        .await?;
    let soup = fixture
        .recipe("Soup", 2, vec![line(&rice, 1.0, "cup")])
        .await?;
    let plan = fixture.plan(&[(stir_fry.as_str(), 6), (soup.as_str(), 4)]).await?;

    let list = fixture.shopping().generate(&plan, TENANT).await?;

    assert_eq!(list.status, ShoppingListStatus::Active);
    assert_eq!(list.meal_plan_id.as_deref(), Some(plan.as_str()));
    assert_eq!(list.household_id, helpers::HOUSEHOLD);
    assert_eq!(list.items.len(), 1);

    let item = &list.items[0];
    assert_eq!(item.name, "Rice");
    assert_eq!(item.quantity, 5.0);
    assert_eq!(item.unit_id.as_deref(), Some("cup"));
    assert_eq!(item.unit_symbol.as_deref(), Some("cup"));
    assert_eq!(item.store_section, "Pantry");
    assert_eq!(item.ingredient_category.as_deref(), Some("Pantry"));
    assert!(item.notes.contains("Stir Fry"));
    assert!(item.notes.contains("Soup"));
    assert!(!item.purchased);
    assert_eq!(item.consolidation, Consolidation::Consolidated);

    let stored = fixture.query().find(&list.id, TENANT).await?.unwrap();
    assert_eq!(stored.items.len(), 1);
    assert_eq!(stored.items[0].quantity, 5.0);

    Ok(())
}

#[tokio::test]
async fn test_scenario_missing_plan() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let fixture = Fixture::new(helpers::setup_test_state(dir.child("db.sqlite3")).await?);

    let err = fixture
        .shopping()
        .generate("01JMISSINGPLAN", TENANT)
        .await
        .unwrap_err();

    assert!(matches!(err, homeplan_shared::Error::NotFound(_)));
    assert_eq!(err.to_string(), "meal plan 01JMISSINGPLAN not found");
    assert_eq!(fixture.count("shopping_list").await?, 0);
    assert_eq!(fixture.count("shopping_list_item").await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_plan_of_other_tenant_is_not_found() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let fixture = Fixture::new(helpers::setup_test_state(dir.child("db.sqlite3")).await?);

    let rice = fixture.ingredient("Rice", "Pantry").await?;
    let soup = fixture
        .recipe("Soup", 2, vec![line(&rice, 1.0, "cup")])
        .await?;
    let plan = fixture.plan(&[(soup.as_str(), 2)]).await?;

    let err = fixture
        .shopping()
        .generate(&plan, "tenant-b")
        .await
        .unwrap_err();

    assert!(matches!(err, homeplan_shared::Error::NotFound(_)));
    assert_eq!(fixture.count("shopping_list").await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_mixed_units_consolidate() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let fixture = Fixture::new(helpers::setup_test_state(dir.child("db.sqlite3")).await?);

    let milk = fixture.ingredient("Milk", "Dairy").await?;
    let pancakes = fixture
        .recipe("Pancakes", 2, vec![line(&milk, 1.0, "cup")])
        .await?;
    let sauce = fixture
        .recipe("Sauce", 2, vec![line(&milk, 2.0, "tbsp")])
        .await?;
    let plan = fixture.plan(&[(pancakes.as_str(), 2), (sauce.as_str(), 2)]).await?;

    let list = fixture.shopping().generate(&plan, TENANT).await?;

    assert_eq!(list.items.len(), 1);
    let item = &list.items[0];
    assert_eq!(item.unit_id.as_deref(), Some("cup"));
    assert_eq!(item.quantity, 1.5);
    assert_eq!(item.store_section, "Dairy");
    assert_eq!(item.notes, "Pancakes, Sauce");
    assert_eq!(item.consolidation, Consolidation::Consolidated);

    Ok(())
}

async fn factor(fixture: &Fixture, unit_id: &str) -> anyhow::Result<f64> {
    let (factor,): (Option<f64>,) = sqlx::query_as("SELECT factor FROM unit WHERE id = ?")
        .bind(unit_id)
        .fetch_one(&fixture.state.write_db)
        .await?;

    Ok(factor.unwrap_or(1.0))
}

#[tokio::test]
async fn test_mixed_units_never_under_provision() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let fixture = Fixture::new(helpers::setup_test_state(dir.child("db.sqlite3")).await?);

    let milk = fixture.ingredient("Milk", "Dairy").await?;
    let pancakes = fixture
        .recipe("Pancakes", 2, vec![line(&milk, 1.0, "cup")])
        .await?;
    let sauce = fixture
        .recipe("Sauce", 2, vec![line(&milk, 3.0, "tbsp")])
        .await?;
    let plan = fixture.plan(&[(pancakes.as_str(), 3), (sauce.as_str(), 2)]).await?;

    let list = fixture.shopping().generate(&plan, TENANT).await?;
    assert_eq!(list.items.len(), 1);

    // 1.5 cup + 3 tbsp is about 399 ml, shown as 0.4 l.
    let item = &list.items[0];
    assert_eq!(item.consolidation, Consolidation::Consolidated);
    assert_eq!(item.unit_id.as_deref(), Some("l"));
    assert_eq!(item.quantity, 0.4);

    let required_ml =
        1.5 * factor(&fixture, "cup").await? + 3.0 * factor(&fixture, "tbsp").await?;
    let unit_id = item.unit_id.as_deref().unwrap();
    let provided_ml = item.quantity * factor(&fixture, unit_id).await?;
    assert!(provided_ml >= required_ml - 1e-9);

    Ok(())
}

#[tokio::test]
async fn test_tenant_base_unit_keeps_volume_merging() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let fixture = Fixture::new(helpers::setup_test_state(dir.child("db.sqlite3")).await?);

    sqlx::query(
        "INSERT INTO unit (id, tenant_id, name, symbol, category, base_unit_id, factor)
         VALUES ('drop', 'tenant-a', 'a drop', 'drop', 'volume', NULL, NULL),
                ('dash', 'tenant-a', 'dash', 'dash', 'volume', 'drop', 8.0)",
    )
    .execute(&fixture.state.write_db)
    .await?;

    let milk = fixture.ingredient("Milk", "Dairy").await?;
    let pancakes = fixture
        .recipe("Pancakes", 2, vec![line(&milk, 1.0, "cup")])
        .await?;
    let sauce = fixture
        .recipe(
            "Sauce",
            2,
            vec![line(&milk, 2.0, "tbsp"), line(&milk, 1.0, "dash")],
        )
        .await?;
    let plan = fixture.plan(&[(pancakes.as_str(), 2), (sauce.as_str(), 2)]).await?;

    let list = fixture.shopping().generate(&plan, TENANT).await?;
    assert_eq!(list.items.len(), 2);

    let merged = list
        .items
        .iter()
        .find(|i| i.consolidation == Consolidation::Consolidated)
        .unwrap();
    assert_eq!(merged.unit_id.as_deref(), Some("cup"));
    assert_eq!(merged.quantity, 1.5);
    assert_eq!(merged.notes, "Pancakes, Sauce");

    let dash = list
        .items
        .iter()
        .find(|i| i.consolidation == Consolidation::UnconsolidatedFallback)
        .unwrap();
    assert_eq!(dash.unit_id.as_deref(), Some("dash"));
    assert_eq!(dash.quantity, 1.0);
    assert_eq!(dash.notes, "Sauce");

    let other = fixture.shopping().generate(&plan, "tenant-b").await;
    assert!(other.is_err());

    Ok(())
}

#[tokio::test]
async fn test_names_sort_case_insensitively() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let fixture = Fixture::new(helpers::setup_test_state(dir.child("db.sqlite3")).await?);

    let zucchini = fixture.ingredient("Zucchini", "Produce").await?;
    let apple = fixture.ingredient("apple", "Produce").await?;
    let banana = fixture.ingredient("Banana", "Produce").await?;
    let salad = fixture
        .recipe(
            "Salad",
            1,
            vec![
                line(&zucchini, 1.0, "pc"),
                line(&apple, 2.0, "pc"),
                line(&banana, 3.0, "pc"),
            ],
        )
        .await?;
    let plan = fixture.plan(&[(salad.as_str(), 1)]).await?;

    let list = fixture.shopping().generate(&plan, TENANT).await?;
    let names: Vec<_> = list.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["apple", "Banana", "Zucchini"]);

    let found = fixture.query().find(&list.id, TENANT).await?.unwrap();
    let names: Vec<_> = found.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["apple", "Banana", "Zucchini"]);

    Ok(())
}

#[tokio::test]
async fn test_unconvertible_unit_degrades() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let fixture = Fixture::new(helpers::setup_test_state(dir.child("db.sqlite3")).await?);

    sqlx::query(
        "INSERT INTO unit (id, tenant_id, name, symbol, category, base_unit_id, factor)
         VALUES ('pinch', 'tenant-a', 'pinch', 'pinch', 'volume', 'ml', NULL)",
    )
    .execute(&fixture.state.write_db)
    .await?;

    let salt = fixture.ingredient("Salt", "Spices").await?;
    let soup = fixture
        .recipe("Soup", 2, vec![line(&salt, 1.0, "tsp")])
        .await?;
    let stew = fixture
        .recipe("Stew", 2, vec![line(&salt, 2.0, "pinch")])
        .await?;
    let plan = fixture.plan(&[(soup.as_str(), 2), (stew.as_str(), 2)]).await?;

    let list = fixture.shopping().generate(&plan, TENANT).await?;

    assert_eq!(list.items.len(), 2);

    let tsp = list
        .items
        .iter()
        .find(|i| i.unit_id.as_deref() == Some("tsp"))
        .unwrap();
    assert_eq!(tsp.quantity, 1.0);
    assert_eq!(tsp.consolidation, Consolidation::Consolidated);

    let pinch = list
        .items
        .iter()
        .find(|i| i.unit_id.as_deref() == Some("pinch"))
        .unwrap();
    assert_eq!(pinch.quantity, 2.0);
    assert_eq!(pinch.notes, "Stew");
    assert_eq!(pinch.consolidation, Consolidation::UnconsolidatedFallback);

    Ok(())
}

#[tokio::test]
async fn test_rounding_never_under_provisions() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let fixture = Fixture::new(helpers::setup_test_state(dir.child("db.sqlite3")).await?);

    let onion = fixture.ingredient("Onion", "").await?;
    let flour = fixture.ingredient("Flour", "Baking goods").await?;
    let oil = fixture.ingredient("Olive oil", "Pantry").await?;
    let curry = fixture
        .recipe(
            "Curry",
            3,
            vec![
                line(&onion, 1.0, "pc"),
                line(&flour, 350.0, "g"),
                line(&oil, 0.3, "tbsp"),
            ],
        )
        .await?;
    let plan = fixture.plan(&[(curry.as_str(), 4)]).await?;

    let list = fixture.shopping().generate(&plan, TENANT).await?;
    assert_eq!(list.items.len(), 3);

    let find = |name: &str| list.items.iter().find(|i| i.name == name).unwrap();

    let onion = find("Onion");
    assert_eq!(onion.quantity, 1.5);
    assert!(onion.quantity >= 4.0 / 3.0);
    assert_eq!(onion.store_section, "Produce");

    let flour = find("Flour");
    assert_eq!(flour.quantity, 467.0);
    assert!(flour.quantity >= 350.0 * 4.0 / 3.0);
    assert_eq!(flour.store_section, "Other");

    let oil = find("Olive oil");
    assert_eq!(oil.quantity, 0.4);
    assert!(oil.quantity >= 0.3 * 4.0 / 3.0);

    let sections: Vec<_> = list.items.iter().map(|i| i.store_section_order).collect();
    let mut sorted = sections.clone();
    sorted.sort();
    assert_eq!(sections, sorted);

    Ok(())
}

#[tokio::test]
async fn test_optional_ingredients_skipped() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let fixture = Fixture::new(helpers::setup_test_state(dir.child("db.sqlite3")).await?);

    let rice = fixture.ingredient("Rice", "Pantry").await?;
    let parsley = fixture.ingredient("Parsley", "Produce").await?;
    let soup = fixture
        .recipe(
            "Soup",
            2,
            vec![
                line(&rice, 1.0, "cup"),
                Line {
                    ingredient_id: &parsley,
                    quantity: 1.0,
                    unit_id: Some("tbsp"),
                    optional: true,
                },
            ],
        )
        .await?;
    let plan = fixture.plan(&[(soup.as_str(), 2)]).await?;

    let list = fixture.shopping().generate(&plan, TENANT).await?;

    assert_eq!(list.items.len(), 1);
    assert_eq!(list.items[0].name, "Rice");

    Ok(())
}

#[tokio::test]
async fn test_failed_item_insert_rolls_back() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let fixture = Fixture::new(helpers::setup_test_state(dir.child("db.sqlite3")).await?);

    let rice = fixture.ingredient("Rice", "Pantry").await?;
    let soup = fixture
        .recipe("Soup", 2, vec![line(&rice, 1.0, "cup")])
        .await?;
    let plan = fixture.plan(&[(soup.as_str(), 2)]).await?;

    sqlx::query("DROP TABLE shopping_list_item")
        .execute(&fixture.state.write_db)
        .await?;

    let err = fixture
        .shopping()
        .generate(&plan, TENANT)
        .await
        .unwrap_err();

    assert!(matches!(err, homeplan_shared::Error::Persistence(_)));
    assert_eq!(fixture.count("shopping_list").await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_concurrent_generation_creates_separate_lists() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let fixture = Fixture::new(helpers::setup_test_state(dir.child("db.sqlite3")).await?);

    let rice = fixture.ingredient("Rice", "Pantry").await?;
    let soup = fixture
        .recipe("Soup", 2, vec![line(&rice, 1.0, "cup")])
        .await?;
    let plan = fixture.plan(&[(soup.as_str(), 2)]).await?;

    let cmd = fixture.shopping();
    let results = join_all((0..3).map(|_| cmd.generate(&plan, TENANT))).await;

    let mut ids = Vec::new();
    for result in results {
        let list = result?;
        assert_eq!(list.items.len(), 1);
        ids.push(list.id);
    }

    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
    assert_eq!(fixture.count("shopping_list").await?, 3);
    assert_eq!(fixture.count("shopping_list_item").await?, 3);

    Ok(())
}

#[tokio::test]
async fn test_zero_base_servings_treated_as_one() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let fixture = Fixture::new(helpers::setup_test_state(dir.child("db.sqlite3")).await?);

    let rice = fixture.ingredient("Rice", "Pantry").await?;
    let soup = fixture
        .recipe("Soup", 2, vec![line(&rice, 1.0, "cup")])
        .await?;
    let plan = fixture.plan(&[(soup.as_str(), 3)]).await?;

    sqlx::query("UPDATE recipe SET servings = 0")
        .execute(&fixture.state.write_db)
        .await?;

    let list = fixture.shopping().generate(&plan, TENANT).await?;
    assert_eq!(list.items[0].quantity, 3.0);

    Ok(())
}
