mod ingredient;
mod meal_plan;
mod meal_plan_item;
mod recipe;
mod recipe_ingredient;
mod reference_data;
mod shopping_list;
mod shopping_list_item;
mod store_section;
mod unit;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "homeplan",
    "m0_1",
    vec_box![],
    vec_box![
        unit::CreateTable,
        unit::CreateIdx1,
        store_section::CreateTable,
        ingredient::CreateTable,
        recipe::CreateTable,
        recipe_ingredient::CreateTable,
        recipe_ingredient::CreateIdx1,
        meal_plan::CreateTable,
        meal_plan_item::CreateTable,
        meal_plan_item::CreateIdx1,
        shopping_list::CreateTable,
        shopping_list::CreateIdx1,
        shopping_list_item::CreateTable,
        shopping_list_item::CreateIdx1,
        reference_data::Seed
    ]
);
