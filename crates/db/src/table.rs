use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Unit {
    Table,
    Id,
    TenantId,
    Name,
    Symbol,
    Category,
    BaseUnitId,
    Factor,
}

#[derive(Iden, Clone)]
pub enum StoreSection {
    Table,
    Id,
    TenantId,
    Name,
    DisplayOrder,
}

#[derive(Iden, Clone)]
pub enum Ingredient {
    Table,
    Id,
    TenantId,
    Name,
    Category,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Recipe {
    Table,
    Id,
    TenantId,
    HouseholdId,
    Title,
    Servings,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone)]
pub enum RecipeIngredient {
    Table,
    Id,
    TenantId,
    RecipeId,
    IngredientId,
    Quantity,
    UnitId,
    Optional,
    Preparation,
    Position,
}

#[derive(Iden, Clone)]
pub enum MealPlan {
    Table,
    Id,
    TenantId,
    HouseholdId,
    StartDate,
    EndDate,
    Metadata,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum MealPlanItem {
    Table,
    Id,
    TenantId,
    MealPlanId,
    RecipeId,
    PlannedOn,
    MealSlot,
    Servings,
    Position,
}

#[derive(Iden, Clone)]
pub enum ShoppingList {
    Table,
    Id,
    TenantId,
    HouseholdId,
    MealPlanId,
    GeneratedOn,
    Status,
    CompletedAt,
}

#[derive(Iden, Clone)]
pub enum ShoppingListItem {
    Table,
    Id,
    TenantId,
    ShoppingListId,
    IngredientId,
    Name,
    Quantity,
    UnitId,
    StoreSection,
    StoreSectionOrder,
    Purchased,
    Notes,
    Consolidation,
    Position,
}
