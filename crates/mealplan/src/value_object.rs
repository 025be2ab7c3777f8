use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    Display,
    VariantArray,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    #[default]
    Dinner,
    Snack,
}

/// Where a plan came from. Stored inside `meal_plan.metadata`.
#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanSource {
    #[default]
    Manual,
    Generated {
        generator: String,
    },
    Imported {
        origin: String,
    },
}

#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MealPlanMetadata {
    #[serde(default)]
    pub source: PlanSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
