mod create;
mod delete;
mod ingredient;
mod update;

pub use create::{CreateInput, IngredientInput};
pub use ingredient::CreateIngredientInput;
pub use update::UpdateInput;

use std::ops::Deref;

#[derive(Clone)]
pub struct Command {
    state: homeplan_shared::State,
}

impl Deref for Command {
    type Target = homeplan_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl Command {
    pub fn new(state: homeplan_shared::State) -> Self {
        Self { state }
    }
}
