mod create;

pub use create::{CreateInput, ItemInput};

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
