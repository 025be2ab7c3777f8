mod recipe;

pub use recipe::*;

use std::ops::Deref;

#[derive(Clone)]
pub struct Query(pub homeplan_shared::State);

impl Deref for Query {
    type Target = homeplan_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
