mod command;
mod query;
mod value_object;

pub use command::*;
pub use query::*;
pub use value_object::*;
