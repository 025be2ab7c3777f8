mod aggregation;
mod categorization;
mod command;
mod display;
mod query;
mod reader;
mod rounding;
mod section;
mod unit;

pub use aggregation::*;
pub use categorization::*;
pub use command::*;
pub use display::*;
pub use query::*;
pub use reader::*;
pub use rounding::*;
pub use section::*;
pub use unit::*;
