mod cond;
mod operator;

pub use cond::Condition;
pub use operator::{Conjunction, Group};
