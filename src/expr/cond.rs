use smol_str::SmolStr;

use crate::{
    arg::{Arg, IntoArgs},
    error::Result,
    sqlizer::Sqlizer,
    writer::FormatContext,
};

/// Raw sql with the arguments its placeholders stand for.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    sql: SmolStr,
    args: Vec<Arg>,
}

impl Condition {
    pub fn new<S, A>(sql: S, args: A) -> Self
    where
        S: Into<SmolStr>,
        A: IntoArgs,
    {
        Self {
            sql: sql.into(),
            args: args.into_args(),
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }
}

impl Sqlizer for Condition {
    fn to_sql_fast(&self, context: &mut FormatContext<'_>) -> Result<()> {
        context.write_str(&self.sql)?;
        context.extend_args(&self.args);
        Ok(())
    }
}
