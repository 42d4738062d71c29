//! Fragments for testing code built on top of the crate. Enabled with the
//! `testing` feature.

use std::{fmt, sync::Arc};

use smol_str::SmolStr;

use crate::{
    arg::{Arg, IntoArgs},
    error::{Error, Result},
    sqlizer::Sqlizer,
    value::{IntoValue, Value},
    writer::FormatContext,
};

/// Writes fixed sql and arguments, or fails with a fixed message.
#[derive(Debug, Clone)]
pub struct MockSqlizer {
    sql: SmolStr,
    args: Vec<Arg>,
    error: Option<String>,
}

impl MockSqlizer {
    pub fn new<S, A>(sql: S, args: A) -> Self
    where
        S: Into<SmolStr>,
        A: IntoArgs,
    {
        Self {
            sql: sql.into(),
            args: args.into_args(),
            error: None,
        }
    }

    /// Makes every render fail with `message`, writing nothing.
    pub fn fail<M>(mut self, message: M) -> Self
    where
        M: Into<String>,
    {
        self.error = Some(message.into());
        self
    }
}

impl Sqlizer for MockSqlizer {
    fn to_sql_fast(&self, context: &mut FormatContext<'_>) -> Result<()> {
        if let Some(message) = &self.error {
            return Err(Error::custom(message.as_str()));
        }
        context.write_str(&self.sql)?;
        context.extend_args(&self.args);
        Ok(())
    }
}

/// Displays a fixed string.
#[derive(Debug, Clone)]
pub struct MockStringer(pub String);

impl MockStringer {
    pub fn new<S>(value: S) -> Self
    where
        S: Into<String>,
    {
        Self(value.into())
    }
}

impl fmt::Display for MockStringer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl IntoValue for MockStringer {
    fn into_value(self) -> Value {
        Value::Stringer(Arc::new(self))
    }
}
