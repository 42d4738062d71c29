use std::sync::Arc;

use smol_str::SmolStr;

use crate::{
    arg::{Arg, IntoArgs},
    error::Result,
    expr::Condition,
    placeholder::PlaceholderFormat,
    sqlizer::{Sqlizer, render},
    table::{IntoTable, TableRef},
    value::{IntoValues, Value},
    writer::FormatContext,
};

/// A `DELETE FROM` statement.
#[derive(Debug, Default, Clone)]
pub struct Delete {
    cascade: bool,
    table: TableRef,
    criteria: Vec<Value>,
    suffix: Option<SmolStr>,
    placeholder: PlaceholderFormat,
}

impl Delete {
    pub fn new<T>(table: T) -> Self
    where
        T: IntoTable,
    {
        Self {
            table: table.into_table(),
            ..Default::default()
        }
    }

    pub fn cascade(&mut self) -> &mut Self {
        self.cascade = true;
        self
    }

    pub fn from<T>(&mut self, table: T) -> &mut Self
    where
        T: IntoTable,
    {
        self.table = table.into_table();
        self
    }

    pub fn where_raw<S, A>(&mut self, sql: S, args: A) -> &mut Self
    where
        S: Into<SmolStr>,
        A: IntoArgs,
    {
        self.criteria
            .push(Value::Sqlizer(Arc::new(Condition::new(sql, args))));
        self
    }

    pub fn where_criteria<V>(&mut self, criteria: V) -> &mut Self
    where
        V: IntoValues,
    {
        self.criteria.extend(criteria.into_values());
        self
    }

    /// Raw sql appended at the end, like `RETURNING *`.
    pub fn suffix<S>(&mut self, suffix: S) -> &mut Self
    where
        S: Into<SmolStr>,
    {
        let suffix = suffix.into();
        self.suffix = if suffix.is_empty() { None } else { Some(suffix) };
        self
    }

    pub fn placeholder(&mut self, format: PlaceholderFormat) -> &mut Self {
        self.placeholder = format;
        self
    }

    pub fn to_sql(&self) -> Result<(String, Vec<Arg>)> {
        Sqlizer::to_sql(self)
    }
}

impl Sqlizer for Delete {
    fn to_sql_fast(&self, context: &mut FormatContext<'_>) -> Result<()> {
        if self.cascade {
            context.write_str("DELETE CASCADE FROM ")?;
        } else {
            context.write_str("DELETE FROM ")?;
        }
        self.table.write(context)?;

        if !self.criteria.is_empty() {
            context.write_str(" WHERE ")?;
            context.write_criteria(&self.criteria)?;
        }

        if let Some(suffix) = &self.suffix {
            context.write_str(" ")?;
            context.write_str(suffix)?;
        }
        Ok(())
    }

    fn to_sql(&self) -> Result<(String, Vec<Arg>)> {
        render(self, "delete", self.placeholder)
    }
}
