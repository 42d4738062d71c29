use smol_str::SmolStr;

use crate::{
    arg::{Arg, IntoArgs},
    error::{Error, Result},
    expr::Condition,
    placeholder::{PlaceholderFormat, placeholders},
    select::Select,
    sqlizer::{Sqlizer, render},
    value::{IntoValues, Value},
    writer::FormatContext,
};

/// An `INSERT INTO` statement, fed either with rows of values or with a
/// `SELECT`.
#[derive(Debug, Default, Clone)]
pub struct Insert {
    table: SmolStr,
    fields: Vec<Value>,
    values: Vec<Arg>,
    select: Option<Select>,
    returning: Vec<Value>,
    suffix: Option<Condition>,
    placeholder: PlaceholderFormat,
}

impl Insert {
    pub fn new<T>(table: T) -> Self
    where
        T: Into<SmolStr>,
    {
        Self {
            table: table.into(),
            ..Default::default()
        }
    }

    pub fn table<T>(&mut self, table: T) -> &mut Self
    where
        T: Into<SmolStr>,
    {
        self.table = table.into();
        self
    }

    /// Replaces the fields.
    pub fn fields<V>(&mut self, fields: V) -> &mut Self
    where
        V: IntoValues,
    {
        self.fields = fields.into_values();
        self
    }

    pub fn add_fields<V>(&mut self, fields: V) -> &mut Self
    where
        V: IntoValues,
    {
        self.fields.extend(fields.into_values());
        self
    }

    /// Appends values, one or more rows at once.
    ///
    /// The total must be a multiple of the field count, which is only
    /// checked when rendering.
    pub fn values<A>(&mut self, values: A) -> &mut Self
    where
        A: IntoArgs,
    {
        self.values.extend(values.into_args());
        self
    }

    /// Inserts the result of a `SELECT`. Values are ignored once set.
    pub fn select<F>(&mut self, select: F) -> &mut Self
    where
        F: FnOnce(&mut Select),
    {
        let mut statement = Select::default();
        select(&mut statement);
        self.select = Some(statement);
        self
    }

    pub fn returning<V>(&mut self, fields: V) -> &mut Self
    where
        V: IntoValues,
    {
        self.returning = fields.into_values();
        self
    }

    /// Raw sql appended at the end, like `ON CONFLICT DO NOTHING`.
    pub fn suffix<S, A>(&mut self, sql: S, args: A) -> &mut Self
    where
        S: Into<SmolStr>,
        A: IntoArgs,
    {
        let suffix = Condition::new(sql, args);
        self.suffix = if suffix.sql().is_empty() { None } else { Some(suffix) };
        self
    }

    pub fn placeholder(&mut self, format: PlaceholderFormat) -> &mut Self {
        self.placeholder = format;
        self
    }

    pub fn to_sql(&self) -> Result<(String, Vec<Arg>)> {
        Sqlizer::to_sql(self)
    }

    fn row_count(&self) -> Result<usize> {
        let fields = self.fields.len();
        let values = self.values.len();
        if fields == 0 || values == 0 || values % fields != 0 {
            return Err(Error::MismatchFieldsAndValuesCount { fields, values });
        }
        Ok(values / fields)
    }
}

impl Sqlizer for Insert {
    fn to_sql_fast(&self, context: &mut FormatContext<'_>) -> Result<()> {
        let rows = match self.select {
            Some(_) => 0,
            None => self.row_count()?,
        };

        context.write_str("INSERT INTO ")?;
        context.write_str(&self.table)?;
        context.write_str(" (")?;
        context.write_sql_list(&self.fields, ", ")?;
        context.write_str(")")?;

        match &self.select {
            Some(select) => {
                context.write_str(" ")?;
                select.to_sql_fast(context)?;
            }
            None => {
                let row = placeholders(self.fields.len());
                context.write_str(" VALUES ")?;
                for index in 0..rows {
                    if index > 0 {
                        context.write_str(", ")?;
                    }
                    context.write_str("(")?;
                    context.write_str(&row)?;
                    context.write_str(")")?;
                }
                context.extend_args(&self.values);
            }
        }

        if !self.returning.is_empty() {
            context.write_str(" RETURNING ")?;
            context.write_sql_list(&self.returning, ", ")?;
        }

        if let Some(suffix) = &self.suffix {
            context.write_str(" ")?;
            suffix.to_sql_fast(context)?;
        }

        Ok(())
    }

    fn to_sql(&self) -> Result<(String, Vec<Arg>)> {
        render(self, "insert", self.placeholder)
    }
}
