use std::sync::Arc;

use smol_str::SmolStr;

use crate::{
    arg::{Arg, IntoArgs},
    error::{Error, Result},
    expr::Condition,
    placeholder::PlaceholderFormat,
    sqlizer::{Sqlizer, render},
    table::{IntoTable, TableRef},
    value::{IntoValue, IntoValues, Value},
    writer::FormatContext,
};

/// An `UPDATE` statement.
#[derive(Debug, Default, Clone)]
pub struct Update {
    table: TableRef,
    // field, value, field, value...
    assignments: Vec<Value>,
    criteria: Vec<Value>,
    placeholder: PlaceholderFormat,
}

impl Update {
    pub fn new<T>(table: T) -> Self
    where
        T: IntoTable,
    {
        Self {
            table: table.into_table(),
            ..Default::default()
        }
    }

    pub fn table<T>(&mut self, table: T) -> &mut Self
    where
        T: IntoTable,
    {
        self.table = table.into_table();
        self
    }

    /// Appends assignments given as a flat list alternating fields and
    /// values: `("name", "bob", "age", 42)`.
    ///
    /// Fields are written as sql, values are bound. An odd list fails when
    /// rendering.
    pub fn set<V>(&mut self, fields_and_values: V) -> &mut Self
    where
        V: IntoValues,
    {
        self.assignments.extend(fields_and_values.into_values());
        self
    }

    pub fn set_value<F, V>(&mut self, field: F, value: V) -> &mut Self
    where
        F: IntoValue,
        V: IntoValue,
    {
        self.assignments.push(field.into_value());
        self.assignments.push(value.into_value());
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

    pub fn placeholder(&mut self, format: PlaceholderFormat) -> &mut Self {
        self.placeholder = format;
        self
    }

    pub fn to_sql(&self) -> Result<(String, Vec<Arg>)> {
        Sqlizer::to_sql(self)
    }
}

impl Sqlizer for Update {
    fn to_sql_fast(&self, context: &mut FormatContext<'_>) -> Result<()> {
        if self.assignments.len() % 2 != 0 {
            return Err(Error::InvalidFieldValuePairCount(self.assignments.len()));
        }

        context.write_str("UPDATE ")?;
        self.table.write(context)?;
        context.write_str(" SET ")?;

        for (index, pair) in self.assignments.chunks_exact(2).enumerate() {
            if index > 0 {
                context.write_str(", ")?;
            }
            context.write_sql(&pair[0])?;
            context.write_str(" = ")?;
            context.write_arg(&pair[1])?;
        }

        if !self.criteria.is_empty() {
            context.write_str(" WHERE ")?;
            context.write_criteria(&self.criteria)?;
        }
        Ok(())
    }

    fn to_sql(&self) -> Result<(String, Vec<Arg>)> {
        render(self, "update", self.placeholder)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{condition, or, testing::MockStringer};

    use super::*;

    fn string(s: &str) -> Arg {
        Arg::String(s.to_owned())
    }

    #[test]
    fn test_update() {
        let mut update = Update::new("users");
        update
            .set(("name", "Name 1", "email", "email1@email.com"))
            .where_raw("id = ?", 1);
        let (sql, args) = update.to_sql().unwrap();
        assert_eq!("UPDATE users SET name = ?, email = ? WHERE id = ?", sql);
        assert_eq!(
            vec![string("Name 1"), string("email1@email.com"), Arg::I32(1)],
            args
        );
    }

    #[test]
    fn test_update_alias_and_dollar() {
        let mut update = Update::default();
        update
            .table(("users", "u"))
            .set_value("u.name", "bob")
            .set_value("u.updated_at", b"NOW()")
            .set_value("u.visits", condition("u.visits + ?", 1))
            .set_value("u.note", MockStringer::new("hi"))
            .where_criteria(or((condition("u.id = ?", 7), condition("u.id = ?", 8))))
            .placeholder(PlaceholderFormat::Dollar);
        let (sql, args) = update.to_sql().unwrap();
        assert_eq!(
            "UPDATE users AS u SET u.name = $1, u.updated_at = NOW(), u.visits = u.visits + $2, u.note = $3 \
             WHERE (u.id = $4 OR u.id = $5)",
            sql
        );
        assert_eq!(
            vec![string("bob"), Arg::I32(1), string("hi"), Arg::I32(7), Arg::I32(8)],
            args
        );
    }

    #[test]
    fn test_update_null() {
        let mut update = Update::new("users");
        update.set_value("deleted_at", None::<i64>);
        let (sql, args) = update.to_sql().unwrap();
        assert_eq!("UPDATE users SET deleted_at = ?", sql);
        assert_eq!(vec![Arg::Null], args);
    }

    #[test]
    fn test_update_odd_pairs() {
        let mut update = Update::new("users");
        update.set(("name", "Name 1", "email"));
        let err = update.to_sql().unwrap_err();
        assert!(matches!(err, Error::InvalidFieldValuePairCount(3)));
    }
}
