use std::sync::Arc;

use smol_str::SmolStr;

use crate::{
    arg::{Arg, IntoArgs},
    error::Result,
    expr::Condition,
    group::GroupBy,
    join::JoinClause,
    order::OrderBy,
    placeholder::PlaceholderFormat,
    sqlizer::{Sqlizer, render},
    table::{IntoTable, TableRef},
    value::{IntoValue, IntoValues, Value},
    writer::FormatContext,
};

/// A `SELECT` statement.
///
/// Clauses are written in sql order no matter the order they were
/// configured in:
///
/// ```text
/// SELECT [DISTINCT] fields FROM table [AS alias] joins WHERE ... GROUP BY ...
///     ORDER BY ... LIMIT ... OFFSET ...
/// ```
#[derive(Debug, Default, Clone)]
pub struct Select {
    distinct: bool,
    fields: Vec<Value>,
    table: TableRef,
    joins: Vec<JoinClause>,
    criteria: Vec<Value>,
    group_by: Option<GroupBy>,
    order_by: Option<OrderBy>,
    limit: Option<Value>,
    offset: Option<Value>,
    placeholder: PlaceholderFormat,
}

impl Select {
    pub fn new<V>(fields: V) -> Self
    where
        V: IntoValues,
    {
        Self {
            fields: fields.into_values(),
            ..Default::default()
        }
    }

    /// Replaces the selected fields. No field selects `*`.
    pub fn select<V>(&mut self, fields: V) -> &mut Self
    where
        V: IntoValues,
    {
        self.fields = fields.into_values();
        self
    }

    pub fn add_select<V>(&mut self, fields: V) -> &mut Self
    where
        V: IntoValues,
    {
        self.fields.extend(fields.into_values());
        self
    }

    pub fn distinct(&mut self) -> &mut Self {
        self.distinct = true;
        self
    }

    /// `"users"` or `("users", "u")`.
    pub fn from<T>(&mut self, table: T) -> &mut Self
    where
        T: IntoTable,
    {
        self.table = table.into_table();
        self
    }

    pub fn alias<A>(&mut self, alias: A) -> &mut Self
    where
        A: Into<SmolStr>,
    {
        self.table.set_alias(alias);
        self
    }

    /// Adds a join of any kind, configured by the closure.
    pub fn join_clause<K, T, F>(&mut self, kind: K, table: T, join: F) -> &mut Self
    where
        K: Into<SmolStr>,
        T: IntoTable,
        F: FnOnce(&mut JoinClause),
    {
        let mut clause = JoinClause::new(kind, table);
        join(&mut clause);
        self.joins.push(clause);
        self
    }

    pub fn join(&mut self, join: JoinClause) -> &mut Self {
        self.joins.push(join);
        self
    }

    /// Appends a raw condition to the `WHERE` criteria.
    pub fn where_raw<S, A>(&mut self, sql: S, args: A) -> &mut Self
    where
        S: Into<SmolStr>,
        A: IntoArgs,
    {
        self.criteria
            .push(Value::Sqlizer(Arc::new(Condition::new(sql, args))));
        self
    }

    /// Appends fragments to the `WHERE` criteria. Criteria are joined with
    /// `AND`.
    pub fn where_criteria<V>(&mut self, criteria: V) -> &mut Self
    where
        V: IntoValues,
    {
        self.criteria.extend(criteria.into_values());
        self
    }

    /// Replaces the `GROUP BY` clause. No field removes it.
    pub fn group_by<V>(&mut self, fields: V) -> &mut Self
    where
        V: IntoValues,
    {
        let fields = fields.into_values();
        self.group_by = if fields.is_empty() {
            None
        } else {
            Some(GroupBy::new(fields))
        };
        self
    }

    /// Replaces the `GROUP BY` clause with one configured by the closure.
    pub fn group_by_with<F>(&mut self, group_by: F) -> &mut Self
    where
        F: FnOnce(&mut GroupBy),
    {
        let mut clause = GroupBy::default();
        group_by(&mut clause);
        self.group_by = Some(clause);
        self
    }

    /// Appends ascending fields to the `ORDER BY` clause.
    pub fn order_by<V>(&mut self, fields: V) -> &mut Self
    where
        V: IntoValues,
    {
        self.order_by.get_or_insert_default().asc(fields);
        self
    }

    pub fn order_by_with<F>(&mut self, order_by: F) -> &mut Self
    where
        F: FnOnce(&mut OrderBy),
    {
        order_by(self.order_by.get_or_insert_default());
        self
    }

    pub fn limit<V>(&mut self, limit: V) -> &mut Self
    where
        V: IntoValue,
    {
        self.limit = Some(limit.into_value());
        self
    }

    /// Sets both, in the `LIMIT offset, limit` order of MySQL.
    pub fn limit_offset<O, L>(&mut self, offset: O, limit: L) -> &mut Self
    where
        O: IntoValue,
        L: IntoValue,
    {
        self.offset = Some(offset.into_value());
        self.limit = Some(limit.into_value());
        self
    }

    pub fn offset<V>(&mut self, offset: V) -> &mut Self
    where
        V: IntoValue,
    {
        self.offset = Some(offset.into_value());
        self
    }

    pub fn placeholder(&mut self, format: PlaceholderFormat) -> &mut Self {
        self.placeholder = format;
        self
    }

    /// A copy selecting `count` instead of the fields, without `LIMIT` and
    /// `OFFSET`. No `count` means `COUNT(*)`.
    pub fn count_query<V>(&self, count: V) -> Select
    where
        V: IntoValues,
    {
        let mut fields = count.into_values();
        if fields.is_empty() {
            fields.push(Value::Text(SmolStr::new_static("COUNT(*)")));
        }
        Select {
            fields,
            limit: None,
            offset: None,
            ..self.clone()
        }
    }

    pub fn to_sql(&self) -> Result<(String, Vec<Arg>)> {
        Sqlizer::to_sql(self)
    }
}

impl Sqlizer for Select {
    fn to_sql_fast(&self, context: &mut FormatContext<'_>) -> Result<()> {
        context.write_str("SELECT ")?;
        if self.distinct {
            context.write_str("DISTINCT ")?;
        }
        if self.fields.is_empty() {
            context.write_str("*")?;
        } else {
            context.write_sql_list(&self.fields, ", ")?;
        }

        if !self.table.is_empty() {
            context.write_str(" FROM ")?;
            self.table.write(context)?;
        }

        for join in &self.joins {
            context.write_str(" ")?;
            join.to_sql_fast(context)?;
        }

        if !self.criteria.is_empty() {
            context.write_str(" WHERE ")?;
            context.write_criteria(&self.criteria)?;
        }

        if let Some(group_by) = &self.group_by {
            group_by.to_sql_fast(context)?;
        }

        if let Some(order_by) = self.order_by.as_ref().filter(|o| !o.is_empty()) {
            order_by.to_sql_fast(context)?;
        }

        if let Some(limit) = &self.limit {
            context.write_str(" LIMIT ")?;
            context.write_arg(limit)?;
        }

        if let Some(offset) = &self.offset {
            context.write_str(" OFFSET ")?;
            context.write_arg(offset)?;
        }

        Ok(())
    }

    fn to_sql(&self) -> Result<(String, Vec<Arg>)> {
        render(self, "select", self.placeholder)
    }
}
