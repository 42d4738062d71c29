use std::sync::Arc;

use smol_str::SmolStr;
use sqlf_derive::JoinMethods;

use crate::{
    arg::IntoArgs,
    error::Result,
    expr::Condition,
    sqlizer::Sqlizer,
    table::{IntoTable, TableRef},
    value::{IntoValues, Value},
    writer::FormatContext,
};

/// The usual join kinds. Each one gets a `Select::<kind>_join` shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, JoinMethods)]
pub enum JoinKind {
    Inner,
    Outer,
    Left,
    Right,
    Cross,
}

impl From<JoinKind> for SmolStr {
    fn from(kind: JoinKind) -> Self {
        SmolStr::new_static(kind.as_str())
    }
}

/// `KIND JOIN table [AS alias] [ON ...] [USING (...)]`
///
/// `ON` and `USING` are not exclusive here, the database will complain if
/// both are set.
#[derive(Debug, Default, Clone)]
pub struct JoinClause {
    kind: SmolStr,
    table: TableRef,
    on: Vec<Value>,
    using: Vec<Value>,
}

impl JoinClause {
    pub fn new<K, T>(kind: K, table: T) -> Self
    where
        K: Into<SmolStr>,
        T: IntoTable,
    {
        Self {
            kind: kind.into(),
            table: table.into_table(),
            ..Default::default()
        }
    }

    /// Free text: `LEFT OUTER`, `NATURAL`...
    pub fn kind<K>(&mut self, kind: K) -> &mut Self
    where
        K: Into<SmolStr>,
    {
        self.kind = kind.into();
        self
    }

    pub fn table<T>(&mut self, table: T) -> &mut Self
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

    /// Replaces the criteria with a single raw condition.
    pub fn on<S, A>(&mut self, sql: S, args: A) -> &mut Self
    where
        S: Into<SmolStr>,
        A: IntoArgs,
    {
        self.on = vec![Value::Sqlizer(Arc::new(Condition::new(sql, args)))];
        self
    }

    /// Replaces the criteria, joined with `AND`.
    pub fn on_clause<V>(&mut self, criteria: V) -> &mut Self
    where
        V: IntoValues,
    {
        self.on = criteria.into_values();
        self
    }

    pub fn using<V>(&mut self, fields: V) -> &mut Self
    where
        V: IntoValues,
    {
        self.using = fields.into_values();
        self
    }
}

impl Sqlizer for JoinClause {
    fn to_sql_fast(&self, context: &mut FormatContext<'_>) -> Result<()> {
        if !self.kind.is_empty() {
            context.write_str(&self.kind)?;
            context.write_str(" ")?;
        }
        context.write_str("JOIN ")?;
        self.table.write(context)?;

        if !self.on.is_empty() {
            context.write_str(" ON ")?;
            context.write_criteria(&self.on)?;
        }

        if !self.using.is_empty() {
            context.write_str(" USING (")?;
            context.write_sql_list(&self.using, ", ")?;
            context.write_str(")")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Arg, and, condition, tests::render_with};

    use super::*;

    fn render(join: &JoinClause) -> (String, Vec<Arg>) {
        let (res, sql, args) = render_with(|ctx| join.to_sql_fast(ctx));
        assert!(res.is_ok());
        (sql, args)
    }

    #[test]
    fn test_kind_keywords() {
        assert_eq!("INNER", JoinKind::Inner.as_str());
        assert_eq!("CROSS", JoinKind::Cross.as_str());
        assert_eq!(SmolStr::new("LEFT"), SmolStr::from(JoinKind::Left));
    }

    #[test]
    fn test_join_on() {
        let mut join = JoinClause::new(JoinKind::Inner, ("roles", "r"));
        join.on("r.user_id = u.id AND r.kind = ?", "admin");
        let (sql, args) = render(&join);
        assert_eq!("INNER JOIN roles AS r ON r.user_id = u.id AND r.kind = ?", sql);
        assert_eq!(vec![Arg::String("admin".to_owned())], args);
    }

    #[test]
    fn test_join_on_replaces() {
        let mut join = JoinClause::new("LEFT", "roles");
        join.on("a = b", ()).on("c = d", ());
        let (sql, _) = render(&join);
        assert_eq!("LEFT JOIN roles ON c = d", sql);
    }

    #[test]
    fn test_join_on_clause() {
        let mut join = JoinClause::new("LEFT", "roles");
        join.on_clause((
            condition("roles.user_id = users.id", ()),
            and((condition("a = ?", 1), condition("b = ?", 2))),
        ));
        let (sql, args) = render(&join);
        assert_eq!("LEFT JOIN roles ON roles.user_id = users.id AND (a = ? AND b = ?)", sql);
        assert_eq!(vec![Arg::I32(1), Arg::I32(2)], args);
    }

    #[test]
    fn test_join_using() {
        let mut join = JoinClause::new(JoinKind::Right, "roles");
        join.using(["user_id", "tenant_id"]);
        let (sql, _) = render(&join);
        assert_eq!("RIGHT JOIN roles USING (user_id, tenant_id)", sql);
    }

    #[test]
    fn test_join_without_kind() {
        let mut join = JoinClause::default();
        join.table("roles").alias("r");
        let (sql, _) = render(&join);
        assert_eq!("JOIN roles AS r", sql);
    }

    #[test]
    fn test_join_custom_kind() {
        let mut join = JoinClause::new(JoinKind::Cross, "roles");
        join.kind("NATURAL").alias("");
        let (sql, _) = render(&join);
        assert_eq!("NATURAL JOIN roles", sql);
    }
}
