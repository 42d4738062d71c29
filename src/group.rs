use std::sync::Arc;

use smol_str::SmolStr;

use crate::{
    arg::IntoArgs,
    error::Result,
    expr::Condition,
    sqlizer::Sqlizer,
    value::{IntoValues, Value},
    writer::FormatContext,
};

/// ` GROUP BY f1, f2 [HAVING c1 AND c2]`
#[derive(Debug, Default, Clone)]
pub struct GroupBy {
    fields: Vec<Value>,
    having: Vec<Value>,
}

impl GroupBy {
    pub fn new<V>(fields: V) -> Self
    where
        V: IntoValues,
    {
        Self {
            fields: fields.into_values(),
            having: Vec::new(),
        }
    }

    /// Replaces the grouped fields.
    pub fn fields<V>(&mut self, fields: V) -> &mut Self
    where
        V: IntoValues,
    {
        self.fields = fields.into_values();
        self
    }

    /// Replaces the `HAVING` criteria with a single raw condition.
    pub fn having<S, A>(&mut self, sql: S, args: A) -> &mut Self
    where
        S: Into<SmolStr>,
        A: IntoArgs,
    {
        self.having = vec![Value::Sqlizer(Arc::new(Condition::new(sql, args)))];
        self
    }

    pub fn having_clause<V>(&mut self, criteria: V) -> &mut Self
    where
        V: IntoValues,
    {
        self.having = criteria.into_values();
        self
    }
}

impl Sqlizer for GroupBy {
    fn to_sql_fast(&self, context: &mut FormatContext<'_>) -> Result<()> {
        context.write_str(" GROUP BY ")?;
        context.write_sql_list(&self.fields, ", ")?;
        if !self.having.is_empty() {
            context.write_str(" HAVING ")?;
            context.write_criteria(&self.having)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Arg, condition, tests::render_with};

    use super::*;

    #[test]
    fn test_group_by() {
        let group = GroupBy::new(("name", "email"));
        let (res, sql, args) = render_with(|ctx| group.to_sql_fast(ctx));
        assert!(res.is_ok());
        assert_eq!(" GROUP BY name, email", sql);
        assert!(args.is_empty());
    }

    #[test]
    fn test_group_by_having() {
        let mut group = GroupBy::default();
        group.fields("city").having("COUNT(*) > ?", 5);
        let (_, sql, args) = render_with(|ctx| group.to_sql_fast(ctx));
        assert_eq!(" GROUP BY city HAVING COUNT(*) > ?", sql);
        assert_eq!(vec![Arg::I32(5)], args);
    }

    #[test]
    fn test_group_by_having_clause() {
        let mut group = GroupBy::new("city");
        group.having_clause((
            condition("COUNT(*) > ?", 5),
            condition("MAX(age) < ?", 60),
        ));
        let (_, sql, args) = render_with(|ctx| group.to_sql_fast(ctx));
        assert_eq!(" GROUP BY city HAVING COUNT(*) > ? AND MAX(age) < ?", sql);
        assert_eq!(vec![Arg::I32(5), Arg::I32(60)], args);
    }
}
