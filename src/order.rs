use crate::{
    error::Result,
    sqlizer::Sqlizer,
    value::{IntoValues, Value},
    writer::FormatContext,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordering {
    Asc,
    Desc,
}

/// ` ORDER BY f1, f2 DESC`
#[derive(Debug, Default, Clone)]
pub struct OrderBy {
    fields: Vec<(Value, Ordering)>,
}

impl OrderBy {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn push<V>(&mut self, fields: V, ordering: Ordering) -> &mut Self
    where
        V: IntoValues,
    {
        self.fields
            .extend(fields.into_values().into_iter().map(|field| (field, ordering)));
        self
    }

    pub fn asc<V>(&mut self, fields: V) -> &mut Self
    where
        V: IntoValues,
    {
        self.push(fields, Ordering::Asc)
    }

    pub fn desc<V>(&mut self, fields: V) -> &mut Self
    where
        V: IntoValues,
    {
        self.push(fields, Ordering::Desc)
    }
}

impl Sqlizer for OrderBy {
    fn to_sql_fast(&self, context: &mut FormatContext<'_>) -> Result<()> {
        context.write_str(" ORDER BY ")?;
        for (index, (field, ordering)) in self.fields.iter().enumerate() {
            if index > 0 {
                context.write_str(", ")?;
            }
            context.write_sql(field)?;
            // ascending is the default, nothing to write
            if *ordering == Ordering::Desc {
                context.write_str(" DESC")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Arg, condition, tests::render_with};

    use super::*;

    #[test]
    fn test_order_by() {
        let mut order = OrderBy::default();
        order.asc(("name", "email")).desc("created_at").asc("id");
        let (res, sql, _) = render_with(|ctx| order.to_sql_fast(ctx));
        assert!(res.is_ok());
        assert_eq!(" ORDER BY name, email, created_at DESC, id", sql);
    }

    #[test]
    fn test_order_by_fragment() {
        let mut order = OrderBy::default();
        order.desc(condition("distance(location, ?)", 10));
        let (_, sql, args) = render_with(|ctx| order.to_sql_fast(ctx));
        assert_eq!(" ORDER BY distance(location, ?) DESC", sql);
        assert_eq!(vec![Arg::I32(10)], args);
    }
}
