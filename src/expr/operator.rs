use crate::{
    error::Result,
    sqlizer::Sqlizer,
    value::{IntoValues, Value},
    writer::FormatContext,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conjunction {
    And,
    Or,
    Not,
}

impl Conjunction {
    fn separator(self) -> &'static str {
        match self {
            Conjunction::And | Conjunction::Not => " AND ",
            Conjunction::Or => " OR ",
        }
    }
}

/// Child fragments joined by a boolean operator, inside parentheses.
#[derive(Debug, Clone)]
pub struct Group {
    conjunction: Conjunction,
    parts: Vec<Value>,
}

impl Group {
    pub fn new<V>(conjunction: Conjunction, parts: V) -> Self
    where
        V: IntoValues,
    {
        Self {
            conjunction,
            parts: parts.into_values(),
        }
    }

    pub fn conjunction(&self) -> Conjunction {
        self.conjunction
    }

    pub fn push<V>(&mut self, parts: V) -> &mut Self
    where
        V: IntoValues,
    {
        self.parts.extend(parts.into_values());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl Sqlizer for Group {
    fn to_sql_fast(&self, context: &mut FormatContext<'_>) -> Result<()> {
        if self.conjunction == Conjunction::Not {
            context.write_str("NOT ")?;
            // NOT (a AND b) rather than NOT ((a AND b))
            if let [single] = self.parts.as_slice() {
                if single.is_grouped() {
                    return context.write_sql(single);
                }
            }
        }
        context.write_str("(")?;
        context.write_sql_list(&self.parts, self.conjunction.separator())?;
        context.write_str(")")
    }

    fn is_grouped(&self) -> bool {
        matches!(self.conjunction, Conjunction::And | Conjunction::Or)
    }
}
