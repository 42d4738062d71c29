use smol_str::SmolStr;

use crate::{error::Result, writer::FormatContext};

/// A table name with its optional alias.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TableRef {
    name: SmolStr,
    alias: Option<SmolStr>,
}

impl TableRef {
    pub fn new<N>(name: N) -> Self
    where
        N: Into<SmolStr>,
    {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    pub fn aliased<N, A>(name: N, alias: A) -> Self
    where
        N: Into<SmolStr>,
        A: Into<SmolStr>,
    {
        let mut table = Self::new(name);
        table.set_alias(alias);
        table
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    /// An empty alias removes it.
    pub(crate) fn set_alias<A>(&mut self, alias: A)
    where
        A: Into<SmolStr>,
    {
        let alias = alias.into();
        self.alias = if alias.is_empty() { None } else { Some(alias) };
    }

    /// Writes `name [AS alias]`.
    pub(crate) fn write(&self, context: &mut FormatContext<'_>) -> Result<()> {
        context.write_str(&self.name)?;
        if let Some(alias) = &self.alias {
            context.write_str(" AS ")?;
            context.write_str(alias)?;
        }
        Ok(())
    }
}

pub trait IntoTable {
    fn into_table(self) -> TableRef;
}

impl IntoTable for TableRef {
    fn into_table(self) -> TableRef {
        self
    }
}

impl IntoTable for &str {
    fn into_table(self) -> TableRef {
        TableRef::new(self)
    }
}

impl IntoTable for String {
    fn into_table(self) -> TableRef {
        TableRef::new(self)
    }
}

impl IntoTable for SmolStr {
    fn into_table(self) -> TableRef {
        TableRef::new(self)
    }
}

impl IntoTable for (&str, &str) {
    fn into_table(self) -> TableRef {
        TableRef::aliased(self.0, self.1)
    }
}

impl IntoTable for (String, String) {
    fn into_table(self) -> TableRef {
        TableRef::aliased(self.0, self.1)
    }
}
