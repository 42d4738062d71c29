use smol_str::SmolStr;

use crate::{
    delete::Delete,
    insert::Insert,
    placeholder::PlaceholderFormat,
    select::Select,
    table::IntoTable,
    update::Update,
    value::IntoValues,
};

/// Hands out statements already set up with one placeholder format.
///
/// ```
/// use sqlf::{PlaceholderFormat, StatementBuilder};
///
/// let builder = StatementBuilder::new(PlaceholderFormat::Dollar);
/// let (sql, args) = builder
///     .select(("name", "email"))
///     .from("users")
///     .where_raw("age >= ?", 18)
///     .to_sql()
///     .unwrap();
/// assert_eq!("SELECT name, email FROM users WHERE age >= $1", sql);
/// assert_eq!(1, args.len());
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StatementBuilder {
    placeholder: PlaceholderFormat,
}

impl StatementBuilder {
    pub fn new(placeholder: PlaceholderFormat) -> Self {
        Self { placeholder }
    }

    pub fn placeholder(&mut self, format: PlaceholderFormat) -> &mut Self {
        self.placeholder = format;
        self
    }

    pub fn placeholder_format(&self) -> PlaceholderFormat {
        self.placeholder
    }

    pub fn select<V>(&self, fields: V) -> Select
    where
        V: IntoValues,
    {
        let mut select = Select::new(fields);
        select.placeholder(self.placeholder);
        select
    }

    pub fn insert_into<T>(&self, table: T) -> Insert
    where
        T: Into<SmolStr>,
    {
        let mut insert = Insert::new(table);
        insert.placeholder(self.placeholder);
        insert
    }

    pub fn update<T>(&self, table: T) -> Update
    where
        T: IntoTable,
    {
        let mut update = Update::new(table);
        update.placeholder(self.placeholder);
        update
    }

    pub fn delete_from<T>(&self, table: T) -> Delete
    where
        T: IntoTable,
    {
        let mut delete = Delete::new(table);
        delete.placeholder(self.placeholder);
        delete
    }
}
