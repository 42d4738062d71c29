//! Fluent SQL statement builder.
//!
//! Statements and fragments render into one buffer while collecting their
//! arguments in placeholder order. Fragments always write the generic `?`
//! marker; the placeholder format of the statement rewrites it on the fly
//! (`$1`, `:1`, `@p1`) and `??` stands for a literal `?`.
//!
//! ```
//! use sqlf::{PlaceholderFormat, and, condition};
//!
//! let (sql, args) = sqlf::select(("name", "email"))
//!     .from("users")
//!     .where_criteria(and((condition("age >= ?", 18), condition("city = ?", "Paris"))))
//!     .placeholder(PlaceholderFormat::Dollar)
//!     .to_sql()
//!     .unwrap();
//! assert_eq!("SELECT name, email FROM users WHERE (age >= $1 AND city = $2)", sql);
//! assert_eq!(2, args.len());
//! ```

use std::{fmt, sync::Arc};

use smol_str::SmolStr;

mod arg;
mod builder;
mod delete;
mod error;
mod expr;
mod group;
mod insert;
mod join;
mod order;
mod placeholder;
mod select;
mod sqlizer;
mod table;
mod update;
mod value;
mod writer;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use arg::{Arg, IntoArg, IntoArgs};
pub use builder::StatementBuilder;
pub use delete::Delete;
pub use error::{Error, Result};
pub use expr::{Condition, Conjunction, Group};
pub use group::GroupBy;
pub use insert::Insert;
pub use join::{JoinClause, JoinKind};
pub use order::{OrderBy, Ordering};
pub use placeholder::{NumberedWriter, PlaceholderFormat, PlaceholderWriter, placeholders};
pub use select::Select;
pub use sqlizer::Sqlizer;
pub use table::{IntoTable, TableRef};
pub use update::Update;
pub use value::{IntoValue, IntoValues, Value};
pub use writer::{FormatContext, SqlWrite};

/// Raw sql with its arguments.
pub fn condition<S, A>(sql: S, args: A) -> Condition
where
    S: Into<SmolStr>,
    A: IntoArgs,
{
    Condition::new(sql, args)
}

/// `(c1 AND c2 ...)`
pub fn and<V: IntoValues>(conditions: V) -> Group {
    Group::new(Conjunction::And, conditions)
}

/// `(c1 OR c2 ...)`
pub fn or<V: IntoValues>(conditions: V) -> Group {
    Group::new(Conjunction::Or, conditions)
}

/// `NOT (c1 AND c2 ...)`
pub fn not<V: IntoValues>(conditions: V) -> Group {
    Group::new(Conjunction::Not, conditions)
}

pub fn sql<V: IntoValue>(value: V) -> Value {
    value.into_value()
}

/// Wraps anything displayable, formatted only when rendered.
pub fn stringer<T>(value: T) -> Value
where
    T: fmt::Display + Send + Sync + 'static,
{
    Value::Stringer(Arc::new(value))
}

/// Bytes written as is, even where a value would be bound.
pub fn bytes<B>(bytes: B) -> Value
where
    B: Into<Arc<[u8]>>,
{
    Value::Bytes(bytes.into())
}

/// Turns any [`Sqlizer`] into a value, so custom fragments can be passed
/// wherever the builders take fields or criteria.
pub fn fragment<S>(fragment: S) -> Value
where
    S: Sqlizer + 'static,
{
    Value::Sqlizer(Arc::new(fragment))
}

pub fn select<V: IntoValues>(fields: V) -> Select {
    Select::new(fields)
}

pub fn insert_into<T: Into<SmolStr>>(table: T) -> Insert {
    Insert::new(table)
}

pub fn update<T: IntoTable>(table: T) -> Update {
    Update::new(table)
}

pub fn delete_from<T: IntoTable>(table: T) -> Delete {
    Delete::new(table)
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::{Arg, FormatContext, Result};

    /// Runs `render` on a plain string sink, keeping whatever was written
    /// even when it fails.
    pub(crate) fn render_with<F>(render: F) -> (Result<()>, String, Vec<Arg>)
    where
        F: FnOnce(&mut FormatContext<'_>) -> Result<()>,
    {
        let mut sql = String::new();
        let mut args = Vec::new();
        let res = {
            let mut context = FormatContext::new(&mut sql, &mut args);
            render(&mut context)
        };
        (res, sql, args)
    }
}

#[cfg(test)]
mod integration {
    use pretty_assertions::assert_eq;

    use super::*;

    /// `name(?, ?)` with one argument per placeholder.
    #[derive(Debug)]
    struct Call {
        name: &'static str,
        args: Vec<Value>,
    }

    impl Sqlizer for Call {
        fn to_sql_fast(&self, context: &mut FormatContext<'_>) -> Result<()> {
            context.write_str(self.name)?;
            context.write_str("(")?;
            for arg in &self.args {
                context.write_arg(arg)?;
            }
            context.write_str(")")
        }
    }

    fn call<V>(name: &'static str, args: V) -> Call
    where
        V: IntoValues,
    {
        Call {
            name,
            args: args.into_values(),
        }
    }

    #[test]
    fn test_markers_match_args() {
        let mut statement = select(("name", condition("COALESCE(nick, ?)", "anon")));
        statement
            .from(("users", "u"))
            .left_join("roles", |join| {
                join.on("roles.user_id = u.id AND roles.level > ?", 2);
            })
            .where_criteria(not(or((condition("u.age < ?", 18), condition("u.banned", ())))))
            .group_by_with(|group| {
                group.fields("name").having("COUNT(*) > ?", 1);
            })
            .limit(10)
            .offset(5);
        let (sql, args) = statement.to_sql().unwrap();
        assert_eq!(sql.matches('?').count(), args.len());
    }

    #[test]
    fn test_numbering_is_sequential() {
        let mut statement = select(());
        statement
            .from("t")
            .where_raw("a = ? AND b = ?", (1, 2))
            .where_raw("c ?? 'k'", ())
            .where_raw("d = ?", 3)
            .placeholder(PlaceholderFormat::Colon);
        let (sql, args) = statement.to_sql().unwrap();
        assert_eq!("SELECT * FROM t WHERE a = :1 AND b = :2 AND c ? 'k' AND d = :3", sql);
        assert_eq!(3, args.len());
    }

    #[test]
    fn test_stringer_and_bytes_helpers() {
        let mut statement = update("users");
        statement
            .set_value("name", stringer(42))
            .set_value("updated_at", bytes(&b"NOW()"[..]));
        let (sql, args) = statement.to_sql().unwrap();
        assert_eq!("UPDATE users SET name = ?, updated_at = NOW()", sql);
        assert_eq!(vec![Arg::String("42".to_owned())], args);
    }

    #[test]
    fn test_free_constructors() {
        assert_eq!(
            "INSERT INTO t (a) VALUES (?)",
            insert_into("t").fields("a").values(1).to_sql().unwrap().0
        );
        assert_eq!(
            "DELETE FROM t WHERE a = ?",
            delete_from("t").where_raw("a = ?", 1).to_sql().unwrap().0
        );
    }

    #[test]
    fn test_builders_are_shareable() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<Select>();
        assert_send_sync::<Insert>();
        assert_send_sync::<Update>();
        assert_send_sync::<Delete>();
        assert_send_sync::<Value>();
    }

    #[test]
    fn test_adjacent_placeholders_stay_numbered() {
        let mut statement = select(());
        statement
            .from("t")
            .where_criteria(fragment(call("f", (1, 2))))
            .placeholder(PlaceholderFormat::Dollar);
        let (sql, args) = statement.to_sql().unwrap();
        assert_eq!("SELECT * FROM t WHERE f($1$2)", sql);
        assert_eq!(vec![Arg::I32(1), Arg::I32(2)], args);

        let (sql, args) = Sqlizer::to_sql(&call("f", (1, 2))).unwrap();
        assert_eq!("f(??)", sql);
        assert_eq!(2, args.len());
    }

    #[test]
    fn test_custom_fragment_in_criteria() {
        let mut statement = select("id");
        statement
            .from("users")
            .where_criteria((fragment(call("is_active", "id")), condition("age > ?", 18)))
            .placeholder(PlaceholderFormat::Colon);
        let (sql, args) = statement.to_sql().unwrap();
        assert_eq!("SELECT id FROM users WHERE is_active(:1) AND age > :2", sql);
        assert_eq!(vec![Arg::String("id".to_owned()), Arg::I32(18)], args);
    }

    #[test]
    fn test_shared_statements_keep_their_format() {
        let mut statement = select("id");
        statement
            .from("users")
            .where_raw("id = ?", 1)
            .placeholder(PlaceholderFormat::Dollar);
        let expected = "SELECT id FROM users WHERE id = $1";

        let shared = Arc::new(statement.clone());
        assert_eq!(expected, shared.to_sql().unwrap().0);

        let dynamic: &dyn Sqlizer = &statement;
        assert_eq!(expected, dynamic.to_sql().unwrap().0);

        let mut delete = delete_from("users");
        delete.where_raw("id = ?", 1).placeholder(PlaceholderFormat::AtP);
        let boxed: Arc<dyn Sqlizer> = Arc::new(delete);
        assert_eq!("DELETE FROM users WHERE id = @p1", boxed.to_sql().unwrap().0);
    }

    #[test]
    fn test_concurrent_renders() {
        let mut statement = select("id");
        statement
            .from("users")
            .where_raw("id = ?", 1)
            .placeholder(PlaceholderFormat::Dollar);
        let statement = Arc::new(statement);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let statement = Arc::clone(&statement);
                std::thread::spawn(move || statement.to_sql().unwrap())
            })
            .collect();
        for handle in handles {
            let (sql, _) = handle.join().unwrap();
            assert_eq!("SELECT id FROM users WHERE id = $1", sql);
        }
    }
}
