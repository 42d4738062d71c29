use std::{fmt, sync::Arc};

use smol_str::SmolStr;

use crate::{
    Delete, GroupBy, Insert, JoinClause, OrderBy, Select, Update,
    arg::{Arg, IntoArg},
    expr::{Condition, Group},
    sqlizer::Sqlizer,
};

/// A generic value, classified by what it is able to do.
///
/// How a value renders depends on where it stands: see
/// [`FormatContext::write_sql`](crate::FormatContext::write_sql) and
/// [`FormatContext::write_arg`](crate::FormatContext::write_arg).
#[derive(Clone)]
pub enum Value {
    /// Raw sql text, or a plain string when used as an argument.
    Text(SmolStr),
    /// Anything that can display itself.
    Stringer(Arc<dyn fmt::Display + Send + Sync>),
    Bytes(Arc<[u8]>),
    Sqlizer(Arc<dyn Sqlizer>),
    Arg(Arg),
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Value::Stringer(stringer) => f
                .debug_tuple("Stringer")
                .field(&format_args!("{stringer}"))
                .finish(),
            Value::Bytes(bytes) => f.debug_tuple("Bytes").field(bytes).finish(),
            Value::Sqlizer(sqlizer) => f.debug_tuple("Sqlizer").field(sqlizer).finish(),
            Value::Arg(arg) => f.debug_tuple("Arg").field(arg).finish(),
        }
    }
}

impl Value {
    /// Whether the value already wraps its own output in parentheses.
    pub fn is_grouped(&self) -> bool {
        match self {
            Value::Sqlizer(sqlizer) => sqlizer.is_grouped(),
            _ => false,
        }
    }
}

pub trait IntoValue {
    fn into_value(self) -> Value;
}

pub trait IntoValues {
    fn into_values(self) -> Vec<Value>;
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl IntoValue for Arg {
    fn into_value(self) -> Value {
        Value::Arg(self)
    }
}

impl IntoValue for &str {
    #[inline]
    fn into_value(self) -> Value {
        Value::Text(SmolStr::new(self))
    }
}

impl IntoValue for &String {
    #[inline]
    fn into_value(self) -> Value {
        Value::Text(SmolStr::new(self))
    }
}

impl IntoValue for String {
    #[inline]
    fn into_value(self) -> Value {
        Value::Text(SmolStr::new(self))
    }
}

impl IntoValue for SmolStr {
    #[inline]
    fn into_value(self) -> Value {
        Value::Text(self)
    }
}

impl IntoValue for &[u8] {
    fn into_value(self) -> Value {
        Value::Bytes(Arc::from(self))
    }
}

impl<const N: usize> IntoValue for &[u8; N] {
    fn into_value(self) -> Value {
        Value::Bytes(Arc::from(&self[..]))
    }
}

impl<T> IntoValue for Option<T>
where
    T: IntoArg,
{
    fn into_value(self) -> Value {
        Value::Arg(self.into_arg())
    }
}

impl IntoValue for Arc<dyn Sqlizer> {
    fn into_value(self) -> Value {
        Value::Sqlizer(self)
    }
}

macro_rules! arg_into_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl IntoValue for $ty {
                #[inline]
                fn into_value(self) -> Value {
                    Value::Arg(self.into_arg())
                }
            }
        )+
    };
}

arg_into_value!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

#[cfg(feature = "uuid")]
arg_into_value!(uuid::Uuid);

#[cfg(feature = "time")]
arg_into_value!(time::OffsetDateTime);

#[cfg(feature = "chrono")]
arg_into_value!(chrono::DateTime<chrono::Utc>, chrono::NaiveDate, chrono::NaiveTime);

#[cfg(feature = "json")]
arg_into_value!(serde_json::Value);

macro_rules! sqlizer_into_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl IntoValue for $ty {
                fn into_value(self) -> Value {
                    Value::Sqlizer(Arc::new(self))
                }
            }
        )+
    };
}

sqlizer_into_value!(Condition, Group, Select, Insert, Update, Delete, JoinClause, GroupBy, OrderBy);

#[cfg(any(test, feature = "testing"))]
sqlizer_into_value!(crate::testing::MockSqlizer);

impl IntoValues for () {
    fn into_values(self) -> Vec<Value> {
        Vec::new()
    }
}

impl<T> IntoValues for T
where
    T: IntoValue,
{
    fn into_values(self) -> Vec<Value> {
        vec![self.into_value()]
    }
}

impl<T> IntoValues for Vec<T>
where
    T: IntoValue,
{
    fn into_values(self) -> Vec<Value> {
        self.into_iter().map(IntoValue::into_value).collect()
    }
}

impl<T, const N: usize> IntoValues for [T; N]
where
    T: IntoValue,
{
    fn into_values(self) -> Vec<Value> {
        self.into_iter().map(IntoValue::into_value).collect()
    }
}

macro_rules! tuple_into_values {
    ($($name:ident),+) => {
        impl<$($name: IntoValue),+> IntoValues for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_values(self) -> Vec<Value> {
                let ($($name,)+) = self;
                vec![$($name.into_value()),+]
            }
        }
    };
}

tuple_into_values!(A);
tuple_into_values!(A, B);
tuple_into_values!(A, B, C);
tuple_into_values!(A, B, C, D);
tuple_into_values!(A, B, C, D, E);
tuple_into_values!(A, B, C, D, E, F);
tuple_into_values!(A, B, C, D, E, F, G);
tuple_into_values!(A, B, C, D, E, F, G, H);
tuple_into_values!(A, B, C, D, E, F, G, H, I);
tuple_into_values!(A, B, C, D, E, F, G, H, I, J);
tuple_into_values!(A, B, C, D, E, F, G, H, I, J, K);
tuple_into_values!(A, B, C, D, E, F, G, H, I, J, K, L);

#[cfg(test)]
mod tests {
    use crate::{and, condition, stringer};

    use super::*;

    #[test]
    fn test_into_values_classification() {
        let values = ("name", 18i64, b"raw", stringer(7), condition("a = ?", 1)).into_values();
        assert!(matches!(values[0], Value::Text(ref text) if text == "name"));
        assert!(matches!(values[1], Value::Arg(Arg::I64(18))));
        assert!(matches!(values[2], Value::Bytes(ref bytes) if &bytes[..] == b"raw"));
        assert!(matches!(values[3], Value::Stringer(_)));
        assert!(matches!(values[4], Value::Sqlizer(_)));
    }

    #[test]
    fn test_is_grouped() {
        assert!(and((condition("a", ()), condition("b", ()))).into_value().is_grouped());
        assert!(!condition("a", ()).into_value().is_grouped());
        assert!(!"a".into_value().is_grouped());
    }

    #[test]
    fn test_none_is_null() {
        assert!(matches!(None::<i32>.into_value(), Value::Arg(Arg::Null)));
    }
}
