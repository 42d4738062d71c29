use std::fmt;

/// A value bound to a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Null,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    String(String),
    Bytes(Vec<u8>),

    #[cfg(feature = "uuid")]
    Uuid(uuid::Uuid),
    #[cfg(feature = "time")]
    OffsetDateTime(time::OffsetDateTime),
    #[cfg(feature = "chrono")]
    DateTime(chrono::DateTime<chrono::Utc>),
    #[cfg(feature = "chrono")]
    Date(chrono::NaiveDate),
    #[cfg(feature = "chrono")]
    Time(chrono::NaiveTime),
    #[cfg(feature = "json")]
    Json(serde_json::Value),
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Null => f.write_str("NULL"),
            Arg::Bool(value) => write!(f, "{value}"),
            Arg::I8(value) => write!(f, "{value}"),
            Arg::I16(value) => write!(f, "{value}"),
            Arg::I32(value) => write!(f, "{value}"),
            Arg::I64(value) => write!(f, "{value}"),
            Arg::U8(value) => write!(f, "{value}"),
            Arg::U16(value) => write!(f, "{value}"),
            Arg::U32(value) => write!(f, "{value}"),
            Arg::U64(value) => write!(f, "{value}"),
            Arg::F32(value) => write!(f, "{value}"),
            Arg::F64(value) => write!(f, "{value}"),
            Arg::String(value) => f.write_str(value),
            Arg::Bytes(value) => f.write_str(&String::from_utf8_lossy(value)),
            #[cfg(feature = "uuid")]
            Arg::Uuid(value) => write!(f, "{value}"),
            #[cfg(feature = "time")]
            Arg::OffsetDateTime(value) => write!(f, "{value}"),
            #[cfg(feature = "chrono")]
            Arg::DateTime(value) => write!(f, "{value}"),
            #[cfg(feature = "chrono")]
            Arg::Date(value) => write!(f, "{value}"),
            #[cfg(feature = "chrono")]
            Arg::Time(value) => write!(f, "{value}"),
            #[cfg(feature = "json")]
            Arg::Json(value) => write!(f, "{value}"),
        }
    }
}

pub trait IntoArg {
    fn into_arg(self) -> Arg;
}

/// Anything that can be flattened into an ordered argument list.
pub trait IntoArgs {
    fn into_args(self) -> Vec<Arg>;
}

impl IntoArg for Arg {
    fn into_arg(self) -> Arg {
        self
    }
}

impl<T> IntoArg for Option<T>
where
    T: IntoArg,
{
    fn into_arg(self) -> Arg {
        if let Some(value) = self {
            value.into_arg()
        } else {
            Arg::Null
        }
    }
}

macro_rules! into_arg {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl IntoArg for $ty {
                #[inline]
                fn into_arg(self) -> Arg {
                    Arg::$variant(self)
                }
            }
        )+
    };
}

into_arg! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => String,
}

#[cfg(feature = "uuid")]
into_arg! { uuid::Uuid => Uuid }

#[cfg(feature = "time")]
into_arg! { time::OffsetDateTime => OffsetDateTime }

#[cfg(feature = "chrono")]
into_arg! {
    chrono::DateTime<chrono::Utc> => DateTime,
    chrono::NaiveDate => Date,
    chrono::NaiveTime => Time,
}

#[cfg(feature = "json")]
into_arg! { serde_json::Value => Json }

impl IntoArg for &str {
    fn into_arg(self) -> Arg {
        Arg::String(self.to_owned())
    }
}

impl IntoArg for &String {
    fn into_arg(self) -> Arg {
        Arg::String(self.clone())
    }
}

impl IntoArg for &[u8] {
    fn into_arg(self) -> Arg {
        Arg::Bytes(self.to_vec())
    }
}

impl IntoArgs for () {
    fn into_args(self) -> Vec<Arg> {
        Vec::new()
    }
}

impl<T> IntoArgs for T
where
    T: IntoArg,
{
    fn into_args(self) -> Vec<Arg> {
        vec![self.into_arg()]
    }
}

impl<T> IntoArgs for Vec<T>
where
    T: IntoArg,
{
    fn into_args(self) -> Vec<Arg> {
        self.into_iter().map(IntoArg::into_arg).collect()
    }
}

impl<T, const N: usize> IntoArgs for [T; N]
where
    T: IntoArg,
{
    fn into_args(self) -> Vec<Arg> {
        self.into_iter().map(IntoArg::into_arg).collect()
    }
}

macro_rules! tuple_into_args {
    ($($name:ident),+) => {
        impl<$($name: IntoArg),+> IntoArgs for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_args(self) -> Vec<Arg> {
                let ($($name,)+) = self;
                vec![$($name.into_arg()),+]
            }
        }
    };
}

tuple_into_args!(A);
tuple_into_args!(A, B);
tuple_into_args!(A, B, C);
tuple_into_args!(A, B, C, D);
tuple_into_args!(A, B, C, D, E);
tuple_into_args!(A, B, C, D, E, F);
tuple_into_args!(A, B, C, D, E, F, G);
tuple_into_args!(A, B, C, D, E, F, G, H);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_args_mixed_tuple() {
        let args = ("Name 1", 18, None::<i64>, true).into_args();
        assert_eq!(
            vec![
                Arg::String("Name 1".to_owned()),
                Arg::I32(18),
                Arg::Null,
                Arg::Bool(true),
            ],
            args
        );
    }

    #[test]
    fn test_into_args_single_and_empty() {
        assert_eq!(vec![Arg::I64(7)], 7i64.into_args());
        assert!(().into_args().is_empty());
        assert_eq!(vec![Arg::U8(1), Arg::U8(2)], [1u8, 2u8].into_args());
    }

    #[test]
    fn test_display() {
        assert_eq!("NULL", Arg::Null.to_string());
        assert_eq!("18", Arg::I32(18).to_string());
        assert_eq!("users", Arg::String("users".to_owned()).to_string());
        assert_eq!("bytes1", Arg::Bytes(b"bytes1".to_vec()).to_string());
    }
}
