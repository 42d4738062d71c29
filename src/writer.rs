use crate::{
    arg::Arg,
    error::Result,
    value::Value,
};

/// A text sink that SQL is rendered into.
///
/// Both methods may be intercepted by a placeholder rewriter, so fragments
/// should never assume that what they write lands in the sink unchanged.
pub trait SqlWrite {
    fn write_str(&mut self, s: &str) -> Result<()>;

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()>;

    /// Writes one bound placeholder. Unlike a `?` inside text, it never
    /// takes part in a `??` escape.
    fn write_placeholder(&mut self) -> Result<()> {
        self.write_str("?")
    }
}

impl SqlWrite for Vec<u8> {
    #[inline]
    fn write_str(&mut self, s: &str) -> Result<()> {
        self.extend_from_slice(s.as_bytes());
        Ok(())
    }

    #[inline]
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

impl SqlWrite for String {
    #[inline]
    fn write_str(&mut self, s: &str) -> Result<()> {
        self.push_str(s);
        Ok(())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let text = String::from_utf8(bytes.to_vec())?;
        self.push_str(&text);
        Ok(())
    }
}

impl<W> SqlWrite for &mut W
where
    W: SqlWrite + ?Sized,
{
    #[inline]
    fn write_str(&mut self, s: &str) -> Result<()> {
        (**self).write_str(s)
    }

    #[inline]
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write_bytes(bytes)
    }

    #[inline]
    fn write_placeholder(&mut self) -> Result<()> {
        (**self).write_placeholder()
    }
}

/// Shared state of one render pass: the sink and the argument list.
pub struct FormatContext<'a> {
    writer: &'a mut dyn SqlWrite,
    args: &'a mut Vec<Arg>,
}

impl<'a> FormatContext<'a> {
    pub fn new(writer: &'a mut dyn SqlWrite, args: &'a mut Vec<Arg>) -> Self {
        Self { writer, args }
    }

    #[inline]
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        self.writer.write_str(s)
    }

    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_bytes(bytes)
    }

    /// Writes the placeholder of one argument. It does not bind anything.
    #[inline]
    pub fn write_placeholder(&mut self) -> Result<()> {
        self.writer.write_placeholder()
    }

    #[inline]
    pub fn push_arg(&mut self, arg: Arg) {
        self.args.push(arg);
    }

    pub fn extend_args<'b, I>(&mut self, args: I)
    where
        I: IntoIterator<Item = &'b Arg>,
    {
        self.args.extend(args.into_iter().cloned());
    }

    /// Renders a value used as a piece of SQL (a field, a group key...).
    ///
    /// Only [`Value::Sqlizer`] can add arguments here.
    pub fn write_sql(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Text(text) => self.write_str(text),
            Value::Stringer(stringer) => self.write_str(&stringer.to_string()),
            Value::Bytes(bytes) => self.write_bytes(bytes),
            Value::Sqlizer(sqlizer) => sqlizer.to_sql_fast(self),
            Value::Arg(arg) => self.write_str(&arg.to_string()),
        }
    }

    /// Renders a value standing in an argument position (a limit, an update
    /// value...). Everything but bytes and sqlizers is bound to a placeholder.
    pub fn write_arg(&mut self, value: &Value) -> Result<()> {
        match value {
            // bytes bypass the parameterization on purpose
            Value::Bytes(bytes) => self.write_bytes(bytes),
            Value::Sqlizer(sqlizer) => sqlizer.to_sql_fast(self),
            Value::Stringer(stringer) => {
                self.write_placeholder()?;
                self.push_arg(Arg::String(stringer.to_string()));
                Ok(())
            }
            Value::Text(text) => {
                self.write_placeholder()?;
                self.push_arg(Arg::String(text.to_string()));
                Ok(())
            }
            Value::Arg(arg) => {
                self.write_placeholder()?;
                self.push_arg(arg.clone());
                Ok(())
            }
        }
    }

    /// Renders the values as sql, separated by `separator`.
    pub fn write_sql_list(&mut self, values: &[Value], separator: &str) -> Result<()> {
        for (index, value) in values.iter().enumerate() {
            if index > 0 {
                self.write_str(separator)?;
            }
            self.write_sql(value)?;
        }
        Ok(())
    }

    /// Criteria of a `WHERE`, `ON` or `HAVING` are always joined with `AND`.
    #[inline]
    pub fn write_criteria(&mut self, criteria: &[Value]) -> Result<()> {
        self.write_sql_list(criteria, " AND ")
    }
}
