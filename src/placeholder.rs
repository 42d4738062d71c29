use std::{fmt, ops::Range, str::FromStr};

use crate::{
    error::{Error, Result},
    writer::SqlWrite,
};

/// The generic placeholder every fragment writes.
pub const MARKER: u8 = b'?';

/// Returns `count` placeholders separated by a comma: `?,?,?`.
pub fn placeholders(count: usize) -> String {
    let mut out = String::with_capacity(count.saturating_mul(2));
    for index in 0..count {
        if index > 0 {
            out.push(',');
        }
        out.push('?');
    }
    out
}

/// How `?` placeholders are written in the final sql.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderFormat {
    /// `?`, left untouched (MySQL, SQLite).
    #[default]
    Question,
    /// `$1`, `$2`... (PostgreSQL)
    Dollar,
    /// `:1`, `:2`... (Oracle)
    Colon,
    /// `@p1`, `@p2`... (SQL Server)
    AtP,
}

impl PlaceholderFormat {
    /// Prefix of the numbered form, `None` when `?` is kept as is.
    pub fn prefix(self) -> Option<&'static str> {
        match self {
            PlaceholderFormat::Question => None,
            PlaceholderFormat::Dollar => Some("$"),
            PlaceholderFormat::Colon => Some(":"),
            PlaceholderFormat::AtP => Some("@p"),
        }
    }

    /// Wraps the sink for one render pass.
    ///
    /// [`PlaceholderWriter::finish`] must be called once everything has been
    /// written.
    pub fn wrap<'a>(self, writer: &'a mut dyn SqlWrite) -> PlaceholderWriter<'a> {
        match self.prefix() {
            None => PlaceholderWriter::Plain(writer),
            Some(prefix) => PlaceholderWriter::Numbered(NumberedWriter::new(writer, prefix)),
        }
    }

    /// Rewrites the placeholders of a complete sql string at once.
    ///
    /// ```
    /// use sqlf::PlaceholderFormat;
    ///
    /// let sql = PlaceholderFormat::Dollar.replace("a = ? AND b ?? 'k'").unwrap();
    /// assert_eq!("a = $1 AND b ? 'k'", sql);
    /// ```
    pub fn replace(self, sql: &str) -> Result<String> {
        let mut out = String::with_capacity(sql.len() + 8);
        let mut writer = self.wrap(&mut out);
        writer.write_str(sql)?;
        writer.finish()?;
        Ok(out)
    }
}

impl fmt::Display for PlaceholderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceholderFormat::Question => f.write_str("question"),
            PlaceholderFormat::Dollar => f.write_str("dollar"),
            PlaceholderFormat::Colon => f.write_str("colon"),
            PlaceholderFormat::AtP => f.write_str("atp"),
        }
    }
}

impl FromStr for PlaceholderFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "question" | "?" => Ok(PlaceholderFormat::Question),
            "dollar" | "$" => Ok(PlaceholderFormat::Dollar),
            "colon" | ":" => Ok(PlaceholderFormat::Colon),
            "atp" | "@p" => Ok(PlaceholderFormat::AtP),
            _ => Err(Error::InvalidPlaceholderFormat(s.to_owned())),
        }
    }
}

/// The sink of a render pass, as returned by [`PlaceholderFormat::wrap`].
pub enum PlaceholderWriter<'a> {
    Plain(&'a mut dyn SqlWrite),
    Numbered(NumberedWriter<'a>),
}

impl PlaceholderWriter<'_> {
    pub fn finish(&mut self) -> Result<()> {
        match self {
            PlaceholderWriter::Plain(_) => Ok(()),
            PlaceholderWriter::Numbered(numbered) => numbered.finish(),
        }
    }
}

impl SqlWrite for PlaceholderWriter<'_> {
    #[inline]
    fn write_str(&mut self, s: &str) -> Result<()> {
        match self {
            PlaceholderWriter::Plain(writer) => writer.write_str(s),
            PlaceholderWriter::Numbered(numbered) => numbered.write_str(s),
        }
    }

    #[inline]
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        match self {
            PlaceholderWriter::Plain(writer) => writer.write_bytes(bytes),
            PlaceholderWriter::Numbered(numbered) => numbered.write_bytes(bytes),
        }
    }

    #[inline]
    fn write_placeholder(&mut self) -> Result<()> {
        match self {
            PlaceholderWriter::Plain(writer) => writer.write_placeholder(),
            PlaceholderWriter::Numbered(numbered) => numbered.write_placeholder(),
        }
    }
}

/// Replaces every `?` written through it by `prefix` + a counter, and `??`
/// by a literal `?`.
///
/// The counter spans all the writes of the render pass. A `?` ending a write
/// is held back until the next write (or [`finish`](Self::finish)) tells
/// whether it starts an escape, so `??` split over two writes still escapes.
pub struct NumberedWriter<'a> {
    writer: &'a mut dyn SqlWrite,
    prefix: &'static str,
    count: usize,
    pending: bool,
}

impl<'a> NumberedWriter<'a> {
    pub fn new(writer: &'a mut dyn SqlWrite, prefix: &'static str) -> Self {
        Self {
            writer,
            prefix,
            count: 0,
            pending: false,
        }
    }

    /// Placeholders numbered so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Flushes a trailing `?` held back by the last write.
    pub fn finish(&mut self) -> Result<()> {
        if self.pending {
            self.pending = false;
            self.write_numbered()?;
        }
        Ok(())
    }

    fn write_numbered(&mut self) -> Result<()> {
        self.count += 1;
        let mut buffer = itoa::Buffer::new();
        self.writer.write_str(self.prefix)?;
        self.writer.write_str(buffer.format(self.count))
    }

    fn write_literal(&mut self) -> Result<()> {
        self.writer.write_str("?")
    }

    /// Scans `input`, emitting the runs between markers through `verbatim`.
    fn rewrite<F>(&mut self, input: &[u8], mut verbatim: F) -> Result<()>
    where
        F: FnMut(&mut (dyn SqlWrite + 'a), Range<usize>) -> Result<()>,
    {
        if input.is_empty() {
            return Ok(());
        }

        let mut cursor = 0;
        if self.pending {
            self.pending = false;
            if input[0] == MARKER {
                self.write_literal()?;
                cursor = 1;
            } else {
                self.write_numbered()?;
            }
        }

        let mut span_start = cursor;
        while let Some(offset) = input[cursor..].iter().position(|&b| b == MARKER) {
            let index = cursor + offset;
            if span_start < index {
                verbatim(&mut *self.writer, span_start..index)?;
            }
            match input.get(index + 1) {
                Some(&MARKER) => {
                    self.write_literal()?;
                    cursor = index + 2;
                }
                Some(_) => {
                    self.write_numbered()?;
                    cursor = index + 1;
                }
                None => {
                    self.pending = true;
                    cursor = index + 1;
                }
            }
            span_start = cursor;
        }

        if span_start < input.len() {
            verbatim(&mut *self.writer, span_start..input.len())?;
        }
        Ok(())
    }
}

impl SqlWrite for NumberedWriter<'_> {
    fn write_str(&mut self, s: &str) -> Result<()> {
        // `?` is ascii, every range lands on a char boundary
        self.rewrite(s.as_bytes(), |writer, range| writer.write_str(&s[range]))
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.rewrite(bytes, |writer, range| writer.write_bytes(&bytes[range]))
    }

    fn write_placeholder(&mut self) -> Result<()> {
        self.finish()?;
        self.write_numbered()
    }
}
