use std::fmt;

use crate::{
    arg::Arg,
    error::Result,
    placeholder::PlaceholderFormat,
    writer::FormatContext,
};

const SIZE_HINT: usize = 64;

/// Anything that outputs SQL.
///
/// This is the extension point of the crate: implement it to plug your own
/// snippets anywhere a [`Value`](crate::Value) is accepted.
pub trait Sqlizer: fmt::Debug + Send + Sync {
    /// Writes the sql into the context, appending the arguments it owns in
    /// the same order as the placeholders it writes.
    fn to_sql_fast(&self, context: &mut FormatContext<'_>) -> Result<()>;

    /// Whether the output is already wrapped in parentheses.
    fn is_grouped(&self) -> bool {
        false
    }

    /// Renders the fragment on its own, keeping the `?` placeholders.
    fn to_sql(&self) -> Result<(String, Vec<Arg>)> {
        render(self, "fragment", PlaceholderFormat::Question)
    }
}

impl<S> Sqlizer for std::sync::Arc<S>
where
    S: Sqlizer + ?Sized,
{
    fn to_sql_fast(&self, context: &mut FormatContext<'_>) -> Result<()> {
        (**self).to_sql_fast(context)
    }

    fn is_grouped(&self) -> bool {
        (**self).is_grouped()
    }

    fn to_sql(&self) -> Result<(String, Vec<Arg>)> {
        (**self).to_sql()
    }
}

/// One top level render pass.
///
/// The sink is wrapped by the placeholder rewriter before anything is
/// written. On failure nothing rendered so far leaves this function.
pub(crate) fn render<S>(
    statement: &S,
    kind: &'static str,
    format: PlaceholderFormat,
) -> Result<(String, Vec<Arg>)>
where
    S: Sqlizer + ?Sized,
{
    let mut buffer: Vec<u8> = Vec::with_capacity(SIZE_HINT);
    let mut args = Vec::new();

    let mut writer = format.wrap(&mut buffer);
    let mut context = FormatContext::new(&mut writer, &mut args);
    if let Err(err) = statement.to_sql_fast(&mut context) {
        tracing::debug!(kind, error = %err, "failed to render statement");
        return Err(err);
    }
    writer.finish()?;

    let sql = String::from_utf8(buffer)?;
    tracing::trace!(kind, %format, len = sql.len(), args = args.len(), "rendered statement");
    Ok((sql, args))
}

#[cfg(test)]
mod tests {
    use crate::{condition, testing::MockSqlizer};

    use super::*;

    #[test]
    fn test_fragment_to_sql() {
        let (sql, args) = condition("id = ? AND name = ?", (1, "bob")).to_sql().unwrap();
        assert_eq!("id = ? AND name = ?", sql);
        assert_eq!(vec![Arg::I32(1), Arg::String("bob".to_owned())], args);
    }

    #[test]
    fn test_render_numbered() {
        let fragment = condition("id = ? AND name = ?", (1, "bob"));
        let (sql, args) = render(&fragment, "test", PlaceholderFormat::Dollar).unwrap();
        assert_eq!("id = $1 AND name = $2", sql);
        assert_eq!(2, args.len());
    }

    #[test]
    fn test_render_error_discards_output() {
        let fragment = MockSqlizer::new("id = ?", 1).fail("forced error");
        let err = render(&fragment, "test", PlaceholderFormat::Dollar).unwrap_err();
        assert_eq!("forced error", err.to_string());
    }

    #[test]
    fn test_render_invalid_utf8() {
        let statement = crate::select(crate::bytes(vec![0xffu8, 0xfe]));
        let err = render(&statement, "test", PlaceholderFormat::Question).unwrap_err();
        assert!(matches!(err, crate::Error::InvalidUtf8(_)));
    }
}
