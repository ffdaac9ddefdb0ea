//! PII Redaction for Log Output
//!
//! Log lines built as `field=value<sep>field=value<sep>...` get the values of
//! sensitive fields replaced before they reach any writer.
//!
//! ```rust
//! use platform::redact::filter_datum;
//!
//! let line = filter_datum(
//!     &["password", "date_of_birth"],
//!     "xxx",
//!     "name=egg;email=eggmin@eggsample.com;password=eggcellent;date_of_birth=12/12/1986;",
//!     ";",
//! )
//! .unwrap();
//! assert_eq!(
//!     line,
//!     "name=egg;email=eggmin@eggsample.com;password=xxx;date_of_birth=xxx;"
//! );
//! ```

use std::borrow::Cow;
use std::fmt;
use std::io;

use chrono::Local;
use regex::{NoExpand, Regex};
use tracing::{Event, Subscriber, level_filters::LevelFilter};
use tracing_subscriber::fmt::format::{self, FormatEvent, FormatFields};
use tracing_subscriber::fmt::{FmtContext, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

/// Fields treated as personally identifiable information
pub const PII_FIELDS: [&str; 5] = ["name", "email", "phone", "ssn", "password"];

/// Replacement for redacted values
pub const REDACTION: &str = "***";

/// Separator between `field=value` pairs
pub const SEPARATOR: &str = ";";

/// Target used by [`user_data_logger`]
pub const USER_DATA_TARGET: &str = "user_data";

/// Pre-compiled redaction rule for a set of fields
#[derive(Debug, Clone)]
pub struct Redactor {
    rules: Vec<(Regex, String)>,
}

impl Redactor {
    /// Compile one rule per field
    ///
    /// Values run from `field=` to the first following `separator`
    /// (non-greedy); a value with no separator after it is left alone.
    /// Fails only if a pattern exceeds the regex size limit.
    pub fn new<S: AsRef<str>>(
        fields: &[S],
        redaction: &str,
        separator: &str,
    ) -> Result<Self, regex::Error> {
        let sep = regex::escape(separator);
        let rules = fields
            .iter()
            .map(|field| -> Result<(Regex, String), regex::Error> {
                let field = field.as_ref();
                let pattern = format!("{}=.*?{}", regex::escape(field), sep);
                let regex = Regex::new(&pattern)?;
                Ok((regex, format!("{field}={redaction}{separator}")))
            })
            .collect::<Result<_, regex::Error>>()?;
        Ok(Self { rules })
    }

    /// Rule set for [`PII_FIELDS`] with the default redaction and separator
    pub fn pii() -> Result<Self, regex::Error> {
        Self::new(&PII_FIELDS, REDACTION, SEPARATOR)
    }

    pub fn redact<'a>(&self, message: &'a str) -> Cow<'a, str> {
        let mut message = Cow::Borrowed(message);
        for (regex, replacement) in &self.rules {
            let replaced = match regex.replace_all(&message, NoExpand(replacement)) {
                Cow::Owned(replaced) => Some(replaced),
                Cow::Borrowed(_) => None,
            };
            if let Some(replaced) = replaced {
                message = Cow::Owned(replaced);
            }
        }
        message
    }
}

/// Obfuscate the values of `fields` in `message`
pub fn filter_datum<S: AsRef<str>>(
    fields: &[S],
    redaction: &str,
    message: &str,
    separator: &str,
) -> Result<String, regex::Error> {
    let redactor = Redactor::new(fields, redaction, separator)?;
    Ok(redactor.redact(message).into_owned())
}

/// Event formatter that redacts PII from the rendered line
///
/// Lines look like `[TAG] target LEVEL 2024-01-01 12:00:00,000: message`.
#[derive(Debug, Clone)]
pub struct RedactingFormatter {
    tag: String,
    redactor: Redactor,
}

impl RedactingFormatter {
    /// Formatter tagged `HOLBERTON`, redacting `fields`
    pub fn new<S: AsRef<str>>(fields: &[S]) -> Result<Self, regex::Error> {
        Ok(Self {
            tag: "HOLBERTON".to_string(),
            redactor: Redactor::new(fields, REDACTION, SEPARATOR)?,
        })
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Render and redact one line (without trailing newline)
    pub fn format_line(&self, target: &str, level: &tracing::Level, message: &str) -> String {
        let line = format!(
            "[{}] {} {} {}: {}",
            self.tag,
            target,
            level,
            Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            message
        );
        self.redactor.redact(&line).into_owned()
    }
}

impl<S, N> FormatEvent<S, N> for RedactingFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut message = String::new();
        ctx.field_format()
            .format_fields(format::Writer::new(&mut message), event)?;

        let meta = event.metadata();
        let line = self.format_line(meta.target(), meta.level(), &message);
        writeln!(writer, "{line}")
    }
}

/// Dispatcher for the `user_data` logger
///
/// INFO and above, written to stderr through [`RedactingFormatter`] over
/// [`PII_FIELDS`]. It is independent of the global subscriber: use it with
/// `tracing::dispatcher::with_default` so nothing propagates elsewhere.
pub fn user_data_logger() -> Result<tracing::Dispatch, regex::Error> {
    user_data_logger_with_writer(io::stderr)
}

/// [`user_data_logger`] writing somewhere other than stderr
pub fn user_data_logger_with_writer<W>(make_writer: W) -> Result<tracing::Dispatch, regex::Error>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .event_format(RedactingFormatter::new(&PII_FIELDS)?)
        .with_writer(make_writer)
        .with_ansi(false);

    let subscriber = tracing_subscriber::registry()
        .with(LevelFilter::INFO)
        .with(layer);

    Ok(tracing::Dispatch::new(subscriber))
}
