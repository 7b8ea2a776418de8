use std::fmt;

use colored::Colorize;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::{ChronoLocal, FormatTime};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Renders `<timestamp> - <LEVEL> - <message>`.
///
/// The level is coloured only when the writer accepts ANSI escapes.
pub struct DashFormat {
    timer: ChronoLocal,
}

impl Default for DashFormat {
    fn default() -> Self {
        Self {
            timer: ChronoLocal::new(TIMESTAMP_FORMAT.to_string()),
        }
    }
}

impl<S, N> FormatEvent<S, N> for DashFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        self.timer.format_time(&mut writer)?;

        let level = *event.metadata().level();
        if writer.has_ansi_escapes() {
            write!(writer, " - {} - ", paint(level))?;
        } else {
            write!(writer, " - {level} - ")?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn paint(level: Level) -> colored::ColoredString {
    let text = level.as_str();
    match level {
        Level::ERROR => text.red().bold(),
        Level::WARN => text.yellow(),
        Level::INFO => text.green(),
        Level::DEBUG => text.blue(),
        _ => text.purple(),
    }
}
