//! Log output for branch-sweep.
//!
//! All log lines go through `tracing`. The formatter renders levels as GitHub
//! Actions workflow commands so the runner turns warnings and errors into
//! annotations:
//!
//! - ERROR: `::error::<message>`
//! - WARN: `::warning::<message>`
//! - INFO: `<message>`
//! - DEBUG/TRACE: `::debug::<message>` (shown when step debugging is on)
//!
//! The level filter comes from `BRANCH_SWEEP_LOG` (an `EnvFilter` directive),
//! defaulting to `info`.

use std::fmt;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "BRANCH_SWEEP_LOG";

/// Event formatter emitting workflow-command prefixes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionsFormat;

impl<S, N> FormatEvent<S, N> for ActionsFormat
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
        writer.write_str(level_prefix(*event.metadata().level()))?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Workflow-command prefix for a level.
pub fn level_prefix(level: Level) -> &'static str {
    if level == Level::ERROR {
        "::error::"
    } else if level == Level::WARN {
        "::warning::"
    } else if level == Level::INFO {
        ""
    } else {
        "::debug::"
    }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .event_format(ActionsFormat)
        .try_init();
}
