//! Tracing utilities for statement and identity-map observability.
//!
//! Enable the `tracing` feature to emit events via the `tracing` crate.
//! These macros no-op when the feature is disabled, avoiding `#[cfg]` boilerplate
//! at every call site. The feature check happens in the calling crate, so a
//! crate using them declares its own `tracing` feature.

/// Emit a debug-level tracing event with the SQL text and parameter count.
///
/// ```ignore
/// roster_trace_query!(&sql_str, params.len());
/// ```
#[macro_export]
macro_rules! roster_trace_query {
    ($sql:expr, $param_count:expr) => {
        #[cfg(feature = "tracing")]
        tracing::debug!(sql = %$sql, params = $param_count, "rosterdsl.query");
    };
}

/// Emit an info-level tracing event for a bulk statement and its affected rows.
///
/// ```ignore
/// roster_trace_mutation!("update", "member", affected);
/// ```
#[macro_export]
macro_rules! roster_trace_mutation {
    ($op:literal, $table:expr, $affected:expr) => {
        #[cfg(feature = "tracing")]
        tracing::info!(op = $op, table = %$table, affected = $affected, "rosterdsl.bulk");
    };
}

/// Emit an identity-map event. `warn` is used for reads served while stale.
///
/// ```ignore
/// roster_trace_cache!(debug, "clear", entries);
/// roster_trace_cache!(warn, "stale_read", entries);
/// ```
#[macro_export]
macro_rules! roster_trace_cache {
    (debug, $event:literal, $entries:expr) => {
        #[cfg(feature = "tracing")]
        tracing::debug!(event = $event, entries = $entries, "rosterdsl.session");
    };
    (warn, $event:literal, $entries:expr) => {
        #[cfg(feature = "tracing")]
        tracing::warn!(event = $event, entries = $entries, "rosterdsl.session");
    };
}
