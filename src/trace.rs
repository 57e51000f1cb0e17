//! Pipeline spans and events behind the `tracing` feature.
//!
//! Without the feature both macros expand to no-ops; event field values are
//! still evaluated so bindings used only for logging stay used.

#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($stage:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($stage $(, $($field)*)?)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($stage:expr $(, $($field:tt)*)?) => {
        $crate::trace::NoopSpan
    };
}

#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($stage:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::info!(name: $stage, $($key = $value),+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($stage:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
}

pub(crate) use trace_event;
pub(crate) use trace_span;

/// Guard returned by `trace_span!` when tracing is compiled out.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}
