//! Optional `tracing` events for built and rejected fragments.
//!
//! Enable via the crate feature: `pgfrag = { features = ["tracing"] }`.
//! Bound values are never logged.

use crate::error::FragError;
use crate::fragment::QueryFragment;

#[cfg(feature = "tracing")]
pub(crate) fn built(builder: &'static str, frag: &QueryFragment) {
    tracing::debug!(
        target: "pgfrag.fragment",
        builder,
        fragment = %frag.fragment,
        params = frag.values.len(),
        "built fragment"
    );
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn built(_builder: &'static str, _frag: &QueryFragment) {}

// Rejections are client errors, so they stay at debug.
#[cfg(feature = "tracing")]
pub(crate) fn rejected(builder: &'static str, err: &FragError) {
    tracing::debug!(target: "pgfrag.fragment", builder, error = %err, "rejected input");
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn rejected(_builder: &'static str, _err: &FragError) {}
