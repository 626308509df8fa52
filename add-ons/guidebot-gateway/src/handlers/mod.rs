//! HTTP handlers grouped by resource.

pub(crate) mod sessions;
