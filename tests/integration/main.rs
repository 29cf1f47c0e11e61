//! Integration tests: end-to-end scenarios through the public library API
//! and the dashboard router.

mod api;
mod scenarios;
