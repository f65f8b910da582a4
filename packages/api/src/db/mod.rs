//! # Database module
//!
//! The registry's records, users and pending OAuth states live in PostgreSQL.
//! Everything here is gated behind `#[cfg(feature = "server")]` so client (WASM)
//! builds never pull in SQLx or Tokio networking code.
//!
//! [`get_pool`] returns a lazily created, process-wide `&'static PgPool` built
//! from `DATABASE_URL` (at most `DATABASE_MAX_CONNECTIONS` connections,
//! default 5). Schema migrations live in `packages/api/migrations` and are run
//! by the web server at startup.

#[cfg(feature = "server")]
mod pool;

#[cfg(feature = "server")]
pub use pool::get_pool;
