//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the process-wide `tracing` subscriber used by every actor and
//! client in the workspace.
//!
//! The actors log each request with the entity type and id as structured fields:
//!
//! ```text
//! INFO Actor started entity_type="StoredOrder"
//! INFO Created entity_type="StoredOrder" id=order_1760630400000_9f0c2a4b1e7d3356 size=1
//! WARN Not found entity_type="StoredOrder" id=order_missing
//! ```
//!
//! Client methods are `#[instrument]`ed, so with `RUST_LOG=debug` each actor line is nested
//! under the span of the call that caused it (e.g. `place_order:` or `advance:`).
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=restaurant=debug,resource_actor=info cargo run
//! ```

/// Installs a compact, `RUST_LOG`-filtered subscriber.
///
/// Module paths are hidden (`with_target(false)`); the `entity_type` field identifies the
/// actor instead. Safe to call more than once: later calls leave the first subscriber in place.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
