//! Villa Directory and Reservation Ledger HTTP services.
//!
//! Exposes the core building blocks (config, state, error handling, routes,
//! collaborator clients, booking orchestration) so integration tests and the
//! binary entrypoint can both access them.

pub mod auth;
pub mod booking;
pub mod clients;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod state;
