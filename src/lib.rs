//! Task-management backend library.
//!
//! Holds everything the binary wires together: configuration, the
//! application error type, domain models, storage traits with their Postgres
//! and in-memory implementations, the authentication subsystem (password
//! hashing, bearer tokens, middleware), the domain services, and the route
//! tree. Integration tests build the same route tree over the in-memory
//! stores.

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod weather;
