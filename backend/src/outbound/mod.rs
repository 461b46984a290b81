//! Outbound adapters implementing the driven ports.
//!
//! Only PostgreSQL persistence lives here; the in-memory fixtures used when
//! no database is configured sit next to their ports in the domain.

pub mod persistence;
