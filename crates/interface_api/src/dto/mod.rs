//! Response bodies owned by the HTTP layer
//!
//! Claims themselves go out as the domain types, which already carry their
//! wire shape.

pub mod health;
