//! JSON request and response handling.
//!
//! Requests arrive as one camelCase JSON document; results are written as
//! a list of snake_case transfer paths.

pub mod request;
pub mod response;

pub use request::{FixedTransferInput, RequestError, SolveRequest};
pub use response::{round2, GameweekRow, MoveRow, TransferPath};
