//! Request handlers, one module per page.

pub mod diagnosis;
pub mod listing;
pub mod patient;
pub mod pdf;
