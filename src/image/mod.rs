//! Image references and registry tag listing

pub mod reference;
pub mod registry;
