pub mod alerts;
pub mod checklists;
pub mod library;
pub mod validator;

pub mod error;
