pub mod contact;
pub mod manager;
pub mod validation;
