pub mod claim;
pub mod token;
