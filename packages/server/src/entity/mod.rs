pub mod inspection;
pub mod transformer;
