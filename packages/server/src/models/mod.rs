pub mod inspection;
pub mod shared;
pub mod transformer;
pub mod upload;
