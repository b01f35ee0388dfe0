pub mod health;
pub mod inspection;
pub mod transformer;
pub mod upload;
