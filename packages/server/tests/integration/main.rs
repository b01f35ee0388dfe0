
mod transformer;
mod upload;
