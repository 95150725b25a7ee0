pub mod manual;
pub mod upload;
