pub mod cli;
pub mod portal;
pub mod upstream;
