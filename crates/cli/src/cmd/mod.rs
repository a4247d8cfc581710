pub mod common;
pub mod doctor;
pub mod list;
pub mod output;
pub mod read;
pub mod search;
pub mod serve;
pub mod write;
