#![allow(dead_code)]

pub mod architecture;
pub mod fixtures;
pub mod http;
pub mod source;
pub mod temp_db;
