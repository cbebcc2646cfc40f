pub mod builder;
pub mod dto;
pub mod ports;
pub mod sweeper;
pub mod use_cases;
