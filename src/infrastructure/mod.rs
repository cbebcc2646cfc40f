pub mod persistence;
pub mod security;
pub mod storage;
