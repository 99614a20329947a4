pub mod config;
pub mod gateway;
pub mod signature;
pub mod widget;
