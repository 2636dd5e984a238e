pub mod error;
pub mod sanjo_tsubame;
pub mod status;
pub mod table;
