//! 运行时

pub mod lifetime;
