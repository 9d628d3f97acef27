//! Shared library for `IntelliGrade`
//! Contains the survey aggregation core and the logger used by the CLI.

pub mod core;
pub mod logger;

pub use self::core::*;
