//! Aggregation core for startup-funding deal data: load a deals table,
//! filter it by year range, country, and industry, and derive per-dimension
//! funding summaries for a presentation layer.

pub mod dashboard;
pub mod data;
