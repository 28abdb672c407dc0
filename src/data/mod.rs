//! Data layer: core types, loading, filtering, and aggregation.
//!
//! Architecture:
//! ```text
//!  .csv / .json
//!       │
//!       ▼
//!  ┌──────────┐
//!  │  loader   │  parse + normalize → DealTable (+ schema warning)
//!  └──────────┘
//!       │
//!       ▼
//!  ┌──────────┐
//!  │  filter   │  apply FilterSpec → filtered DealTable
//!  └──────────┘
//!       │
//!       ▼
//!  ┌──────────┐
//!  │ aggregate │  group by dimension, sum amounts → SummaryTable
//!  └──────────┘
//! ```

pub mod aggregate;
pub mod cache;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
