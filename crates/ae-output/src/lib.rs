//! `ae-output` — session trace writers for the ae action engine.
//!
//! | Module     | Contents                                               |
//! |------------|--------------------------------------------------------|
//! | `row`      | `PoseRow`, `StatusRow` plain data rows                 |
//! | `writer`   | `TraceWriter` trait                                    |
//! | `csv`      | `CsvTraceWriter` → `poses.csv`, `statuses.csv`         |
//! | `observer` | `TraceObserver<W>`, a `SessionObserver` over any writer |
//! | `error`    | `OutputError`, `OutputResult<T>`                       |
//!
//! # Usage
//!
//! ```rust,ignore
//! use ae_output::{CsvTraceWriter, TraceObserver};
//!
//! let writer = CsvTraceWriter::new(Path::new("./trace"))?;
//! let mut obs = TraceObserver::new(writer);
//! session.run_until_idle(2_000, &mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("trace error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvTraceWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TraceObserver;
pub use row::{PoseRow, StatusRow};
pub use writer::TraceWriter;
