//! # lightburn-uccnc
//!
//! A Rust library for rewriting laser-cutter G-code exported by LightBurn's
//! LinuxCNC device profile into the command dialect of a UCCNC controller.
//!
//! ## Features
//!
//! - **Line transducer**: single pass over the source program, rewriting
//!   comments, laser power (`M67 E0 Q<n>` to `M10 Q<n>`) and the setup block
//! - **Idempotence**: the output header carries the source digest, so an
//!   unchanged source is never converted twice
//! - **Discovery**: walk a directory tree for candidate `.nc` files
//!
//! ## Example
//!
//! ```rust,ignore
//! use lightburn_uccnc::{PowerConfig, ProcessOptions, process_file};
//!
//! let report = process_file("job.nc", &PowerConfig::default(), &ProcessOptions::default())?;
//! println!("{}", report);
//! ```

pub mod config;
pub mod digest;
pub mod discover;
pub mod error;
pub mod processor;
pub mod transducer;

// Re-export commonly used items
pub use config::PowerConfig;
pub use digest::{Stamp, content_digest};
pub use discover::{is_output_file, output_path, walk_match};
pub use error::{ConvertError, Result};
pub use processor::{FileOutcome, FileReport, ProcessOptions, process_all, process_file};
pub use transducer::{
    Conversion, LineTransducer, SkipReason, convert, transduce, validate_header,
};
