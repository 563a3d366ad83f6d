//! Line transducer
//!
//! Rewrites a LightBurn "LinuxCNC device profile" export into UCCNC G-code in
//! a single pass over its lines:
//!
//! 1. Comments (`; text`) become `( text )`. Opening the second comment block,
//!    the first machining operation, also emits `M3`.
//! 2. Laser power (`M67 E0 Q<n>`) becomes `M10 Q<m>` through [`PowerMapping`].
//!    `Q0` directly after `M9` collapses into a single `M11`.
//! 3. `G21` as the first body line after a comment block becomes the full
//!    setup directive.
//! 4. Everything else passes through unchanged.
//!
//! The program always ends with `M11`, `M5`, `M2`.

pub mod dialect;
pub mod power;
pub mod region;

use std::fmt;

use tracing::debug;

use crate::config::PowerConfig;
use crate::digest::Stamp;
use crate::error::{ConvertError, Result};
use dialect::{
    LASER_DISABLE, LIGHTBURN_MARKER, PROFILE_MARKER, SETUP, SOURCE_METRIC, SOURCE_SPINDLE_STOP,
    SPINDLE_ON, TRAILER,
};
pub use power::PowerMapping;
pub use region::{OPERATION_BLOCK, Region};

/// Why a file was left alone. None of these are failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Line 1 lacks the LightBurn marker
    NotLightBurn,
    /// Line 2 lacks the LinuxCNC device profile marker
    WrongProfile,
    /// The existing output already carries this source's digest
    UpToDate,
    /// The file is itself a converted output
    OwnOutput,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            SkipReason::NotLightBurn => "not a valid LightBurn program",
            SkipReason::WrongProfile => "not a valid LightBurn LinuxCNC profile program",
            SkipReason::UpToDate => "already processed",
            SkipReason::OwnOutput => "converted output, not a source",
        };
        f.write_str(msg)
    }
}

/// Result of running a whole source program through the transducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    Converted(String),
    Skipped(SkipReason),
}

/// Check the two header lines that identify a LightBurn LinuxCNC export
pub fn validate_header(source: &str) -> std::result::Result<(), SkipReason> {
    let mut lines = source.lines();
    match lines.next() {
        Some(line) if line.starts_with(LIGHTBURN_MARKER) => {}
        _ => return Err(SkipReason::NotLightBurn),
    }
    match lines.next() {
        Some(line) if line.contains(PROFILE_MARKER) => Ok(()),
        _ => Err(SkipReason::WrongProfile),
    }
}

/// Validate and convert a complete source program
pub fn convert(source: &str, config: PowerConfig, stamp: Option<&Stamp>) -> Result<Conversion> {
    if let Err(reason) = validate_header(source) {
        return Ok(Conversion::Skipped(reason));
    }
    transduce(source, config, stamp).map(Conversion::Converted)
}

/// Convert a source program whose header has already been validated
pub fn transduce(source: &str, config: PowerConfig, stamp: Option<&Stamp>) -> Result<String> {
    let mut transducer = LineTransducer::new(config, stamp);
    for line in source.lines() {
        transducer.feed(line)?;
    }
    Ok(transducer.finish())
}

/// Streaming state of one conversion
#[derive(Debug)]
pub struct LineTransducer {
    mapping: PowerMapping,
    region: Region,
    line_index: usize,
    previous_line: Option<String>,
    out: String,
}

impl LineTransducer {
    /// Start a conversion. The stamp, when given, becomes the first output line.
    pub fn new(config: PowerConfig, stamp: Option<&Stamp>) -> Self {
        let mut transducer = Self {
            mapping: PowerMapping::new(config),
            region: Region::default(),
            line_index: 0,
            previous_line: None,
            out: String::new(),
        };
        if let Some(stamp) = stamp {
            transducer.emit(&stamp.to_string());
        }
        transducer
    }

    /// Consume one source line (without its line terminator)
    pub fn feed(&mut self, line: &str) -> Result<()> {
        self.line_index += 1;

        if dialect::is_comment(line) {
            let opened = self.region.enter_comment();
            self.emit(&dialect::rewrite_comment(line));
            if opened == Some(OPERATION_BLOCK) {
                debug!(
                    line = self.line_index,
                    block = self.region.block(),
                    "first operation block, enabling spindle"
                );
                self.emit(SPINDLE_ON);
            }
            return Ok(());
        }
        self.region.enter_body();

        if let Some(operand) = dialect::power_operand(line) {
            let value = parse_power(operand).ok_or_else(|| ConvertError::InvalidPower {
                line: self.line_index,
                text: line.to_string(),
            })?;
            if value == 0.0 && self.previous_line.as_deref() == Some(SOURCE_SPINDLE_STOP) {
                self.emit(LASER_DISABLE);
            } else {
                let power = self.mapping.map(value);
                self.emit(&dialect::power_directive(power));
            }
            return Ok(());
        }

        if line == SOURCE_METRIC && self.region.is_first_body_line() {
            self.emit(SETUP);
            return Ok(());
        }

        self.emit(line);
        self.previous_line = Some(line.to_string());
        Ok(())
    }

    /// Append the trailer and return the finished program
    pub fn finish(mut self) -> String {
        for line in TRAILER {
            self.emit(line);
        }
        self.out
    }

    /// Current structural position, mainly for diagnostics
    pub fn region(&self) -> Region {
        self.region
    }

    fn emit(&mut self, line: &str) {
        self.out.push_str(line);
        self.out.push('\n');
    }
}

fn parse_power(operand: &str) -> Option<f64> {
    operand
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}
