//! Fixed G-code vocabulary of both dialects

/// Line 1 of every LightBurn export starts with this
pub const LIGHTBURN_MARKER: &str = "; LightBurn ";
/// Line 2 of a LinuxCNC-profile export contains this
pub const PROFILE_MARKER: &str = "LinuxCNC device profile";

pub const COMMENT_PREFIX: char = ';';
pub const SOURCE_POWER_PREFIX: &str = "M67 E0 Q";
pub const SOURCE_SPINDLE_STOP: &str = "M9";
pub const SOURCE_METRIC: &str = "G21";

/// Start spindle clockwise; gates the laser enable output
pub const SPINDLE_ON: &str = "M3";
pub const SPINDLE_STOP: &str = "M5";
pub const PROGRAM_END: &str = "M2";
pub const LASER_DISABLE: &str = "M11";
/// Rapid mode, XY plane, cutter compensation off, metric, G54
pub const SETUP: &str = "G00 G17 G40 G21 G54";

/// Lines appended after the last source line
pub const TRAILER: [&str; 3] = [LASER_DISABLE, SPINDLE_STOP, PROGRAM_END];

pub fn is_comment(line: &str) -> bool {
    line.starts_with(COMMENT_PREFIX)
}

/// Rewrite `; text` as `( text )`.
///
/// The delimiter and at most one following space are dropped.
pub fn rewrite_comment(line: &str) -> String {
    let body = line.strip_prefix(COMMENT_PREFIX).unwrap_or(line);
    let body = body.strip_prefix(' ').unwrap_or(body);
    format!("( {body} )")
}

/// Raw operand of a source power directive, if the line is one
pub fn power_operand(line: &str) -> Option<&str> {
    line.strip_prefix(SOURCE_POWER_PREFIX)
}

pub fn power_directive(power: u32) -> String {
    format!("M10 Q{power}")
}
