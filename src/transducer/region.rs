//! Structural position within a source program

/// Where the transducer currently is, relative to comment blocks.
///
/// Comment blocks are numbered from 1: block 1 is the export header, block 2
/// is the first machining operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Region {
    /// Nothing seen yet
    #[default]
    Start,
    /// Inside a run of comment lines
    Comments { block: usize },
    /// Body lines following comment block `block`
    Body { block: usize, lines: usize },
}

/// First comment block after the export header
pub const OPERATION_BLOCK: usize = 2;

impl Region {
    /// Advance over a comment line. Returns the block number when this line
    /// opens a new block.
    pub fn enter_comment(&mut self) -> Option<usize> {
        let (next, opened) = match *self {
            Region::Start => (1, true),
            Region::Comments { block } => (block, false),
            Region::Body { block, .. } => (block + 1, true),
        };
        *self = Region::Comments { block: next };
        opened.then_some(next)
    }

    /// Advance over a body line
    pub fn enter_body(&mut self) {
        *self = match *self {
            Region::Start => Region::Body { block: 0, lines: 1 },
            Region::Comments { block } => Region::Body { block, lines: 1 },
            Region::Body { block, lines } => Region::Body {
                block,
                lines: lines + 1,
            },
        };
    }

    /// True on the first body line directly after a comment block
    pub fn is_first_body_line(&self) -> bool {
        matches!(self, Region::Body { block, lines: 1 } if *block > 0)
    }

    /// Number of the most recent comment block, 0 before the first one
    pub fn block(&self) -> usize {
        match *self {
            Region::Start => 0,
            Region::Comments { block } | Region::Body { block, .. } => block,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_block_is_one() {
        let mut region = Region::default();
        assert_eq!(region.enter_comment(), Some(1));
        assert_eq!(region.enter_comment(), None);
        assert_eq!(region.block(), 1);
    }

    #[test]
    fn test_comment_after_body_opens_next_block() {
        let mut region = Region::default();
        region.enter_comment();
        region.enter_body();
        assert!(region.is_first_body_line());
        region.enter_body();
        assert!(!region.is_first_body_line());
        assert_eq!(region.enter_comment(), Some(OPERATION_BLOCK));
        region.enter_body();
        assert_eq!(region.enter_comment(), Some(3));
    }

    #[test]
    fn test_body_before_any_comment_is_not_first_body_line() {
        let mut region = Region::default();
        region.enter_body();
        assert!(!region.is_first_body_line());
        assert_eq!(region.enter_comment(), Some(1));
    }
}
