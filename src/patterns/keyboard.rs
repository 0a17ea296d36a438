//! Keyboard walk detection
//!
//! Finds runs of characters that are physically adjacent on a reference
//! US-QWERTY layout ("qwer", "zxcvb", "1qaz"). Matching is case-insensitive
//! on the key face; shifted punctuation is not mapped back to its key.

/// Reference layout, top row first. Column index approximates physical
/// position; the half-key stagger between rows is absorbed by treating a
/// column offset of -1..=1 on a neighboring row as adjacent.
const ROWS: [&str; 4] = ["`1234567890-=", "qwertyuiop[]\\", "asdfghjkl;'", "zxcvbnm,./"];

/// Minimum run length reported as a walk. Three adjacent keys occur too
/// easily by chance.
pub const MIN_WALK_LENGTH: usize = 4;

/// A keyboard walk occurrence, in character positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardWalk {
    pub start: usize,
    pub length: usize,
}

fn key_position(key: u8) -> Option<(i32, i32)> {
    for (row, keys) in ROWS.iter().enumerate() {
        if let Some(col) = keys.bytes().position(|k| k == key) {
            return Some((row as i32, col as i32));
        }
    }
    None
}

fn is_adjacent(a: u8, b: u8) -> bool {
    match (key_position(a), key_position(b)) {
        (Some((ra, ca)), Some((rb, cb))) => {
            let dr = (ra - rb).abs();
            let dc = ca - cb;
            (dr == 0 && dc.abs() == 1) || (dr == 1 && (-1..=1).contains(&dc))
        }
        _ => false,
    }
}

/// Find all maximal walks of [`MIN_WALK_LENGTH`] or more keys in an
/// ASCII-folded haystack.
pub fn find_walks(folded: &[u8]) -> Vec<KeyboardWalk> {
    let mut walks = Vec::new();
    let mut start = 0;
    while start + 1 < folded.len() {
        let mut end = start;
        while end + 1 < folded.len() && is_adjacent(folded[end], folded[end + 1]) {
            end += 1;
        }
        let length = end - start + 1;
        if length >= MIN_WALK_LENGTH {
            walks.push(KeyboardWalk { start, length });
        }
        start = end.max(start + 1);
    }
    walks
}
