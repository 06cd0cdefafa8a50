//! Placeholder avatar colors.
//!
//! A contact without a resolvable avatar image gets a filled circle in one
//! of six palette colors. The color is derived from the display name with
//! name hash v1 so it stays the same across restarts and builds.

/// Version of the name hash used for palette selection.
///
/// Changing [`name_hash`] in any observable way means bumping this.
pub const NAME_HASH_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AvatarColor {
    Blue,
    Green,
    Orange,
    Pink,
    Purple,
    Cyan,
}

impl AvatarColor {
    /// Palette in index order.
    pub const ALL: [AvatarColor; 6] = [
        AvatarColor::Blue,
        AvatarColor::Green,
        AvatarColor::Orange,
        AvatarColor::Pink,
        AvatarColor::Purple,
        AvatarColor::Cyan,
    ];

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            AvatarColor::Blue => (0x21, 0x96, 0xF3),
            AvatarColor::Green => (0x4C, 0xAF, 0x50),
            AvatarColor::Orange => (0xFF, 0x98, 0x00),
            AvatarColor::Pink => (0xE9, 0x1E, 0x63),
            AvatarColor::Purple => (0x9C, 0x27, 0xB0),
            AvatarColor::Cyan => (0x00, 0xBC, 0xD4),
        }
    }

    pub fn hex(self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }
}

/// Name hash v1: `h = 31 * h + unit` over the UTF-16 code units of `name`,
/// starting from 0, with wrapping 32-bit signed arithmetic.
///
/// The result is frequently negative.
pub fn name_hash(name: &str) -> i32 {
    name.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Maps any hash onto `0..AvatarColor::ALL.len()`.
pub fn palette_index(hash: i32) -> usize {
    // rem_euclid, not %: a negative hash must not produce a negative index
    hash.rem_euclid(AvatarColor::ALL.len() as i32) as usize
}

pub fn color_for(name: &str) -> AvatarColor {
    AvatarColor::ALL[palette_index(name_hash(name))]
}

/// Up to two uppercase initials taken from the first and last words.
pub fn initials(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    let first_char = |w: &str| w.chars().next().into_iter().flat_map(char::to_uppercase);

    match words.as_slice() {
        [] => String::new(),
        [only] => first_char(*only).collect(),
        [first, .., last] => first_char(*first).chain(first_char(*last)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_is_six_distinct_colors() {
        let mut hexes: Vec<String> = AvatarColor::ALL.iter().map(|c| c.hex()).collect();
        hexes.sort();
        hexes.dedup();
        assert_eq!(hexes.len(), 6);
        assert_eq!(AvatarColor::Blue.hex(), "#2196F3");
        assert_eq!(AvatarColor::Cyan.hex(), "#00BCD4");
    }

    #[test]
    fn test_name_hash_pinned_values() {
        assert_eq!(name_hash(""), 0);
        assert_eq!(name_hash("Aa"), 2112);
        assert_eq!(name_hash("Martha Craig"), 738482527);
        assert_eq!(name_hash("Jamie Franco"), -1914844525);
        assert_eq!(name_hash("é"), 233);
        // surrogate pair counts as two code units
        assert_eq!(name_hash("😀"), 1772899);
    }

    #[test]
    fn test_palette_index_handles_negative_hashes() {
        assert_eq!(palette_index(-1), 5);
        assert_eq!(palette_index(-6), 0);
        assert_eq!(palette_index(i32::MIN), (i32::MIN as i64).rem_euclid(6) as usize);
        assert!(palette_index(i32::MAX) < 6);
    }

    #[test]
    fn test_color_for_empty_name() {
        assert_eq!(color_for(""), AvatarColor::Blue);
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Martha Craig"), "MC");
        assert_eq!(initials("  tabitha   potter "), "TP");
        assert_eq!(initials("Cher"), "C");
        assert_eq!(initials("Mary Ann Evans"), "ME");
        assert_eq!(initials(""), "");
        assert_eq!(initials("élodie durand"), "ÉD");
    }
}
