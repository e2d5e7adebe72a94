//! Validated Quran position types.
//!
//! Memorization progress is recorded as a (surah, ayah, page) triple. The
//! raw integers coming over the wire are validated here: surah numbers
//! against the mushaf's 114 surahs, ayah numbers against each surah's ayah
//! count (Kufan/Hafs counting, 6236 total), and page numbers against the
//! 604-page Madani mushaf.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Number of surahs in the mushaf.
pub const SURAH_COUNT: u16 = 114;

/// Number of pages in the standard Madani mushaf.
pub const PAGE_COUNT: u16 = 604;

/// Ayah count per surah (Kufan/Hafs counting), indexed by surah number - 1.
const AYAH_COUNTS: [u16; SURAH_COUNT as usize] = [
    7, 286, 200, 176, 120, 165, 206, 75, 129, 109, 123, 111, 43, 52, 99, 128, 111, 110, 98, 135,
    112, 78, 118, 64, 77, 227, 93, 88, 69, 60, 34, 30, 73, 54, 45, 83, 182, 88, 75, 85, 54, 53,
    89, 59, 37, 35, 38, 29, 18, 45, 60, 49, 62, 55, 78, 96, 29, 22, 24, 13, 14, 11, 11, 18, 12,
    12, 30, 52, 52, 44, 28, 28, 20, 56, 40, 31, 50, 40, 46, 42, 29, 19, 36, 25, 22, 17, 19, 26,
    30, 20, 15, 21, 11, 8, 8, 19, 5, 8, 8, 11, 11, 8, 3, 9, 5, 4, 7, 3, 6, 3, 5, 4, 5, 6,
];

/// Errors that can occur when validating a Quran position.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuranError {
    /// Surah number outside 1..=114.
    #[error("surah must be between 1 and {SURAH_COUNT}, got {0}")]
    SurahOutOfRange(u16),
    /// Ayah number outside the surah's range.
    #[error("surah {surah} has {count} ayahs, got ayah {ayah}")]
    AyahOutOfRange {
        /// Surah number.
        surah: u16,
        /// Rejected ayah number.
        ayah: u16,
        /// Number of ayahs in that surah.
        count: u16,
    },
    /// Page number outside 1..=604.
    #[error("page must be between 1 and {PAGE_COUNT}, got {0}")]
    PageOutOfRange(u16),
}

/// A surah number (1..=114).
///
/// Deserialization goes through [`Surah::new`], so an out-of-range number in
/// a request body is a deserialization error, not a latent invalid value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Surah(u16);

impl Surah {
    /// Create a `Surah` from a 1-based number.
    ///
    /// # Errors
    ///
    /// Returns `QuranError::SurahOutOfRange` if outside 1..=114.
    pub const fn new(number: u16) -> Result<Self, QuranError> {
        if number >= 1 && number <= SURAH_COUNT {
            Ok(Self(number))
        } else {
            Err(QuranError::SurahOutOfRange(number))
        }
    }

    /// The 1-based surah number.
    #[must_use]
    pub const fn number(self) -> u16 {
        self.0
    }

    /// Number of ayahs in this surah.
    #[must_use]
    #[allow(clippy::indexing_slicing)] // 1..=114 invariant held by construction
    pub const fn ayah_count(self) -> u16 {
        AYAH_COUNTS[self.0 as usize - 1]
    }
}

impl TryFrom<u16> for Surah {
    type Error = QuranError;

    fn try_from(number: u16) -> Result<Self, Self::Error> {
        Self::new(number)
    }
}

impl From<Surah> for u16 {
    fn from(surah: Surah) -> Self {
        surah.0
    }
}

impl fmt::Display for Surah {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A mushaf page number (1..=604).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Page(u16);

impl Page {
    /// Create a `Page` from a 1-based number.
    ///
    /// # Errors
    ///
    /// Returns `QuranError::PageOutOfRange` if outside 1..=604.
    pub const fn new(number: u16) -> Result<Self, QuranError> {
        if number >= 1 && number <= PAGE_COUNT {
            Ok(Self(number))
        } else {
            Err(QuranError::PageOutOfRange(number))
        }
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn number(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for Page {
    type Error = QuranError;

    fn try_from(number: u16) -> Result<Self, Self::Error> {
        Self::new(number)
    }
}

impl From<Page> for u16 {
    fn from(page: Page) -> Self {
        page.0
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A memorization position: surah, ayah within that surah, and mushaf page.
///
/// Deserialization re-validates the whole triple, so an ayah number beyond
/// its surah's count cannot enter through a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPosition")]
pub struct Position {
    /// Surah number.
    pub surah: Surah,
    /// Ayah number within the surah.
    pub ayah: u16,
    /// Mushaf page.
    pub page: Page,
}

/// Unvalidated wire form of [`Position`].
#[derive(Debug, Clone, Copy, Deserialize)]
struct RawPosition {
    surah: u16,
    ayah: u16,
    page: u16,
}

impl TryFrom<RawPosition> for Position {
    type Error = QuranError;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        Self::new(raw.surah, raw.ayah, raw.page)
    }
}

impl Position {
    /// Validate a raw (surah, ayah, page) triple.
    ///
    /// # Errors
    ///
    /// Returns `QuranError` if any component is out of range, including an
    /// ayah number beyond the surah's ayah count.
    pub const fn new(surah: u16, ayah: u16, page: u16) -> Result<Self, QuranError> {
        let surah = match Surah::new(surah) {
            Ok(s) => s,
            Err(e) => return Err(e),
        };

        if ayah < 1 || ayah > surah.ayah_count() {
            return Err(QuranError::AyahOutOfRange {
                surah: surah.number(),
                ayah,
                count: surah.ayah_count(),
            });
        }

        let page = match Page::new(page) {
            Ok(p) => p,
            Err(e) => return Err(e),
        };

        Ok(Self { surah, ayah, page })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} (p. {})", self.surah, self.ayah, self.page)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ayah_table_is_complete() {
        assert_eq!(AYAH_COUNTS.len(), SURAH_COUNT as usize);
        let total: u32 = AYAH_COUNTS.iter().map(|&c| u32::from(c)).sum();
        assert_eq!(total, 6236);
    }

    #[test]
    fn test_surah_bounds() {
        assert!(Surah::new(0).is_err());
        assert!(Surah::new(1).is_ok());
        assert!(Surah::new(114).is_ok());
        assert!(Surah::new(115).is_err());
    }

    #[test]
    fn test_ayah_counts() {
        assert_eq!(Surah::new(1).unwrap().ayah_count(), 7);
        assert_eq!(Surah::new(2).unwrap().ayah_count(), 286);
        assert_eq!(Surah::new(114).unwrap().ayah_count(), 6);
    }

    #[test]
    fn test_page_bounds() {
        assert!(Page::new(0).is_err());
        assert!(Page::new(1).is_ok());
        assert!(Page::new(604).is_ok());
        assert!(Page::new(605).is_err());
    }

    #[test]
    fn test_position_validates_ayah_against_surah() {
        assert!(Position::new(1, 7, 1).is_ok());
        assert!(matches!(
            Position::new(1, 8, 1),
            Err(QuranError::AyahOutOfRange {
                surah: 1,
                ayah: 8,
                count: 7
            })
        ));
        assert!(Position::new(2, 286, 49).is_ok());
        assert!(Position::new(2, 0, 49).is_err());
    }

    #[test]
    fn test_position_serde() {
        let pos = Position::new(36, 12, 440).unwrap();
        let json = serde_json::to_string(&pos).unwrap();
        assert_eq!(json, r#"{"surah":36,"ayah":12,"page":440}"#);
        let parsed: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, pos);
    }

    #[test]
    fn test_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<Surah>("115").is_err());
        assert!(serde_json::from_str::<Page>("605").is_err());
        // ayah 300 does not exist in surah 1
        assert!(
            serde_json::from_str::<Position>(r#"{"surah":1,"ayah":300,"page":1}"#).is_err()
        );
    }

    #[test]
    fn test_position_display() {
        let pos = Position::new(2, 255, 42).unwrap();
        assert_eq!(pos.to_string(), "2:255 (p. 42)");
    }
}
