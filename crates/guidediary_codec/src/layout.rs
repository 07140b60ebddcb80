//! Fixed record layout of a Dolphin Guide diary file.
//!
//! Every record is exactly [`RECORD_LEN`] bytes, little-endian:
//!
//! | field | size |
//! |---|---|
//! | year, month, day, hour | 4 x u32 |
//! | prepad | [`PREPAD_LEN`] spaces |
//! | content | [`CONTENT_LEN`] bytes |
//! | endmark | `01 00` |
//! | zeroend | 8 zero bytes |

/// Length of one record in bytes.
pub const RECORD_LEN: usize = 576;

/// Number of u32 timestamp fields (year, month, day, hour).
pub const DATE_FIELDS: usize = 4;

/// Length of the timestamp header in bytes.
pub const DATE_LEN: usize = DATE_FIELDS * 4;

/// Length of the space padding between the timestamp and the content.
pub const PREPAD_LEN: usize = 50;

/// Length of the end marker.
pub const ENDMARK_LEN: usize = 2;

/// Length of the trailing zero block.
pub const ZEROEND_LEN: usize = 8;

/// Length of the content field.
pub const CONTENT_LEN: usize = RECORD_LEN - DATE_LEN - PREPAD_LEN - ENDMARK_LEN - ZEROEND_LEN;

/// Number of trailing zero bytes that files conventionally drop from their last record.
pub const TRUNCATED_TAIL_LEN: usize = 2;

/// Required prepad contents.
pub const PREPAD: [u8; PREPAD_LEN] = [b' '; PREPAD_LEN];

/// Required end marker.
pub const ENDMARK: [u8; ENDMARK_LEN] = [0x01, 0x00];

/// Required trailing zero block.
pub const ZEROEND: [u8; ZEROEND_LEN] = [0; ZEROEND_LEN];

pub(crate) const PREPAD_START: usize = DATE_LEN;
pub(crate) const CONTENT_START: usize = PREPAD_START + PREPAD_LEN;
pub(crate) const ENDMARK_START: usize = CONTENT_START + CONTENT_LEN;
pub(crate) const ZEROEND_START: usize = ENDMARK_START + ENDMARK_LEN;

/// Whether the final record of a file carries its last two zero bytes.
///
/// Files produced by the organiser routinely end two bytes short; the
/// missing bytes are always zero, so they can be restored on read and
/// dropped again on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trailer {
    /// Every record is complete.
    Complete,
    /// The final record is missing its last [`TRUNCATED_TAIL_LEN`] bytes.
    #[default]
    Truncated,
}

impl Trailer {
    /// Infers the trailer convention from a file length.
    ///
    /// A length two short of a whole number of records is `Truncated`;
    /// anything else is treated as `Complete` and validated as such.
    pub fn detect(len: usize) -> Self {
        if len % RECORD_LEN == RECORD_LEN - TRUNCATED_TAIL_LEN {
            Self::Truncated
        } else {
            Self::Complete
        }
    }

    /// Number of bytes the final record is short by.
    pub const fn missing_bytes(self) -> usize {
        match self {
            Self::Complete => 0,
            Self::Truncated => TRUNCATED_TAIL_LEN,
        }
    }
}

impl std::str::FromStr for Trailer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "complete" => Ok(Self::Complete),
            "truncated" => Ok(Self::Truncated),
            other => Err(format!("unknown trailer mode: {other}")),
        }
    }
}
