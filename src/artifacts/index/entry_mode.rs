use crate::errors::{Error, Result};

const TYPE_MASK: u32 = 0o170000;
const DIRECTORY_TYPE: u32 = 0o040000;

/// Unix mode bits as stored in index entries and tree objects
///
/// Any 32-bit value is representable; the named constants are the modes this
/// crate produces itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryMode(u32);

impl EntryMode {
    pub const REGULAR: EntryMode = EntryMode(0o100644);
    pub const EXECUTABLE: EntryMode = EntryMode(0o100755);
    pub const DIRECTORY: EntryMode = EntryMode(DIRECTORY_TYPE);

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    pub fn is_directory(&self) -> bool {
        self.0 & TYPE_MASK == DIRECTORY_TYPE
    }

    /// Parse the octal form used inside tree objects (`100644`, `40000`, ...)
    pub fn from_octal_str(value: &str) -> Result<Self> {
        u32::from_str_radix(value, 8)
            .map(EntryMode)
            .map_err(|_| Error::CorruptObject(format!("invalid entry mode '{value}'")))
    }
}

impl Default for EntryMode {
    fn default() -> Self {
        EntryMode::REGULAR
    }
}

impl From<u32> for EntryMode {
    fn from(mode: u32) -> Self {
        EntryMode(mode)
    }
}

impl From<EntryMode> for u32 {
    fn from(mode: EntryMode) -> Self {
        mode.0
    }
}

/// Six-digit, zero-padded octal, as listings print it
impl std::fmt::Display for EntryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:06o}", self.0)
    }
}
