//! Format constants for IOS shell files
//!
//! Markers, section names, fixed offsets and lookup tables shared by the
//! header parser, data decoder and time normalizer.

// =============================================================================
// Line Markers
// =============================================================================

/// Sigil introducing a top-level section (`*FILE`, `*LOCATION`, ...)
pub const SECTION_SIGIL: char = '*';

/// Sigil introducing a subsection (`$TABLE: CHANNELS`, ...)
pub const SUBSECTION_SIGIL: char = '$';

/// Sigil introducing a comment line
pub const COMMENT_SIGIL: char = '!';

/// Key/value separator inside a section
pub const KEY_VALUE_SEPARATOR: char = ':';

/// Literal closing a subsection (compared against the first four characters)
pub const SUBSECTION_END: &str = "$END";

/// Marker separating the header from the data block
pub const END_OF_HEADER: &str = "*END OF HEADER";

/// Marker line carrying the header version
pub const HEADER_VERSION_MARKER: &str = "*IOS HEADER VERSION";

/// Column where the 4-character header version token starts
pub const HEADER_VERSION_COLUMN: usize = 20;

/// Width of the header version token
pub const HEADER_VERSION_WIDTH: usize = 4;

/// Subsection headers are detected by a `$` in this column window
pub const SUBSECTION_WINDOW: std::ops::Range<usize> = 1..5;

/// Header scanning starts after the creation stamp and version lines
pub const FIRST_SECTION_LINE: usize = 2;

// =============================================================================
// Section and Key Names
// =============================================================================

pub mod sections {
    pub const FILE: &str = "FILE";
    pub const ADMINISTRATION: &str = "ADMINISTRATION";
    pub const LOCATION: &str = "LOCATION";
    pub const INSTRUMENT: &str = "INSTRUMENT";
    pub const DEPLOYMENT: &str = "DEPLOYMENT";
    pub const RECOVERY: &str = "RECOVERY";
    pub const COMMENTS: &str = "COMMENTS";
    pub const REMARKS: &str = "REMARKS";
    pub const HISTORY: &str = "HISTORY";

    /// Sections whose line order carries the meaning
    pub const FREE_TEXT: &[&str] = &[COMMENTS, REMARKS, HISTORY];
}

pub mod keys {
    pub const START_TIME: &str = "START TIME";
    pub const NUMBER_OF_RECORDS: &str = "NUMBER OF RECORDS";
    pub const NUMBER_OF_CHANNELS: &str = "NUMBER OF CHANNELS";
    pub const TIME_INCREMENT: &str = "TIME INCREMENT";
    pub const FORMAT: &str = "FORMAT";
    pub const PAD: &str = "PAD";
    pub const LATITUDE: &str = "LATITUDE";
    pub const LONGITUDE: &str = "LONGITUDE";
}

pub mod tables {
    pub const CHANNELS: &str = "$TABLE: CHANNELS";
    pub const CHANNEL_DETAIL: &str = "$TABLE: CHANNEL DETAIL";
}

// =============================================================================
// Time Handling
// =============================================================================

/// Fixed UTC offsets (hours to add to local time) for recognized zone tokens.
/// No daylight-saving transitions are applied.
pub const TIME_ZONE_OFFSETS: &[(&str, i64)] = &[
    ("GMT", 0),
    ("UTC", 0),
    ("PST", 8),
    ("PDT", 7),
    ("MST", 7),
    ("MDT", 6),
    ("AST", 4),
    ("ADT", 3),
];

/// Maximum allowed gap between the declared start time and the first record
pub const START_TIME_TOLERANCE_SECONDS: i64 = 60;

// =============================================================================
// Data Decoding
// =============================================================================

/// Byte width of a date-only field (`YYYY/MM/DD` plus leading pad)
pub const DATE_FIELD_WIDTH: usize = 11;

/// Byte width of a combined date-time field
pub const DATE_TIME_FIELD_WIDTH: usize = 17;

/// Widths for time-of-day sub-formats
pub const TIME_FORMAT_WIDTHS: &[(&str, usize)] =
    &[("HH:MM:SS.SS", 12), ("HH:MM:SS", 9), ("HH:MM", 6)];

// =============================================================================
// Identity Resolution
// =============================================================================

/// Number of code suffixes tried before the last attempt is accepted anyway
pub const MAX_SUFFIX_ATTEMPTS: u32 = 4;

/// Geographic area label used when no polygon contains the location
pub const NO_GEOGRAPHIC_AREA: &str = "None";
