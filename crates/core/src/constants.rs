//! Constants used throughout the travelog core crate.
//!
//! Line prefixes written by the renderer. The classifier's patterns accept the same keys.

/// Prefix of the document title line.
pub const TITLE_PREFIX: &str = "#";

/// Prefix of a checkin heading line.
pub const CHECKIN_PREFIX: &str = "##";

/// Key of the checkin identifier line.
pub const ID_KEY: &str = "- id: ";

/// Key of the date line (document date in the header, checkin datetime afterwards).
pub const DATE_KEY: &str = "- date:";

/// Keys of the optional place lines.
pub const FSQ_ID_KEY: &str = "- fsq_id:";
pub const FSQ_NAME_KEY: &str = "- fsq_name:";
pub const FSQ_LATITUDE_KEY: &str = "- fsq_latitude:";
pub const FSQ_LONGITUDE_KEY: &str = "- fsq_longitude:";
pub const FSQ_ADDRESS_KEY: &str = "- fsq_address:";

/// Environment variable holding the UTC offset used to render checkin timestamps.
pub const UTC_OFFSET_ENV: &str = "TRAVELOG_UTC_OFFSET";

/// Output format for normalised checkin timestamps.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";
