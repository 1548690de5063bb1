// src/config/consts.rs

// Net config
pub const HOST: &str = "docs.aws.amazon.com";
pub const PORT: u16 = 80;
pub const BASE_PATH: &str = "/service-authorization/latest/reference";

// Table vocabulary
//
// Rows whose first cell carries this marker only exist to satisfy rowspan
// bookkeeping on a few noisy pages (ec2:RunInstances); their text is noise.
pub const IGNORE_ROW_MARKER: &str = "SCENARIO";
pub const PERMISSION_ONLY_TAG: &str = "[permission only]";
pub const UNDOCUMENTED_DESCRIPTION: &str = "Not Documented by AWS";

// Concurrency
pub const WORKERS: usize = 4;
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite
pub const JITTER_MS: u64 = 50; // extra 0..50 ms
