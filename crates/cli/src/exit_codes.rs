//! CLI exit code registry.
//!
//! Single source of truth for all exit codes. The tool runs under a
//! scheduler, so the codes are the alerting contract.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain    | Description                               |
//! |---------|-----------|-------------------------------------------|
//! | 0       | Universal | Success                                   |
//! | 1       | Universal | General error (unspecified)               |
//! | 2       | Universal | Usage error (bad args, missing config)    |
//! | 3-9     | Local I/O | Export artifact codes                     |
//! | 50-59   | Fetch     | Qonto API connector codes                 |

/// Success - command completed without errors. Covers the documented
/// non-fatal delivery failure (reported as a warning, not an exit code).
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure (bad data in a fetched document).
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required configuration.
pub const EXIT_USAGE: u8 = 2;

/// CSV export could not be written. Fails the run: a report email must
/// never reference an attachment that was not produced.
pub const EXIT_EXPORT_IO: u8 = 3;

/// Auth rejected by Qonto (401/403).
pub const EXIT_FETCH_AUTH: u8 = 51;

/// Upstream error, malformed response, or network failure.
pub const EXIT_FETCH_UPSTREAM: u8 = 54;
