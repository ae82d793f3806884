// IMPORTANT:
// Keep ALL numeric values centralized here (no hardcoded numeric values scattered around).

// NOTE: CLIENT_VERSION must stay in sync with the `version` field in Cargo.toml.
pub const CLIENT_VERSION: &str = "0.1.0";

/// Process exit codes. Codes 3-5 are per-request outcomes and only reach the
/// process exit status when `--strict` is given.
pub mod exit {
    pub const SUCCESS: i32 = 0;
    pub const ERR_FILE_NOT_FOUND: i32 = 1;
    pub const ERR_WRONG_JSON: i32 = 2;
    pub const ERR_MISSING_METHOD: i32 = 3;
    pub const ERR_STATUS_CODE: i32 = 4;
    pub const ERR_TRANSPORT: i32 = 5;

    // Logger or TLS setup failed before any request was read.
    pub const ERR_SETUP: i32 = 1;
}

pub mod server {
    pub const DEFAULT_HOST: &str = "localhost";
    pub const DEFAULT_PORT: &str = "8000";
    pub const DEFAULT_USER: &str = "admin";
    pub const DEFAULT_PASSWORD: &str = "admin";

    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    pub const EXPECTED_STATUS: u16 = 200;
}

pub mod output {
    pub const PRETTY_INDENT: &[u8] = b"    ";
}

pub mod logging {
    pub const LOG_FILE_NAME: &str = "spdk_rpc_send";

    pub const LOG_SPEC_DEFAULT: &str = "warn";
    pub const LOG_SPEC_VERBOSE: &str = "debug";

    pub const LOG_ROTATE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
    pub const LOG_ROTATE_KEEP_FILES: usize = 3;
}
