//! Execution-environment context for the MDC
//!
//! `init_context` fills a fixed set of MDC keys describing where the process
//! runs. Each key is read from the environment variable of the same name,
//! except `PID`, which comes from the process itself.

pub const PID: &str = "PID";
pub const SYSTEM_NAME: &str = "SYSTEM_NAME";
pub const HOST_NAME: &str = "HOST_NAME";
pub const SERVICE_NAME: &str = "SERVICE_NAME";
pub const CONTAINER_NAME: &str = "CONTAINER_NAME";
pub const POD_NAME: &str = "POD_NAME";

/// Keys looked up in the environment, in MDC-key order
pub const ENV_CONTEXT_KEYS: [&str; 5] =
    [SYSTEM_NAME, HOST_NAME, SERVICE_NAME, CONTAINER_NAME, POD_NAME];

/// Build the context entries using `lookup` for environment values.
///
/// Absent sources become empty strings.
pub fn collect_context<F>(lookup: F) -> Vec<(String, String)>
where
    F: Fn(&str) -> Option<String>,
{
    let mut entries = Vec::with_capacity(ENV_CONTEXT_KEYS.len() + 1);
    entries.push((PID.to_string(), std::process::id().to_string()));
    for key in ENV_CONTEXT_KEYS {
        entries.push((key.to_string(), lookup(key).unwrap_or_default()));
    }
    entries
}

/// Environment lookup against the process environment
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Name the process was invoked with (`argv[0]`), or an empty string
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
pub fn invocation_name() -> String {
    std::env::args_os()
        .next()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
