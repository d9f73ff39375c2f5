//! GitHub Actions workflow commands.

/// Escapes a workflow command message.
pub fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Formats an `::error::` command.
pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

/// Marks the step as failed with `message`.
///
/// The runner reads the command from stdout; the exit code is up to the caller.
pub fn set_failed(message: &str) {
    println!("{}", error_command(message));
}

/// Whether the runner has step debug logging enabled.
pub fn is_debug() -> bool {
    std::env::var("RUNNER_DEBUG").is_ok_and(|v| v == "1")
}
