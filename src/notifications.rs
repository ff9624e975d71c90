/// Cross-platform notification support
/// Currently only implements macOS notifications

#[cfg(target_os = "macos")]
use std::process::Command;

/// Escape a task label for embedding in an AppleScript string
fn escape_for_script(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Send a notification when a cycle runs to completion
pub fn notify_cycle_finished(task: &str) {
    let body = escape_for_script(task);

    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "{}" with title "Pomodoro - Cycle Finished" sound name "Glass""#,
            body
        );

        if let Err(e) = Command::new("osascript").arg("-e").arg(&script).output() {
            tracing::debug!(error = %e, "notification failed");
        }
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No-op on other platforms
        let _ = body;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_for_script() {
        assert_eq!(escape_for_script(r#"Say "hi""#), r#"Say \"hi\""#);
        assert_eq!(escape_for_script(r"a\b"), r"a\\b");
    }
}
