use std::time::Duration;
use zmapsdk::constants::capture;
use zmapsdk::error::ZmapError;
use zmapsdk::external::BaseTool;

#[tokio::test]
async fn test_base_tool_creation() {
    // Test with a common command that should exist
    let result = BaseTool::new("echo");
    match result {
        Ok(tool) => {
            assert!(!tool.binary_path.is_empty());
        }
        Err(_) => {
            // Expected if echo is not in PATH
        }
    }
}

#[tokio::test]
async fn test_base_tool_invalid_command() {
    let result = BaseTool::new("definitely_not_a_real_command_12345");
    assert!(result.is_err());
}

#[tokio::test]
async fn test_base_tool_execute_command() {
    if let Ok(tool) = BaseTool::new("echo") {
        let result = tool
            .execute_command(&["hello"], Duration::from_secs(5))
            .await;

        match result {
            Ok(output) => {
                assert!(output.success());
                assert!(output.stdout_text().contains("hello"));
                assert!(!output.stdout_truncated);
                assert!(!output.stderr_truncated);
            }
            Err(_) => {
                // Command execution might fail
            }
        }
    }
}

#[tokio::test]
async fn test_timeout_terminates_the_child() {
    if let Ok(tool) = BaseTool::new("sleep") {
        let start = std::time::Instant::now();
        let result = tool
            .execute_command(&["30"], Duration::from_millis(500))
            .await;
        let elapsed = start.elapsed();

        match result {
            Err(ZmapError::ProcessTimeout { duration_ms }) => {
                assert_eq!(duration_ms, 500);
            }
            other => panic!("expected ProcessTimeout, got {:?}", other.map(|o| o.exit_code())),
        }

        // The child is killed and reaped before the error returns, so the
        // call never waits out the full sleep
        assert!(elapsed < Duration::from_secs(5));
    }
}

#[tokio::test]
async fn test_nonzero_exit_carries_code_and_stderr() {
    if let Ok(tool) = BaseTool::new("sh") {
        let result = tool
            .execute_checked(
                &["-c", "echo 'permission denied' >&2; exit 1"],
                Duration::from_secs(5),
            )
            .await;

        match result {
            Err(ZmapError::ProcessExit { code, stderr }) => {
                assert_eq!(code, 1);
                assert_eq!(stderr.trim(), "permission denied");
            }
            other => panic!("expected ProcessExit, got {:?}", other.map(|o| o.exit_code())),
        }
    }
}

#[tokio::test]
async fn test_stdout_capture_is_bounded_and_flagged() {
    if let Ok(tool) = BaseTool::new("sh") {
        // Emit twice the capture cap
        let script = format!("yes x | head -c {}", capture::MAX_STREAM_BYTES * 2);
        let result = tool
            .execute_command(&["-c", &script], Duration::from_secs(30))
            .await;

        match result {
            Ok(output) => {
                assert!(output.stdout_truncated);
                assert_eq!(output.stdout.len(), capture::MAX_STREAM_BYTES);
            }
            Err(_) => {
                // Shell pipeline may be unavailable in minimal environments
            }
        }
    }
}

#[tokio::test]
async fn test_exit_code_reported() {
    if let Ok(tool) = BaseTool::new("sh") {
        let result = tool
            .execute_command(&["-c", "exit 7"], Duration::from_secs(5))
            .await;

        if let Ok(output) = result {
            assert!(!output.success());
            assert_eq!(output.exit_code(), 7);
        }
    }
}
