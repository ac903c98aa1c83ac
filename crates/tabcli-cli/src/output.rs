//! JSON response envelope printed to stdout.
//!
//! Every command produces `{"success": bool, "data": ..., "error": ...}` and
//! the process exits 0 on success, 1 on failure. Logs go to stderr so stdout
//! stays machine-readable.

use std::process::ExitCode;

use serde::Serialize;

#[derive(Serialize)]
struct Envelope {
    success: bool,
    data: Option<serde_json::Value>,
    error: Option<String>,
}

/// Print the envelope for a command result and map it to an exit code.
pub fn emit(result: anyhow::Result<serde_json::Value>) -> ExitCode {
    let (envelope, code) = match result {
        Ok(data) => (
            Envelope {
                success: true,
                data: Some(data),
                error: None,
            },
            ExitCode::SUCCESS,
        ),
        Err(e) => (
            Envelope {
                success: false,
                data: None,
                // {:#} renders the whole context chain on one line
                error: Some(format!("{:#}", e)),
            },
            ExitCode::FAILURE,
        ),
    };

    match serde_json::to_string_pretty(&envelope) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: failed to serialize response: {}", e);
            return ExitCode::FAILURE;
        }
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let envelope = Envelope {
            success: true,
            data: Some(serde_json::json!({"sites": []})),
            error: None,
        };
        let value = serde_json::to_value(&envelope).expect("serialize failed");
        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["sites"], serde_json::json!([]));
        assert_eq!(value["error"], serde_json::Value::Null);
    }

    #[test]
    fn test_failure_envelope_shape() {
        let envelope = Envelope {
            success: false,
            data: None,
            error: Some("Authentication failed (HTTP 401): bad token".to_string()),
        };
        let value = serde_json::to_value(&envelope).expect("serialize failed");
        assert_eq!(value["success"], false);
        assert_eq!(value["data"], serde_json::Value::Null);
        assert!(value["error"]
            .as_str()
            .expect("error should be a string")
            .contains("401"));
    }
}
