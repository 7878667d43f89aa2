use crate::tools::registry::ToolCapability;
use crate::types::Result;
use async_trait::async_trait;
use chrono::Utc;

/// Current UTC date and time.
///
/// Input selects the rendering: `iso` for RFC 3339, `unix` for seconds since
/// the epoch, anything else (including empty input) for a readable form.
pub struct Clock;

#[async_trait]
impl ToolCapability for Clock {
    fn name(&self) -> &str {
        "clock"
    }

    fn description(&self) -> &str {
        "Get the current UTC date and time; pass 'iso' or 'unix' to pick the format"
    }

    async fn invoke(&self, input: &str) -> Result<String> {
        let now = Utc::now();

        let output = match input.trim().to_lowercase().as_str() {
            "iso" => now.to_rfc3339(),
            "unix" => now.timestamp().to_string(),
            _ => now.format("%A, %B %d, %Y at %H:%M:%S UTC").to_string(),
        };

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_iso_format() {
        let output = Clock.invoke("iso").await.unwrap();
        assert!(output.contains('T'));
        assert!(output.starts_with("20"));
    }

    #[tokio::test]
    async fn test_unix_format() {
        let output = Clock.invoke("unix").await.unwrap();
        assert!(output.parse::<i64>().is_ok());
    }

    #[tokio::test]
    async fn test_default_format_is_readable() {
        let output = Clock.invoke("").await.unwrap();
        assert!(output.ends_with("UTC"));
    }
}
