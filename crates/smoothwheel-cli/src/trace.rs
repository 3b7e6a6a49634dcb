//! Recorded tick traces.
//!
//! One JSON object per line; blank lines and lines starting with `#` are
//! skipped:
//!
//! ```text
//! {"v": -1, "x": 640, "y": 400, "app": "com.example.editor", "at_ms": 0}
//! {"v": -2, "x": 640, "y": 400, "app": "com.example.editor", "at_ms": 12}
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use smoothwheel_core::{AppId, LineDelta, Point, TickInput};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TraceLine {
    /// Vertical wheel lines
    #[serde(default)]
    pub v: i64,
    /// Horizontal wheel lines
    #[serde(default)]
    pub h: i64,
    /// Pointer position
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    /// Frontmost application
    #[serde(default = "default_app")]
    pub app: String,
    /// Milliseconds since the start of the recording
    #[serde(default)]
    pub at_ms: Option<u64>,
    /// Modifier asked for horizontal scrolling
    #[serde(default)]
    pub horizontal: bool,
}

fn default_app() -> String {
    "unknown".to_string()
}

impl TraceLine {
    pub fn to_input(&self) -> TickInput {
        let mut input = TickInput::new(
            LineDelta::new(self.v, self.h),
            Point::new(self.x, self.y),
            AppId::new(self.app.clone()),
        );
        input.reroute_horizontal = self.horizontal;
        input
    }
}

pub fn parse(content: &str) -> Result<Vec<TraceLine>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(n, line)| {
            serde_json::from_str::<TraceLine>(line).with_context(|| format!("Invalid trace line {}", n + 1))
        })
        .collect()
}

pub fn load(path: &Path) -> Result<Vec<TraceLine>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read trace {}", path.display()))?;
    parse(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trace() {
        let lines = parse(
            r#"
            # recorded on a laptop
            {"v": -1, "x": 10, "y": 20, "app": "com.example.editor", "at_ms": 0}

            {"h": 2, "horizontal": true}
            "#,
        )
        .unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].v, -1);
        assert_eq!(lines[0].at_ms, Some(0));
        assert_eq!(lines[1].app, "unknown");

        let input = lines[1].to_input();
        assert_eq!(input.lines, LineDelta::new(0, 2));
        assert!(input.reroute_horizontal);
    }

    #[test]
    fn test_parse_reports_line_number() {
        let err = parse("{\"v\": 1}\n{oops}\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
