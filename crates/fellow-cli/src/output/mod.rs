use std::io::Write;

use serde::Serialize;

use crate::cli::OutputFormat;

/// Serialize a command result: indented for `json`, one line for `raw`.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Raw => serde_json::to_string(value)?,
    };
    Ok(text)
}

/// Write a command result to stdout.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let text = render(value, format)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{text}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use fellow_core::entities::UserRecord;
    use pretty_assertions::assert_eq;

    use super::render;
    use crate::cli::OutputFormat;

    fn ada() -> UserRecord {
        UserRecord {
            id: "ada".into(),
            username: "ada".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
        }
    }

    #[test]
    fn json_is_indented() {
        let out = render(&ada(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["username"], "ada");
        assert!(out.lines().count() > 1);
    }

    #[test]
    fn raw_is_one_line() {
        let out = render(&vec![ada(), ada()], OutputFormat::Raw).expect("raw render should work");
        let parsed: Vec<UserRecord> = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed.len(), 2);
        assert!(!out.contains('\n'));
    }
}
