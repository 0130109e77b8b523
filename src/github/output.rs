//! Step output sink

use crate::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Writes `key=value` step outputs to the runner's output file, or to
/// stdout in the legacy `::set-output` form when no output file is usable.
#[derive(Debug, Clone, Default)]
pub struct OutputSink {
    path: Option<PathBuf>,
}

impl OutputSink {
    pub fn new(path: Option<&Path>) -> Self {
        Self {
            path: path.map(Path::to_path_buf),
        }
    }

    /// Output file to append to, if its directory exists
    pub fn file(&self) -> Option<&Path> {
        self.path
            .as_deref()
            .filter(|path| path.parent().is_some_and(|dir| dir.is_dir()))
    }

    /// Emit all outputs, falling back to `stdout` if the file is unusable
    pub fn emit<W: Write>(&self, outputs: &[(&str, String)], stdout: &mut W) -> Result<()> {
        if let Some(path) = self.file() {
            let lines: Vec<String> = outputs
                .iter()
                .map(|(key, value)| file_command_entry(key, value))
                .collect();
            match append_lines(path, &lines) {
                Ok(()) => return Ok(()),
                Err(e) => tracing::error!(
                    "Failed to write outputs to {}: {}, printing instead",
                    path.display(),
                    e
                ),
            }
        }

        for (key, value) in outputs {
            writeln!(stdout, "::set-output name={}::{}", key, escape_data(value))?;
        }
        Ok(())
    }
}

/// Format one `key=value` entry for a runner file command.
///
/// Values spanning several lines use the `key<<DELIMITER` heredoc form so
/// their contents cannot be read as further entries.
pub fn file_command_entry(key: &str, value: &str) -> String {
    if !value.contains('\n') && !value.contains('\r') {
        return format!("{}={}", key, value);
    }
    let delimiter = loop {
        let candidate = format!("ghadelimiter_{}", Uuid::new_v4());
        if !key.contains(&candidate) && !value.contains(&candidate) {
            break candidate;
        }
    };
    format!("{}<<{}\n{}\n{}", key, delimiter, value, delimiter)
}

/// Escape a value for the single-line workflow command protocol
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Append lines to a file, creating it if needed
pub fn append_lines(path: &Path, lines: &[String]) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    for line in lines {
        writeln!(file, "{}", line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn outputs() -> Vec<(&'static str, String)> {
        vec![
            ("dockerfile", "./Dockerfile".to_string()),
            ("push", "false".to_string()),
        ]
    }

    #[test]
    fn test_emit_appends_to_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("github_output");
        fs::write(&path, "existing=1\n").unwrap();

        let mut stdout = Vec::new();
        OutputSink::new(Some(path.as_path()))
            .emit(&outputs(), &mut stdout)
            .unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "existing=1\ndockerfile=./Dockerfile\npush=false\n"
        );
        assert!(stdout.is_empty());
    }

    #[test]
    fn test_emit_falls_back_without_directory() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing-dir/github_output");

        let mut stdout = Vec::new();
        OutputSink::new(Some(path.as_path()))
            .emit(&outputs(), &mut stdout)
            .unwrap();

        assert!(!path.exists());
        assert_eq!(
            String::from_utf8(stdout).unwrap(),
            "::set-output name=dockerfile::./Dockerfile\n::set-output name=push::false\n"
        );
    }

    #[test]
    fn test_emit_multiline_value_uses_heredoc() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("github_output");

        let outputs = vec![("target", "build\npush=true".to_string())];
        let mut stdout = Vec::new();
        OutputSink::new(Some(path.as_path()))
            .emit(&outputs, &mut stdout)
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        let delimiter = lines[0].strip_prefix("target<<").unwrap();
        assert!(delimiter.starts_with("ghadelimiter_"));
        assert_eq!(lines[1], "build");
        assert_eq!(lines[2], "push=true");
        assert_eq!(lines[3], delimiter);
    }

    #[test]
    fn test_file_command_entry_single_line() {
        assert_eq!(file_command_entry("push", "false"), "push=false");
        assert_eq!(file_command_entry("ARG", "a=b"), "ARG=a=b");
    }

    #[test]
    fn test_stdout_fallback_escapes_newlines() {
        let outputs = vec![("target", "a\r\nb 100%".to_string())];
        let mut stdout = Vec::new();
        OutputSink::new(None).emit(&outputs, &mut stdout).unwrap();
        assert_eq!(
            String::from_utf8(stdout).unwrap(),
            "::set-output name=target::a%0D%0Ab 100%25\n"
        );
    }

    #[test]
    fn test_emit_without_path_prints() {
        let mut stdout = Vec::new();
        OutputSink::new(None).emit(&outputs(), &mut stdout).unwrap();
        assert!(String::from_utf8(stdout)
            .unwrap()
            .starts_with("::set-output name=dockerfile::"));
    }
}
