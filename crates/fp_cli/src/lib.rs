//! Match runner library
//!
//! Config loading (YAML / JSON / preset) and JSONL trace writing with a
//! SHA256 checksum, so a recorded match can be verified later.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use fp_core::api::{run_match_with, MatchRequest, MatchResponse};
use fp_core::engine::snapshot::MatchSnapshot;
use fp_core::engine::{EngineConfig, TickReport};

/// Read an engine config. `.json` files are JSON, anything else YAML.
/// Missing keys take their defaults; the result is validated.
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config = if is_json {
        EngineConfig::from_json_str(&text)
    } else {
        EngineConfig::from_yaml_str(&text)
    };
    config.with_context(|| format!("Invalid config: {}", path.display()))
}

/// A config file wins over a preset name; neither means defaults.
pub fn resolve_config(preset: Option<&str>, path: Option<&Path>) -> Result<EngineConfig> {
    if let Some(path) = path {
        return load_config(path);
    }
    match preset {
        None => Ok(EngineConfig::default()),
        Some(name) => match EngineConfig::preset(name) {
            Some(config) => Ok(config),
            None => bail!("Unknown preset '{name}' (expected default, arcade or deterministic)"),
        },
    }
}

/// Summary of a written trace file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceMetadata {
    pub seed: u64,
    pub lines: u64,
    pub bytes: u64,
    /// SHA256 of the whole file (hex)
    pub checksum: String,
}

#[derive(Serialize)]
struct TraceLine<'a> {
    snapshot: MatchSnapshot,
    report: &'a TickReport,
}

/// Run a match and write one JSON line per tick (snapshot plus report).
pub fn run_with_trace(request: &MatchRequest, trace_path: &Path) -> Result<(MatchResponse, TraceMetadata)> {
    if let Some(parent) = trace_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create trace directory: {}", parent.display()))?;
    }
    let file = File::create(trace_path)
        .with_context(|| format!("Failed to create trace file: {}", trace_path.display()))?;
    let mut out = BufWriter::new(file);
    let mut hasher = Sha256::new();
    let mut lines = 0u64;
    let mut bytes = 0u64;
    let mut write_error = None;

    let response = run_match_with(request, |m, report| {
        if write_error.is_some() {
            return;
        }
        let line = TraceLine { snapshot: m.snapshot(), report };
        let mut buf = match serde_json::to_vec(&line) {
            Ok(buf) => buf,
            Err(e) => {
                write_error = Some(anyhow::Error::from(e));
                return;
            }
        };
        buf.push(b'\n');
        hasher.update(&buf);
        lines += 1;
        bytes += buf.len() as u64;
        if let Err(e) = out.write_all(&buf) {
            write_error = Some(e.into());
        }
    })?;

    if let Some(e) = write_error {
        return Err(e.context(format!("Failed to write trace: {}", trace_path.display())));
    }
    out.flush()
        .with_context(|| format!("Failed to flush trace: {}", trace_path.display()))?;

    let metadata = TraceMetadata { seed: request.seed, lines, bytes, checksum: format!("{:x}", hasher.finalize()) };
    Ok((response, metadata))
}

/// Recompute a trace file's checksum and compare.
pub fn verify_trace(trace_path: &Path, expected_checksum: &str) -> Result<bool> {
    let bytes = fs::read(trace_path)
        .with_context(|| format!("Failed to read trace file: {}", trace_path.display()))?;
    let actual = format!("{:x}", Sha256::digest(&bytes));
    Ok(actual == expected_checksum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile, TempDir};

    fn temp_with_suffix(suffix: &str, contents: &str) -> Result<NamedTempFile> {
        let mut file = Builder::new().suffix(suffix).tempfile()?;
        file.write_all(contents.as_bytes())?;
        Ok(file)
    }

    #[test]
    fn test_load_yaml_overrides() -> Result<()> {
        let file = temp_with_suffix(".yaml", "ball:\n  max_speed: 450.0\nrules:\n  score_to_win: 5\n")?;
        let config = load_config(file.path())?;

        assert_eq!(config.ball.max_speed, 450.0);
        assert_eq!(config.rules.score_to_win, 5);
        // Untouched sections keep their defaults.
        assert_eq!(config.goalie, EngineConfig::default().goalie);
        Ok(())
    }

    #[test]
    fn test_load_json_config() -> Result<()> {
        let file = temp_with_suffix(".json", r#"{"debug": true, "rules": {"score_to_win": 2}}"#)?;
        let config = load_config(file.path())?;

        assert!(config.debug);
        assert_eq!(config.rules.score_to_win, 2);
        Ok(())
    }

    #[test]
    fn test_load_invalid_config_names_file() -> Result<()> {
        let file = temp_with_suffix(".yaml", "rules:\n  score_to_win: 0\n")?;
        let err = load_config(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid config"));
        Ok(())
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_resolve_config() -> Result<()> {
        assert_eq!(resolve_config(None, None)?, EngineConfig::default());
        assert_eq!(resolve_config(Some("arcade"), None)?, EngineConfig::arcade());
        assert!(resolve_config(Some("nope"), None).is_err());

        let file = temp_with_suffix(".yaml", "debug: true\n")?;
        assert!(resolve_config(Some("arcade"), Some(file.path()))?.debug);
        Ok(())
    }

    #[test]
    fn test_trace_round_trip() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("traces").join("match.jsonl");
        let request = MatchRequest { max_ticks: 90, ..MatchRequest::new(4) };

        let (response, meta) = run_with_trace(&request, &path)?;

        assert_eq!(meta.lines, response.ticks);
        assert_eq!(meta.bytes, fs::metadata(&path)?.len());
        assert!(verify_trace(&path, &meta.checksum)?);
        assert!(!verify_trace(&path, "0000")?);

        let first = fs::read_to_string(&path)?;
        let first: serde_json::Value = serde_json::from_str(first.lines().next().unwrap_or_default())?;
        assert_eq!(first["report"]["tick"], 1);
        assert_eq!(first["snapshot"]["agents"].as_array().map(Vec::len), Some(13));
        Ok(())
    }

    #[test]
    fn test_same_seed_same_checksum() -> Result<()> {
        let dir = TempDir::new()?;
        let request = MatchRequest { max_ticks: 120, ..MatchRequest::new(9) };
        let (_, a) = run_with_trace(&request, &dir.path().join("a.jsonl"))?;
        let (_, b) = run_with_trace(&request, &dir.path().join("b.jsonl"))?;
        assert_eq!(a.checksum, b.checksum);
        Ok(())
    }
}
