use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Address the web server binds to when nothing else is configured.
pub const DEFAULT_BIND: &str = "0.0.0.0:5001";
/// SQLite file used when nothing else is configured.
pub const DEFAULT_DB_PATH: &str = "newsdesk.sqlite3";
/// Upload size cap in megabytes when nothing else is configured.
pub const DEFAULT_MAX_UPLOAD_MB: u32 = 50;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub server: Option<ServerConfig>,
    pub database: Option<DatabaseConfig>,
    pub parsing: Option<ParsingSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: Option<String>,
    pub max_upload_mb: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsingSection {
    pub min_segment_chars: Option<usize>,
    pub max_candidates: Option<usize>,
}

/// Platform config directory path: `<config_dir>/newsdesk/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("newsdesk").join("config.toml"))
}

/// Load config by cascading CWD `.newsdesk.toml` over platform config,
/// then applying `NEWSDESK_*` environment variables on top.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".newsdesk.toml"));

    let file = match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    };
    apply_env(file, |key| std::env::var(key).ok())
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), "loaded config file");
            Some(config)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let base_server = base.server.unwrap_or_default();
    let base_db = base.database.unwrap_or_default();
    let base_parsing = base.parsing.unwrap_or_default();
    let server = overlay.server.unwrap_or_default();
    let db = overlay.database.unwrap_or_default();
    let parsing = overlay.parsing.unwrap_or_default();

    ConfigFile {
        server: Some(ServerConfig {
            bind: server.bind.or(base_server.bind),
            max_upload_mb: server.max_upload_mb.or(base_server.max_upload_mb),
        }),
        database: Some(DatabaseConfig {
            path: db.path.or(base_db.path),
        }),
        parsing: Some(ParsingSection {
            min_segment_chars: parsing.min_segment_chars.or(base_parsing.min_segment_chars),
            max_candidates: parsing.max_candidates.or(base_parsing.max_candidates),
        }),
    }
}

/// Overlay environment variables onto `config`.
///
/// `lookup` is `std::env::var` in production; tests pass a map.
pub fn apply_env(config: ConfigFile, lookup: impl Fn(&str) -> Option<String>) -> ConfigFile {
    let env = ConfigFile {
        server: Some(ServerConfig {
            bind: lookup("NEWSDESK_BIND"),
            max_upload_mb: lookup("NEWSDESK_MAX_UPLOAD_MB").and_then(|v| v.parse().ok()),
        }),
        database: Some(DatabaseConfig {
            path: lookup("NEWSDESK_DB_PATH"),
        }),
        parsing: None,
    };
    merge(config, env)
}

impl ConfigFile {
    pub fn bind(&self) -> String {
        self.server
            .as_ref()
            .and_then(|s| s.bind.clone())
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
    }

    pub fn max_upload_bytes(&self) -> usize {
        let mb = self
            .server
            .as_ref()
            .and_then(|s| s.max_upload_mb)
            .unwrap_or(DEFAULT_MAX_UPLOAD_MB);
        mb as usize * 1024 * 1024
    }

    pub fn db_path(&self) -> PathBuf {
        self.database
            .as_ref()
            .and_then(|d| d.path.clone())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_partial_toml() {
        let config: ConfigFile = toml::from_str("[database]\npath = \"/tmp/news.db\"\n").unwrap();
        assert_eq!(config.db_path(), PathBuf::from("/tmp/news.db"));
        assert_eq!(config.bind(), DEFAULT_BIND);
    }

    #[test]
    fn test_merge_overlay_wins() {
        let base: ConfigFile = toml::from_str(
            "[server]\nbind = \"127.0.0.1:8000\"\nmax_upload_mb = 10\n[database]\npath = \"a.db\"\n",
        )
        .unwrap();
        let overlay: ConfigFile = toml::from_str("[server]\nbind = \"0.0.0.0:9000\"\n").unwrap();
        let merged = merge(base, overlay);
        assert_eq!(merged.bind(), "0.0.0.0:9000");
        assert_eq!(merged.max_upload_bytes(), 10 * 1024 * 1024);
        assert_eq!(merged.db_path(), PathBuf::from("a.db"));
    }

    #[test]
    fn test_env_overrides_file() {
        let file: ConfigFile = toml::from_str("[database]\npath = \"file.db\"\n").unwrap();
        let env: HashMap<&str, &str> = [
            ("NEWSDESK_DB_PATH", "env.db"),
            ("NEWSDESK_MAX_UPLOAD_MB", "3"),
        ]
        .into_iter()
        .collect();
        let config = apply_env(file, |k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.db_path(), PathBuf::from("env.db"));
        assert_eq!(config.max_upload_bytes(), 3 * 1024 * 1024);
        assert_eq!(config.bind(), DEFAULT_BIND);
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[parsing]\nmax_candidates = 10\n").unwrap();
        let config = load_from_path(&path).unwrap();
        assert_eq!(config.parsing.unwrap().max_candidates, Some(10));

        std::fs::write(&path, "not = [valid").unwrap();
        assert!(load_from_path(&path).is_none());
        assert!(load_from_path(&dir.path().join("missing.toml")).is_none());
    }
}
