use serde_json::{Map, Value};

use crate::config::{atomic_write, read_json_file, AppContext};
use crate::schema::ConfigMap;
use crate::store::SettingsStore;

/// Identifier under `mcpServers` the Claude Code config must already carry
/// for sync to apply.
pub const MCP_SERVER_ID: &str = "prism-relay";

/// Overwrite the `env` block of the `prism-relay` entry in `~/.claude.json`
/// with the current export mapping. Returns `true` only when the file was
/// rewritten; a missing file, missing entry, or malformed document skips the
/// sync silently. The rewrite is all-or-nothing.
pub fn sync_claude_config(ctx: &AppContext, cfg: &ConfigMap) -> bool {
    let path = &ctx.claude_json_path;
    if !path.exists() {
        return false;
    }

    let mut root = match read_json_file(path) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("skipping Claude config sync: {err}");
            return false;
        }
    };

    let Some(server) = root
        .get_mut("mcpServers")
        .and_then(|v| v.get_mut(MCP_SERVER_ID))
        .and_then(|v| v.as_object_mut())
    else {
        return false;
    };

    let mut env = Map::new();
    for (name, value) in SettingsStore::export_env(cfg) {
        env.insert(name, Value::String(value));
    }
    server.insert("env".to_string(), Value::Object(env));

    let json = match serde_json::to_string_pretty(&root) {
        Ok(json) => json,
        Err(err) => {
            log::warn!("skipping Claude config sync: {err}");
            return false;
        }
    };

    match atomic_write(path, json.as_bytes()) {
        Ok(()) => {
            log::info!("updated {} env block in {}", MCP_SERVER_ID, path.display());
            true
        }
        Err(err) => {
            log::warn!("failed to write Claude config: {err}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;
    use serde_json::json;
    use std::fs;

    fn ctx_in(dir: &tempfile::TempDir) -> AppContext {
        AppContext::new(
            dir.path().join("settings.json"),
            dir.path().join("claude.json"),
        )
    }

    #[test]
    fn sync_skips_when_config_file_is_absent() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(!sync_claude_config(&ctx_in(&dir), &schema::default_config()));
    }

    #[test]
    fn sync_skips_when_server_entry_is_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = ctx_in(&dir);
        fs::write(
            &ctx.claude_json_path,
            serde_json::to_string(&json!({ "mcpServers": {} })).expect("serialize"),
        )
        .expect("seed");

        assert!(!sync_claude_config(&ctx, &schema::default_config()));
    }

    #[test]
    fn sync_skips_malformed_config_without_touching_it() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = ctx_in(&dir);
        fs::write(&ctx.claude_json_path, "{broken").expect("seed");

        assert!(!sync_claude_config(&ctx, &schema::default_config()));
        assert_eq!(
            fs::read_to_string(&ctx.claude_json_path).expect("read back"),
            "{broken"
        );
    }

    #[test]
    fn sync_overwrites_env_and_preserves_unrelated_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = ctx_in(&dir);
        let initial = json!({
            "numStartups": 7,
            "mcpServers": {
                "prism-relay": {
                    "command": "node",
                    "args": ["index.js"],
                    "env": { "STALE_VAR": "old" }
                },
                "other-server": { "command": "echo" }
            }
        });
        fs::write(
            &ctx.claude_json_path,
            serde_json::to_string_pretty(&initial).expect("serialize"),
        )
        .expect("seed");

        let mut cfg = schema::default_config();
        cfg.insert("anthropic_api_key".into(), "sk-ant-test".into());
        assert!(sync_claude_config(&ctx, &cfg));

        let content = fs::read_to_string(&ctx.claude_json_path).expect("read back");
        let value: Value = serde_json::from_str(&content).expect("parse");

        let env = &value["mcpServers"]["prism-relay"]["env"];
        assert_eq!(env["ANTHROPIC_API_KEY"], json!("sk-ant-test"));
        assert_eq!(env["ANTHROPIC_MODEL"], json!("claude-sonnet-4-5-20250929"));
        assert!(env.get("STALE_VAR").is_none(), "old env block must be replaced");

        assert_eq!(value["numStartups"], json!(7));
        assert_eq!(value["mcpServers"]["prism-relay"]["command"], json!("node"));
        assert_eq!(value["mcpServers"]["other-server"]["command"], json!("echo"));
    }
}
