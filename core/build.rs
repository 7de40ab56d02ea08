use std::collections::HashSet;
use std::env;
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

const DEFAULT_SETTLE_MS: u32 = 1500;

#[derive(Deserialize)]
struct SiteFile {
    chat: ChatSection,
    games: Vec<GameEntry>,
}

#[derive(Deserialize)]
struct ChatSection {
    script_url: String,
    handle: String,
    widget_id_light: String,
    widget_id_dark: String,
    settle_ms: Option<u32>,
}

#[derive(Deserialize)]
struct GameEntry {
    title: String,
    url: String,
}

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("missing CARGO_MANIFEST_DIR"));
    let workspace_root = manifest_dir.parent().unwrap_or(&manifest_dir);
    let env_path = workspace_root.join(".env");
    let env_local_path = workspace_root.join(".env.local");

    let _ = dotenvy::from_filename(&env_local_path);
    let _ = dotenvy::from_filename(&env_path);

    println!("cargo:rerun-if-env-changed=SITE_CONFIG_PATH");
    println!("cargo:rerun-if-changed={}", env_path.display());
    println!("cargo:rerun-if-changed={}", env_local_path.display());

    let config_path = resolve_config_path(workspace_root);
    println!("cargo:rerun-if-changed={}", config_path.display());

    let contents = fs::read_to_string(&config_path).unwrap_or_else(|err| {
        panic!(
            "failed to read site config at {}: {err}",
            config_path.display()
        )
    });

    let site: SiteFile = toml::from_str(&contents).unwrap_or_else(|err| {
        panic!(
            "failed to parse site config at {}: {err}",
            config_path.display()
        )
    });

    validate_chat(&site.chat, &config_path);
    validate_games(&site.games, &config_path);

    let chat = &site.chat;
    let mut output = String::new();
    writeln!(
        &mut output,
        "pub const CHAT_SCRIPT_URL: &str = {};",
        rust_string(chat.script_url.trim())
    )
    .unwrap();
    writeln!(
        &mut output,
        "pub const CHAT_HANDLE: &str = {};",
        rust_string(chat.handle.trim())
    )
    .unwrap();
    writeln!(
        &mut output,
        "pub const CHAT_WIDGET_ID_LIGHT: &str = {};",
        rust_string(chat.widget_id_light.trim())
    )
    .unwrap();
    writeln!(
        &mut output,
        "pub const CHAT_WIDGET_ID_DARK: &str = {};",
        rust_string(chat.widget_id_dark.trim())
    )
    .unwrap();
    writeln!(
        &mut output,
        "pub const CHAT_SETTLE_MS: u32 = {};",
        chat.settle_ms.unwrap_or(DEFAULT_SETTLE_MS)
    )
    .unwrap();
    writeln!(&mut output).unwrap();
    writeln!(&mut output, "pub const GAME_LEVELS: &[GameLevel] = &[").unwrap();
    for entry in &site.games {
        writeln!(&mut output, "    GameLevel {{").unwrap();
        writeln!(&mut output, "        title: {},", rust_string(entry.title.trim())).unwrap();
        writeln!(&mut output, "        url: {},", rust_string(entry.url.trim())).unwrap();
        writeln!(&mut output, "    }},").unwrap();
    }
    writeln!(&mut output, "];").unwrap();

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("missing OUT_DIR"));
    let out_path = out_dir.join("site_config.rs");
    fs::write(&out_path, output).unwrap_or_else(|err| {
        panic!("failed to write {}: {err}", out_path.display())
    });
}

fn resolve_config_path(workspace_root: &Path) -> PathBuf {
    let env_value = env::var("SITE_CONFIG_PATH").ok();
    let raw_path = match env_value {
        Some(value) if !value.trim().is_empty() => PathBuf::from(value),
        _ => workspace_root.join("config/site.toml"),
    };
    if raw_path.is_relative() {
        workspace_root.join(raw_path)
    } else {
        raw_path
    }
}

fn rust_string(value: &str) -> String {
    format!("{:?}", value)
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("https://") || value.starts_with("http://")
}

fn validate_chat(chat: &ChatSection, config_path: &Path) {
    if !is_http_url(chat.script_url.trim()) {
        panic!(
            "chat script_url '{}' must be an http(s) URL in {}",
            chat.script_url,
            config_path.display()
        );
    }
    if chat.handle.trim().is_empty() {
        panic!("chat handle cannot be empty in {}", config_path.display());
    }
    let light = chat.widget_id_light.trim();
    let dark = chat.widget_id_dark.trim();
    if light.is_empty() || dark.is_empty() {
        panic!(
            "chat widget ids cannot be empty in {}",
            config_path.display()
        );
    }
    if light == dark {
        panic!(
            "chat widget ids for light and dark must differ in {}",
            config_path.display()
        );
    }
}

fn validate_games(entries: &[GameEntry], config_path: &Path) {
    if entries.is_empty() {
        panic!("site config {} has no games", config_path.display());
    }
    let mut urls = HashSet::new();
    for entry in entries {
        if entry.title.trim().is_empty() {
            panic!("game title cannot be empty in {}", config_path.display());
        }
        if !is_http_url(entry.url.trim()) {
            panic!(
                "game '{}' url must be an http(s) URL in {}",
                entry.title,
                config_path.display()
            );
        }
        if !urls.insert(entry.url.trim().to_string()) {
            panic!(
                "duplicate game url '{}' in {}",
                entry.url,
                config_path.display()
            );
        }
    }
}
