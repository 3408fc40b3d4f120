//! `panicpal config`: show the effective configuration.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use secrecy::ExposeSecret;

use panicpal_infra::config::{ACCESS_TOKEN_ENV, config_path, resolve_access_token};
use panicpal_infra::sqlite::pool::DATABASE_FILE;

use crate::state::AppState;

/// Show the first and last two characters of a secret.
fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 6 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{head}{}{tail}", "*".repeat(chars.len() - 4))
}

pub fn show_config(state: &AppState, json: bool) -> Result<()> {
    let config = &state.config;
    let token = resolve_access_token(config).map(|t| mask(t.expose_secret()));
    let token_source = if std::env::var(ACCESS_TOKEN_ENV).is_ok() {
        "env"
    } else if token.is_some() {
        "config.toml"
    } else {
        "unset"
    };

    if json {
        let value = serde_json::json!({
            "data_dir": state.data_dir.display().to_string(),
            "config_file": config_path(&state.data_dir).display().to_string(),
            "database": state.data_dir.join(DATABASE_FILE).display().to_string(),
            "endpoint_url": config.endpoint_url,
            "access_token": token,
            "access_token_source": token_source,
            "fallback_message": config.fallback_message,
            "loading": {
                "interval_ms": config.loading.interval_ms,
                "initial": config.loading.initial,
                "glyphs": config.loading.glyphs,
            },
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Setting").fg(Color::White),
        Cell::new("Value").fg(Color::White),
    ]);

    let rows = [
        ("Data dir", state.data_dir.display().to_string()),
        ("Config file", config_path(&state.data_dir).display().to_string()),
        ("Endpoint", config.endpoint_url.clone()),
        (
            "Access token",
            format!("{} ({token_source})", token.as_deref().unwrap_or("-")),
        ),
        ("Fallback reply", config.fallback_message.clone()),
        ("Loading interval", format!("{} ms", config.loading.interval_ms)),
        ("Loading glyphs", format!("{:?}", config.loading.glyphs)),
    ];
    for (name, value) in rows {
        table.add_row(vec![
            Cell::new(name).fg(Color::Cyan),
            Cell::new(value).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();

    Ok(())
}
