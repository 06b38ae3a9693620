//! Quota status and recommendation commands.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use switchyard_types::provider::RequestClass;
use switchyard_types::routing::{ProviderQuotaStatus, Remaining};

use crate::state::AppState;

/// Display per-provider quota and availability.
pub fn status(state: &AppState, json: bool) -> Result<()> {
    let statuses = state.router.quota_status();

    if json {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Switchyard v{}",
        style("⚡").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(
        "  {}",
        style(format!("Config: {}", state.config_path.display())).dim()
    );
    println!();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Provider").fg(Color::White),
        Cell::new("Name").fg(Color::White),
        Cell::new("Type").fg(Color::White),
        Cell::new("Priority").fg(Color::White),
        Cell::new("Key").fg(Color::White),
        Cell::new("Used").fg(Color::White),
        Cell::new("Limit").fg(Color::White),
        Cell::new("Remaining").fg(Color::White),
        Cell::new("Available").fg(Color::White),
    ]);

    for (key, s) in &statuses {
        table.add_row(status_row(key, s));
    }

    println!("{table}");
    println!();
    let available = statuses.values().filter(|s| s.available).count();
    println!(
        "  {} of {} provider{} available",
        style(available).bold(),
        statuses.len(),
        if statuses.len() == 1 { "" } else { "s" }
    );
    println!(
        "  {}",
        style("Usage counters are in-memory and reset at local midnight.").dim()
    );
    println!();

    Ok(())
}

fn status_row(key: &str, s: &ProviderQuotaStatus) -> Vec<Cell> {
    let configured = if s.configured {
        Cell::new("set").fg(Color::Green)
    } else {
        Cell::new("missing").fg(Color::Red)
    };
    let remaining = match s.remaining {
        Remaining::Count(0) => Cell::new("0").fg(Color::Red),
        other => Cell::new(other).fg(Color::White),
    };
    let available = if s.available {
        Cell::new("yes").fg(Color::Green)
    } else {
        Cell::new("no").fg(Color::DarkGrey)
    };

    vec![
        Cell::new(key).fg(Color::Cyan),
        Cell::new(&s.name).fg(Color::White),
        Cell::new(s.capability).fg(Color::DarkGrey),
        Cell::new(s.priority).fg(Color::DarkGrey),
        configured,
        Cell::new(s.requests_today).fg(Color::White),
        Cell::new(
            s.rate_limit
                .map(|l| l.to_string())
                .unwrap_or_else(|| "-".to_string()),
        )
        .fg(Color::DarkGrey),
        remaining,
        available,
    ]
}

/// Print the provider that would be tried first for `class`.
pub fn recommend(state: &AppState, class: RequestClass, json: bool) -> Result<()> {
    let provider = state.router.recommended_provider(class);

    if json {
        let out = serde_json::json!({ "class": class, "provider": provider });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    match provider {
        Some(key) => println!(
            "  {} {} requests go to {}",
            style("→").cyan(),
            class,
            style(key).cyan().bold()
        ),
        None => println!(
            "  {} No {} provider is available. Check API keys with {}",
            style("!").yellow().bold(),
            class,
            style("syard status").cyan()
        ),
    }

    Ok(())
}
