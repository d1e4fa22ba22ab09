use altimeter_common::config::AppConfig;
use altimeter_common::dictionary::Dictionary;
use altimeter_common::store::FileStore;
use altimeter_panel::session::{PanelSession, PanelSnapshot};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "altimeter_panel=info,altimeter_engine=debug".into()),
        )
        .init();

    tracing::info!("Altimeter panel starting...");

    let config = AppConfig::from_env()?;
    let dictionary = match &config.dictionary_path {
        Some(path) => Dictionary::from_path(path)?,
        None => Dictionary::default(),
    };
    let store = FileStore::open(&config.settings_path);
    let mut session = PanelSession::new(&config, dictionary, store);

    if let Some(path) = &config.snapshot_path {
        let raw = std::fs::read_to_string(path)?;
        let snapshot: PanelSnapshot = serde_json::from_str(&raw)?;
        session.apply_snapshot(snapshot);
        tracing::info!(path = %path.display(), "Snapshot fixture loaded");
    }

    render(&session);
    Ok(())
}

/// One-shot text rendering of the alert and dashboard state.
fn render(session: &PanelSession<FileStore>) {
    let dictionary = session.dictionary();
    let display = session.display();

    if let Some(alert) = session.active_alert() {
        println!("[{}] {}", alert.severity, alert.title);
        println!("{}", alert.body);
        for link in &alert.links {
            println!("  {} — {}", link.label, link.url);
        }
        if let Some(label) = &alert.checkbox_label {
            println!("  [ ] {}", label);
        }
        println!(
            "  ({}: {})",
            alert.action.label,
            if alert.action.enabled {
                "enabled"
            } else {
                "disabled"
            }
        );
        println!();
    }

    println!(
        "{}: {}",
        dictionary.cockpit.total_supply, display.total_supply
    );
    println!(
        "{}: {}",
        dictionary.cockpit.total_borrowed, display.total_borrowed
    );
    println!("{}: {}", dictionary.cockpit.your_ratio, display.ratio);
    if let Some(tier) = display.tier {
        println!("Health: {}", tier);
    }
    println!(
        "{}: {}",
        dictionary.cockpit.total_deposited_value, display.deposited_value
    );
    println!(
        "{}: {}",
        dictionary.cockpit.total_borrowed_value, display.borrowed_value
    );
    if let Some(footnote) = &display.footnote {
        println!("Note: {}", footnote);
    }
    if let Some(notice) = session.asset_notice() {
        println!("Notice: {}", notice);
    }
}
