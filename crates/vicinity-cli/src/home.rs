//! `home` command handler.

use vicinity_core::AppConfig;
use vicinity_discovery::load_home;

pub(crate) async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let client = crate::build_client(config)?;
    let home = load_home(&client, crate::fixed_location(config)).await;

    println!("Popular services:");
    if home.popular_services.is_empty() {
        println!("  (none)");
    }
    for service in &home.popular_services {
        println!("  {}  {}", service.id, service.title);
    }

    println!("Recommended providers:");
    if home.recommended_providers.is_empty() {
        println!("  (none)");
    }
    for provider in &home.recommended_providers {
        println!("  {}  {}", provider.id, provider.name);
    }
    Ok(())
}
