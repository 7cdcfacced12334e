use std::path::Path;

use anyhow::{Context, Result};

use fullpage_core::{
    AppConfig, Deck, EngineConfig, FixedViewport, PageConfig, PanelSet, TransitionEngine, Viewport,
};

pub async fn run(config: &AppConfig, deck_path: &Path, page: &PageConfig) -> Result<()> {
    let deck = Deck::load(deck_path)
        .await
        .with_context(|| format!("Failed to read deck {}", deck_path.display()))?;

    println!("Containers ({}):", deck.groups().len());
    for group in deck.groups() {
        println!("  {} ({} sections)", group.name, group.sections.len());
    }
    println!();

    let group = deck.container(&page.container)?;
    println!("Sections in '{}':\n", group.name);
    for (index, section) in group.sections.iter().enumerate() {
        let title = section.title.as_deref().unwrap_or("(untitled)");
        let lines = section.body.lines().count();
        println!("  {:>2}. {} ({} lines)", index + 1, title, lines);
    }
    println!();

    // Surface configuration errors the same way `run` would
    let engine_config = EngineConfig::from_page(page, &config.nav)?;
    TransitionEngine::initialize(
        PanelSet::with_len(group.sections.len()),
        engine_config,
        &FixedViewport(Viewport::new(80, 24)),
    )?;

    println!(
        "OK: start at section {}, {}s transitions ({} easing), navigation {}",
        page.start_index + 1,
        page.animation_duration_secs,
        page.easing,
        if page.show_navigation { "on" } else { "off" }
    );
    Ok(())
}
