use anyhow::{Context, anyhow};

use bayplan::core::cli::CliPaths;
use bayplan::core::context::AppContext;
use bayplan::core::models::Bay;
use bayplan::core::seed::load_seed;
use bayplan::diagram::blueprint::LanePlan;
use bayplan::diagram::layout;
use bayplan::logging::LogTarget;
use bayplan::port::memory::InMemoryDataPort;
use bayplan::schedule::ScheduleManager;
use bayplan::ui::display_manager::DisplayManager;

fn main() -> anyhow::Result<()> {
    let paths = CliPaths::from_env().map_err(|e| anyhow!(e))?;

    let mut ctx = AppContext::new_with_paths(paths.config_path.clone(), paths.logs_dir.clone())
        .with_context(|| format!("loading config from {}", paths.config_path.display()))?;

    let port = InMemoryDataPort::new();
    if let Some(seed_path) = &paths.seed_path {
        let seed = load_seed(seed_path)
            .with_context(|| format!("loading seed from {}", seed_path.display()))?;
        port.load_seed(seed).context("applying seed data")?;
        ctx.logger.info(
            format!("Seeded {} booking(s) from file", port.booking_count()),
            LogTarget::FileOnly,
        );
    }

    let mut manager = ScheduleManager::new(&mut ctx, &port);
    manager.refresh_lookups();
    manager.refresh();

    let mut stdout = std::io::stdout();
    manager
        .render_schedule(&mut stdout)
        .context("rendering schedule")?;

    let bays: Vec<Bay> = manager
        .context_ref()
        .lookups
        .all_bays()
        .into_iter()
        .cloned()
        .collect();
    match manager.occupancy_snapshot() {
        Ok(occupancy) => {
            let lanes = layout(&bays, &occupancy, &LanePlan::standard());
            let dm = DisplayManager::new();
            dm.render_diagram(&lanes, &mut stdout)
                .context("rendering bay diagram")?;
        }
        Err(err) => {
            // Grid output stays useful even when the occupancy snapshot is
            // unavailable; the failure was already logged.
            let _ = err;
        }
    }

    Ok(())
}
