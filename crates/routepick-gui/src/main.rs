//! Routepick GUI - Graphical User Interface
//!
//! Iced-based native location picker.

mod app;

use iced::Task;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use routepick_core::prelude::*;

use crate::app::RoutepickGui;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "routepick_gui=debug,routepick_core=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ConfigStore::discover()?.load()?;
    let mut coordinator = EditingCoordinator::new(InMemoryStore::new(), &config);
    if let Some(name) = &config.default_demo {
        coordinator.load_demo(name)?;
    }

    iced::application("Routepick", RoutepickGui::update, RoutepickGui::view)
        .window_size((960.0, 640.0))
        .run_with(move || (RoutepickGui::new(coordinator), Task::none()))?;

    Ok(())
}
