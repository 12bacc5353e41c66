//! Dialogue Core binary.
//!
//! Loads configuration, installs logging, registers the configured action
//! catalogue and logs the resulting action graph. Catalogues loaded here
//! may not reference named validators; hosts embedding the library supply
//! their own `ValidatorSet`.

use dialogue_core::adapters::{ValidatorSet, YamlActionCatalogue};
use dialogue_core::config::{init_tracing, AppConfig};
use dialogue_core::domain::action::ActionRegistry;
use dialogue_core::domain::conversation::Conversation;
use tracing::{info, warn};

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.logging)?;

    let Some(path) = config.engine.catalogue_path.as_ref() else {
        warn!("No catalogue configured, set DIALOGUE_CORE__ENGINE__CATALOGUE_PATH");
        return Ok(());
    };

    let catalogue = YamlActionCatalogue::new(ValidatorSet::new());
    let actions = catalogue.load(path).await?;

    let mut registry =
        ActionRegistry::new().with_default_locale(config.engine.default_locale.clone());
    registry.register_all(actions)?;
    registry.check_dependencies()?;

    for name in registry.names() {
        if let Some(action) = registry.get(name) {
            info!(
                action = %name,
                intent = %action.intent(),
                depends_on = ?action.required_actions().collect::<Vec<_>>(),
                slots = ?action.requirements().map(|r| r.alias.as_str()).collect::<Vec<_>>(),
                "Action"
            );
        }
    }

    let entry_points: Vec<&str> = registry
        .actionable(&Conversation::new())
        .iter()
        .map(|action| action.name())
        .collect();
    info!(
        path = %path.display(),
        count = registry.len(),
        entry_points = ?entry_points,
        "Catalogue loaded"
    );

    Ok(())
}
