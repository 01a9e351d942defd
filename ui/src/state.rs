use roster_business::{BusinessConfig, register_states};
use roster_states::StateCtx;

/// The main application state.
pub struct State {
    /// The state context for business logic.
    pub ctx: StateCtx,
}

impl Default for State {
    fn default() -> Self {
        let config = BusinessConfig::from_env().unwrap_or_else(|err| {
            log::warn!("Falling back to default configuration: {err:#}");
            BusinessConfig::default()
        });
        Self::with_config(config)
    }
}

impl State {
    pub fn with_config(config: BusinessConfig) -> Self {
        let mut ctx = StateCtx::new();
        register_states(&mut ctx, config);
        Self { ctx }
    }

    pub fn test(base_url: String) -> Self {
        Self::with_config(BusinessConfig::new(base_url))
    }
}
