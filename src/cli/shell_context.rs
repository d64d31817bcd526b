use std::path::PathBuf;

use dialoguer::theme::ColorfulTheme;
use rust_decimal::Decimal;

use crate::{
    config::{Config, ConfigManager},
    core::{utils::PathResolver, BudgetStore, IntroState},
    currency::{format_currency_value, FormatOptions, LocaleConfig},
    errors::CliError,
};

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: BudgetStore,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub intro: IntroState,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_base_dir(mode, PathResolver::base_dir())
    }

    /// Builds a context whose config and state files live under `base`.
    pub fn with_base_dir(mode: CliMode, base: PathBuf) -> Result<Self, CliError> {
        let config_manager = ConfigManager::with_base_dir(base.clone())?;
        let config = config_manager.load()?;
        let store = BudgetStore::new(config.ledger_policy());

        let registry = super::commands::build_registry();

        tracing::debug!(
            base = %base.display(),
            ?mode,
            locale = %config.locale,
            "shell context ready"
        );

        Ok(Self {
            mode,
            registry,
            store,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            intro: IntroState::in_dir(&base),
            running: true,
        })
    }

    pub fn locale(&self) -> LocaleConfig {
        self.config.locale_config()
    }

    pub fn format_options(&self) -> FormatOptions {
        self.config.format_options()
    }

    pub fn format_amount(&self, amount: Decimal) -> String {
        format_currency_value(amount, &self.locale(), &self.format_options())
    }

    pub fn is_interactive(&self) -> bool {
        self.mode == CliMode::Interactive
    }
}
