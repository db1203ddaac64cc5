//! Classroom tutor library exports

use clap::ValueEnum;

pub mod api;
pub mod cli;
pub mod core;
pub mod inference;
pub mod server;

#[cfg(test)]
pub mod test_support;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    #[default]
    OpenRouter,
    LmStudio,
}

impl Provider {
    /// Name used in config files and `TUTOR_PROVIDER`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenRouter => "openrouter",
            Provider::LmStudio => "lmstudio",
        }
    }
}
