// Core modules
pub mod clients;
pub mod error;
pub mod event;
pub mod export;
pub mod graphql;
pub mod market_filter;
pub mod pipeline;
pub mod presenter;
pub mod selection;
pub mod settings;

// Re-exports
pub use clients::{OddsProvider, StakeClient};
pub use error::{ConfigError, ExportError, FetchError, PipelineError, SelectionError};
pub use event::{Fixture, Market, OddsRow, OddsValue, Outcome};
pub use export::ExportArtifact;
pub use graphql::EventMarkets;
pub use market_filter::MarketFilter;
pub use pipeline::{OddsPipeline, OddsReport, RunOutcome};
pub use presenter::{Presentation, Presenter};
pub use selection::{ByName, FixtureChooser, Prompt};
pub use settings::Settings;
