use crate::clients::OddsProvider;
use crate::error::{Result, SelectionError};
use crate::event::{Fixture, OddsRow};
use crate::market_filter::MarketFilter;
use crate::presenter::{Presentation, Presenter};
use crate::selection::{self, FixtureChooser};
use crate::settings::Settings;
use tracing::{info, warn};

/// Rows for one selected fixture.
#[derive(Debug, Clone)]
pub struct OddsReport {
    pub fixture: Fixture,
    pub event_name: Option<String>,
    pub markets_seen: usize,
    pub rows: Vec<OddsRow>,
}

impl OddsReport {
    /// No market matched the filter. Advisory, not a failure.
    pub fn has_no_qualifying_markets(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// The tournament had nothing scheduled; markets were never fetched.
    NoFixtures { tournament_slug: String },
    Completed(OddsReport),
}

/// Fetch fixtures, select one, fetch its markets, filter, present.
pub struct OddsPipeline<P: OddsProvider> {
    provider: P,
    tournament_slug: String,
    filter: MarketFilter,
    presenter: Presenter,
}

impl<P: OddsProvider> OddsPipeline<P> {
    pub fn new(provider: P, settings: &Settings) -> Self {
        Self {
            provider,
            tournament_slug: settings.tournament_slug.clone(),
            filter: MarketFilter::new(settings.market_keywords.clone()),
            presenter: Presenter::new(settings.sheet_name.clone()),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn tournament_slug(&self) -> &str {
        &self.tournament_slug
    }

    pub async fn fetch_fixtures(&self) -> Result<Vec<Fixture>> {
        let fixtures = self.provider.fetch_fixtures(&self.tournament_slug).await?;
        info!(
            tournament = %self.tournament_slug,
            count = fixtures.len(),
            "fetched fixtures"
        );
        Ok(fixtures)
    }

    /// Fetch and filter markets for an already selected fixture.
    pub async fn fetch_odds(&self, fixture: &Fixture) -> Result<OddsReport> {
        let event = self.provider.fetch_markets(&fixture.id).await?;
        let rows = self.filter.flatten(&event.markets);

        info!(
            fixture = %fixture.name,
            event = event.event_name.as_deref().unwrap_or("-"),
            markets = event.markets.len(),
            rows = rows.len(),
            "filtered markets"
        );
        if rows.is_empty() {
            warn!(fixture = %fixture.name, "no qualifying markets");
        }

        Ok(OddsReport {
            fixture: fixture.clone(),
            event_name: event.event_name,
            markets_seen: event.markets.len(),
            rows,
        })
    }

    /// Run every stage up to, but not including, presentation.
    pub async fn run(&self, chooser: &dyn FixtureChooser) -> Result<RunOutcome> {
        let fixtures = self.fetch_fixtures().await?;

        let fixture = match selection::select(&fixtures, &self.tournament_slug, chooser) {
            Ok(fixture) => fixture,
            Err(SelectionError::NoFixturesAvailable { slug }) => {
                warn!(tournament = %slug, "no fixtures available");
                return Ok(RunOutcome::NoFixtures {
                    tournament_slug: slug,
                });
            }
            Err(e) => return Err(e.into()),
        };

        info!(fixture = %fixture.name, id = %fixture.id, "selected fixture");
        Ok(RunOutcome::Completed(self.fetch_odds(fixture).await?))
    }

    pub fn present(&self, report: &OddsReport) -> Presentation {
        self.presenter.present(&report.fixture.name, &report.rows)
    }
}
