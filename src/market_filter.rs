use crate::event::{Market, OddsRow};
use crate::settings::DEFAULT_MARKET_KEYWORDS;

/// Selects player-prop markets by plain substring match on the market name.
///
/// Matching is case-sensitive containment, not a token match: "Total Points"
/// qualifies even though it is not a player prop, and "Top Scorer" does not.
#[derive(Debug, Clone)]
pub struct MarketFilter {
    keywords: Vec<String>,
}

impl Default for MarketFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MARKET_KEYWORDS.iter().map(|s| s.to_string()).collect())
    }
}

impl MarketFilter {
    pub fn new(keywords: Vec<String>) -> Self {
        // An empty keyword would match every market.
        let keywords = keywords.into_iter().filter(|k| !k.is_empty()).collect();
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn qualifies(&self, market: &Market) -> bool {
        self.keywords.iter().any(|kw| market.name.contains(kw.as_str()))
    }

    /// Flatten qualifying markets into rows, market order then outcome order.
    pub fn flatten(&self, markets: &[Market]) -> Vec<OddsRow> {
        markets
            .iter()
            .filter(|market| self.qualifies(market))
            .flat_map(|market| {
                market.outcomes.iter().map(move |outcome| OddsRow {
                    market: market.name.clone(),
                    player: outcome.label.clone(),
                    odds: outcome.odds.clone(),
                })
            })
            .collect()
    }
}
