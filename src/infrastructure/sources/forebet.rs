use async_trait::async_trait;
use scraper::{Html, Selector};

use super::{extract_confidence, http_client};
use crate::domain::entities::match_record::MatchRecord;
use crate::domain::ports::prediction_source::{PredictionSource, SourceError};

/// Forebet football predictions page. One table row per match carrying a
/// 1X2/over-under tip and a probability percentage.
pub struct ForebetSource {
    base_url: String,
    client: reqwest::Client,
}

impl ForebetSource {
    pub fn new() -> Self {
        Self::with_base_url("https://www.forebet.com".into())
    }

    /// Point the scraper at a different host (tests use fixture servers).
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            client: http_client(),
        }
    }

    fn parse_predictions(html: &str) -> Vec<MatchRecord> {
        let doc = Html::parse_document(html);
        let row_sel = Selector::parse("tr[data-match-id]").unwrap();
        let home_sel = Selector::parse("td.team1").unwrap();
        let away_sel = Selector::parse("td.team2").unwrap();
        let tip_sel = Selector::parse("td.prediction").unwrap();
        let prob_sel = Selector::parse("td.probability").unwrap();
        let time_sel = Selector::parse("td.time").unwrap();

        let mut records = Vec::new();
        for row in doc.select(&row_sel) {
            let home = text_of(row.select(&home_sel).next());
            let away = text_of(row.select(&away_sel).next());
            let tip = text_of(row.select(&tip_sel).next());
            if home.is_empty() || away.is_empty() || tip.is_empty() {
                continue;
            }
            let probability = text_of(row.select(&prob_sel).next());
            let kickoff = text_of(row.select(&time_sel).next());

            records.push(MatchRecord {
                source: "Forebet".into(),
                home_team: home,
                away_team: away,
                league: None,
                kickoff: (!kickoff.is_empty()).then_some(kickoff),
                prediction: tip,
                confidence: extract_confidence(&probability),
            });
        }
        records
    }
}

impl Default for ForebetSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PredictionSource for ForebetSource {
    fn name(&self) -> &str {
        "Forebet"
    }

    async fn fetch(&self) -> Result<Vec<MatchRecord>, SourceError> {
        let url = format!("{}/en/football-predictions", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(SourceError::Network(format!(
                "Forebet returned {}",
                resp.status()
            )));
        }

        let html = resp
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;
        Ok(Self::parse_predictions(&html))
    }
}

fn text_of(el: Option<scraper::ElementRef>) -> String {
    el.map(|e| e.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}
