use async_trait::async_trait;
use scraper::{Html, Selector};

use super::{extract_confidence, http_client};
use crate::domain::entities::match_record::MatchRecord;
use crate::domain::ports::prediction_source::{PredictionSource, SourceError};

/// Betbrain predictions listing. Matches are rendered as prediction cards
/// with home/away spans and a confidence badge.
pub struct BetbrainSource {
    base_url: String,
    client: reqwest::Client,
}

impl BetbrainSource {
    pub fn new() -> Self {
        Self::with_base_url("https://www.betbrain.com".into())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            client: http_client(),
        }
    }

    fn parse_predictions(html: &str) -> Vec<MatchRecord> {
        let doc = Html::parse_document(html);
        let item_sel = Selector::parse(r#"div[class*="prediction-item"]"#).unwrap();
        let home_sel = Selector::parse(r#"span[class*="home-team"]"#).unwrap();
        let away_sel = Selector::parse(r#"span[class*="away-team"]"#).unwrap();
        let tip_sel = Selector::parse(r#"span[class*="prediction-text"]"#).unwrap();
        let conf_sel = Selector::parse(r#"span[class*="confidence"]"#).unwrap();

        let mut records = Vec::new();
        for item in doc.select(&item_sel) {
            let home = text_of(item.select(&home_sel).next());
            let away = text_of(item.select(&away_sel).next());
            let tip = text_of(item.select(&tip_sel).next());
            if home.is_empty() || away.is_empty() || tip.is_empty() {
                continue;
            }
            let confidence = text_of(item.select(&conf_sel).next());

            records.push(MatchRecord {
                source: "Betbrain".into(),
                home_team: home,
                away_team: away,
                league: None,
                kickoff: None,
                prediction: tip,
                confidence: extract_confidence(&confidence),
            });
        }
        records
    }
}

impl Default for BetbrainSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PredictionSource for BetbrainSource {
    fn name(&self) -> &str {
        "Betbrain"
    }

    async fn fetch(&self) -> Result<Vec<MatchRecord>, SourceError> {
        let url = format!("{}/en/predictions", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(SourceError::Network(format!(
                "Betbrain returned {}",
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prediction_cards() {
        let html = r#"
            <div class="m-prediction-item card">
              <span class="home-team-name">Arsenal</span>
              <span class="away-team-name">Chelsea</span>
              <span class="prediction-text">X</span>
              <span class="confidence-badge">61%</span>
            </div>
        "#;
        let records = BetbrainSource::parse_predictions(html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].source, "Betbrain");
        assert_eq!(records[0].prediction, "X");
        assert_eq!(records[0].confidence, 61.0);
    }
}
