use async_trait::async_trait;
use scraper::{Html, Selector};

use super::{extract_confidence, http_client};
use crate::domain::entities::match_record::MatchRecord;
use crate::domain::ports::prediction_source::{PredictionSource, SourceError};

/// eScored match-prediction blocks: team spans plus prediction and
/// confidence badges.
pub struct EscoredSource {
    base_url: String,
    client: reqwest::Client,
}

impl EscoredSource {
    pub fn new() -> Self {
        Self::with_base_url("https://www.escored.com".into())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            client: http_client(),
        }
    }

    fn parse_predictions(html: &str) -> Vec<MatchRecord> {
        let doc = Html::parse_document(html);
        let block_sel = Selector::parse(r#"div[class*="match-prediction"]"#).unwrap();
        let home_sel = Selector::parse(r#"span[class*="home"]"#).unwrap();
        let away_sel = Selector::parse(r#"span[class*="away"]"#).unwrap();
        let tip_sel = Selector::parse(r#"span[class*="prediction"]"#).unwrap();
        let conf_sel = Selector::parse(r#"span[class*="confidence"]"#).unwrap();

        let mut records = Vec::new();
        for block in doc.select(&block_sel) {
            let home = text_of(block.select(&home_sel).next());
            let away = text_of(block.select(&away_sel).next());
            let tip = text_of(block.select(&tip_sel).next());
            if home.is_empty() || away.is_empty() || tip.is_empty() {
                continue;
            }
            let confidence = text_of(block.select(&conf_sel).next());

            records.push(MatchRecord {
                source: "eScored".into(),
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

impl Default for EscoredSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PredictionSource for EscoredSource {
    fn name(&self) -> &str {
        "eScored"
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
                "eScored returned {}",
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
    fn test_parse_match_blocks() {
        let html = r#"
            <div class="match-prediction-row">
              <span class="home">Milan</span>
              <span class="away">Inter</span>
              <span class="prediction-label">OVER</span>
              <span class="confidence">68</span>
            </div>
        "#;
        let records = EscoredSource::parse_predictions(html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].prediction, "OVER");
        assert_eq!(records[0].confidence, 68.0);
    }
}
