use async_trait::async_trait;
use chrono::{Datelike, Utc};

use super::{extract_confidence, http_client};
use crate::domain::entities::match_record::MatchRecord;
use crate::domain::ports::prediction_source::{PredictionSource, SourceError};

/// API-Football fixtures feed (RapidAPI). The only JSON source; fixtures
/// come with per-outcome win percentages from which the 1X2 label is
/// derived.
pub struct ApiFootballSource {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl ApiFootballSource {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: "https://api-football-v3.p.rapidapi.com".into(),
            client: http_client(),
        }
    }

    #[cfg(test)]
    fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            client: http_client(),
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct FixturesResponse {
    #[serde(default)]
    response: Vec<Fixture>,
}

#[derive(Debug, serde::Deserialize)]
struct Fixture {
    teams: Teams,
    league: League,
    fixture: FixtureInfo,
    #[serde(default)]
    predictions: Option<Predictions>,
}

#[derive(Debug, serde::Deserialize)]
struct Teams {
    home: Team,
    away: Team,
}

#[derive(Debug, serde::Deserialize)]
struct Team {
    name: String,
}

#[derive(Debug, serde::Deserialize)]
struct League {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct FixtureInfo {
    #[serde(default)]
    date: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct Predictions {
    #[serde(default)]
    percent: Option<Percent>,
}

/// Win percentages as reported, e.g. `{"home": "45%", "draw": "30%", ...}`.
#[derive(Debug, serde::Deserialize)]
struct Percent {
    #[serde(default)]
    home: Option<String>,
    #[serde(default)]
    draw: Option<String>,
    #[serde(default)]
    away: Option<String>,
}

#[async_trait]
impl PredictionSource for ApiFootballSource {
    fn name(&self) -> &str {
        "API-Football"
    }

    async fn fetch(&self) -> Result<Vec<MatchRecord>, SourceError> {
        if self.api_key.is_empty() {
            return Err(SourceError::Config("FOOTBALL_API_KEY not set".into()));
        }

        let today = Utc::now().date_naive();
        let resp = self
            .client
            .get(format!("{}/fixtures", self.base_url))
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", "api-football-v3.p.rapidapi.com")
            .query(&[
                ("date", today.format("%Y-%m-%d").to_string()),
                ("season", today.year().to_string()),
            ])
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(SourceError::Network(format!(
                "API-Football returned {}",
                resp.status()
            )));
        }

        let data: FixturesResponse = resp
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        Ok(data.response.iter().map(to_record).collect())
    }
}

fn to_record(fixture: &Fixture) -> MatchRecord {
    let (prediction, confidence) = fixture
        .predictions
        .as_ref()
        .and_then(|p| p.percent.as_ref())
        .map(derive_label)
        .unwrap_or_default();

    MatchRecord {
        source: "API-Football".into(),
        home_team: fixture.teams.home.name.clone(),
        away_team: fixture.teams.away.name.clone(),
        league: fixture.league.name.clone(),
        kickoff: fixture.fixture.date.as_deref().and_then(kickoff_time),
        prediction,
        confidence,
    }
}

/// Pick the strongest of the three win percentages and map it onto the
/// common 1X2 label space. A draw wins only when neither side leads.
fn derive_label(percent: &Percent) -> (String, f64) {
    let home = extract_confidence(percent.home.as_deref().unwrap_or(""));
    let draw = extract_confidence(percent.draw.as_deref().unwrap_or(""));
    let away = extract_confidence(percent.away.as_deref().unwrap_or(""));

    if home == 0.0 && draw == 0.0 && away == 0.0 {
        return (String::new(), 0.0);
    }
    if home > draw && home > away {
        ("1".to_string(), home)
    } else if away > draw && away > home {
        ("2".to_string(), away)
    } else {
        ("X".to_string(), draw)
    }
}

/// "2026-08-07T20:45:00+00:00" -> "20:45"
fn kickoff_time(date: &str) -> Option<String> {
    let time = date.split('T').nth(1)?;
    (time.len() >= 5).then(|| time[..5].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_label_home_leads() {
        let percent = Percent {
            home: Some("45%".into()),
            draw: Some("30%".into()),
            away: Some("25%".into()),
        };
        assert_eq!(derive_label(&percent), ("1".to_string(), 45.0));
    }

    #[test]
    fn test_derive_label_draw_on_balance() {
        let percent = Percent {
            home: Some("35%".into()),
            draw: Some("30%".into()),
            away: Some("35%".into()),
        };
        assert_eq!(derive_label(&percent), ("X".to_string(), 30.0));
    }

    #[test]
    fn test_derive_label_missing_percentages() {
        let percent = Percent {
            home: None,
            draw: None,
            away: None,
        };
        assert_eq!(derive_label(&percent), (String::new(), 0.0));
    }

    #[test]
    fn test_kickoff_time_from_iso_date() {
        assert_eq!(
            kickoff_time("2026-08-07T20:45:00+00:00").as_deref(),
            Some("20:45")
        );
        assert_eq!(kickoff_time("2026-08-07"), None);
    }

    #[tokio::test]
    async fn test_config_error_without_key() {
        let source = ApiFootballSource::with_base_url(String::new(), "http://localhost".into());
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, SourceError::Config(_)));
    }
}
