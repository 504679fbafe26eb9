use std::sync::Mutex;

use chrono::DateTime;
use rusqlite::{params, Connection};

use crate::domain::entities::consolidated_match::SourcePrediction;
use crate::domain::error::DomainError;
use crate::domain::ports::history_store::{
    HistoryFilter, HistoryStore, PredictionSummary, SourceAccuracy,
};

pub struct SqliteHistoryStore {
    conn: Mutex<Connection>,
}

impl SqliteHistoryStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn row_to_summary(row: &rusqlite::Row) -> Result<PredictionSummary, rusqlite::Error> {
        let recorded_str: String = row.get(1)?;
        let source_count: i64 = row.get(8)?;

        Ok(PredictionSummary {
            id: row.get(0)?,
            recorded_at: DateTime::parse_from_rfc3339(&recorded_str)
                .map(|dt| dt.with_timezone(&chrono::Utc))
                .unwrap_or_else(|_| chrono::Utc::now()),
            home_team: row.get(2)?,
            away_team: row.get(3)?,
            league: row.get(4)?,
            best_prediction: row.get(5)?,
            avg_confidence: row.get::<_, i64>(6)? as u8,
            agreement_pct: row.get::<_, i64>(7)? as u8,
            source_count: source_count as usize,
            sources: Vec::new(),
            outcome: row.get(9)?,
        })
    }

    fn load_sources(
        conn: &Connection,
        prediction_id: &str,
    ) -> Result<Vec<SourcePrediction>, DomainError> {
        let mut stmt = conn
            .prepare(
                "SELECT source, label, confidence FROM prediction_sources
                 WHERE prediction_id = ?1 ORDER BY rowid",
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let sources = stmt
            .query_map(params![prediction_id], |row| {
                Ok(SourcePrediction {
                    source: row.get(0)?,
                    prediction: row.get(1)?,
                    confidence: row.get(2)?,
                })
            })
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(sources)
    }
}

impl HistoryStore for SqliteHistoryStore {
    fn record_summary(&self, summary: &PredictionSummary) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.execute(
            "INSERT INTO predictions (id, recorded_at, home_team, away_team, league, best_prediction, avg_confidence, agreement_pct, source_count, outcome)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                summary.id,
                summary.recorded_at.to_rfc3339(),
                summary.home_team,
                summary.away_team,
                summary.league,
                summary.best_prediction,
                summary.avg_confidence as i64,
                summary.agreement_pct as i64,
                summary.source_count as i64,
                summary.outcome,
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to record prediction: {e}")))?;

        for s in &summary.sources {
            conn.execute(
                "INSERT INTO prediction_sources (prediction_id, source, label, confidence)
                 VALUES (?1, ?2, ?3, ?4)",
                params![summary.id, s.source, s.prediction, s.confidence],
            )
            .map_err(|e| DomainError::Database(format!("Failed to record source: {e}")))?;
        }
        Ok(())
    }

    fn mark_outcome(&self, id: &str, outcome: &str) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let rows = conn
            .execute(
                "UPDATE predictions SET outcome = ?1 WHERE id = ?2",
                params![outcome, id],
            )
            .map_err(|e| DomainError::Database(format!("Failed to mark outcome: {e}")))?;
        if rows == 0 {
            return Err(DomainError::NotFound(format!("Prediction not found: {id}")));
        }
        Ok(())
    }

    fn list(&self, filter: &HistoryFilter) -> Result<Vec<PredictionSummary>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut sql = String::from(
            "SELECT id, recorded_at, home_team, away_team, league, best_prediction, avg_confidence, agreement_pct, source_count, outcome
             FROM predictions WHERE 1=1",
        );
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(since) = &filter.since {
            sql.push_str(&format!(" AND recorded_at >= ?{}", param_values.len() + 1));
            param_values.push(Box::new(since.to_rfc3339()));
        }
        if let Some(resolved) = filter.resolved {
            if resolved {
                sql.push_str(" AND outcome IS NOT NULL");
            } else {
                sql.push_str(" AND outcome IS NULL");
            }
        }
        sql.push_str(" ORDER BY recorded_at DESC");
        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT ?{}", param_values.len() + 1));
            param_values.push(Box::new(limit as i64));
        }

        let params_refs: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut summaries: Vec<PredictionSummary> = stmt
            .query_map(params_refs.as_slice(), Self::row_to_summary)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();

        for summary in &mut summaries {
            summary.sources = Self::load_sources(&conn, &summary.id)?;
        }
        Ok(summaries)
    }

    fn source_accuracy(&self) -> Result<Vec<SourceAccuracy>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare(
                "SELECT ps.source,
                        SUM(CASE WHEN UPPER(ps.label) = UPPER(p.outcome) THEN 1 ELSE 0 END) AS correct,
                        COUNT(*) AS total
                 FROM prediction_sources ps
                 JOIN predictions p ON p.id = ps.prediction_id
                 WHERE p.outcome IS NOT NULL
                 GROUP BY ps.source
                 ORDER BY ps.source",
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let accuracies = stmt
            .query_map([], |row| {
                let correct: i64 = row.get(1)?;
                let total: i64 = row.get(2)?;
                let pct = if total > 0 {
                    ((correct as f64 / total as f64) * 100.0).round() as u8
                } else {
                    0
                };
                Ok(SourceAccuracy {
                    source: row.get(0)?,
                    correct: correct as usize,
                    total: total as usize,
                    accuracy_pct: pct,
                })
            })
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(accuracies)
    }
}
