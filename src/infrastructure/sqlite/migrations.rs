use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS predictions (
            id TEXT PRIMARY KEY,
            recorded_at TEXT NOT NULL,
            home_team TEXT NOT NULL,
            away_team TEXT NOT NULL,
            league TEXT,
            best_prediction TEXT,
            avg_confidence INTEGER NOT NULL DEFAULT 0,
            agreement_pct INTEGER NOT NULL DEFAULT 0,
            source_count INTEGER NOT NULL DEFAULT 0,
            outcome TEXT
        );

        CREATE TABLE IF NOT EXISTS prediction_sources (
            prediction_id TEXT NOT NULL REFERENCES predictions(id),
            source TEXT NOT NULL,
            label TEXT NOT NULL,
            confidence REAL NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_predictions_recorded ON predictions(recorded_at);
        CREATE INDEX IF NOT EXISTS idx_prediction_sources_pred ON prediction_sources(prediction_id);
        CREATE INDEX IF NOT EXISTS idx_prediction_sources_source ON prediction_sources(source);
        ",
    )
    .map_err(|e| format!("Migration failed: {e}"))
}
