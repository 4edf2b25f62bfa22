use sqlx::PgPool;

use crate::api::VacancySource;
use crate::error::AppError;
use crate::models::employer::Employer;
use crate::models::vacancy::VacancyRow;

/// Per-run accounting. Ingestion keeps going after a per-employer failure;
/// the caller inspects the summary to decide whether the run was good enough.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub employers_ok: usize,
    pub employers_failed: usize,
    pub rows_inserted: usize,
}

/// Fetch and persist vacancies for every roster employer, in roster order.
/// Each employer's rows go in as one batch before the next employer starts.
/// No dedup: re-running appends.
pub async fn ingest(
    source: &dyn VacancySource,
    pool: &PgPool,
    table: &str,
    roster: &[Employer],
    max_vacancies: usize,
) -> Result<IngestSummary, AppError> {
    let mut summary = IngestSummary::default();

    for employer in roster {
        match ingest_employer(source, pool, table, employer, max_vacancies).await {
            Ok(count) => {
                tracing::info!(
                    "Inserted {count} vacancies for '{}' (id {})",
                    employer.name,
                    employer.id
                );
                summary.employers_ok += 1;
                summary.rows_inserted += count;
            }
            Err(e) => {
                tracing::error!("Skipping employer '{}' (id {}): {e}", employer.name, employer.id);
                summary.employers_failed += 1;
            }
        }
    }

    Ok(summary)
}

async fn ingest_employer(
    source: &dyn VacancySource,
    pool: &PgPool,
    table: &str,
    employer: &Employer,
    max_vacancies: usize,
) -> Result<usize, AppError> {
    let raw = source.collect_vacancies(&employer.id, max_vacancies).await?;
    let rows: Vec<VacancyRow> = raw.iter().map(VacancyRow::from_raw).collect();
    VacancyRow::insert_batch(pool, table, &rows).await?;
    Ok(rows.len())
}
