use sqlx::PgPool;

use crate::db::quote_ident;
use crate::error::AppError;
use crate::models::vacancy::VacancyRow;

/// The five queries the menu offers, as a closed enum. An out-of-range key
/// is rejected at parse time instead of falling through to nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Key 1: one row per distinct employer with its vacancy count.
    EmployerCounts,
    /// Key 2: full dump of the table.
    AllVacancies,
    /// Key 3: average min and max salary over all rows.
    AverageSalary,
    /// Key 4: rows whose min salary beats the table-wide average, with the
    /// average recomputed on every call.
    AboveAverageSalary,
    /// Key 5: rows whose name contains the keyword (case-sensitive).
    NameContains(String),
}

#[derive(Debug, sqlx::FromRow)]
pub struct EmployerCount {
    pub employer: String,
    pub vacancies: i64,
}

#[derive(Debug)]
pub enum QueryOutput {
    EmployerCounts(Vec<EmployerCount>),
    Vacancies(Vec<VacancyRow>),
    /// NULL averages when the table is empty.
    AverageSalary {
        avg_min: Option<f64>,
        avg_max: Option<f64>,
    },
}

impl Query {
    pub fn from_key(key: &str, keyword: Option<&str>) -> Result<Query, AppError> {
        match key {
            "1" => Ok(Query::EmployerCounts),
            "2" => Ok(Query::AllVacancies),
            "3" => Ok(Query::AverageSalary),
            "4" => Ok(Query::AboveAverageSalary),
            "5" => match keyword {
                Some(kw) => Ok(Query::NameContains(kw.to_string())),
                None => Err(AppError::MissingKeyword),
            },
            other => Err(AppError::UnknownQueryKey(other.to_string())),
        }
    }

    /// The statement for this query against an already-quoted table
    /// identifier. Values are never interpolated; the keyword for
    /// `NameContains` is bound at execution time.
    fn sql(&self, table: &str) -> String {
        match self {
            Query::EmployerCounts => {
                format!("SELECT employer, count(*) AS vacancies FROM {table} GROUP BY employer")
            }
            Query::AllVacancies => format!("SELECT * FROM {table}"),
            Query::AverageSalary => format!(
                "SELECT AVG(min_salary)::float8 AS avg_min, \
                 AVG(max_salary)::float8 AS avg_max FROM {table}"
            ),
            Query::AboveAverageSalary => format!(
                "SELECT * FROM {table} \
                 WHERE min_salary > (SELECT AVG(min_salary) FROM {table})"
            ),
            Query::NameContains(_) => format!(
                "SELECT * FROM {table} \
                 WHERE name LIKE '%' || $1 || '%' ESCAPE '\\'"
            ),
        }
    }

    pub async fn run(&self, pool: &PgPool, table: &str) -> Result<QueryOutput, AppError> {
        let table = quote_ident(table)?;
        let sql = self.sql(&table);

        match self {
            Query::EmployerCounts => {
                let rows = sqlx::query_as::<_, EmployerCount>(&sql).fetch_all(pool).await?;
                Ok(QueryOutput::EmployerCounts(rows))
            }
            Query::AllVacancies | Query::AboveAverageSalary => {
                let rows = sqlx::query_as::<_, VacancyRow>(&sql).fetch_all(pool).await?;
                Ok(QueryOutput::Vacancies(rows))
            }
            Query::AverageSalary => {
                let (avg_min, avg_max): (Option<f64>, Option<f64>) =
                    sqlx::query_as(&sql).fetch_one(pool).await?;
                Ok(QueryOutput::AverageSalary { avg_min, avg_max })
            }
            Query::NameContains(keyword) => {
                let rows = sqlx::query_as::<_, VacancyRow>(&sql)
                    .bind(escape_like(keyword))
                    .fetch_all(pool)
                    .await?;
                Ok(QueryOutput::Vacancies(rows))
            }
        }
    }
}

/// Escape LIKE metacharacters so the keyword matches literally. Without
/// this, a keyword of "%" would match every row.
fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
