use serde::Deserialize;
use sqlx::PgPool;

use crate::db::quote_ident;
use crate::error::AppError;

/// Fixed currency code used when the API reports no salary at all.
pub const DEFAULT_CURRENCY: &str = "RUR";

/// A vacancy as the hh.ru API returns it. Only the fields we persist are
/// decoded; everything else in the payload is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawVacancy {
    pub name: String,
    pub area: Area,
    pub salary: Option<Salary>,
    pub employer: EmployerRef,
    pub alternate_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Area {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmployerRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Salary {
    pub from: Option<i32>,
    pub to: Option<i32>,
    pub currency: Option<String>,
}

/// One persisted row of the vacancy table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct VacancyRow {
    pub name: String,
    pub area: String,
    pub min_salary: i32,
    pub max_salary: i32,
    pub currency: String,
    pub employer: String,
    pub url: String,
}

impl VacancyRow {
    /// Normalize an API record into the fixed 7-column shape.
    ///
    /// A missing salary object means both bounds are 0 and the currency is
    /// "RUR". Inside a present salary, null bounds also become 0 and a null
    /// currency falls back to "RUR".
    pub fn from_raw(raw: &RawVacancy) -> VacancyRow {
        let (min_salary, max_salary, currency) = match &raw.salary {
            Some(salary) => (
                salary.from.unwrap_or(0),
                salary.to.unwrap_or(0),
                salary
                    .currency
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            ),
            None => (0, 0, DEFAULT_CURRENCY.to_string()),
        };

        VacancyRow {
            name: raw.name.clone(),
            area: raw.area.name.clone(),
            min_salary,
            max_salary,
            currency,
            employer: raw.employer.name.clone(),
            url: raw.alternate_url.clone(),
        }
    }

    /// Insert one employer's rows as a single transaction. Either the whole
    /// batch lands or none of it does.
    pub async fn insert_batch(
        pool: &PgPool,
        table: &str,
        rows: &[VacancyRow],
    ) -> Result<(), AppError> {
        let sql = format!(
            "INSERT INTO {} (name, area, min_salary, max_salary, currency, employer, url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
            quote_ident(table)?
        );

        let mut tx = pool.begin().await?;
        for row in rows {
            sqlx::query(&sql)
                .bind(&row.name)
                .bind(&row.area)
                .bind(row.min_salary)
                .bind(row.max_salary)
                .bind(&row.currency)
                .bind(&row.employer)
                .bind(&row.url)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(salary: Option<Salary>) -> RawVacancy {
        RawVacancy {
            name: "Python Developer".to_string(),
            area: Area {
                name: "Москва".to_string(),
            },
            salary,
            employer: EmployerRef {
                name: "Яндекс".to_string(),
            },
            alternate_url: "https://hh.ru/vacancy/1".to_string(),
        }
    }

    #[test]
    fn maps_full_salary_verbatim() {
        let row = VacancyRow::from_raw(&raw(Some(Salary {
            from: Some(100_000),
            to: Some(150_000),
            currency: Some("EUR".to_string()),
        })));

        assert_eq!(row.min_salary, 100_000);
        assert_eq!(row.max_salary, 150_000);
        assert_eq!(row.currency, "EUR");
    }

    #[test]
    fn null_salary_bounds_default_to_zero() {
        let row = VacancyRow::from_raw(&raw(Some(Salary {
            from: None,
            to: Some(90_000),
            currency: Some("RUR".to_string()),
        })));

        assert_eq!(row.min_salary, 0);
        assert_eq!(row.max_salary, 90_000);
    }

    #[test]
    fn absent_salary_defaults_everything() {
        let row = VacancyRow::from_raw(&raw(None));

        assert_eq!(row.min_salary, 0);
        assert_eq!(row.max_salary, 0);
        assert_eq!(row.currency, "RUR");
    }

    #[test]
    fn decodes_api_record_with_unknown_fields() {
        let json = r#"{
            "name": "Rust Engineer",
            "area": {"id": "1", "name": "Москва"},
            "salary": null,
            "employer": {"id": "1740", "name": "Яндекс", "trusted": true},
            "alternate_url": "https://hh.ru/vacancy/42",
            "published_at": "2024-01-01T00:00:00+0300"
        }"#;

        let raw: RawVacancy = serde_json::from_str(json).unwrap();
        let row = VacancyRow::from_raw(&raw);
        assert_eq!(row.name, "Rust Engineer");
        assert_eq!(row.area, "Москва");
        assert_eq!(row.employer, "Яндекс");
        assert_eq!(row.url, "https://hh.ru/vacancy/42");
        assert_eq!(row.currency, "RUR");
    }
}
