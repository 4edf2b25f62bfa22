// hh.ru API client. Two read-only endpoints: employer search by keyword and
// the paginated vacancy list for one employer.

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::models::employer::EmployerHit;
use crate::models::vacancy::RawVacancy;

/// Vacancies requested per page.
pub const PAGE_SIZE: u32 = 100;

/// Hard cap on page requests per employer.
pub const MAX_PAGES: u32 = 20;

/// Both hh.ru endpoints wrap their result list the same way.
#[derive(Debug, Deserialize)]
struct ItemsEnvelope<T> {
    items: Vec<T>,
}

/// A paginated source of vacancy records. The provided `collect_vacancies`
/// drives the pagination; implementors only supply single pages, which keeps
/// the stop logic testable without a network.
#[async_trait]
pub trait VacancySource: Send + Sync {
    /// Fetch one page of an employer's vacancies, ordered by publication
    /// time. An empty page means no more data.
    async fn fetch_page(&self, employer_id: &str, page: u32) -> Result<Vec<RawVacancy>, AppError>;

    /// Accumulate pages 0..20 until a page comes back empty or the count has
    /// already reached `max_count` before the next request.
    ///
    /// The accumulated list is not truncated to `max_count`: the cap is
    /// checked before each fetch, so the result can overshoot by up to one
    /// page. This mirrors the long-standing behavior of the collector and is
    /// deliberate; clamping here would silently change what lands in the
    /// table.
    async fn collect_vacancies(
        &self,
        employer_id: &str,
        max_count: usize,
    ) -> Result<Vec<RawVacancy>, AppError> {
        let mut vacancies = Vec::new();
        for page in 0..MAX_PAGES {
            if vacancies.len() >= max_count {
                break;
            }
            let batch = self.fetch_page(employer_id, page).await?;
            if batch.is_empty() {
                break;
            }
            vacancies.extend(batch);
        }
        Ok(vacancies)
    }
}

/// Client for the public hh.ru API.
pub struct HeadHunter {
    client: reqwest::Client,
    base_url: String,
}

impl HeadHunter {
    pub fn new(base_url: &str) -> Result<HeadHunter, AppError> {
        // hh.ru rejects requests without a User-Agent
        let client = reqwest::Client::builder()
            .user_agent(concat!("hh-collector/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(HeadHunter {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Search employers by keyword, restricted to those with at least one
    /// open vacancy. Single request, endpoint's own default page size.
    pub async fn search_employers(&self, keyword: &str) -> Result<Vec<EmployerHit>, AppError> {
        let url = format!("{}/employers", self.base_url);
        self.get_items(&url, &[("text", keyword), ("only_with_vacancies", "true")])
            .await
    }

    async fn get_items<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<T>, AppError> {
        let envelope: ItemsEnvelope<T> = self
            .client
            .get(url)
            .query(params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(envelope.items)
    }
}

#[async_trait]
impl VacancySource for HeadHunter {
    async fn fetch_page(&self, employer_id: &str, page: u32) -> Result<Vec<RawVacancy>, AppError> {
        let url = format!("{}/vacancies", self.base_url);
        let page = page.to_string();
        let per_page = PAGE_SIZE.to_string();
        self.get_items(
            &url,
            &[
                ("employer_id", employer_id),
                ("page", page.as_str()),
                ("per_page", per_page.as_str()),
                ("order_by", "publication_time"),
            ],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::models::vacancy::{Area, EmployerRef, RawVacancy};

    fn vacancy(n: usize) -> RawVacancy {
        RawVacancy {
            name: format!("Vacancy {n}"),
            area: Area {
                name: "Москва".to_string(),
            },
            salary: None,
            employer: EmployerRef {
                name: "Acme".to_string(),
            },
            alternate_url: format!("https://hh.ru/vacancy/{n}"),
        }
    }

    /// Serves `page_sizes[page]` records per page, empty beyond the end,
    /// and records every page index requested.
    struct CannedSource {
        page_sizes: Vec<usize>,
        requested: Mutex<Vec<u32>>,
    }

    impl CannedSource {
        fn new(page_sizes: Vec<usize>) -> CannedSource {
            CannedSource {
                page_sizes,
                requested: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> usize {
            self.requested.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl VacancySource for CannedSource {
        async fn fetch_page(
            &self,
            _employer_id: &str,
            page: u32,
        ) -> Result<Vec<RawVacancy>, AppError> {
            self.requested.lock().unwrap().push(page);
            let size = self.page_sizes.get(page as usize).copied().unwrap_or(0);
            Ok((0..size).map(vacancy).collect())
        }
    }

    #[tokio::test]
    async fn stops_at_first_empty_page() {
        let source = CannedSource::new(vec![3, 3, 0, 3]);
        let got = source.collect_vacancies("1", 1000).await.unwrap();

        assert_eq!(got.len(), 6);
        assert_eq!(*source.requested.lock().unwrap(), vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn stops_requesting_once_cap_is_reached() {
        let source = CannedSource::new(vec![10, 10, 10, 10]);
        let got = source.collect_vacancies("1", 20).await.unwrap();

        assert_eq!(got.len(), 20);
        assert_eq!(source.requests(), 2);
    }

    #[tokio::test]
    async fn may_overshoot_cap_by_less_than_one_page() {
        // Cap falls mid-page: the page that crosses it is kept whole.
        let source = CannedSource::new(vec![10, 10]);
        let got = source.collect_vacancies("1", 15).await.unwrap();

        assert_eq!(got.len(), 20);
        assert_eq!(source.requests(), 2);
    }

    #[tokio::test]
    async fn never_issues_more_than_twenty_requests() {
        let source = CannedSource::new(vec![1; 100]);
        let got = source.collect_vacancies("1", 1000).await.unwrap();

        assert_eq!(source.requests(), 20);
        assert_eq!(got.len(), 20);
    }

    #[test]
    fn empty_search_result_decodes_to_empty_collection() {
        let json = r#"{"items": [], "found": 0, "pages": 0, "per_page": 20, "page": 0}"#;
        let envelope: ItemsEnvelope<crate::models::employer::EmployerHit> =
            serde_json::from_str(json).unwrap();
        assert!(envelope.items.is_empty());
    }

    #[tokio::test]
    async fn zero_cap_issues_no_requests() {
        let source = CannedSource::new(vec![10, 10]);
        let got = source.collect_vacancies("1", 0).await.unwrap();

        assert!(got.is_empty());
        assert_eq!(source.requests(), 0);
    }
}
