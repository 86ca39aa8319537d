#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Phytochemical table scraper.
//!
//! Reads a list of plant names, fetches one page per plant from a URL
//! template (by default the IMPPAT phytochemical database), pulls the rows
//! out of the first HTML table on each page ([`html_table`]) and writes
//! them all to a single CSV ([`output`]).
//!
//! Fetching is best-effort and strictly sequential: a plant whose page
//! returns a non-200 status, has no table, or fails to load at all is
//! logged and skipped. There are no retries.

pub mod html_table;
pub mod output;
pub mod plants;
pub mod progress;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use remedy_models::TableRow;
use remedy_models::config::PhytochemicalsConfig;

use crate::html_table::TableSelectors;
use crate::progress::ProgressCallback;

/// Errors that can occur during scraping operations.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// An HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A CSS selector could not be parsed.
    #[error("Selector error: {0}")]
    Selector(String),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing or writing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Placeholder replaced by the plant name in URL templates.
pub const PLANT_PLACEHOLDER: &str = "{plant}";

/// Builds the page URL for `plant` from `template`.
#[must_use]
pub fn plant_url(template: &str, plant: &str) -> String {
    template.replace(PLANT_PLACEHOLDER, plant)
}

/// A fetched page: the HTTP status and the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

/// Trait for retrieving a page by URL.
///
/// [`HttpFetcher`] is the real implementation; tests substitute canned
/// pages.
pub trait PageFetcher: Send + Sync {
    /// Fetches `url`, returning its status and body.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the request cannot be completed.
    fn fetch(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = Result<FetchedPage, ScrapeError>> + Send;
}

/// [`PageFetcher`] backed by a [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Builds a client, optionally overriding the `User-Agent` header.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the client cannot be built.
    pub fn new(user_agent: Option<&str>) -> Result<Self, ScrapeError> {
        let mut builder = reqwest::Client::builder();
        if let Some(agent) = user_agent {
            builder = builder.user_agent(agent.to_owned());
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, ScrapeError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        log::debug!("GET {url} -> {status} ({} bytes)", body.len());

        Ok(FetchedPage { status, body })
    }
}

/// What happened when a single plant was scraped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlantOutcome {
    /// The page had a table; these are its rows.
    Rows(Vec<TableRow>),
    /// The page loaded but contained no matching table.
    NoTable,
    /// The server answered with a status other than 200.
    HttpStatus(u16),
}

/// Totals for a full scrape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeReport {
    /// Rows from every scraped plant, concatenated in input order.
    pub rows: Vec<TableRow>,
    /// Plants whose table was extracted.
    pub scraped: usize,
    /// Plants that were skipped (bad status, no table, or request error).
    pub skipped: Vec<String>,
}

/// Scrapes the first table from one page per plant.
#[derive(Debug)]
pub struct PhytochemicalScraper<F = HttpFetcher> {
    fetcher: F,
    url_template: String,
    selectors: TableSelectors,
    delay: Option<Duration>,
}

impl PhytochemicalScraper<HttpFetcher> {
    /// Creates a scraper that fetches over HTTP using `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] if the table selector is invalid or the HTTP
    /// client cannot be built.
    pub fn from_config(config: &PhytochemicalsConfig) -> Result<Self, ScrapeError> {
        let fetcher = HttpFetcher::new(config.user_agent.as_deref())?;
        Self::with_fetcher(fetcher, config)
    }
}

impl<F: PageFetcher> PhytochemicalScraper<F> {
    /// Creates a scraper that uses `fetcher` to retrieve pages.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Selector`] if the table selector is invalid.
    pub fn with_fetcher(fetcher: F, config: &PhytochemicalsConfig) -> Result<Self, ScrapeError> {
        if !config.url_template.contains(PLANT_PLACEHOLDER) {
            log::warn!(
                "URL template '{}' has no {PLANT_PLACEHOLDER} placeholder; every plant will hit the same page",
                config.url_template
            );
        }

        Ok(Self {
            fetcher,
            url_template: config.url_template.clone(),
            selectors: TableSelectors::new(&config.table_selector)?,
            delay: config.delay_ms.map(Duration::from_millis),
        })
    }

    /// Fetches and parses the page for one plant.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the request itself fails.
    pub async fn fetch_plant(&self, plant: &str) -> Result<PlantOutcome, ScrapeError> {
        let url = plant_url(&self.url_template, plant);
        let page = self.fetcher.fetch(&url).await?;

        if page.status != 200 {
            return Ok(PlantOutcome::HttpStatus(page.status));
        }

        Ok(html_table::parse_first_table(&page.body, &self.selectors)
            .map_or(PlantOutcome::NoTable, PlantOutcome::Rows))
    }

    /// Scrapes every plant in order, skipping the ones that fail.
    pub async fn scrape_all(
        &self,
        plants: &[String],
        progress: &Arc<dyn ProgressCallback>,
    ) -> ScrapeReport {
        let mut report = ScrapeReport::default();
        progress.set_total(plants.len() as u64);

        for (i, plant) in plants.iter().enumerate() {
            if i > 0
                && let Some(delay) = self.delay
            {
                tokio::time::sleep(delay).await;
            }

            progress.set_message(plant.clone());

            match self.fetch_plant(plant).await {
                Ok(PlantOutcome::Rows(rows)) => {
                    log::debug!("{plant}: {} rows", rows.len());
                    report.rows.extend(rows);
                    report.scraped += 1;
                }
                Ok(PlantOutcome::NoTable) => {
                    log::warn!("No table found for {plant}");
                    report.skipped.push(plant.clone());
                }
                Ok(PlantOutcome::HttpStatus(status)) => {
                    log::warn!("Failed to fetch data for {plant}. Status code: {status}");
                    report.skipped.push(plant.clone());
                }
                Err(e) => {
                    log::warn!("Failed to fetch data for {plant}: {e}");
                    report.skipped.push(plant.clone());
                }
            }

            progress.inc(1);
        }

        progress.finish(format!(
            "Scraped {} of {} plants ({} rows)",
            report.scraped,
            plants.len(),
            report.rows.len()
        ));

        report
    }

    /// Reads plant names from `plants_csv`, scrapes them and writes the
    /// combined rows to `output`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] if the plant list cannot be read or the
    /// output cannot be written. Per-plant failures are not errors.
    pub async fn run(
        &self,
        plants_csv: &Path,
        output: &Path,
        progress: &Arc<dyn ProgressCallback>,
    ) -> Result<ScrapeReport, ScrapeError> {
        let plants = plants::read_plant_names_file(plants_csv)?;
        let report = self.scrape_all(&plants, progress).await;

        output::write_rows_file(&report.rows, output)?;
        log::info!(
            "CSV file created successfully: {} ({} rows from {} plants, {} skipped)",
            output.display(),
            report.rows.len(),
            report.scraped,
            report.skipped.len()
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};
    use std::sync::Mutex;

    use tokio::time::Instant;

    use super::*;
    use crate::progress::null_progress;

    /// Serves canned pages and records every requested URL and when it was
    /// requested.
    #[derive(Default)]
    struct CannedFetcher {
        pages: BTreeMap<String, FetchedPage>,
        failing: BTreeSet<String>,
        requested: Mutex<Vec<String>>,
        fetched_at: Mutex<Vec<Instant>>,
    }

    impl CannedFetcher {
        fn with_page(mut self, url: &str, status: u16, body: &str) -> Self {
            self.pages.insert(
                url.to_owned(),
                FetchedPage {
                    status,
                    body: body.to_owned(),
                },
            );
            self
        }

        fn with_error(mut self, url: &str) -> Self {
            self.failing.insert(url.to_owned());
            self
        }
    }

    impl PageFetcher for CannedFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedPage, ScrapeError> {
            self.requested.lock().unwrap().push(url.to_owned());
            self.fetched_at.lock().unwrap().push(Instant::now());
            if self.failing.contains(url) {
                return Err(ScrapeError::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionReset,
                    "connection reset by peer",
                )));
            }
            Ok(self.pages.get(url).cloned().unwrap_or(FetchedPage {
                status: 404,
                body: String::new(),
            }))
        }
    }

    fn config() -> PhytochemicalsConfig {
        PhytochemicalsConfig {
            url_template: "https://imppat.test/phytochemical/{plant}".to_owned(),
            ..PhytochemicalsConfig::default()
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn substitutes_plant_into_template() {
        assert_eq!(
            plant_url(
                "https://cb.imsc.res.in/imppat/phytochemical/{plant}",
                "Curcuma longa"
            ),
            "https://cb.imsc.res.in/imppat/phytochemical/Curcuma longa"
        );
        assert_eq!(plant_url("https://x.test/static", "Aloe"), "https://x.test/static");
    }

    #[tokio::test]
    async fn classifies_each_outcome() {
        let fetcher = CannedFetcher::default()
            .with_page(
                "https://imppat.test/phytochemical/Aloe vera",
                200,
                "<table><tr><th>Compound</th></tr><tr><td>Aloin</td></tr></table>",
            )
            .with_page(
                "https://imppat.test/phytochemical/Unknown",
                200,
                "<p>No phytochemicals</p>",
            )
            .with_page("https://imppat.test/phytochemical/Down", 503, "");
        let scraper = PhytochemicalScraper::with_fetcher(fetcher, &config()).unwrap();

        assert_eq!(
            scraper.fetch_plant("Aloe vera").await.unwrap(),
            PlantOutcome::Rows(vec![
                TableRow(names(&["Compound"])),
                TableRow(names(&["Aloin"])),
            ])
        );
        assert_eq!(
            scraper.fetch_plant("Unknown").await.unwrap(),
            PlantOutcome::NoTable
        );
        assert_eq!(
            scraper.fetch_plant("Down").await.unwrap(),
            PlantOutcome::HttpStatus(503)
        );
    }

    #[tokio::test]
    async fn scrape_all_concatenates_and_skips() {
        let fetcher = CannedFetcher::default()
            .with_page(
                "https://imppat.test/phytochemical/Curcuma longa",
                200,
                "<table><tr><td>Curcumin</td></tr><tr><td>Turmerone</td></tr></table>",
            )
            .with_page(
                "https://imppat.test/phytochemical/Bare",
                200,
                "<html><body>nothing here</body></html>",
            )
            .with_page(
                "https://imppat.test/phytochemical/Ocimum",
                200,
                "<table><tr><td>Eugenol</td><td>Leaf</td></tr></table>",
            );
        let scraper = PhytochemicalScraper::with_fetcher(fetcher, &config()).unwrap();

        let report = scraper
            .scrape_all(
                &names(&["Curcuma longa", "Missing", "Bare", "Ocimum"]),
                &null_progress(),
            )
            .await;

        assert_eq!(report.scraped, 2);
        assert_eq!(report.skipped, names(&["Missing", "Bare"]));
        assert_eq!(
            report.rows,
            vec![
                TableRow(names(&["Curcumin"])),
                TableRow(names(&["Turmerone"])),
                TableRow(names(&["Eugenol", "Leaf"])),
            ]
        );
        assert_eq!(
            *scraper.fetcher.requested.lock().unwrap(),
            names(&[
                "https://imppat.test/phytochemical/Curcuma longa",
                "https://imppat.test/phytochemical/Missing",
                "https://imppat.test/phytochemical/Bare",
                "https://imppat.test/phytochemical/Ocimum",
            ])
        );
    }

    #[tokio::test]
    async fn duplicate_plants_are_fetched_twice() {
        let fetcher = CannedFetcher::default().with_page(
            "https://imppat.test/phytochemical/Neem",
            200,
            "<table><tr><td>Azadirachtin</td></tr></table>",
        );
        let scraper = PhytochemicalScraper::with_fetcher(fetcher, &config()).unwrap();

        let report = scraper
            .scrape_all(&names(&["Neem", "Neem"]), &null_progress())
            .await;

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.scraped, 2);
    }

    #[tokio::test]
    async fn transport_error_skips_plant_and_continues() {
        let fetcher = CannedFetcher::default()
            .with_error("https://imppat.test/phytochemical/Tulsi")
            .with_page(
                "https://imppat.test/phytochemical/Neem",
                200,
                "<table><tr><td>Azadirachtin</td></tr></table>",
            );
        let scraper = PhytochemicalScraper::with_fetcher(fetcher, &config()).unwrap();

        assert!(matches!(
            scraper.fetch_plant("Tulsi").await,
            Err(ScrapeError::Io(_))
        ));

        let report = scraper
            .scrape_all(&names(&["Tulsi", "Neem"]), &null_progress())
            .await;

        assert_eq!(report.skipped, names(&["Tulsi"]));
        assert_eq!(report.scraped, 1);
        assert_eq!(report.rows, vec![TableRow(names(&["Azadirachtin"]))]);
        assert_eq!(
            scraper.fetcher.requested.lock().unwrap().last().map(String::as_str),
            Some("https://imppat.test/phytochemical/Neem")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn delay_is_applied_between_plants_only() {
        let delay = Duration::from_millis(1500);
        let config = PhytochemicalsConfig {
            delay_ms: Some(1500),
            ..config()
        };
        let scraper = PhytochemicalScraper::with_fetcher(CannedFetcher::default(), &config).unwrap();

        let start = Instant::now();
        scraper
            .scrape_all(&names(&["Aloe", "Neem", "Tulsi"]), &null_progress())
            .await;
        let elapsed = start.elapsed();

        let fetched_at = scraper.fetcher.fetched_at.lock().unwrap().clone();
        assert_eq!(fetched_at.len(), 3);
        assert!(fetched_at[0] - start < delay);
        for pair in fetched_at.windows(2) {
            assert!(pair[1] - pair[0] >= delay);
        }
        assert!(elapsed >= delay * 2);
        assert!(elapsed < delay * 3);
    }

    #[tokio::test(start_paused = true)]
    async fn single_plant_is_not_delayed() {
        let config = PhytochemicalsConfig {
            delay_ms: Some(1500),
            ..config()
        };
        let scraper = PhytochemicalScraper::with_fetcher(CannedFetcher::default(), &config).unwrap();

        let start = Instant::now();
        scraper.scrape_all(&names(&["Aloe"]), &null_progress()).await;

        assert!(start.elapsed() < Duration::from_millis(1500));
    }

    #[test]
    fn invalid_selector_is_rejected_up_front() {
        let config = PhytochemicalsConfig {
            table_selector: "##".to_owned(),
            ..config()
        };
        assert!(matches!(
            PhytochemicalScraper::with_fetcher(CannedFetcher::default(), &config),
            Err(ScrapeError::Selector(_))
        ));
    }
}
