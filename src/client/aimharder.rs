use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use log::info;
use reqwest::cookie::Jar;
use reqwest::{StatusCode, Url};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::RequestLogger;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Server-assigned class identifier. The API has sent both numbers and strings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(untagged)]
pub enum SlotId {
    Number(u64),
    Text(String),
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotId::Number(n) => write!(f, "{}", n),
            SlotId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
#[allow(non_snake_case)]
pub struct ClassSlot {
    pub id: SlotId,
    pub timeid: String,
    #[serde(default)]
    pub className: String,
    /// Day the schedule was queried for. Never read from the payload.
    #[serde(skip)]
    pub date: String,
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct Schedule {
    #[serde(default)]
    pub bookings: Vec<ClassSlot>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[allow(non_snake_case)]
pub struct BookingOutcome {
    #[serde(default)]
    pub clasesContratadas: serde_json::Value,
    #[serde(default)]
    pub bookState: Option<i64>,
    #[serde(default)]
    pub errorMssg: Option<String>,
    #[serde(default)]
    pub errorMssgLang: Option<String>,
}

impl BookingOutcome {
    /// Server-reported failure message, if any. An empty string counts as none.
    pub fn error_message(&self) -> Option<&str> {
        self.errorMssg.as_deref().filter(|m| !m.is_empty())
    }
}

/// Something that can book one class on one day.
#[async_trait::async_trait]
pub trait ClassBooker {
    async fn book_class(&self, date: &str, time_id: &str) -> Result<()>;
}

pub struct Client {
    http_client: ClientWithMiddleware,
    base_url: Url,
    box_id: String,
}

impl Client {
    pub fn new(config: &Config) -> Result<Client> {
        let base_url = config.base_url()?;

        let jar = Jar::default();
        jar.add_cookie_str(
            &format!("{}={}; Path=/", config.cookie_name, config.cookie_value),
            &base_url,
        );

        let inner = reqwest::Client::builder()
            .cookie_provider(Arc::new(jar))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(Error::ClientBuild)?;

        let http_client = ClientBuilder::new(inner)
            .with(RequestLogger::new(config.log_requests))
            .build();

        Ok(Client {
            http_client,
            base_url,
            box_id: config.box_id.clone(),
        })
    }

    /// Lists the day's classes, picks the one at `time_id` and books it.
    pub async fn book_class(&self, date: &str, time_id: &str) -> Result<()> {
        let classes = self.get_classes(date).await?;
        let class = find_one_at(&classes, time_id)?;
        self.book(class).await?;
        Ok(())
    }

    pub async fn get_classes(&self, date: &str) -> Result<Vec<ClassSlot>> {
        let mut url = self.endpoint("api/bookings")?;
        url.query_pairs_mut()
            .append_pair("day", date)
            .append_pair("box", &self.box_id);

        let response = self.http_client.get(url).send().await?;
        if response.status() != StatusCode::OK {
            return Err(Error::Status(response.status()));
        }

        let response_text = response.text().await?;
        let mut schedule: Schedule = serde_json::from_str(&response_text)?;
        for class in schedule.bookings.iter_mut() {
            class.date = date.to_string();
        }

        info!("Found {} classes for date: {}", schedule.bookings.len(), date);
        Ok(schedule.bookings)
    }

    pub async fn book(&self, class: &ClassSlot) -> Result<BookingOutcome> {
        let url = self.endpoint("api/book")?;
        let form = [("id", class.id.to_string()), ("day", class.date.clone())];

        let response = self
            .http_client
            .post(url)
            .form(&form)
            .send()
            .await?;

        // A rejected booking can still come back as a 200 with errorMssg set.
        let status = response.status();
        let response_text = response.text().await?;
        let outcome: BookingOutcome = serde_json::from_str(&response_text)?;

        if status != StatusCode::OK || outcome.error_message().is_some() {
            return Err(Error::Rejected {
                status,
                message: outcome.error_message().unwrap_or_default().to_string(),
            });
        }

        Ok(outcome)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|e| Error::InvalidHost {
            host: self.base_url.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl ClassBooker for Client {
    async fn book_class(&self, date: &str, time_id: &str) -> Result<()> {
        Client::book_class(self, date, time_id).await
    }
}

/// First class in schedule order whose time slot is `time_id`.
pub fn find_one_at<'a>(classes: &'a [ClassSlot], time_id: &str) -> Result<&'a ClassSlot> {
    classes
        .iter()
        .find(|class| class.timeid == time_id)
        .ok_or_else(|| Error::NoClassAt(time_id.to_string()))
}
