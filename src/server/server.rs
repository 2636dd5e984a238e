use bytes::Bytes;
use http_body_util::Full;
use hyper::{
    body::Incoming,
    header::{HeaderValue, ALLOW, CONTENT_TYPE},
    service::Service,
    Method, Request, Response, StatusCode,
};
use log::{debug, error, warn};
use regex::Regex;
use serde::Serialize;

use std::{future::Future, pin::Pin, sync::Arc};

use crate::calendar::{error::CalendarError, table::CalendarTable};

use super::response::{ErrorResponse, MonthResponse, StatusResponse, YearResponse};

type ServerResult = Result<Response<Full<Bytes>>, hyper::Error>;

/// The Server
///
/// Handles the calendar endpoints. The lookups themselves live in
/// `CalendarTable`; this struct only parses the path and turns results into
/// JSON responses.
///
/// It implements hyper's `Service` trait and is cloned once per connection.
/// The table sits behind an `Arc`, so a clone is just a few pointer copies.
///
/// Routes, relative to each configured prefix:
/// - `/{year}` lists the year's holidays by month
/// - `/{year}/{month}` lists one month's holidays
/// - `/{year}/{month}/{day}` reports whether the day is a business day
#[derive(Clone)]
pub struct Server {
    table: Arc<CalendarTable>,
    prefixes: Arc<Vec<String>>,
    number_pattern: Regex,
}

impl Server {
    pub fn setup(table: Arc<CalendarTable>, prefixes: Vec<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            table,
            prefixes: Arc::new(prefixes),
            number_pattern: Regex::new(r"^[0-9]+$")?,
        })
    }

    /// Dispatch a request by method and path.
    pub fn handle(&self, method: &Method, path: &str) -> ServerResult {
        if *method != Method::GET {
            return Self::method_not_allowed();
        }
        let Some(rest) = self.strip_prefix(path) else {
            return Self::not_found("Not found");
        };
        let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [year] => self.year_holidays(year),
            [year, month] => self.month_holidays(year, month),
            [year, month, day] => self.day_status(year, month, day),
            _ => Self::not_found("Invalid parameters. Use format: /year/month/date"),
        }
    }

    /// The part of `path` after the first matching prefix.
    fn strip_prefix<'a>(&self, path: &'a str) -> Option<&'a str> {
        self.prefixes.iter().find_map(|prefix| {
            let prefix = prefix.trim_end_matches('/');
            let rest = path.strip_prefix(prefix)?;
            if rest.is_empty() || rest.starts_with('/') {
                Some(rest)
            } else {
                None
            }
        })
    }

    /// The `/{year}` endpoint.
    fn year_holidays(&self, year: &str) -> ServerResult {
        match self.table.holidays_for_year(year) {
            Ok(holidays) => Self::ok_data(&YearResponse::new(year, holidays)),
            Err(err) => Self::calendar_error(err),
        }
    }

    /// The `/{year}/{month}` endpoint.
    fn month_holidays(&self, year: &str, month: &str) -> ServerResult {
        match self.table.holidays_for_month(year, month) {
            Ok(holidays) => Self::ok_data(&MonthResponse::new(year, month, holidays)),
            Err(err) => Self::calendar_error(err),
        }
    }

    /// The `/{year}/{month}/{day}` endpoint.
    ///
    /// Segments must be plain digits. Anything else, or a number too large to
    /// hold, is rejected before the date is built.
    fn day_status(&self, year: &str, month: &str, day: &str) -> ServerResult {
        let (Some(year), Some(month), Some(day)) = (
            self.parse_number::<i32>(year),
            self.parse_number::<u32>(month),
            self.parse_number::<u32>(day),
        ) else {
            return Self::bad_request("Year, month, and date must be numbers");
        };

        match self.table.status(year, month, day) {
            Ok(status) => {
                debug!("{}-{:02}-{:02} is {}", year, month, day, status.as_str());
                Self::ok_data(&StatusResponse::new(status))
            }
            Err(err) => Self::calendar_error(err),
        }
    }

    fn parse_number<T: std::str::FromStr>(&self, segment: &str) -> Option<T> {
        if !self.number_pattern.is_match(segment) {
            return None;
        }
        segment.parse().ok()
    }

    fn calendar_error(err: CalendarError) -> ServerResult {
        match err {
            CalendarError::InvalidDate(message) => Self::bad_request(&message),
            CalendarError::NotFound(message) => Self::not_found(&message),
            CalendarError::InvalidTable(message) => Self::server_error(&message),
        }
    }

    /// Serialize `body` into a JSON response with the given status.
    fn respond<T: Serialize>(status: StatusCode, body: &T) -> ServerResult {
        let (status, data) = match serde_json::to_vec(body) {
            Ok(data) => (status, Bytes::from(data)),
            Err(err) => {
                error!("Could not serialize response.\n{}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Bytes::from_static(br#"{"error":"Internal server error"}"#),
                )
            }
        };
        let mut res = Response::new(Full::new(data));
        *res.status_mut() = status;
        res.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(res)
    }

    /// Return a 200 OK response with the data provided.
    fn ok_data<T: Serialize>(body: &T) -> ServerResult {
        Self::respond(StatusCode::OK, body)
    }

    /// Return a 500 Internal Server Error response with the message provided.
    fn server_error(message: &str) -> ServerResult {
        error!("{}", message);
        Self::respond(
            StatusCode::INTERNAL_SERVER_ERROR,
            &ErrorResponse::new(message),
        )
    }

    /// Return a 404 Not Found response with the message provided.
    fn not_found(message: &str) -> ServerResult {
        Self::respond(StatusCode::NOT_FOUND, &ErrorResponse::new(message))
    }

    /// Return a 400 Bad Request response with the message provided.
    fn bad_request(message: &str) -> ServerResult {
        warn!("Bad request: {}", message);
        Self::respond(StatusCode::BAD_REQUEST, &ErrorResponse::new(message))
    }

    /// Return a 405 Method Not Allowed response. Only GET is served.
    fn method_not_allowed() -> ServerResult {
        let mut res = Self::respond(
            StatusCode::METHOD_NOT_ALLOWED,
            &ErrorResponse::new("Method not allowed"),
        )?;
        res.headers_mut()
            .insert(ALLOW, HeaderValue::from_static("GET"));
        Ok(res)
    }
}

impl Service<Request<Incoming>> for Server {
    type Response = Response<Full<Bytes>>;
    type Error = hyper::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: Request<Incoming>) -> Self::Future {
        let res = self.handle(req.method(), req.uri().path());
        if let Ok(res) = &res {
            debug!("{} {} -> {}", req.method(), req.uri().path(), res.status());
        }

        Box::pin(async { res })
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;
    use serde_json::{json, Value};

    use super::*;
    use crate::calendar::sanjo_tsubame::sanjo_tsubame_table;
    use crate::config::ServerConfig;

    fn server() -> Server {
        let table = Arc::new(sanjo_tsubame_table().unwrap());
        Server::setup(table, ServerConfig::default().prefixes).unwrap()
    }

    async fn get(path: &str) -> (StatusCode, Value) {
        send(Method::GET, path).await
    }

    async fn send(method: Method, path: &str) -> (StatusCode, Value) {
        let res = server().handle(&method, path).unwrap();
        let status = res.status();
        assert_eq!(res.headers()[CONTENT_TYPE], "application/json");
        let body = res.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn day_status() {
        let cases = [
            ("/api/sanjo_tsubame_calendar/2025/01/01", "off"),
            ("/api/sanjo_tsubame_calendar/2025/01/02", "on"),
            ("/api/sanjo_tsubame_calendar/2025/1/4", "off"),
            ("/api/sanjo_tsubame_calendar/2025/08/15", "on"),
            ("/api/sanjo_tsubame_calendar/2023/12/25", "undefined"),
            ("/sanjo_tsubame_calendar/2025/05/05", "off"),
        ];
        for (path, expected) in cases {
            let (status, body) = get(path).await;
            assert_eq!(status, StatusCode::OK, "{}", path);
            assert_eq!(body, json!({ "status": expected }), "{}", path);
        }
    }

    #[tokio::test]
    async fn invalid_dates_are_bad_requests() {
        for path in [
            "/api/sanjo_tsubame_calendar/2023/13/32",
            "/api/sanjo_tsubame_calendar/2025/02/30",
            "/api/sanjo_tsubame_calendar/2025/01/aa",
            "/api/sanjo_tsubame_calendar/2025/-1/01",
            "/api/sanjo_tsubame_calendar/2025/01/99999999999",
        ] {
            let (status, body) = get(path).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", path);
            assert!(body["error"].is_string(), "{}", path);
        }
    }

    #[tokio::test]
    async fn month_holidays() {
        let (status, body) = get("/api/sanjo_tsubame_calendar/2025/01").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "year": "2025",
                "month": "01",
                "holidays": ["2025-01-01", "2025-01-13"],
            })
        );

        let (status, body) = get("/api/sanjo_tsubame_calendar/2025/06").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body["error"],
            "No holiday data available for month 06 in year 2025"
        );
    }

    #[tokio::test]
    async fn year_holidays() {
        let (status, body) = get("/api/sanjo_tsubame_calendar/2025").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["year"], "2025");
        assert_eq!(body["holidays"]["05"].as_array().unwrap().len(), 4);

        let (status, body) = get("/api/sanjo_tsubame_calendar/1999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "No holiday data available for year 1999");
    }

    #[tokio::test]
    async fn unknown_routes_are_not_found() {
        for path in [
            "/",
            "/api/sanjo_tsubame_calendar",
            "/api/sanjo_tsubame_calendar/2025/01/01/extra",
            "/api/sanjo_tsubame_calendarx/2025",
            "/about",
        ] {
            let (status, body) = get(path).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{}", path);
            assert!(body["error"].is_string(), "{}", path);
        }
    }

    #[tokio::test]
    async fn only_get_is_served() {
        let res = server()
            .handle(&Method::POST, "/api/sanjo_tsubame_calendar/2025/01/01")
            .unwrap();
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(res.headers()[ALLOW], "GET");

        let (status, _) = send(Method::DELETE, "/api/sanjo_tsubame_calendar/2025").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
