use serde::Serialize;

use std::collections::BTreeMap;

use crate::calendar::status::BusinessStatus;

/// Body of the `/{year}/{month}/{day}` endpoint.
#[derive(Serialize, Debug)]
pub struct StatusResponse {
    status: BusinessStatus,
}

impl StatusResponse {
    pub fn new(status: BusinessStatus) -> Self {
        Self { status }
    }
}

/// Body of the `/{year}/{month}` endpoint. Keys are echoed as given.
#[derive(Serialize, Debug)]
pub struct MonthResponse<'a> {
    year: &'a str,
    month: &'a str,
    holidays: &'a [String],
}

impl<'a> MonthResponse<'a> {
    pub fn new(year: &'a str, month: &'a str, holidays: &'a [String]) -> Self {
        Self {
            year,
            month,
            holidays,
        }
    }
}

/// Body of the `/{year}` endpoint.
#[derive(Serialize, Debug)]
pub struct YearResponse<'a> {
    year: &'a str,
    holidays: &'a BTreeMap<String, Vec<String>>,
}

impl<'a> YearResponse<'a> {
    pub fn new(year: &'a str, holidays: &'a BTreeMap<String, Vec<String>>) -> Self {
        Self { year, holidays }
    }
}

#[derive(Serialize, Debug)]
pub struct ErrorResponse<'a> {
    error: &'a str,
}

impl<'a> ErrorResponse<'a> {
    pub fn new(error: &'a str) -> Self {
        Self { error }
    }
}
