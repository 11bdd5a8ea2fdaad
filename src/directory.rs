//! Country directory backed by the embedded reference dataset
//!
//! Lookups are case-insensitive on the ISO 3166-1 alpha-2 code.

use std::collections::HashMap;

use anyhow::{Context, Result};
use tracing::debug;

use crate::AppError;
use crate::models::{Country, CountrySummary, GeoPoint, Geometry};

const EMBEDDED_DATASET: &str = include_str!("../data/countries.json");

pub struct CountryDirectory {
    countries: Vec<Country>,
    by_code: HashMap<String, usize>,
}

impl CountryDirectory {
    /// Directory over the dataset compiled into the binary
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_DATASET).context("Failed to load embedded country dataset")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let countries: Vec<Country> =
            serde_json::from_str(json).context("Invalid country dataset")?;
        Ok(Self::new(countries))
    }

    #[must_use]
    pub fn new(countries: Vec<Country>) -> Self {
        let by_code = countries
            .iter()
            .enumerate()
            .map(|(index, country)| (country.alpha2.to_uppercase(), index))
            .collect();
        debug!("Loaded country directory with {} entries", countries.len());
        Self { countries, by_code }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Name and code of every country, in dataset order
    #[must_use]
    pub fn all(&self) -> Vec<CountrySummary> {
        self.countries.iter().map(CountrySummary::from).collect()
    }

    #[must_use]
    pub fn exists(&self, code: &str) -> bool {
        self.by_code.contains_key(&code.trim().to_uppercase())
    }

    pub fn info(&self, code: &str) -> Result<&Country, AppError> {
        self.by_code
            .get(&code.trim().to_uppercase())
            .map(|&index| &self.countries[index])
            .ok_or_else(|| AppError::not_found(code))
    }

    pub fn capital(&self, code: &str) -> Result<&str, AppError> {
        let country = self.info(code)?;
        if country.capital.is_empty() {
            return Err(AppError::no_capital(code));
        }
        Ok(&country.capital)
    }

    pub fn provinces(&self, code: &str) -> Result<&[String], AppError> {
        self.info(code).map(|country| country.provinces.as_slice())
    }

    pub fn geometry(&self, code: &str) -> Result<&Geometry, AppError> {
        self.info(code).map(|country| &country.geometry)
    }

    pub fn wiki(&self, code: &str) -> Result<&str, AppError> {
        self.info(code).map(|country| country.wiki.as_str())
    }

    /// Bounding-box center of the country's first polygon
    pub fn center(&self, code: &str) -> Result<GeoPoint, AppError> {
        self.geometry(code)?
            .center()
            .ok_or_else(|| AppError::not_found(code))
    }

    /// First code of `codes` missing from the directory
    #[must_use]
    pub fn first_unknown<'a, S: AsRef<str>>(&self, codes: &'a [S]) -> Option<&'a str> {
        codes
            .iter()
            .map(AsRef::as_ref)
            .find(|code| !self.exists(code))
    }
}
