use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Page size the NASA photos endpoint uses for every page
pub const NASA_PAGE_SIZE: usize = 25;

/// Date axis of a photo query. Sol and earth date are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSelector {
    Sol(u32),
    EarthDate(NaiveDate),
}

impl Default for DateSelector {
    fn default() -> Self {
        DateSelector::Sol(1)
    }
}

impl DateSelector {
    pub fn sol(&self) -> Option<u32> {
        match self {
            DateSelector::Sol(sol) => Some(*sol),
            DateSelector::EarthDate(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhotoFilters {
    pub date: DateSelector,
    pub camera: Option<String>,
    /// 1-based
    pub page: u32,
}

impl Default for PhotoFilters {
    fn default() -> Self {
        Self {
            date: DateSelector::default(),
            camera: None,
            page: 1,
        }
    }
}

impl PhotoFilters {
    /// Query parameters for `/api/rovers/{rover}/photos`
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        match self.date {
            DateSelector::Sol(sol) => pairs.push(("sol", sol.to_string())),
            DateSelector::EarthDate(date) => pairs.push(("earth_date", date.format("%Y-%m-%d").to_string())),
        }
        if let Some(camera) = self.camera.as_deref().filter(|c| !c.is_empty()) {
            pairs.push(("camera", camera.to_string()));
        }
        pairs.push(("page", self.page.to_string()));
        pairs
    }

    /// Merge a partial update. Page always returns to 1.
    pub fn merge(&mut self, update: FilterUpdate) {
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(camera) = update.camera {
            self.camera = camera.filter(|c| !c.is_empty());
        }
        self.page = 1;
    }
}

/// Partial filter change. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterUpdate {
    pub date: Option<DateSelector>,
    /// `Some(None)` selects all cameras
    pub camera: Option<Option<String>>,
}

impl FilterUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sol(mut self, sol: u32) -> Self {
        self.date = Some(DateSelector::Sol(sol));
        self
    }

    pub fn earth_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(DateSelector::EarthDate(date));
        self
    }

    pub fn camera(mut self, camera: impl Into<String>) -> Self {
        self.camera = Some(Some(camera.into()));
        self
    }

    pub fn all_cameras(mut self) -> Self {
        self.camera = Some(None);
        self
    }
}
