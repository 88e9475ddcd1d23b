//! Place domain values.
//!
//! Countries, cities and districts are immutable values selected by the
//! user during the place selection flow. Cities reference their country
//! and districts their city by id; a city may have no districts at all.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A country the user can select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// Stable country id
    pub id: u32,
    /// English display name (e.g., "Turkey")
    pub name: String,
    /// Name in the country's own language (e.g., "Türkiye")
    pub name_native: String,
}

/// A city within a country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    /// Stable city id
    pub id: u32,
    /// Id of the country this city belongs to
    pub country_id: u32,
    /// Display name
    pub name: String,
}

/// A district within a city.
///
/// Districts are optional: some cities have none, in which case the
/// selection flow completes without one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct District {
    /// Stable district id
    pub id: u32,
    /// Id of the city this district belongs to
    pub city_id: u32,
    /// Display name
    pub name: String,
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

impl fmt::Display for District {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
