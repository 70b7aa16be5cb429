//! Entry-point events: map clicks and search results.
//!
//! Map surfaces report the clicked coordinate under either `latlng` or
//! `latLng`. [`RawMapEvent`] accepts both and is normalized into a
//! [`MapClick`] before anything downstream sees it.

use serde::{Deserialize, Serialize};

use crate::dialog::PendingSelection;
use crate::error::CoreError;
use crate::location::Coordinates;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapClick {
    pub coordinate: Coordinates,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(alias = "latLng", alias = "latlng")]
    pub coordinate: Coordinates,
    pub address: String,
}

/// A map click as the map surface emits it.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RawMapEvent {
    #[serde(alias = "latLng")]
    pub latlng: Coordinates,
}

impl From<RawMapEvent> for MapClick {
    fn from(raw: RawMapEvent) -> Self {
        Self {
            coordinate: raw.latlng,
        }
    }
}

/// Either entry point, tagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum InteractionEvent {
    Map(MapClick),
    Search(SearchResult),
}

impl From<MapClick> for PendingSelection {
    fn from(click: MapClick) -> Self {
        PendingSelection {
            coordinate: click.coordinate,
            address: None,
        }
    }
}

impl From<SearchResult> for PendingSelection {
    fn from(result: SearchResult) -> Self {
        let address = Some(result.address).filter(|a| !a.trim().is_empty());
        PendingSelection {
            coordinate: result.coordinate,
            address,
        }
    }
}

impl From<InteractionEvent> for PendingSelection {
    fn from(event: InteractionEvent) -> Self {
        match event {
            InteractionEvent::Map(click) => click.into(),
            InteractionEvent::Search(result) => result.into(),
        }
    }
}

impl SearchResult {
    /// Parse `"lat,lng address"` as typed into a search box.
    ///
    /// Whitespace may surround either number; the address is whatever
    /// follows the longitude.
    pub fn parse_query(query: &str) -> crate::Result<Self> {
        let query = query.trim();
        let (lat, rest) = query
            .split_once(',')
            .ok_or_else(|| CoreError::InvalidCoordinate(query.to_string()))?;
        let rest = rest.trim_start();
        let (lng, address) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        Ok(Self {
            coordinate: format!("{lat},{lng}").parse()?,
            address: address.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_map_event_accepts_both_field_names() {
        let lower: RawMapEvent =
            serde_json::from_str(r#"{"latlng": {"lat": 1.0, "lng": 2.0}}"#).unwrap();
        let camel: RawMapEvent =
            serde_json::from_str(r#"{"latLng": {"lat": 1.0, "lng": 2.0}}"#).unwrap();

        assert_eq!(MapClick::from(lower), MapClick::from(camel));
        assert_eq!(MapClick::from(lower).coordinate, Coordinates::new(1.0, 2.0));
    }

    #[test]
    fn search_result_becomes_pending_with_address() {
        let pending: PendingSelection = SearchResult {
            coordinate: Coordinates::new(3.0, 4.0),
            address: "5 Oak Ave".to_string(),
        }
        .into();

        assert_eq!(pending.address.as_deref(), Some("5 Oak Ave"));
        assert_eq!(pending.coordinate, Coordinates::new(3.0, 4.0));
    }

    #[test]
    fn map_click_becomes_pending_without_address() {
        let pending: PendingSelection = MapClick {
            coordinate: Coordinates::new(1.0, 2.0),
        }
        .into();
        assert!(pending.address.is_none());
    }

    #[test]
    fn interaction_event_is_tagged_by_kind() {
        let event: InteractionEvent = serde_json::from_str(
            r#"{"kind": "search", "latLng": {"lat": 3.0, "lng": 4.0}, "address": "5 Oak Ave"}"#,
        )
        .unwrap();
        assert!(matches!(event, InteractionEvent::Search(ref r) if r.address == "5 Oak Ave"));
    }

    #[test]
    fn parse_query_splits_coordinate_and_address() {
        let result = SearchResult::parse_query("3.0,4.0 5 Oak Ave").unwrap();
        assert_eq!(result.coordinate, Coordinates::new(3.0, 4.0));
        assert_eq!(result.address, "5 Oak Ave");

        let spaced = SearchResult::parse_query("3.0, 4.0 5 Oak Ave").unwrap();
        assert_eq!(spaced.coordinate, Coordinates::new(3.0, 4.0));
        assert_eq!(spaced.address, "5 Oak Ave");

        assert!(SearchResult::parse_query("Oak Ave").is_err());
    }

    #[test]
    fn parse_query_tolerates_whitespace_around_numbers() {
        for query in ["3.0,  4.0 Oak Ave", "3.0 , 4.0 Oak Ave", " 3.0 ,4.0   Oak Ave "] {
            let result = SearchResult::parse_query(query).unwrap();
            assert_eq!(result.coordinate, Coordinates::new(3.0, 4.0), "{query}");
            assert_eq!(result.address, "Oak Ave", "{query}");
        }
    }

    #[test]
    fn parse_query_without_address() {
        let result = SearchResult::parse_query("1,2").unwrap();
        assert_eq!(result.coordinate, Coordinates::new(1.0, 2.0));
        assert!(result.address.is_empty());

        assert!(SearchResult::parse_query("1, Oak Ave").is_err());
    }
}
