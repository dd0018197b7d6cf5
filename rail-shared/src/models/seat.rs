use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// A single seat on a train
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Seat {
    /// Identifier such as "1A"; carried by the seat map key on the wire
    #[serde(skip)]
    pub id: String,
    pub coach: String,
    pub seat_number: String,
    /// Empty when the seat is free
    #[serde(default)]
    pub booking_reference: String,
}

impl Seat {
    pub fn free(coach: &str, seat_number: &str) -> Self {
        Self {
            id: format!("{}{}", seat_number, coach),
            coach: coach.to_string(),
            seat_number: seat_number.to_string(),
            booking_reference: String::new(),
        }
    }

    pub fn reserved(coach: &str, seat_number: &str, booking_reference: &str) -> Self {
        Self {
            booking_reference: booking_reference.to_string(),
            ..Self::free(coach, seat_number)
        }
    }

    /// Override the derived identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn is_free(&self) -> bool {
        self.booking_reference.is_empty()
    }

    /// Numeric value of the seat number, so "2" sorts before "10"
    pub fn number_key(&self) -> Option<u32> {
        self.seat_number.trim().parse().ok()
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SeatMapError {
    #[error("Duplicate seat identifier: {0}")]
    DuplicateSeat(String),

    #[error("Seat identifier must not be empty")]
    EmptyIdentifier,
}

/// Every seat of a train in canonical order.
///
/// Iteration order is the order seats were given in, never a sort of the
/// identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatMap {
    seats: Vec<Seat>,
    index: HashMap<String, usize>,
}

impl SeatMap {
    pub fn new(seats: Vec<Seat>) -> Result<Self, SeatMapError> {
        let mut index = HashMap::with_capacity(seats.len());
        for (position, seat) in seats.iter().enumerate() {
            if seat.id.is_empty() {
                return Err(SeatMapError::EmptyIdentifier);
            }
            if index.insert(seat.id.clone(), position).is_some() {
                return Err(SeatMapError::DuplicateSeat(seat.id.clone()));
            }
        }
        Ok(Self { seats, index })
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Seat> {
        self.index.get(id).map(|&position| &self.seats[position])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Seat> {
        self.seats.iter()
    }

    pub fn reserved_count(&self) -> usize {
        self.seats.iter().filter(|seat| !seat.is_free()).count()
    }

    pub fn free_count(&self) -> usize {
        self.seats.len() - self.reserved_count()
    }

    /// Distinct coaches in order of first appearance
    pub fn coaches(&self) -> Vec<&str> {
        let mut coaches: Vec<&str> = Vec::new();
        for seat in &self.seats {
            if !coaches.contains(&seat.coach.as_str()) {
                coaches.push(&seat.coach);
            }
        }
        coaches
    }

    /// Book a seat under `booking_reference`; an empty reference frees it.
    ///
    /// Returns false when the seat is not on this train. Only the booking
    /// changes, never the seat's identity.
    pub fn set_booking_reference(&mut self, id: &str, booking_reference: &str) -> bool {
        match self.index.get(id) {
            Some(&position) => {
                self.seats[position].booking_reference = booking_reference.to_string();
                true
            }
            None => false,
        }
    }

    pub fn clear_bookings(&mut self) {
        for seat in &mut self.seats {
            seat.booking_reference.clear();
        }
    }
}

impl<'a> IntoIterator for &'a SeatMap {
    type Item = &'a Seat;
    type IntoIter = std::slice::Iter<'a, Seat>;

    fn into_iter(self) -> Self::IntoIter {
        self.seats.iter()
    }
}

impl Serialize for SeatMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.seats.len()))?;
        for seat in &self.seats {
            map.serialize_entry(&seat.id, seat)?;
        }
        map.end()
    }
}

struct SeatMapVisitor;

impl<'de> Visitor<'de> for SeatMapVisitor {
    type Value = SeatMap;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of seat identifiers to seats")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut seats = Vec::with_capacity(access.size_hint().unwrap_or(0));
        // Entries arrive in document order, which is the train's seat order
        while let Some((id, seat)) = access.next_entry::<String, Seat>()? {
            seats.push(seat.with_id(id));
        }
        SeatMap::new(seats).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for SeatMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SeatMapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_identifier_and_state() {
        let seat = Seat::free("A", "1");
        assert_eq!(seat.id, "1A");
        assert!(seat.is_free());

        let seat = Seat::reserved("B", "10", "75bcd15");
        assert_eq!(seat.id, "10B");
        assert!(!seat.is_free());
        assert_eq!(seat.number_key(), Some(10));
    }

    #[test]
    fn test_rejects_duplicate_identifiers() {
        let result = SeatMap::new(vec![Seat::free("A", "1"), Seat::reserved("A", "1", "x")]);
        assert_eq!(result, Err(SeatMapError::DuplicateSeat("1A".to_string())));
    }

    #[test]
    fn test_counts_and_coaches() {
        let map = SeatMap::new(vec![
            Seat::reserved("B", "1", "abc"),
            Seat::free("A", "1"),
            Seat::free("B", "2"),
        ])
        .unwrap();

        assert_eq!(map.len(), 3);
        assert_eq!(map.reserved_count(), 1);
        assert_eq!(map.free_count(), 2);
        assert_eq!(map.coaches(), vec!["B", "A"]);
        assert!(map.get("1A").unwrap().is_free());
        assert!(map.get("9Z").is_none());
    }

    #[test]
    fn test_booking_changes_keep_identity() {
        let mut map = SeatMap::new(vec![Seat::free("A", "1"), Seat::free("A", "2")]).unwrap();

        assert!(map.set_booking_reference("2A", "75bcd15"));
        assert!(!map.set_booking_reference("3A", "75bcd15"));

        let ids: Vec<&str> = map.iter().map(|seat| seat.id.as_str()).collect();
        assert_eq!(ids, vec!["1A", "2A"]);
        let seat = map.get("2A").unwrap();
        assert_eq!((seat.coach.as_str(), seat.seat_number.as_str()), ("A", "2"));
        assert_eq!(seat.booking_reference, "75bcd15");
        assert!(map.get("1A").unwrap().is_free());

        map.clear_bookings();
        assert_eq!(map.reserved_count(), 0);
        assert_eq!(map.get("2A").unwrap().id, "2A");
    }

    #[test]
    fn test_deserialize_keeps_document_order() {
        let json = r#"{
            "2A": {"coach": "A", "seat_number": "2", "booking_reference": ""},
            "10A": {"coach": "A", "seat_number": "10", "booking_reference": "75bcd15"},
            "1A": {"coach": "A", "seat_number": "1"}
        }"#;

        let map: SeatMap = serde_json::from_str(json).unwrap();
        let ids: Vec<&str> = map.iter().map(|seat| seat.id.as_str()).collect();
        assert_eq!(ids, vec!["2A", "10A", "1A"]);
        assert!(map.get("1A").unwrap().is_free());
        assert_eq!(map.get("10A").unwrap().booking_reference, "75bcd15");
    }

    #[test]
    fn test_serialize_uses_identifiers_as_keys() {
        let map = SeatMap::new(vec![Seat::free("A", "1"), Seat::reserved("A", "2", "ref")]).unwrap();
        let value = serde_json::to_value(&map).unwrap();

        assert_eq!(value["1A"]["booking_reference"], "");
        assert_eq!(value["2A"]["booking_reference"], "ref");
        assert_eq!(value["2A"]["seat_number"], "2");
    }

    #[test]
    fn test_deserialize_rejects_duplicate_keys() {
        let json = r#"{
            "1A": {"coach": "A", "seat_number": "1"},
            "1A": {"coach": "A", "seat_number": "1"}
        }"#;
        assert!(serde_json::from_str::<SeatMap>(json).is_err());
    }
}
