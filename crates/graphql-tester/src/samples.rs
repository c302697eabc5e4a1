//! Sample operations for a bus booking API

use serde::Serialize;

/// A named sample operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SampleQuery {
    pub name: &'static str,
    pub query: &'static str,
}

pub const SAMPLE_QUERIES: &[SampleQuery] = &[
    SampleQuery {
        name: "Get all users",
        query: r#"query {
  users {
    id
    name
    email
    bookings {
      id
      status
    }
  }
}"#,
    },
    SampleQuery {
        name: "Get all routes",
        query: r#"query {
  routes {
    id
    code
    origin
    destination
  }
}"#,
    },
    SampleQuery {
        name: "Get trips by route",
        query: r#"query GetTrips($routeId: ID!) {
  trips(routeId: $routeId, limit: 5) {
    id
    departureTime
    arrivalTime
    busNumber
    availableSeats
  }
}"#,
    },
    SampleQuery {
        name: "Get bookings by user",
        query: r#"query GetBookings($userId: ID!) {
  bookings(userId: $userId, limit: 5) {
    id
    seatNumber
    status
    createdAt
    trip {
      id
      busNumber
    }
  }
}"#,
    },
    SampleQuery {
        name: "Create user (mutation)",
        query: r#"mutation {
  createUser(input: { name: "Test User", email: "test@example.com" }) {
    id
    name
    email
    token
  }
}"#,
    },
    SampleQuery {
        name: "Book seat (mutation)",
        query: r#"mutation BookSeat($tripId: ID!, $userId: ID!, $seatNumber: Int!) {
  bookSeat(input: { tripId: $tripId, userId: $userId, seatNumber: $seatNumber }) {
    id
    status
    seatNumber
    trip {
      id
      busNumber
    }
    user {
      id
      name
    }
  }
}"#,
    },
    SampleQuery {
        name: "Cancel booking (mutation)",
        query: r#"mutation CancelBooking($id: ID!) {
  cancelBooking(id: $id)
}"#,
    },
];

/// Find a sample by name, ignoring case
pub fn sample_by_name(name: &str) -> Option<&'static SampleQuery> {
    SAMPLE_QUERIES
        .iter()
        .find(|sample| sample.name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_operation;
    use rstest::rstest;

    #[test]
    fn samples_are_parseable_operations() {
        for sample in SAMPLE_QUERIES {
            assert!(
                parse_operation(sample.query).is_ok(),
                "{} does not parse",
                sample.name
            );
        }
    }

    #[rstest]
    #[case("Get all routes")]
    #[case("get ALL routes")]
    #[case("  Get all routes ")]
    fn finds_samples_by_name(#[case] name: &str) {
        assert_eq!(
            sample_by_name(name).map(|sample| sample.name),
            Some("Get all routes")
        );
    }

    #[test]
    fn unknown_sample() {
        assert_eq!(sample_by_name("Delete everything"), None);
    }
}
