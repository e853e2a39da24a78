use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::state::{Customer, OccupancyPoint};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Event {
    Arrival { customer_id: usize },
    Departure { customer_id: usize },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledEvent {
    pub time: f64,
    pub event: Event,
}

impl ScheduledEvent {
    pub fn new(time: f64, event: Event) -> Self {
        Self { time, event }
    }
}

impl Eq for ScheduledEvent {}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .total_cmp(&other.time)
            .then_with(|| self.event.priority().cmp(&other.event.priority()))
            .then_with(|| self.event.tiebreaker().cmp(&other.event.tiebreaker()))
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Event {
    // Arrivals first, so a zero-length service never drives the count below zero.
    fn priority(&self) -> u8 {
        match self {
            Event::Arrival { .. } => 0,
            Event::Departure { .. } => 1,
        }
    }

    fn tiebreaker(&self) -> usize {
        match self {
            Event::Arrival { customer_id } | Event::Departure { customer_id } => *customer_id,
        }
    }
}

/// Customers in system at every distinct arrival or completion time.
///
/// All events sharing a timestamp are applied before the point is recorded,
/// so each point counts customers with `arrival <= t < service_end`.
pub fn occupancy_series(customers: &[Customer]) -> Vec<OccupancyPoint> {
    let mut events: BinaryHeap<Reverse<ScheduledEvent>> =
        BinaryHeap::with_capacity(customers.len() * 2);
    for customer in customers {
        events.push(Reverse(ScheduledEvent::new(
            customer.arrival,
            Event::Arrival {
                customer_id: customer.id,
            },
        )));
        events.push(Reverse(ScheduledEvent::new(
            customer.service_end,
            Event::Departure {
                customer_id: customer.id,
            },
        )));
    }

    let mut series = Vec::new();
    let mut in_system = 0usize;
    while let Some(Reverse(scheduled)) = events.pop() {
        match scheduled.event {
            Event::Arrival { .. } => in_system += 1,
            Event::Departure { .. } => in_system -= 1,
        }

        let closes_group = match events.peek() {
            Some(Reverse(next)) => next.time != scheduled.time,
            None => true,
        };
        if closes_group {
            series.push(OccupancyPoint {
                time: scheduled.time,
                customers: in_system,
            });
        }
    }

    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PendingCustomer;

    fn served(id: usize, arrival: f64, service: f64, previous_end: f64) -> Customer {
        PendingCustomer {
            id,
            interarrival: 0.0,
            arrival,
            service_duration: service,
        }
        .start_service(previous_end)
    }

    #[test]
    fn departures_sort_after_arrivals_at_same_time() {
        let departure = ScheduledEvent::new(1.0, Event::Departure { customer_id: 1 });
        let arrival = ScheduledEvent::new(1.0, Event::Arrival { customer_id: 2 });
        let later = ScheduledEvent::new(1.5, Event::Arrival { customer_id: 3 });
        assert!(arrival < departure);
        assert!(departure < later);
    }

    #[test]
    fn series_counts_overlapping_customers() {
        let first = served(1, 0.0, 3.0, 0.0);
        let second = served(2, 1.0, 1.0, first.service_end);
        let third = served(3, 5.0, 1.0, second.service_end);
        let series = occupancy_series(&[first, second, third]);

        let points: Vec<(f64, usize)> = series
            .iter()
            .map(|point| (point.time, point.customers))
            .collect();
        assert_eq!(
            points,
            vec![(0.0, 1), (1.0, 2), (3.0, 1), (4.0, 0), (5.0, 1), (6.0, 0)]
        );
    }

    #[test]
    fn coinciding_departure_and_arrival_collapse_to_one_point() {
        let first = served(1, 0.0, 2.0, 0.0);
        let second = served(2, 2.0, 1.0, first.service_end);
        let series = occupancy_series(&[first, second]);

        assert_eq!(series.len(), 3);
        assert_eq!(series[1].time, 2.0);
        assert_eq!(series[1].customers, 1);
        assert_eq!(series[2].customers, 0);
    }

    #[test]
    fn zero_length_service_does_not_underflow() {
        let first = served(1, 0.0, 0.0, 0.0);
        let series = occupancy_series(&[first]);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].customers, 0);
    }

    #[test]
    fn empty_input_yields_empty_series() {
        assert!(occupancy_series(&[]).is_empty());
    }
}
