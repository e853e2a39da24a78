use serde::Serialize;

use crate::models::ModelKind;

/// Steady-state performance figures. `idle_servers` is only set for
/// multi-server models.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MetricsResult {
    pub l: f64,
    pub lq: f64,
    pub w: f64,
    pub wq: f64,
    pub idle_servers: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Analysis {
    pub model: ModelKind,
    pub utilization: f64,
    /// Set when rho >= 1 in a model without a capacity bound. The metrics
    /// are still the raw formula output and may be negative.
    pub unstable: bool,
    pub empty_probability: f64,
    pub blocking_probability: Option<f64>,
    pub effective_arrival_rate: f64,
    pub metrics: MetricsResult,
}

/// A generated customer whose service has not been scheduled yet.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingCustomer {
    pub id: usize,
    pub interarrival: f64,
    pub arrival: f64,
    pub service_duration: f64,
}

impl PendingCustomer {
    /// Dispatches the customer to the single server, which frees up at
    /// `previous_end`.
    pub fn start_service(self, previous_end: f64) -> Customer {
        let service_start = self.arrival.max(previous_end);
        let service_end = service_start + self.service_duration;
        Customer {
            id: self.id,
            interarrival: self.interarrival,
            arrival: self.arrival,
            service_duration: self.service_duration,
            service_start,
            service_end,
            wait: service_start - self.arrival,
            time_in_system: service_end - self.arrival,
            idle_before: (self.arrival - previous_end).max(0.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Customer {
    pub id: usize,
    pub interarrival: f64,
    pub arrival: f64,
    pub service_duration: f64,
    pub service_start: f64,
    pub service_end: f64,
    pub wait: f64,
    pub time_in_system: f64,
    pub idle_before: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub customers: usize,
    pub avg_wait: f64,
    pub avg_time_in_system: f64,
    pub utilization: f64,
    pub total_idle_time: f64,
    pub horizon: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct OccupancyPoint {
    pub time: f64,
    pub customers: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimulationRun {
    pub customers: Vec<Customer>,
    pub summary: SimulationSummary,
    pub occupancy: Vec<OccupancyPoint>,
}

impl SimulationRun {
    /// Customers in system at `time`, counting arrival inclusive and
    /// completion exclusive.
    pub fn occupancy_at(&self, time: f64) -> usize {
        self.customers
            .iter()
            .filter(|customer| customer.arrival <= time && customer.service_end > time)
            .count()
    }
}
