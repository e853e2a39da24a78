use tracing::debug;

use crate::error::{Error, Result};
use crate::events::occupancy_series;
use crate::models::SimulationParams;
use crate::random::{SeededSource, UniformSource};
use crate::state::{Customer, PendingCustomer, SimulationRun, SimulationSummary};

/// Single-server FIFO queue driven by exponential inter-arrival and
/// service times. Each simulator owns its uniform source.
pub struct QueueSimulator<S: UniformSource> {
    pub params: SimulationParams,
    pub source: S,
}

impl<S: UniformSource> QueueSimulator<S> {
    pub fn new(params: SimulationParams, source: S) -> Self {
        Self { params, source }
    }

    pub fn run(&mut self) -> Result<SimulationRun> {
        validate_params(&self.params)?;

        let customers = self.generate_customers();
        let summary = summarize(&customers);
        let occupancy = occupancy_series(&customers);

        debug!(
            customers = summary.customers,
            horizon = summary.horizon,
            utilization = summary.utilization,
            "simulation finished"
        );

        Ok(SimulationRun {
            customers,
            summary,
            occupancy,
        })
    }

    fn generate_customers(&mut self) -> Vec<Customer> {
        let count = self.params.customers;
        let mut customers = Vec::with_capacity(count);
        let mut clock = 0.0;
        let mut previous_end = 0.0;

        for idx in 0..count {
            // The first customer arrives at time zero without consuming a draw.
            let interarrival = if idx == 0 {
                0.0
            } else {
                exponential(self.params.mean_interarrival, &mut self.source)
            };
            let service_duration = exponential(self.params.mean_service, &mut self.source);
            clock += interarrival;

            let customer = PendingCustomer {
                id: idx + 1,
                interarrival,
                arrival: clock,
                service_duration,
            }
            .start_service(previous_end);
            previous_end = customer.service_end;
            customers.push(customer);
        }

        customers
    }
}

/// Runs one simulation with a fresh source, seeded when `params.seed` is set.
pub fn run_simulation(params: &SimulationParams) -> Result<SimulationRun> {
    let source = match params.seed {
        Some(seed) => SeededSource::new(seed),
        None => SeededSource::from_entropy(),
    };
    QueueSimulator::new(params.clone(), source).run()
}

/// Inverse-transform exponential draw with the given mean.
pub fn exponential(mean: f64, source: &mut impl UniformSource) -> f64 {
    -mean * (1.0 - source.next_uniform()).ln()
}

fn validate_params(params: &SimulationParams) -> Result<()> {
    if !(params.mean_interarrival > 0.0 && params.mean_interarrival.is_finite()) {
        return Err(Error::InvalidMeanInterarrival(params.mean_interarrival));
    }
    if !(params.mean_service > 0.0 && params.mean_service.is_finite()) {
        return Err(Error::InvalidMeanService(params.mean_service));
    }
    if params.customers == 0 {
        return Err(Error::CustomersZero);
    }

    Ok(())
}

fn summarize(customers: &[Customer]) -> SimulationSummary {
    let count = customers.len();
    let total_wait: f64 = customers.iter().map(|customer| customer.wait).sum();
    let total_in_system: f64 = customers
        .iter()
        .map(|customer| customer.time_in_system)
        .sum();
    let total_service: f64 = customers
        .iter()
        .map(|customer| customer.service_duration)
        .sum();
    let total_idle_time: f64 = customers.iter().map(|customer| customer.idle_before).sum();
    let horizon = customers
        .last()
        .map(|customer| customer.service_end)
        .unwrap_or(0.0);

    let average = |total: f64| if count == 0 { 0.0 } else { total / count as f64 };

    SimulationSummary {
        customers: count,
        avg_wait: average(total_wait),
        avg_time_in_system: average(total_in_system),
        utilization: if horizon > 0.0 {
            total_service / horizon
        } else {
            0.0
        },
        total_idle_time,
        horizon,
    }
}
