use thiserror::Error;

use crate::models::ModelKind;

#[derive(Error, Debug)]
pub enum Error {
    #[error("arrival rate must be > 0 (got {0})")]
    InvalidArrivalRate(f64),
    #[error("service rate must be > 0 (got {0})")]
    InvalidServiceRate(f64),
    #[error("servers must be greater than 0")]
    ServersZero,
    #[error("capacity must be >= servers (capacity {capacity}, servers {servers})")]
    CapacityBelowServers { capacity: u32, servers: u32 },
    #[error("mean inter-arrival time must be > 0 (got {0})")]
    InvalidMeanInterarrival(f64),
    #[error("mean service time must be > 0 (got {0})")]
    InvalidMeanService(f64),
    #[error("customers must be greater than 0")]
    CustomersZero,
    #[error("{model} has no steady state at rho = {rho}")]
    DegenerateUtilization { model: ModelKind, rho: f64 },
    #[error("{model} produced a non-finite result at rho = {rho}")]
    NonFiniteResult { model: ModelKind, rho: f64 },
    #[error("{0}")]
    ConfigIo(String),
    #[error("{0}")]
    ConfigParse(String),
    #[error("unsupported config format '{0}'")]
    UnsupportedConfigFormat(String),
    #[error("{0}")]
    Cli(String),
    #[error("failed to render output: {0}")]
    Render(String),
}

impl Error {
    /// True for errors raised by input validation, before any computation.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            Error::InvalidArrivalRate(_)
                | Error::InvalidServiceRate(_)
                | Error::ServersZero
                | Error::CapacityBelowServers { .. }
                | Error::InvalidMeanInterarrival(_)
                | Error::InvalidMeanService(_)
                | Error::CustomersZero
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
