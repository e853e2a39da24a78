use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ModelParameters {
    pub lambda: f64,
    pub mu: f64,
    #[serde(default = "default_servers")]
    pub servers: u32,
    #[serde(default)]
    pub capacity: Option<u32>,
}

impl ModelParameters {
    pub fn new(lambda: f64, mu: f64) -> Self {
        Self {
            lambda,
            mu,
            servers: default_servers(),
            capacity: None,
        }
    }

    pub fn with_servers(mut self, servers: u32) -> Self {
        self.servers = servers;
        self
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct SimulationParams {
    pub mean_interarrival: f64,
    pub mean_service: f64,
    pub customers: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum RunConfig {
    Analyze(ModelParameters),
    Simulate(SimulationParams),
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub enum ModelKind {
    #[serde(rename = "M/M/1")]
    Mm1,
    #[serde(rename = "M/M/1/K")]
    Mm1k,
    #[serde(rename = "M/M/c")]
    Mmc,
    #[serde(rename = "M/M/c/K")]
    Mmck,
}

impl ModelKind {
    pub const ALL: [ModelKind; 4] = [
        ModelKind::Mm1,
        ModelKind::Mm1k,
        ModelKind::Mmc,
        ModelKind::Mmck,
    ];
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ModelKind::Mm1 => "M/M/1",
            ModelKind::Mm1k => "M/M/1/K",
            ModelKind::Mmc => "M/M/c",
            ModelKind::Mmck => "M/M/c/K",
        };
        f.write_str(label)
    }
}

fn default_servers() -> u32 {
    1
}
