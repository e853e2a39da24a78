use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{ModelKind, ModelParameters};
use crate::state::{Analysis, MetricsResult};

/// Distance from 1 under which M/M/1 and M/M/c have no steady state.
const UNIT_RHO_TOLERANCE: f64 = 1e-9;

/// Finite-capacity models use the geometric closed forms only below
/// `1 - NEAR_UNIT_MARGIN`; heavier loads sum the state distribution.
const NEAR_UNIT_MARGIN: f64 = 1e-3;

/// One of the four supported Markovian queues, carrying only the
/// parameters its formulas use.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum QueueModel {
    Mm1 {
        lambda: f64,
        mu: f64,
    },
    Mm1k {
        lambda: f64,
        mu: f64,
        capacity: u32,
    },
    Mmc {
        lambda: f64,
        mu: f64,
        servers: u32,
    },
    Mmck {
        lambda: f64,
        mu: f64,
        servers: u32,
        capacity: u32,
    },
}

impl QueueModel {
    pub fn select(params: &ModelParameters) -> Result<Self> {
        validate_parameters(params)?;
        let (lambda, mu) = (params.lambda, params.mu);
        let model = match (params.servers, params.capacity) {
            (1, None) => QueueModel::Mm1 { lambda, mu },
            (1, Some(capacity)) => QueueModel::Mm1k {
                lambda,
                mu,
                capacity,
            },
            (servers, None) => QueueModel::Mmc {
                lambda,
                mu,
                servers,
            },
            (servers, Some(capacity)) => QueueModel::Mmck {
                lambda,
                mu,
                servers,
                capacity,
            },
        };
        Ok(model)
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            QueueModel::Mm1 { .. } => ModelKind::Mm1,
            QueueModel::Mm1k { .. } => ModelKind::Mm1k,
            QueueModel::Mmc { .. } => ModelKind::Mmc,
            QueueModel::Mmck { .. } => ModelKind::Mmck,
        }
    }

    pub fn utilization(&self) -> f64 {
        match *self {
            QueueModel::Mm1 { lambda, mu } | QueueModel::Mm1k { lambda, mu, .. } => lambda / mu,
            QueueModel::Mmc {
                lambda,
                mu,
                servers,
            }
            | QueueModel::Mmck {
                lambda,
                mu,
                servers,
                ..
            } => lambda / (mu * servers as f64),
        }
    }

    pub fn solve(&self) -> Result<Analysis> {
        let analysis = match *self {
            QueueModel::Mm1 { lambda, mu } => solve_mm1(lambda, mu)?,
            QueueModel::Mm1k {
                lambda,
                mu,
                capacity,
            } => solve_mm1k(lambda, mu, capacity),
            QueueModel::Mmc {
                lambda,
                mu,
                servers,
            } => solve_mmc(lambda, mu, servers)?,
            QueueModel::Mmck {
                lambda,
                mu,
                servers,
                capacity,
            } => solve_mmck(lambda, mu, servers, capacity),
        };
        ensure_finite(&analysis)?;

        if analysis.unstable {
            warn!(
                model = %analysis.model,
                rho = analysis.utilization,
                "system is unstable (rho >= 1); results may not be meaningful"
            );
        }

        Ok(analysis)
    }
}

/// Picks the model matching the server count and capacity, then evaluates it.
pub fn analyze(params: &ModelParameters) -> Result<Analysis> {
    let model = QueueModel::select(params)?;
    debug!(model = %model.kind(), rho = model.utilization(), "selected queueing model");
    model.solve()
}

fn validate_parameters(params: &ModelParameters) -> Result<()> {
    if !(params.lambda > 0.0 && params.lambda.is_finite()) {
        return Err(Error::InvalidArrivalRate(params.lambda));
    }
    if !(params.mu > 0.0 && params.mu.is_finite()) {
        return Err(Error::InvalidServiceRate(params.mu));
    }
    if params.servers == 0 {
        return Err(Error::ServersZero);
    }
    if let Some(capacity) = params.capacity {
        if capacity < params.servers {
            return Err(Error::CapacityBelowServers {
                capacity,
                servers: params.servers,
            });
        }
    }

    Ok(())
}

fn solve_mm1(lambda: f64, mu: f64) -> Result<Analysis> {
    let rho = lambda / mu;
    if is_unit(rho) {
        return Err(Error::DegenerateUtilization {
            model: ModelKind::Mm1,
            rho,
        });
    }

    Ok(Analysis {
        model: ModelKind::Mm1,
        utilization: rho,
        unstable: rho >= 1.0,
        empty_probability: 1.0 - rho,
        blocking_probability: None,
        effective_arrival_rate: lambda,
        metrics: MetricsResult {
            l: rho / (1.0 - rho),
            lq: rho * rho / (1.0 - rho),
            w: 1.0 / (mu - lambda),
            wq: rho / (mu - lambda),
            idle_servers: None,
        },
    })
}

fn solve_mm1k(lambda: f64, mu: f64, capacity: u32) -> Analysis {
    let rho = lambda / mu;
    let k = capacity as f64;

    let (p0, blocking, l) = if rho < 1.0 - NEAR_UNIT_MARGIN {
        // Truncated geometric distribution over 0..=K.
        let rho_k1 = rho.powf(k + 1.0);
        let p0 = (1.0 - rho) / (1.0 - rho_k1);
        let l = rho * (1.0 - (k + 1.0) * rho.powf(k) + k * rho_k1)
            / ((1.0 - rho) * (1.0 - rho_k1));
        (p0, p0 * rho.powf(k), l)
    } else {
        let states = StateSums::collect(rho, 1, capacity);
        (states.p0, states.pk, states.l)
    };
    let lambda_eff = lambda * (1.0 - blocking);
    let lq = l - lambda_eff / mu;

    Analysis {
        model: ModelKind::Mm1k,
        utilization: rho,
        unstable: false,
        empty_probability: p0,
        blocking_probability: Some(blocking),
        effective_arrival_rate: lambda_eff,
        metrics: MetricsResult {
            l,
            lq,
            w: l / lambda_eff,
            wq: lq / lambda_eff,
            idle_servers: None,
        },
    }
}

fn solve_mmc(lambda: f64, mu: f64, servers: u32) -> Result<Analysis> {
    let c = servers as f64;
    let r = lambda / mu;
    let rho = r / c;
    if is_unit(rho) {
        return Err(Error::DegenerateUtilization {
            model: ModelKind::Mmc,
            rho,
        });
    }

    let terms = poisson_terms(r, servers);
    let head: f64 = terms[..servers as usize].iter().sum();
    let top = terms[servers as usize];
    let p0 = 1.0 / (head + top * (c / (c - r)));
    let lq = top * rho * p0 / (1.0 - rho).powi(2);
    let wq = lq / lambda;

    Ok(Analysis {
        model: ModelKind::Mmc,
        utilization: rho,
        unstable: rho >= 1.0,
        empty_probability: p0,
        blocking_probability: None,
        effective_arrival_rate: lambda,
        metrics: MetricsResult {
            l: lq + r,
            lq,
            w: wq + 1.0 / mu,
            wq,
            idle_servers: Some(if rho < 1.0 { c - r } else { 0.0 }),
        },
    })
}

fn solve_mmck(lambda: f64, mu: f64, servers: u32, capacity: u32) -> Analysis {
    let c = servers as f64;
    let k = capacity as f64;
    let r = lambda / mu;
    let rho = r / c;

    let (p0, blocking, lq, idle) = if rho < 1.0 - NEAR_UNIT_MARGIN {
        let terms = poisson_terms(r, servers);
        let head: f64 = terms[..servers as usize].iter().sum();
        let top = terms[servers as usize];
        let queue_states = k - c + 1.0;

        let p0 = 1.0 / (head + top * (1.0 - rho.powf(queue_states)) / (1.0 - rho));
        let blocking = p0 * top * rho.powf(k - c);
        let lq = p0 * top * rho / (1.0 - rho).powi(2)
            * (1.0 - rho.powf(queue_states) - (1.0 - rho) * queue_states * rho.powf(k - c));
        let idle = p0
            * terms
                .iter()
                .take(servers as usize)
                .enumerate()
                .map(|(n, term)| (c - n as f64) * term)
                .sum::<f64>();
        (p0, blocking, lq, idle)
    } else {
        let states = StateSums::collect(r, servers, capacity);
        (states.p0, states.pk, states.lq, c - states.busy)
    };

    let l = lq + c - idle;
    let lambda_eff = lambda * (1.0 - blocking);

    Analysis {
        model: ModelKind::Mmck,
        utilization: rho,
        unstable: false,
        empty_probability: p0,
        blocking_probability: Some(blocking),
        effective_arrival_rate: lambda_eff,
        metrics: MetricsResult {
            l,
            lq,
            w: l / lambda_eff,
            wq: lq / lambda_eff,
            idle_servers: Some(idle),
        },
    }
}

/// r^n / n! for n in 0..=servers, built as a running product.
fn poisson_terms(r: f64, servers: u32) -> Vec<f64> {
    let mut terms = Vec::with_capacity(servers as usize + 1);
    let mut term = 1.0;
    terms.push(term);
    for n in 1..=servers {
        term *= r / n as f64;
        terms.push(term);
    }
    terms
}

/// Moments of the truncated birth-death distribution over 0..=K, summed
/// directly. Weights are kept in log space relative to the largest one,
/// so heavy loads and large K neither overflow nor cancel.
#[derive(Clone, Copy, Debug, PartialEq)]
struct StateSums {
    p0: f64,
    pk: f64,
    l: f64,
    lq: f64,
    busy: f64,
}

impl StateSums {
    fn collect(r: f64, servers: u32, capacity: u32) -> Self {
        let step = |n: u32| (r / n.min(servers) as f64).ln();

        let mut log_weight = 0.0;
        let mut peak: f64 = 0.0;
        for n in 1..=capacity {
            log_weight += step(n);
            peak = peak.max(log_weight);
        }

        let mut sums = StateSums {
            p0: 0.0,
            pk: 0.0,
            l: 0.0,
            lq: 0.0,
            busy: 0.0,
        };
        let mut total = 0.0;
        let mut log_weight = 0.0;
        for n in 0..=capacity {
            if n > 0 {
                log_weight += step(n);
            }
            let weight = (log_weight - peak).exp();
            total += weight;
            sums.l += n as f64 * weight;
            sums.lq += n.saturating_sub(servers) as f64 * weight;
            sums.busy += n.min(servers) as f64 * weight;
            if n == 0 {
                sums.p0 = weight;
            }
            if n == capacity {
                sums.pk = weight;
            }
        }

        StateSums {
            p0: sums.p0 / total,
            pk: sums.pk / total,
            l: sums.l / total,
            lq: sums.lq / total,
            busy: sums.busy / total,
        }
    }
}

fn is_unit(rho: f64) -> bool {
    (rho - 1.0).abs() < UNIT_RHO_TOLERANCE
}

fn ensure_finite(analysis: &Analysis) -> Result<()> {
    let metrics = &analysis.metrics;
    let required = [
        metrics.l,
        metrics.lq,
        metrics.w,
        metrics.wq,
        analysis.empty_probability,
        analysis.effective_arrival_rate,
    ];
    let optional = [metrics.idle_servers, analysis.blocking_probability];

    if required
        .iter()
        .chain(optional.iter().flatten())
        .all(|value| value.is_finite())
    {
        Ok(())
    } else {
        Err(Error::NonFiniteResult {
            model: analysis.model,
            rho: analysis.utilization,
        })
    }
}
