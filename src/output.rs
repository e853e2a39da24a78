use serde::Serialize;
use std::fmt::Write;

use crate::error::{Error, Result};
use crate::models::ModelKind;
use crate::state::{Analysis, SimulationRun};

pub trait Formatter {
    fn analysis(&self, analysis: &Analysis) -> Result<String>;
    fn simulation(&self, run: &SimulationRun) -> Result<String>;
}

pub struct HumanFormatter;

pub struct JsonFormatter;

/// Analysis as `metric,value` rows; simulation as the occupancy series.
pub struct CsvFormatter;

pub fn list_models() -> String {
    let mut output = String::new();
    for kind in ModelKind::ALL {
        let _ = writeln!(output, "{}", kind);
    }
    output
}

impl Formatter for HumanFormatter {
    fn analysis(&self, analysis: &Analysis) -> Result<String> {
        let mut output = String::new();
        let metrics = &analysis.metrics;
        if analysis.unstable {
            let _ = writeln!(
                output,
                "Warning: system is unstable (rho >= 1); results may not be meaningful."
            );
        }
        let _ = writeln!(output, "{} Model:", analysis.model);
        let _ = writeln!(output, "rho: {:.3}", analysis.utilization);
        let _ = writeln!(output, "P0: {:.3}", analysis.empty_probability);
        if let Some(blocking) = analysis.blocking_probability {
            let _ = writeln!(output, "PK: {:.3}", blocking);
            let _ = writeln!(output, "lambda_eff: {:.3}", analysis.effective_arrival_rate);
        }
        let _ = writeln!(output, "L: {:.3}", metrics.l);
        let _ = writeln!(output, "Lq: {:.3}", metrics.lq);
        let _ = writeln!(output, "W: {:.3}", metrics.w);
        let _ = writeln!(output, "Wq: {:.3}", metrics.wq);
        if let Some(idle) = metrics.idle_servers {
            let _ = writeln!(output, "Ci: {:.3}", idle);
        }
        Ok(output)
    }

    fn simulation(&self, run: &SimulationRun) -> Result<String> {
        let mut output = String::new();
        let _ = writeln!(
            output,
            "{:>5} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9}",
            "C.No.", "A.T.", "S.T.", "S.B.", "W.T.", "S.E.", "T.inS.", "Idle T."
        );
        for customer in &run.customers {
            let _ = writeln!(
                output,
                "{:>5} {:>9.2} {:>9.2} {:>9.2} {:>9.2} {:>9.2} {:>9.2} {:>9.2}",
                customer.id,
                customer.arrival,
                customer.service_duration,
                customer.service_start,
                customer.wait,
                customer.service_end,
                customer.time_in_system,
                customer.idle_before,
            );
        }

        let summary = &run.summary;
        let _ = writeln!(output);
        let _ = writeln!(output, "Performance Metrics:");
        let _ = writeln!(output, "Average Waiting Time: {:.2}", summary.avg_wait);
        let _ = writeln!(
            output,
            "Average Time in System: {:.2}",
            summary.avg_time_in_system
        );
        let _ = writeln!(
            output,
            "Server Utilization: {:.2}%",
            summary.utilization * 100.0
        );
        let _ = writeln!(output, "Total Idle Time: {:.2}", summary.total_idle_time);

        let _ = writeln!(output);
        let _ = writeln!(output, "Customers in System:");
        for point in &run.occupancy {
            let _ = writeln!(output, "{:.2} {}", point.time, point.customers);
        }
        Ok(output)
    }
}

impl Formatter for JsonFormatter {
    fn analysis(&self, analysis: &Analysis) -> Result<String> {
        to_json(analysis)
    }

    fn simulation(&self, run: &SimulationRun) -> Result<String> {
        to_json(run)
    }
}

impl Formatter for CsvFormatter {
    fn analysis(&self, analysis: &Analysis) -> Result<String> {
        let metrics = &analysis.metrics;
        let mut output = String::from("metric,value\n");
        let _ = writeln!(output, "model,{}", analysis.model);
        let _ = writeln!(output, "rho,{}", analysis.utilization);
        let _ = writeln!(output, "unstable,{}", analysis.unstable);
        let _ = writeln!(output, "p0,{}", analysis.empty_probability);
        if let Some(blocking) = analysis.blocking_probability {
            let _ = writeln!(output, "pk,{}", blocking);
        }
        let _ = writeln!(output, "lambda_eff,{}", analysis.effective_arrival_rate);
        let _ = writeln!(output, "l,{}", metrics.l);
        let _ = writeln!(output, "lq,{}", metrics.lq);
        let _ = writeln!(output, "w,{}", metrics.w);
        let _ = writeln!(output, "wq,{}", metrics.wq);
        if let Some(idle) = metrics.idle_servers {
            let _ = writeln!(output, "ci,{}", idle);
        }
        Ok(output)
    }

    fn simulation(&self, run: &SimulationRun) -> Result<String> {
        let mut output = String::from("time,customers\n");
        for point in &run.occupancy {
            let _ = writeln!(output, "{},{}", point.time, point.customers);
        }
        Ok(output)
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    let mut json =
        serde_json::to_string_pretty(value).map_err(|err| Error::Render(err.to_string()))?;
    json.push('\n');
    Ok(json)
}
