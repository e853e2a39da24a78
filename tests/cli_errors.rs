use predicates::str::contains;

#[test]
fn zero_arrival_rate_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queue-lab");
    cmd.args(["analyze", "--lambda", "0", "--mu", "5"]);
    cmd.assert()
        .failure()
        .stdout("")
        .stderr(contains("Error: arrival rate must be > 0 (got 0)"));
}

#[test]
fn negative_service_rate_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queue-lab");
    cmd.args(["analyze", "--lambda", "1", "--mu", "-2"]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: service rate must be > 0 (got -2)"));
}

#[test]
fn capacity_below_servers_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queue-lab");
    cmd.args([
        "analyze",
        "--lambda",
        "1",
        "--mu",
        "2",
        "--servers",
        "3",
        "--capacity",
        "2",
    ]);
    cmd.assert().failure().stderr(contains(
        "Error: capacity must be >= servers (capacity 2, servers 3)",
    ));
}

#[test]
fn unit_load_without_capacity_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queue-lab");
    cmd.args(["analyze", "--lambda", "5", "--mu", "5"]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: M/M/1 has no steady state at rho = 1"));
}

#[test]
fn zero_customers_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queue-lab");
    cmd.args([
        "simulate",
        "--mean-interarrival",
        "2",
        "--mean-service",
        "1",
        "--customers",
        "0",
    ]);
    cmd.assert()
        .failure()
        .stdout("")
        .stderr(contains("Error: customers must be greater than 0"));
}

#[test]
fn non_positive_mean_service_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queue-lab");
    cmd.args([
        "simulate",
        "--mean-interarrival",
        "2",
        "--mean-service",
        "0",
        "--customers",
        "3",
    ]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: mean service time must be > 0 (got 0)"));
}

#[test]
fn missing_subcommand_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queue-lab");
    cmd.assert().failure().stderr(contains("Error: "));
}
