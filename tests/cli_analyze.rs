use predicates::str::{contains, diff};

#[test]
fn mm1_human_output_is_stable() {
    let expected = concat!(
        "M/M/1 Model:\n",
        "rho: 0.800\n",
        "P0: 0.200\n",
        "L: 4.000\n",
        "Lq: 3.200\n",
        "W: 1.000\n",
        "Wq: 0.800\n",
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queue-lab");
    cmd.args(["analyze", "--lambda", "4", "--mu", "5"]);
    cmd.assert().success().stdout(diff(expected));
}

#[test]
fn mmc_reports_idle_capacity() {
    let expected = concat!(
        "M/M/c Model:\n",
        "rho: 0.667\n",
        "P0: 0.111\n",
        "L: 2.889\n",
        "Lq: 0.889\n",
        "W: 1.444\n",
        "Wq: 0.444\n",
        "Ci: 1.000\n",
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queue-lab");
    cmd.args(["analyze", "--lambda", "2", "--mu", "1", "--servers", "3"]);
    cmd.assert().success().stdout(diff(expected));
}

#[test]
fn mm1k_unit_load_reports_blocking() {
    let expected = concat!(
        "M/M/1/K Model:\n",
        "rho: 1.000\n",
        "P0: 0.200\n",
        "PK: 0.200\n",
        "lambda_eff: 1.600\n",
        "L: 2.000\n",
        "Lq: 1.200\n",
        "W: 1.250\n",
        "Wq: 0.750\n",
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queue-lab");
    cmd.args(["analyze", "--lambda", "2", "--mu", "2", "--capacity", "4"]);
    cmd.assert().success().stdout(diff(expected));
}

#[test]
fn unstable_system_still_prints_metrics() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queue-lab");
    cmd.args(["analyze", "--lambda", "6", "--mu", "5"]);
    cmd.assert()
        .success()
        .stdout(contains("Warning: system is unstable"))
        .stdout(contains("L: -6.000\n"));
}

#[test]
fn mmck_csv_lists_blocking_and_idle_capacity() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("queue-lab");
    cmd.args([
        "analyze",
        "--lambda",
        "2",
        "--mu",
        "1",
        "--servers",
        "2",
        "--capacity",
        "2",
        "--format",
        "csv",
    ]);
    cmd.assert()
        .success()
        .stdout(contains("metric,value\nmodel,M/M/c/K\n"))
        .stdout(contains("pk,0.4"))
        .stdout(contains("lq,0\n"))
        .stdout(contains("ci,"));
}
