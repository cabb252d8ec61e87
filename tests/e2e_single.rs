
use std::fs;
use std::process::Output;

use tempfile::tempdir;

use support_single::{closed_port_url, run_httpbench, spawn_http_server};

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn describe(output: &Output) -> String {
    format!(
        "status: {:?}\nstdout: {}\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

#[test]
fn e2e_single_count_run() -> Result<(), String> {
    let (url, _server) = spawn_http_server()?;

    let output = run_httpbench(["-u", url.as_str(), "-c", "4", "-n", "40"])?;
    if !output.status.success() {
        return Err(describe(&output));
    }
    let stdout = stdout_of(&output);
    for expected in [
        "Benchmarking finished.",
        "Requests completed: 40",
        "Requests failed: 0",
        "Min response time:",
        "Avg response time:",
    ] {
        if !stdout.contains(expected) {
            return Err(format!("missing '{}'\n{}", expected, describe(&output)));
        }
    }
    Ok(())
}

#[test]
fn e2e_single_failures_still_exit_zero() -> Result<(), String> {
    let url = closed_port_url()?;

    let output = run_httpbench(["-u", url.as_str(), "-c", "2", "-n", "10"])?;
    if !output.status.success() {
        return Err(describe(&output));
    }
    let stdout = stdout_of(&output);
    if !stdout.contains("Requests completed: 0")
        || !stdout.contains("Requests failed: 10")
        || !stdout.contains("Latency: unavailable (no successful requests)")
    {
        return Err(describe(&output));
    }
    Ok(())
}

#[test]
fn e2e_single_json_output() -> Result<(), String> {
    let (url, _server) = spawn_http_server()?;

    let output = run_httpbench([
        "-u",
        url.as_str(),
        "-n",
        "5",
        "--output-format",
        "json",
    ])?;
    if !output.status.success() {
        return Err(describe(&output));
    }
    let value: serde_json::Value = serde_json::from_str(stdout_of(&output).trim())
        .map_err(|err| format!("invalid json: {}\n{}", err, describe(&output)))?;
    if value["summary"]["success_count"] != 5 || value["submitted"] != 5 {
        return Err(describe(&output));
    }
    Ok(())
}

#[test]
fn e2e_single_missing_url_exits_one() -> Result<(), String> {
    let output = run_httpbench(["-c", "2"])?;
    if output.status.code() != Some(1) {
        return Err(describe(&output));
    }
    if !String::from_utf8_lossy(&output.stderr).contains("URL") {
        return Err(describe(&output));
    }
    Ok(())
}

#[test]
fn e2e_single_zero_clients_exits_one() -> Result<(), String> {
    let output = run_httpbench(["-u", "http://127.0.0.1:9/", "-c", "0"])?;
    if output.status.code() != Some(1) {
        return Err(describe(&output));
    }
    Ok(())
}

#[test]
fn e2e_single_unknown_flag_exits_one() -> Result<(), String> {
    let output = run_httpbench(["--definitely-not-a-flag"])?;
    if output.status.code() != Some(1) {
        return Err(describe(&output));
    }
    Ok(())
}

#[test]
fn e2e_single_help_exits_zero() -> Result<(), String> {
    let output = run_httpbench(["--help"])?;
    if !output.status.success() || !stdout_of(&output).contains("--clients") {
        return Err(describe(&output));
    }
    Ok(())
}

#[test]
fn e2e_single_config_file() -> Result<(), String> {
    let (url, _server) = spawn_http_server()?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("bench.toml");
    fs::write(
        &path,
        format!("url = \"{}\"\nclients = 2\nrequests = 12\n", url),
    )
    .map_err(|err| format!("write config failed: {}", err))?;
    let path = path.to_string_lossy().into_owned();

    let output = run_httpbench(["--config", path.as_str()])?;
    if !output.status.success() || !stdout_of(&output).contains("Requests completed: 12") {
        return Err(describe(&output));
    }
    Ok(())
}
