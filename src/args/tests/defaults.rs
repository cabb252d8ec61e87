use super::*;

#[test]
fn parse_args_defaults() -> AppResult<()> {
    let args = parse_test_args(["httpbench", "-u", "http://localhost"])?;

    let expected_no_color = std::env::var("NO_COLOR")
        .ok()
        .and_then(|value| parse_bool_env(&value).ok())
        .unwrap_or(false);

    let checks = [
        (
            args.url.as_deref() == Some("http://localhost"),
            "Unexpected url",
        ),
        (args.clients == 1, "Unexpected clients"),
        (args.time.get() == 30, "Unexpected time"),
        (
            args.requests == DEFAULT_TOTAL_REQUESTS,
            "Unexpected requests",
        ),
        (matches!(args.mode, RunMode::Count), "Expected RunMode::Count"),
        (
            args.request_timeout == Duration::from_secs(5),
            "Unexpected request_timeout",
        ),
        (
            matches!(args.output_format, OutputFormat::Text),
            "Expected OutputFormat::Text",
        ),
        (args.config.is_none(), "Expected config to be None"),
        (!args.verbose, "Expected verbose to be false"),
        (args.no_color == expected_no_color, "Unexpected no_color"),
    ];

    for (ok, msg) in checks {
        if !ok {
            return Err(AppError::validation(msg));
        }
    }

    Ok(())
}

#[test]
fn parse_args_without_url_is_accepted_by_cli_layer() -> AppResult<()> {
    let args = parse_test_args(["httpbench"])?;
    if args.url.is_some() {
        return Err(AppError::validation("Expected url to be None"));
    }
    Ok(())
}

#[test]
fn default_request_timeout_matches_constant() -> AppResult<()> {
    let args = parse_test_args(["httpbench", "-u", "http://localhost"])?;
    if args.request_timeout != DEFAULT_REQUEST_TIMEOUT {
        return Err(AppError::validation("Unexpected default timeout"));
    }
    Ok(())
}
