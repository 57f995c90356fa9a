//! Output formatting for the plugin

use opcache_lib::CheckOutcome;

/// Lines printed before the status line when `--debug` is set
pub fn debug_lines(location: &str, outcome: &CheckOutcome) -> Vec<String> {
    let mut lines = vec![format!("URL : {}", location)];

    match &outcome.response {
        Some(response) => lines.push(format!("Response : {}", response.transcript())),
        None => lines.push("Response : none (request failed)".to_string()),
    }

    if let Some(sample) = &outcome.sample {
        match serde_json::to_string(sample) {
            Ok(json) => lines.push(format!("Sample : {}", json)),
            Err(e) => lines.push(format!("Sample : <unserializable: {}>", e)),
        }
    }

    for metric in &outcome.result.metrics {
        lines.push(metric.summary());
    }

    lines
}

pub fn print_debug(location: &str, outcome: &CheckOutcome) {
    for line in debug_lines(location, outcome) {
        println!("{}", line);
    }
}
