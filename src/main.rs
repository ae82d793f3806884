mod cli;
mod config;
mod dispatch;
mod error;
mod loader;
mod logging;
mod protocol;

use std::io::{stdout, Write};

use clap::Parser;
use serde::Serialize;

use crate::cli::Args;
use crate::dispatch::{HttpTransport, RpcTransport};
use crate::protocol::RequestCollection;

fn main() {
    let args = Args::parse();
    match real_main(&args) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("[spdk_rpc_send] fatal error: {e:?}");
            log::error!("Fatal error: {:?}", e);
            std::process::exit(config::exit::ERR_SETUP);
        }
    }
}

fn real_main(args: &Args) -> anyhow::Result<i32> {
    let _logger = logging::init_logging(args.verbose, args.log_dir.as_deref())?;
    let mut out = stdout().lock();

    if args.verbose {
        let _ = writeln!(out, "{}", args.describe());
    }

    let requests = match loader::load_requests(&args.jsonfile) {
        Ok(r) => r,
        Err(e) => {
            log::error!("Cannot load {}: {}", args.jsonfile.display(), e);
            let _ = writeln!(out, "ERROR: {e}");
            return Ok(e.exit_code());
        }
    };

    let transport = HttpTransport::new(&args.client_config())?;
    let summary = run_batch(&requests, &transport, &mut out);
    let _ = out.flush();

    log::info!(
        "Batch done: {}",
        serde_json::to_string(&summary).unwrap_or_default()
    );

    Ok(if args.strict {
        summary.first_failure.unwrap_or(config::exit::SUCCESS)
    } else {
        config::exit::SUCCESS
    })
}

/// Per-run counters. `first_failure` is the exit code of the first entry that
/// did not succeed, skips included.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total: usize,
    pub sent: usize,
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub first_failure: Option<i32>,
}

impl BatchSummary {
    fn record_failure(&mut self, code: i32) {
        self.first_failure.get_or_insert(code);
    }
}

/// Processes every entry in order. No single entry can stop the batch.
pub fn run_batch(
    requests: &RequestCollection,
    transport: &dyn RpcTransport,
    out: &mut dyn Write,
) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for (name, request) in requests {
        summary.total += 1;
        let _ = writeln!(out, "\n====> Parsing request {name}\n");

        if !protocol::request_is_valid(request) {
            log::info!("Skipping {}: no method", name);
            let _ = writeln!(out, "SKIP: {name} request doesn't have any SPDK method");
            summary.skipped += 1;
            summary.record_failure(config::exit::ERR_MISSING_METHOD);
            continue;
        }

        summary.sent += 1;
        log::info!(
            "Sending request #{}: {} (method: {})",
            summary.sent,
            name,
            request["method"]
        );

        match dispatch::send_request(transport, request, out) {
            Ok(()) => summary.succeeded += 1,
            Err(e) => {
                log::info!("Request {} failed: {}", name, e);
                let _ = writeln!(out, "ERROR: {e}");
                summary.failed += 1;
                summary.record_failure(e.exit_code());
            }
        }
    }

    summary
}
