use clap::Args;
use pinforge::api::{self, ApiError, ExportRequest, PinForgeState};
use pinforge::log::SequenceLog;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Only export sequences of this lock type.
    #[arg(short = 'l', long)]
    pub lock_type: Option<String>,

    /// Keep only the most recent N sequences.
    #[arg(short, long)]
    pub entries: Option<String>,

    /// Destination file; stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

fn storage_error(e: io::Error) -> ApiError {
    ApiError {
        kind: "storage_error".to_string(),
        message: e.to_string(),
    }
}

pub fn run<L: SequenceLog>(args: &ExportArgs, state: &PinForgeState<L>) -> Result<(), ApiError> {
    let request = ExportRequest {
        filter_lock_type: args.lock_type.clone(),
        entries: args.entries.clone(),
    };

    // Buffer first so a NotFound never leaves an empty file behind.
    let mut buffer = Vec::new();
    let count = api::export_log(state, &request, &mut buffer)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &buffer).map_err(storage_error)?;
            info!("💾 Wrote {} sequences to {}", count, path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(&buffer).map_err(storage_error)?;
            handle.flush().map_err(storage_error)?;
        }
    }
    Ok(())
}
