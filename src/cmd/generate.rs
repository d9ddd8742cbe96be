use crate::reports;
use clap::Args;
use pinforge::api::{self, ApiError, GenerateRequest, PinForgeState};
use pinforge::log::SequenceLog;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Lock type code or alias (A1100, SC1, KW1, SAFE, ...).
    #[arg(short = 'l', long, default_value = "A1100")]
    pub lock_type: String,

    /// Pin count, or combination length for SAFE.
    #[arg(short, long)]
    pub pins: Option<String>,

    #[arg(long, default_value_t = false)]
    pub standard: bool,
    #[arg(long, default_value_t = false)]
    pub spool: bool,
    #[arg(long, default_value_t = false)]
    pub serrated: bool,
    #[arg(long, default_value_t = false)]
    pub hard_mode: bool,
    #[arg(long, default_value_t = false)]
    pub macs_mode: bool,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Generate this many sequences in a row.
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl GenerateArgs {
    pub fn to_request(&self) -> GenerateRequest {
        let flag = |on: bool| Some(on.to_string());
        GenerateRequest {
            lock_type: Some(self.lock_type.clone()),
            pins: self.pins.clone(),
            standard: flag(self.standard),
            spool: flag(self.spool),
            serrated: flag(self.serrated),
            hard_mode: flag(self.hard_mode),
            macs_mode: flag(self.macs_mode),
        }
    }
}

pub fn run<L: SequenceLog>(args: &GenerateArgs, state: &PinForgeState<L>) -> Result<(), ApiError> {
    let request = args.to_request();

    for _ in 0..args.count.max(1) {
        let pins = api::generate_sequence(state, &request)?;
        if args.json {
            let body = serde_json::to_string(&pins).map_err(|e| ApiError {
                kind: "internal".to_string(),
                message: e.to_string(),
            })?;
            println!("{}", body);
        } else {
            reports::print_sequence(&args.lock_type, &pins);
        }
    }

    if args.count > 1 && !args.json {
        reports::print_history(&api::recent_sequences(state));
    }
    Ok(())
}
