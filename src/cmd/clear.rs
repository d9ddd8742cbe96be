use pinforge::api::{self, ApiError, PinForgeState};
use pinforge::log::SequenceLog;

pub fn run<L: SequenceLog>(state: &PinForgeState<L>) -> Result<(), ApiError> {
    let message = api::clear_log(state)?;
    println!("{}", message);
    Ok(())
}
