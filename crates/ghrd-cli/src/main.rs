mod cli;

use crate::cli::exit;

fn main() {
    let code = match cli::run_from_args() {
        Ok(outcome) => {
            println!(
                "Downloaded {} ({} bytes) from {} to {}",
                outcome.asset_name,
                outcome.bytes,
                outcome.tag,
                outcome.path.display()
            );
            exit::OK
        }
        Err(failure) => {
            failure.report();
            failure.exit_code()
        }
    };
    std::process::exit(code);
}
