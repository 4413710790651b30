use std::process::ExitCode;

fn main() -> ExitCode {
    match zsh_autocomplete::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
