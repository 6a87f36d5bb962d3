use checkout_form::cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Load .env file if it exists (optional - won't fail if missing)
    // This must happen before any config is read from environment
    if let Err(e) = dotenvy::dotenv() {
        // Only warn if the error is NOT "file not found"
        if !e.to_string().contains("not found") {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    match cli::run_cli() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            cli::exit_code_for(&e)
        }
    }
}
