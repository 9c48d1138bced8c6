#![forbid(unsafe_code)]

fn main() {
    tint_cli::util::init_tracing();
    let integration = tint_cli::util::OutputIntegration::detect();
    if let Err(error) = tint_cli::run_from_env() {
        if integration.should_emit_json() {
            eprintln!(
                "{}",
                serde_json::json!({
                    "status": "error",
                    "error": error.to_string(),
                    "exit_code": error.exit_code(),
                })
            );
        } else {
            eprintln!("error: {error}");
        }
        std::process::exit(error.exit_code());
    }
}
