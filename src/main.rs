use std::env;

#[tokio::main]
async fn main() {
    savefun::telemetry::init();

    let raw_args: Vec<String> = env::args().collect();
    match raw_args.get(1).map(|s| s.as_str()) {
        Some("serve") => {
            let port = raw_args
                .get(2)
                .and_then(|s| s.parse::<u16>().ok())
                .unwrap_or(8080);
            if let Err(e) = savefun::api::run_http_server(port).await {
                tracing::error!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Some("project") => match savefun::api::run_cli(raw_args.iter().skip(1)) {
            Ok(output) => println!("{output}"),
            Err(savefun::api::ApiError::Cli(e)) => {
                let _ = e.print();
                std::process::exit(if e.use_stderr() { 1 } else { 0 });
            }
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        _ => {
            eprintln!("Usage: savefun serve [port] | savefun project [--help]");
            std::process::exit(1);
        }
    }
}
