use clap::Parser;

use qrmatic::cli::{Cli, Commands};
use qrmatic::config::init_config;
use qrmatic::interfaces::cli::run_cli_command;
use qrmatic::runtime::run_server;
use qrmatic::system::logging::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match init_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };

    match cli.command {
        None | Some(Commands::Serve) => {
            // guard 需存活到 main 结束，保证日志落盘
            let _guard = init_logging(&config.logging)?;
            run_server(&config).await
        }
        Some(cmd) => {
            if let Err(e) = run_cli_command(cmd, &config).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
