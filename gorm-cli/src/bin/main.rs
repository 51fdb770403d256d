use clap::Parser;
use dotenvy::dotenv;
use gorm_cli::{Cli, Commands, handle_error, run_generate_command};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();
    let verbose = cli.verbose;

    match cli.command {
        Commands::Generate { command } => {
            run_generate_command(command, verbose)
                .await
                .unwrap_or_else(handle_error);
        }
    }
}
