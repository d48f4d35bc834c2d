use clap::Parser;
use tracing::error;

use deposit_split::cli::{Cli, Command};
use deposit_split::core::SummaryView;

#[tokio::main]
async fn main() {
    deposit_split::logging::init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => {
            if let Err(e) = deposit_split::api::run_http_server(args.socket_addr()).await {
                error!(error = %e, "server error");
                std::process::exit(1);
            }
        }
        Command::Report(args) => {
            let view = SummaryView::build(&args.calculator());
            print!("{}", view.render_text());
        }
    }
}
