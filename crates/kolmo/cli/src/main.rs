//! kolmo - prompt annealing and corpus condensation

#[tokio::main]
async fn main() {
    if let Err(e) = kolmo_cli::run().await {
        kolmo_cli::output::print_error(&e.to_string());
        std::process::exit(1);
    }
}
