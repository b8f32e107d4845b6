#[tokio::main]
async fn main() {
    if let Err(e) = deepshield_server::start_server().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
