#[tokio::main]
async fn main() {
    if let Err(err) = botiquin::run().await {
        eprintln!("botiquin failed to start: {err}");
        std::process::exit(1);
    }
}
