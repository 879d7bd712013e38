use loan_qualifier_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("loan qualifier error: {err}");
        std::process::exit(1);
    }
}
