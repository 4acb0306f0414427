//! Voting service: accepts ballots on `POST /vote`.

use ballot_server::Service;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ballot_server::run(Service::Voting).await
}
