//! Result service: serves vote counts on `GET /results`.

use ballot_server::Service;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ballot_server::run(Service::Results).await
}
