#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use network_plan::{NetworkPlan, ServiceConfig, http_api, logging};

    let config = ServiceConfig::from_env()?;
    logging::init_logging(config.log_filter.as_deref())?;

    let addr = config.listen_addr;
    println!("network-plan HTTP API listening on http://{addr}");
    let plan = NetworkPlan::with_metadata(config.initial_metadata());
    http_api::serve(addr, plan).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
