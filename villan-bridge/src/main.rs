use villan_bridge::{
    Config, PrintDispatcher, SequenceAllocator, TicketRenderer, ZettleClient, init_logger,
    run_cycle,
};
use villan_printer::{NetworkPrinter, Printer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config = Config::from_env()?;
    init_logger(&config.log_level);

    tracing::info!("Villan print bridge starting...");

    // Net paths were validated during config load
    let mut registers = std::collections::HashMap::new();
    for (name, path) in &config.registers {
        let printer = NetworkPrinter::from_net_path(path)?;
        if !printer.is_online().await {
            tracing::warn!(register = %name, endpoint = %printer.endpoint(), "Register printer unreachable");
        }
        registers.insert(name.clone(), printer);
    }

    let kitchen = NetworkPrinter::from_net_path(&config.kitchen_printer)?;
    if !kitchen.is_online().await {
        tracing::warn!(endpoint = %kitchen.endpoint(), "Kitchen printer unreachable");
    }

    let client = ZettleClient::new(&config);
    let dispatcher = PrintDispatcher::new(registers, kitchen, TicketRenderer::default());
    let sequence = SequenceAllocator::new();

    let summary = run_cycle(&client, &dispatcher, &sequence, config.fetch_limit).await?;

    tracing::info!(
        printed = summary.printed,
        failed_destinations = summary.failed_destinations,
        "Bridge cycle finished"
    );

    Ok(())
}
