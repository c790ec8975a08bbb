use clap::Parser;
use salon_scrape::domain::ports::ConfigProvider;
use salon_scrape::utils::{logger, validation::Validate};
use salon_scrape::{CliConfig, LocalStorage, ScrapeEngine};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting salon-scrape");

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    let input = match config.scrape_input() {
        Ok(input) => input,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(e.exit_code());
        }
    };

    let output_path = config.output_path().to_string();
    let storage = LocalStorage::new(output_path.clone());
    let engine = ScrapeEngine::new(config, storage.clone(), storage);

    match engine.run(&input).await {
        Ok(output) => {
            tracing::info!("✅ Run completed successfully");
            println!(
                "✅ Reservation {} extracted: {} {}",
                input.query.reserve_id, output.reservation.date, output.reservation.start_time
            );
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!("❌ Run failed: {}", e);
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
