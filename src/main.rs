//! Finsight main entry point

use clap::Parser;
use finsight_api::start_server;
use finsight_config::Config;
use finsight_core::Report;
use finsight_parser::DefaultTableParser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::RwLock;

#[derive(Parser, Debug)]
#[command(name = "finsight")]
#[command(author = "Finsight Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight web dashboard for P&L account hierarchies", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let rt = Runtime::new()?;

    rt.block_on(async {
        let config = Config::load(args.config.clone())
            .expect("Failed to load configuration");

        eprintln!("[INFO] Config loaded: data path={}, accounts_file={}",
            config.data.path.to_string_lossy(), config.data.accounts_file);

        let parser = Arc::new(DefaultTableParser::default());
        let report = Arc::new(RwLock::new(Report::new(config.clone(), parser)));

        let accounts_path = config.accounts_path();
        {
            let report_guard = report.read().await;
            if !config.data.use_embedded && accounts_path.exists() {
                eprintln!("[INFO] Loading account table: {}", accounts_path.display());
                match report_guard.load(accounts_path.clone()).await {
                    Ok(_) => eprintln!("[INFO] Account table loaded successfully"),
                    Err(e) => {
                        eprintln!("[ERROR] Failed to load account table: {:?}", e);
                        eprintln!("[WARN] Falling back to the embedded default table");
                        if let Err(e) = report_guard.load_embedded().await {
                            eprintln!("[ERROR] Failed to load embedded table: {:?}", e);
                        }
                    }
                }
            } else {
                if !config.data.use_embedded {
                    eprintln!("[WARN] Account table not found: {}", accounts_path.display());
                }
                eprintln!("[INFO] Using the embedded default table");
                if let Err(e) = report_guard.load_embedded().await {
                    eprintln!("[ERROR] Failed to load embedded table: {:?}", e);
                }
            }
        }

        start_server(config, report).await
    });

    Ok(())
}
