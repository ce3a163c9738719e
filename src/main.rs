use clap::Parser;
use femoral_head::utils::{logger, validation::Validate};
use femoral_head::{AppConfig, AppError, CliConfig, Command, FemoralHeadApp};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入配置（檔案不存在時使用預設值）
    let config = match AppConfig::load_or_default(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", cli.config.display(), e);
            eprintln!("💡 Make sure the file is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if cli.json_logs || config.logging.json {
        logger::init_json_logger(config.logging.level.as_deref());
    } else {
        logger::init_cli_logger(cli.verbose, config.logging.level.as_deref());
    }
    tracing::debug!("CLI: {:?}", cli);

    if let Err(e) = config.validate() {
        report(&e);
        std::process::exit(e.exit_code());
    }

    // HTTP client construction errors go through the same reporting as the rest
    let app = match FemoralHeadApp::from_config(&config, cli.session.clone()) {
        Ok(app) => app,
        Err(e) => {
            report(&e);
            std::process::exit(e.exit_code());
        }
    };

    if let Err(e) = run(&app, cli.command).await {
        report(&e);
        std::process::exit(e.exit_code());
    }

    Ok(())
}

async fn run(
    app: &FemoralHeadApp<femoral_head::HttpTransport, femoral_head::CommandSegmenter>,
    command: Command,
) -> femoral_head::Result<()> {
    match command {
        Command::Segment { input } => {
            let output = app.segment(&input).await?;
            println!("✅ Segmentation completed. Output saved at {}", output.display());
        }
        Command::Fit {
            center,
            surface,
            publish,
        } => {
            let sphere = app.fit(center, surface)?;
            println!(
                "✅ Sphere fitted: center {}, radius {:.3}",
                sphere.center(),
                sphere.radius()
            );
            if publish {
                let ack = app.publish().await?;
                println!("✅ Data sent successfully: {}", ack.0);
            }
        }
        Command::Publish => {
            let ack = app.publish().await?;
            println!("✅ Data sent successfully: {}", ack.0);
        }
        Command::Show => match app.current()? {
            Some((sphere, payload)) => {
                println!("center: {}", sphere.center());
                println!("radius: {}", sphere.radius());
                println!("payload: {}", serde_json::to_string(&payload)?);
            }
            None => println!("No sphere data available."),
        },
    }
    Ok(())
}

fn report(e: &AppError) {
    tracing::error!("❌ {}", e);
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
}
