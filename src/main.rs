use breed_gallery::app::{render, repl};
use breed_gallery::config::cli::{Command, FavoritesAction};
use breed_gallery::core::TaxonomyService;
use breed_gallery::utils::error::{BrowserError, ErrorSeverity};
use breed_gallery::utils::logger;
use breed_gallery::{
    Breed, BreedBrowser, CliConfig, DogApiClient, ImageRef, JsonFileStore, Settings, SubBreed,
};
use clap::Parser;
use std::sync::Arc;

fn exit_with(e: &BrowserError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 依嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 4,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => {
            logger::init_cli_logger(cli.verbose, None);
            exit_with(&e);
        }
    };

    if settings.json_logs {
        logger::init_json_logger(cli.verbose, settings.log_level.as_deref());
    } else {
        logger::init_cli_logger(cli.verbose, settings.log_level.as_deref());
    }

    tracing::debug!("Effective settings: {:?}", settings);

    let taxonomy = match DogApiClient::from_config(&settings) {
        Ok(client) => Arc::new(client),
        Err(e) => exit_with(&e),
    };
    let store = JsonFileStore::new(&settings.favorites_dir, &settings.favorites_key);
    let browser = BreedBrowser::new(taxonomy.clone(), store);

    run_command(&cli.command, &settings, taxonomy.as_ref(), &browser).await
}

async fn run_command(
    command: &Command,
    settings: &Settings,
    taxonomy: &DogApiClient,
    browser: &BreedBrowser<DogApiClient, JsonFileStore>,
) -> anyhow::Result<()> {
    match command {
        Command::Breeds => {
            println!("{}", render::render_breeds(&browser.breeds().await));
        }
        Command::SubBreeds { breed } => {
            match taxonomy.list_sub_breeds(&Breed::from(breed.as_str())).await {
                Ok(subs) if subs.is_empty() => println!("{} has no sub-breeds.", render::display_name(breed)),
                Ok(subs) => {
                    for sub in subs {
                        println!("{}", render::display_name(sub.as_str()));
                    }
                }
                Err(e) => exit_with(&e),
            }
        }
        Command::Show { breed, sub_breeds } => {
            browser.select_breed(Breed::from(breed.as_str())).await;
            if !sub_breeds.is_empty() {
                let selection = sub_breeds.iter().map(|s| SubBreed::from(s.as_str())).collect();
                if let Err(e) = browser.set_sub_breeds(selection).await {
                    exit_with(&e);
                }
            }
            let snapshot = browser.snapshot();
            println!("{}", render::render_snapshot(&snapshot));
            if let breed_gallery::core::selection::Display::Gallery(gallery) = &snapshot.display {
                for image in gallery.images().iter().skip(1) {
                    println!("  {}", image);
                }
            }
        }
        Command::Favorites { action } => match action {
            FavoritesAction::List => println!("{}", render::render_favorites(&browser.favorites())),
            FavoritesAction::Toggle { image } => match browser.toggle_favorite(&ImageRef::from(image.as_str())) {
                Ok(true) => println!("⭐ Added {}", image),
                Ok(false) => println!("💔 Removed {}", image),
                Err(e) => exit_with(&e),
            },
            FavoritesAction::Remove { image } => match browser.remove_favorite(&ImageRef::from(image.as_str())) {
                Ok(true) => println!("💔 Removed {}", image),
                Ok(false) => println!("{} is not a favorite", image),
                Err(e) => exit_with(&e),
            },
        },
        Command::Browse => {
            tracing::info!("🚀 Interactive session against {}", settings.api_endpoint);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            repl::run(browser, stdin, &mut stdout).await?;
        }
    }

    Ok(())
}
