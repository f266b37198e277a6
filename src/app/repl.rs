use crate::app::render;
use crate::core::browser::BreedBrowser;
use crate::domain::model::{Breed, ImageRef, SubBreed};
use crate::domain::ports::{FavoritesStore, TaxonomyService};
use std::io::Write;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub const HELP: &str = "\
Commands:
  breeds            list all breeds
  select <breed>    select a breed
  check <sub>       check / uncheck a sub-breed
  subs <a,b,...>    replace the sub-breed selection
  next | prev       browse the gallery
  fav               toggle favorite on the current image
  favs              list favorites
  unfav <image>     remove a favorite
  show              print the current view
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Breeds,
    Select(Breed),
    Check(SubBreed),
    Subs(Vec<SubBreed>),
    Next,
    Prev,
    Fav,
    Favorites,
    Unfav(ImageRef),
    Show,
    Help,
    Quit,
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

impl FromStr for ReplCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let require = |what: &str| -> Result<(), String> {
            if rest.is_empty() {
                Err(format!("usage: {} <{}>", word, what))
            } else {
                Ok(())
            }
        };

        match word.to_lowercase().as_str() {
            "breeds" => Ok(ReplCommand::Breeds),
            "select" => {
                require("breed")?;
                Ok(ReplCommand::Select(Breed::new(normalize(rest))))
            }
            "check" => {
                require("sub-breed")?;
                Ok(ReplCommand::Check(SubBreed::new(normalize(rest))))
            }
            "subs" => Ok(ReplCommand::Subs(
                rest.split(',')
                    .map(normalize)
                    .filter(|s| !s.is_empty())
                    .map(SubBreed::new)
                    .collect(),
            )),
            "next" => Ok(ReplCommand::Next),
            "prev" | "previous" => Ok(ReplCommand::Prev),
            "fav" => Ok(ReplCommand::Fav),
            "favs" | "favorites" => Ok(ReplCommand::Favorites),
            "unfav" => {
                require("image")?;
                Ok(ReplCommand::Unfav(ImageRef::from(rest)))
            }
            "show" => Ok(ReplCommand::Show),
            "help" | "?" => Ok(ReplCommand::Help),
            "quit" | "exit" => Ok(ReplCommand::Quit),
            other => Err(format!("unknown command '{}', type 'help'", other)),
        }
    }
}

/// Runs one command and returns the text to print.
pub async fn execute<T, S>(browser: &BreedBrowser<T, S>, command: ReplCommand) -> String
where
    T: TaxonomyService + ?Sized + 'static,
    S: FavoritesStore,
{
    let result = match command {
        ReplCommand::Breeds => return render::render_breeds(&browser.breeds().await),
        ReplCommand::Select(breed) => {
            browser.select_breed(breed).await;
            Ok(())
        }
        ReplCommand::Check(sub_breed) => browser.toggle_sub_breed(sub_breed).await,
        ReplCommand::Subs(selection) => browser.set_sub_breeds(selection).await,
        ReplCommand::Next => {
            browser.next();
            Ok(())
        }
        ReplCommand::Prev => {
            browser.previous();
            Ok(())
        }
        ReplCommand::Fav => match browser.toggle_current_favorite() {
            Ok(None) => return "No image to mark.".to_string(),
            Ok(Some(_)) => Ok(()),
            Err(e) => Err(e),
        },
        ReplCommand::Favorites => return render::render_favorites(&browser.favorites()),
        ReplCommand::Unfav(image) => match browser.remove_favorite(&image) {
            Ok(true) => return format!("Removed {}", image),
            Ok(false) => return format!("{} is not a favorite", image),
            Err(e) => Err(e),
        },
        ReplCommand::Show => Ok(()),
        ReplCommand::Help => return HELP.to_string(),
        ReplCommand::Quit => return String::new(),
    };

    match result {
        Ok(()) => render::render_snapshot(&browser.snapshot()),
        Err(e) => {
            tracing::debug!("Command failed: {}", e);
            format!("❌ {}\n💡 {}", e.user_friendly_message(), e.recovery_suggestion())
        }
    }
}

/// 互動模式主迴圈，讀到 quit 或 EOF 結束
pub async fn run<T, S, R, W>(browser: &BreedBrowser<T, S>, input: R, output: &mut W) -> anyhow::Result<()>
where
    T: TaxonomyService + ?Sized + 'static,
    S: FavoritesStore,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(output, "{}", HELP)?;
    let mut lines = input.lines();

    loop {
        write!(output, "> ")?;
        output.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<ReplCommand>() {
            Ok(ReplCommand::Quit) => break,
            Ok(command) => writeln!(output, "{}", execute(browser, command).await)?,
            Err(hint) => writeln!(output, "{}", hint)?,
        }
    }

    tracing::info!("👋 Session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStore;
    use crate::core::testing::FakeTaxonomy;
    use std::sync::Arc;

    #[test]
    fn test_parse_commands() {
        assert_eq!("breeds".parse::<ReplCommand>(), Ok(ReplCommand::Breeds));
        assert_eq!(
            "select  Hound ".parse::<ReplCommand>(),
            Ok(ReplCommand::Select(Breed::from("hound")))
        );
        assert_eq!(
            "subs afghan, Basset".parse::<ReplCommand>(),
            Ok(ReplCommand::Subs(vec![SubBreed::from("afghan"), SubBreed::from("basset")]))
        );
        assert_eq!("subs".parse::<ReplCommand>(), Ok(ReplCommand::Subs(vec![])));
        assert_eq!(
            "unfav https://img/A.jpg".parse::<ReplCommand>(),
            Ok(ReplCommand::Unfav(ImageRef::from("https://img/A.jpg")))
        );
        assert_eq!("PREV".parse::<ReplCommand>(), Ok(ReplCommand::Prev));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "select".parse::<ReplCommand>(),
            Err("usage: select <breed>".to_string())
        );
        assert!("bark".parse::<ReplCommand>().unwrap_err().contains("unknown command"));
    }

    #[tokio::test]
    async fn test_session_script() {
        let taxonomy = Arc::new(
            FakeTaxonomy::new()
                .with_breed("akita", &[])
                .with_breed("hound", &["afghan", "basset"]),
        );
        let store = MemoryStore::new();
        let browser = BreedBrowser::new(taxonomy, store.clone());

        let script = "select hound\ncheck basset\nnext\nfav\ncheck corgi\nfavs\nquit\nselect akita\n";
        let mut output = Vec::new();
        run(&browser, script.as_bytes(), &mut output).await.unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.contains("[x] Afghan  [x] Basset"));
        assert!(text.contains("Image 2/2: https://img/hound-basset.jpg ★"));
        assert!(text.contains("'corgi' is not a sub-breed of 'hound'"));
        assert!(text.contains("  1. https://img/hound-basset.jpg"));
        // stopped at quit
        assert!(!text.contains("Akita"));
        assert_eq!(store.payload().as_deref(), Some(r#"["https://img/hound-basset.jpg"]"#));
    }
}
