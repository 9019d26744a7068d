//! Terminal front-end for the word-scramble minigame.
//!
//! Uses the same storage configuration as the server, so scores land on the
//! same leaderboard.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wedding_rsvp_back::{
    config::{AppConfig, Stores, connect_remote},
    dao::{
        directory::GuestDirectory,
        leaderboard_store::{LeaderboardStore, rank_of},
    },
    state::{
        minigame::{GuessOutcome, Minigame, MinigameError, MinigamePhase},
        words::WEDDING_WORDS,
    },
};

/// Pause between a correct answer and the next word.
const FEEDBACK_DELAY: Duration = Duration::from_millis(800);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env();
    let selection = config.backend_selection();
    let (kv, _) = connect_remote(&config, selection).context("building remote storage clients")?;
    let leaderboard = Stores::build(
        &config,
        selection,
        Arc::new(GuestDirectory::default()),
        kv,
        None,
    )
    .leaderboard;

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut game = Minigame::new(WEDDING_WORDS, rand::rng());

    println!("Word Scramble: unscramble the wedding words.");
    println!("Commands: /hint, /skip, /board, /quit\n");

    loop {
        let Some(nickname) = prompt(&mut input, "Nickname: ").await? else {
            return Ok(());
        };
        match game.start(&nickname) {
            Ok(_) => break,
            Err(MinigameError::Nickname(err)) => println!("{err}"),
            Err(err) => return Err(err.into()),
        }
    }

    loop {
        match game.phase() {
            MinigamePhase::Playing => {
                let (drawn, total) = game.progress();
                println!(
                    "\nWord {drawn} of {total}    Score: {}\n    {}",
                    game.score(),
                    game.scrambled().unwrap_or_default()
                );
                let Some(line) = prompt(&mut input, "> ").await? else {
                    return Ok(());
                };
                match line.trim() {
                    "/quit" => return Ok(()),
                    "/hint" => println!("Hint: {}", game.reveal_hint()?),
                    "/skip" => {
                        game.skip()?;
                    }
                    "/board" => {
                        if game.toggle_leaderboard() {
                            print_board(&leaderboard).await;
                        }
                    }
                    guess => match game.guess(guess)? {
                        GuessOutcome::Correct { awarded } => {
                            println!("Correct! +{awarded}");
                            tokio::time::sleep(FEEDBACK_DELAY).await;
                            game.advance()?;
                        }
                        GuessOutcome::Wrong => println!("Not quite, try again."),
                        GuessOutcome::Ignored => {}
                    },
                }
            }
            MinigamePhase::Complete => {
                println!("\nGame complete! Final score: {}", game.score());
                if let Some(submission) = game.take_submission() {
                    let score = i64::from(submission.score);
                    match leaderboard.submit(&submission.nickname, score).await {
                        Ok(entries) => match rank_of(&entries, &submission.nickname, score) {
                            Some(rank) => println!("You placed #{rank} on the leaderboard."),
                            None => println!("Not quite enough for the top 10 this time."),
                        },
                        Err(err) => println!("Could not save your score: {err}"),
                    }
                }
                print_board(&leaderboard).await;

                let again = prompt(&mut input, "Play again? [y/N] ").await?;
                if !matches!(again.as_deref().map(str::trim), Some("y" | "Y")) {
                    return Ok(());
                }
                game.restart()?;
            }
            MinigamePhase::NicknameEntry => unreachable!("the game starts before this loop"),
        }
    }
}

async fn prompt(input: &mut Lines<BufReader<Stdin>>, label: &str) -> anyhow::Result<Option<String>> {
    use std::io::Write;

    print!("{label}");
    std::io::stdout().flush().context("flushing stdout")?;
    input.next_line().await.context("reading stdin")
}

async fn print_board(leaderboard: &LeaderboardStore) {
    match leaderboard.get_top().await {
        Ok(entries) if entries.is_empty() => println!("\nLeaderboard is empty."),
        Ok(entries) => {
            println!("\nLeaderboard");
            for (rank, entry) in entries.iter().enumerate() {
                println!("{:>3}. {:<20} {:>4}", rank + 1, entry.nickname, entry.score);
            }
        }
        Err(err) => println!("\nLeaderboard unavailable: {err}"),
    }
}
