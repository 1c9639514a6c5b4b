use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use flatsocial::config::MAX_POST_LENGTH;
use flatsocial::{Post, Profile, SocialError, SocialNetwork, StoreConfig};

#[derive(Parser, Debug)]
#[command(name = "flatsocial", about = "A tiny social network kept in three text files")]
struct Args {
    /// Directory holding users.txt, friendships.txt and posts.txt.
    /// Defaults to $FLATSOCIAL_DATA_DIR, then the current directory.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Create the demo accounts (test, alice, bob) if they are missing.
    #[arg(long)]
    seed: bool,

    /// Print profiles, friend lists and feeds as JSON.
    #[arg(long)]
    json: bool,
}

struct Console<R> {
    input: R,
    json: bool,
}

impl<R: BufRead> Console<R> {
    /// `None` once stdin is closed.
    fn prompt(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        print!("{label}");
        io::stdout().flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// First whitespace-separated token, like reading a single word.
    fn prompt_word(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        Ok(self
            .prompt(label)?
            .map(|line| line.split_whitespace().next().unwrap_or_default().to_string()))
    }

    fn emit_json<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

fn print_post(post: &Post) {
    println!("[{}] {}: {}", post.timestamp, post.username, post.content);
}

fn show_profile<R: BufRead>(console: &Console<R>, profile: &Profile) -> anyhow::Result<()> {
    if console.json {
        return console.emit_json(profile);
    }
    println!("--------------------------------");
    println!("Profile: {}", profile.username);
    println!("Bio: {}", profile.bio);
    println!("--------------------------------");
    println!("Posts by {}:", profile.username);
    if profile.posts.is_empty() {
        println!("(No posts yet)");
    }
    for post in &profile.posts {
        print_post(post);
    }
    Ok(())
}

fn show_friends<R: BufRead>(
    console: &Console<R>,
    network: &SocialNetwork,
    username: &str,
) -> anyhow::Result<()> {
    if network.store().find_user(username).is_none() {
        println!("{}", SocialError::UnknownUser(username.to_string()));
        return Ok(());
    }
    let friends = network.friends_of(username);
    if console.json {
        return console.emit_json(&friends);
    }
    println!("--------------------------------");
    println!("{username}'s Friends:");
    if friends.is_empty() {
        println!("(No friends yet)");
    }
    for friend in &friends {
        println!("- {friend}");
    }
    println!("--------------------------------");
    Ok(())
}

fn show_feed<R: BufRead>(console: &Console<R>, feed: &[Post]) -> anyhow::Result<()> {
    if console.json {
        return console.emit_json(&feed);
    }
    println!("--------------------------------");
    println!("Your Social Feed:");
    println!("--------------------------------");
    if feed.is_empty() {
        println!("No posts in your feed yet. Add friends or post something!");
    }
    for post in feed {
        print_post(post);
    }
    println!("--------------------------------");
    Ok(())
}

/// Prints the outcome of a library call. Errors become messages, the loop
/// keeps going.
fn report<T>(result: flatsocial::Result<T>, on_ok: impl FnOnce(T)) {
    match result {
        Ok(value) => on_ok(value),
        Err(err @ SocialError::Persistence { .. }) => {
            println!("Warning: {err}. Your change is kept for this session only.");
        }
        Err(err) => println!("{err}."),
    }
}

enum Flow {
    Continue,
    Exit,
}

fn anonymous_menu<R: BufRead>(
    console: &mut Console<R>,
    network: &mut SocialNetwork,
) -> anyhow::Result<Flow> {
    println!("\n--- Main Menu ---");
    println!("1. Register");
    println!("2. Login");
    println!("3. Exit");
    let Some(choice) = console.prompt_word("Enter choice: ")? else {
        return Ok(Flow::Exit);
    };

    match choice.as_str() {
        "1" => {
            let Some(username) = console.prompt_word("Enter desired username: ")? else {
                return Ok(Flow::Exit);
            };
            if network.store().user_exists(&username) {
                println!("Username already taken. Please choose another.");
                return Ok(Flow::Continue);
            }
            let Some(password) = console.prompt_word("Enter password: ")? else {
                return Ok(Flow::Exit);
            };
            let Some(bio) = console.prompt("Enter a short bio (e.g., 'Loves coding'): ")? else {
                return Ok(Flow::Exit);
            };
            report(network.register(&username, &password, &bio), |user| {
                println!("User {} registered successfully!", user.username)
            });
        }
        "2" => {
            let Some(username) = console.prompt_word("Enter username: ")? else {
                return Ok(Flow::Exit);
            };
            let Some(password) = console.prompt_word("Enter password: ")? else {
                return Ok(Flow::Exit);
            };
            report(network.login(&username, &password), |()| {
                println!("Welcome, {username}!")
            });
        }
        "3" => {
            println!("Exiting. Goodbye!");
            return Ok(Flow::Exit);
        }
        _ => println!("Invalid choice. Please try again."),
    }
    Ok(Flow::Continue)
}

fn member_menu<R: BufRead>(
    console: &mut Console<R>,
    network: &mut SocialNetwork,
) -> anyhow::Result<Flow> {
    let me = network.current_user().unwrap_or_default().to_string();

    println!("\n--- Logged In Menu ---");
    println!("1. View My Profile");
    println!("2. View My Friends");
    println!("3. Add Friend");
    println!("4. Remove Friend");
    println!("5. Post Message");
    println!("6. View Social Feed");
    println!("7. Search User Profile");
    println!("8. Logout");
    let Some(choice) = console.prompt_word("Enter choice: ")? else {
        return Ok(Flow::Exit);
    };

    match choice.as_str() {
        "1" => match network.profile_of(&me) {
            Ok(profile) => show_profile(console, &profile)?,
            Err(err) => println!("{err}."),
        },
        "2" => show_friends(console, network, &me)?,
        "3" => {
            let Some(friend) = console.prompt_word("Enter username of person to add as friend: ")? else {
                return Ok(Flow::Exit);
            };
            report(network.add_friend(&friend), |()| {
                println!("You are now friends with {friend}!")
            });
        }
        "4" => {
            let Some(friend) =
                console.prompt_word("Enter username of person to remove from friends: ")?
            else {
                return Ok(Flow::Exit);
            };
            report(network.remove_friend(&friend), |()| {
                println!("You have removed {friend} from your friends.")
            });
        }
        "5" => {
            let label = format!("Enter your message (max {MAX_POST_LENGTH} chars): ");
            let Some(content) = console.prompt(&label)? else {
                return Ok(Flow::Exit);
            };
            let original_len = content.chars().count();
            report(network.post(&content), |post| {
                if post.content.chars().count() < original_len {
                    println!("Message truncated to {MAX_POST_LENGTH} characters.");
                }
                println!("Message posted successfully!");
            });
        }
        "6" => match network.build_feed() {
            Ok(feed) => show_feed(console, &feed)?,
            Err(err) => println!("{err}."),
        },
        "7" => {
            let Some(target) = console.prompt_word("Enter username to search: ")? else {
                return Ok(Flow::Exit);
            };
            match network.profile_of(&target) {
                Ok(profile) => show_profile(console, &profile)?,
                Err(err) => println!("{err}."),
            }
        }
        "8" => {
            network.logout();
            println!("Logged out successfully.");
        }
        _ => println!("Invalid choice. Please try again."),
    }
    Ok(Flow::Continue)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flatsocial=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = match args.data_dir {
        Some(dir) => StoreConfig::new(dir),
        None => StoreConfig::from_env(),
    };
    let data_dir = config.data_dir().display().to_string();

    let mut network = match SocialNetwork::open(config) {
        Ok(network) => network,
        Err(err) => {
            eprintln!("Could not load data from {data_dir}: {err}");
            std::process::exit(err.exit_code());
        }
    };

    if args.seed {
        network
            .seed_demo_data()
            .with_context(|| format!("seeding demo data in {data_dir}"))?;
    }

    let stdin = io::stdin();
    let mut console = Console {
        input: stdin.lock(),
        json: args.json,
    };

    loop {
        let flow = if network.is_authenticated() {
            member_menu(&mut console, &mut network)?
        } else {
            anonymous_menu(&mut console, &mut network)?
        };
        if let Flow::Exit = flow {
            break;
        }
    }

    Ok(())
}
