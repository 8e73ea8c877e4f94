//! legalchat CLI binary entry point.

use std::io::Write;

use clap::Parser;
use legalchat::cli::{parse_repl_line, ChatArgs, Cli, Commands, ReplInput};
use legalchat::client::LegalClient;
use legalchat::config::ClientConfig;
use legalchat::session::ChatSession;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.connection.apply(ClientConfig::from_env());
    let client = LegalClient::new(config);

    let result: Result<(), Box<dyn std::error::Error>> = match cli.command {
        Commands::Health => {
            handle_health(&client).await;
            Ok(())
        }
        Commands::Upload(args) => match client.upload_path(&args.path).await {
            Ok(res) => {
                println!("{}", res.message);
                println!("file_path: {}", res.file_path);
                Ok(())
            }
            Err(e) => Err(e.into()),
        },
        Commands::Chat(args) => handle_chat(client, args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn handle_health(client: &LegalClient) {
    let url = client.config().base_url().to_string();
    if client.check_health().await {
        println!("{url}: reachable");
    } else {
        println!("{url}: unreachable");
    }
}

async fn handle_chat(client: LegalClient, args: ChatArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = ChatSession::new(client).with_history_turns(args.history_turns);
    if let Some(path) = args.file_path {
        session.set_current_file_path(Some(path));
    }
    if let Some(path) = args.upload {
        let res = session.upload_path(&path).await?;
        eprintln!("{} ({})", res.message, res.file_path);
    }

    if let Some(prompt) = args.prompt {
        if let Some(answer) = session.send(&prompt).await? {
            println!("{answer}");
        }
        return Ok(());
    }

    if !session.client().check_health().await {
        eprintln!("warning: backend at {} is not responding", session.client().config().base_url());
    }
    eprintln!("Type a question. /upload <path>, /clear, /quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        eprint!("> ");
        let _ = std::io::stderr().flush();
        let Some(line) = lines.next_line().await? else {
            break;
        };
        match parse_repl_line(&line) {
            ReplInput::Empty => continue,
            ReplInput::Quit => break,
            ReplInput::Clear => {
                session.clear();
                eprintln!("(conversation cleared)");
            }
            ReplInput::Upload(path) => match session.upload_path(path).await {
                Ok(res) => eprintln!("{} ({})", res.message, res.file_path),
                Err(e) => eprintln!("upload failed: {e}"),
            },
            ReplInput::Ask(query) => match session.send(query).await {
                Ok(Some(answer)) => println!("{answer}\n"),
                Ok(None) => {}
                Err(e) => eprintln!("error: {e}"),
            },
        }
    }

    Ok(())
}
