use anyhow::Context;
use clap::{Parser, Subcommand};

use orgscope::authz::{self, Principal};
use orgscope::directory::Directory;

#[derive(Parser, Debug)]
#[command(author, version, about = "orgscope scope inspection tool", long_about = None)]
struct Cli {
    /// Email of the principal to resolve scopes for
    #[arg(long)]
    email: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Projects the principal may view
    Projects,
    /// Tasks the principal may view
    Tasks,
    /// Team members, ordered by hierarchy depth
    Team,
    /// Users the principal may open a conversation with
    Peers,
    /// Chat rooms the principal participates in
    Rooms,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let directory = Directory::load_seed()?;
    let user = directory
        .user_by_email(&cli.email)
        .with_context(|| format!("no user with email {}", cli.email))?;
    let principal = Principal::from(user);

    let output = match cli.command {
        Commands::Projects => {
            serde_json::to_string_pretty(&authz::visible_projects(&principal, directory.projects()))?
        }
        Commands::Tasks => {
            let in_scope = authz::visible_projects(&principal, directory.projects());
            serde_json::to_string_pretty(&authz::visible_tasks(
                &principal,
                directory.tasks(),
                &in_scope,
            ))?
        }
        Commands::Team => {
            let users = directory.users();
            serde_json::to_string_pretty(&authz::visible_team_members(&principal, &users))?
        }
        Commands::Peers => {
            let users = directory.users();
            serde_json::to_string_pretty(&authz::authorized_chat_peers(&principal, &users))?
        }
        Commands::Rooms => {
            serde_json::to_string_pretty(&authz::visible_chat_rooms(&principal, directory.rooms()))?
        }
    };

    println!("{output}");
    Ok(())
}
